#[cfg(test)]
mod tests;

use crate::{
    MAX_PROPERTY_DEPTH,
    error::SchemaError,
    member::PropertyMember,
    property::Property,
};
use std::{any::Any, collections::HashSet, sync::Arc};

///
/// StructureKind
///
/// Implemented by structure root types. `NAME` is the registry cache key
/// and must be unique per distinct structure type within the process.
///

pub trait StructureKind: Any + Sized {
    const NAME: &'static str;

    fn layout() -> StructureLayout;
}

///
/// LayoutMember
///
/// One declared member of a layout. Node-shaped members carry the nested
/// type's layout so the builder can descend into it.
///

#[derive(Clone, Debug)]
pub struct LayoutMember {
    member: PropertyMember,
    nested: Option<Arc<StructureLayout>>,
}

impl LayoutMember {
    #[must_use]
    pub const fn leaf(member: PropertyMember) -> Self {
        Self {
            member,
            nested: None,
        }
    }

    #[must_use]
    pub const fn node(member: PropertyMember, nested: Arc<StructureLayout>) -> Self {
        Self {
            member,
            nested: Some(nested),
        }
    }
}

///
/// StructureLayout
///
/// The declared member table of one structure type, in declaration order.
/// The root layout must declare its identity member first; nested layouts
/// declare plain members only.
///

#[derive(Clone, Debug)]
pub struct StructureLayout {
    name: &'static str,
    members: Vec<LayoutMember>,
}

impl StructureLayout {
    #[must_use]
    pub const fn new(name: &'static str, members: Vec<LayoutMember>) -> Self {
        Self { name, members }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn members(&self) -> &[LayoutMember] {
        &self.members
    }
}

///
/// Schema
///
/// The built product for one structure type: the descriptor arena in
/// depth-first declaration order, identity descriptor at index 0, parents
/// always preceding children. Immutable and freely shareable.
///

#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    properties: Vec<Property>,
}

impl Schema {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    #[must_use]
    pub fn property(&self, path: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.path() == path)
    }

    /// The root identity descriptor.
    #[must_use]
    pub fn id_property(&self) -> &Property {
        &self.properties[0]
    }

    /// Descriptors whose flattened values feed indexing: simple-typed
    /// leaves and scalar collections, at any depth.
    pub fn flattenable(&self) -> impl Iterator<Item = &Property> {
        self.properties
            .iter()
            .filter(|p| p.member().shape().is_scalar())
    }

    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

///
/// build_schema
///
/// The schema-builder collaborator: walks a layout depth-first and
/// produces one descriptor per reachable property, nested node and
/// collection-element members included. A failed build yields no schema.
///

pub fn build_schema(layout: &StructureLayout) -> Result<Schema, SchemaError> {
    layout
        .members
        .first()
        .filter(|lm| lm.member.has_identity())
        .ok_or(SchemaError::MissingIdentity { name: layout.name })?;

    let mut builder = SchemaBuilder {
        name: layout.name,
        properties: Vec::new(),
        paths: HashSet::new(),
    };

    for (position, lm) in layout.members.iter().enumerate() {
        if position > 0 && lm.member.has_identity() {
            return Err(SchemaError::MisplacedIdentity {
                name: layout.name,
                path: lm.member.name().to_string(),
            });
        }

        builder.walk(lm, None, 0)?;
    }

    Ok(Schema {
        name: layout.name,
        properties: builder.properties,
    })
}

struct SchemaBuilder {
    name: &'static str,
    properties: Vec<Property>,
    paths: HashSet<String>,
}

impl SchemaBuilder {
    fn walk(
        &mut self,
        lm: &LayoutMember,
        parent: Option<usize>,
        depth: usize,
    ) -> Result<(), SchemaError> {
        let property = match parent {
            None => Property::root(lm.member.clone())?,
            Some(index) => Property::nested(lm.member.clone(), index, &self.properties)?,
        };

        if depth > MAX_PROPERTY_DEPTH {
            return Err(SchemaError::DepthExceeded {
                name: self.name,
                path: property.path().to_string(),
                max: MAX_PROPERTY_DEPTH,
            });
        }

        if !self.paths.insert(property.path().to_string()) {
            return Err(SchemaError::DuplicatePath {
                name: self.name,
                path: property.path().to_string(),
            });
        }

        let is_node = !property.member().shape().is_scalar();
        let index = self.properties.len();
        self.properties.push(property);

        match (&lm.nested, is_node) {
            (Some(nested), true) => {
                for child in &nested.members {
                    self.walk(child, Some(index), depth + 1)?;
                }
                Ok(())
            }
            (None, true) => Err(SchemaError::UnresolvedNode {
                name: self.name,
                path: self.properties[index].path().to_string(),
            }),
            // A nested layout on a scalar member is ignored rather than
            // descended into; the scalar read is the leaf.
            (_, false) => Ok(()),
        }
    }
}
