use crate::value::{ScalarKind, ScalarValue, Value};
use derive_more::Display;
use std::{
    any::{Any, type_name},
    fmt::{self, Debug},
    sync::Arc,
};
use thiserror::Error as ThisError;

///
/// Cardinality
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum Cardinality {
    #[default]
    One,
    Opt,
    Many,
}

///
/// MemberShape
///
/// Declared base shape of a member. Combined with [`Cardinality`] this
/// covers plain and nullable scalars, nested nodes, and collections of
/// either. Text is a scalar; it is never enumerable.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MemberShape {
    Scalar(ScalarKind),
    Node(&'static str),
}

impl MemberShape {
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scalar(kind) => kind.label(),
            Self::Node(name) => name,
        }
    }
}

///
/// FieldRead
///
/// Result of one compiled member read against one node.
/// `Missing` marks an absent optional link; list entries preserve element
/// order and positional nulls.
///

pub enum FieldRead<'a> {
    Missing,
    Scalar(Value),
    Node(&'a dyn Any),
    List(Vec<FieldRead<'a>>),
}

impl FieldRead<'_> {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Missing => "missing value",
            Self::Scalar(_) => "scalar",
            Self::Node(_) => "node",
            Self::List(_) => "collection",
        }
    }
}

impl Debug for FieldRead<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "Missing"),
            Self::Scalar(v) => write!(f, "Scalar({v:?})"),
            Self::Node(_) => write!(f, "Node(..)"),
            Self::List(items) => write!(f, "List(len={})", items.len()),
        }
    }
}

///
/// AccessError
///
/// Accessor-level shape failure. Carries no path; the owning descriptor
/// wraps it into the full mismatch error.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("expected {expected}, found {found}")]
pub struct AccessError {
    pub expected: &'static str,
    pub found: &'static str,
}

impl AccessError {
    fn foreign_node<T>() -> Self {
        Self {
            expected: type_name::<T>(),
            found: "foreign node type",
        }
    }

    const fn identity_payload(expected: ScalarKind, found: &'static str) -> Self {
        Self {
            expected: expected.label(),
            found,
        }
    }
}

type Getter =
    Arc<dyn for<'a> Fn(&'a dyn Any) -> Result<FieldRead<'a>, AccessError> + Send + Sync>;
type IdGetter = Arc<dyn Fn(&dyn Any) -> Result<Value, AccessError> + Send + Sync>;
type IdSetter = Arc<dyn Fn(&mut dyn Any, Value) -> Result<(), AccessError> + Send + Sync>;

// Forces higher-ranked lifetime inference when erasing accessor closures.
fn getter<F>(f: F) -> Getter
where
    F: for<'a> Fn(&'a dyn Any) -> Result<FieldRead<'a>, AccessError> + Send + Sync + 'static,
{
    Arc::new(f)
}

fn downcast<T: 'static>(item: &dyn Any) -> Result<&T, AccessError> {
    item.downcast_ref::<T>()
        .ok_or_else(|| AccessError::foreign_node::<T>())
}

fn downcast_mut<T: 'static>(item: &mut dyn Any) -> Result<&mut T, AccessError> {
    item.downcast_mut::<T>()
        .ok_or_else(|| AccessError::foreign_node::<T>())
}

///
/// IdentityAccessor
/// Compiled read/write pair for the designated identity member.
///

#[derive(Clone)]
struct IdentityAccessor {
    get: IdGetter,
    set: IdSetter,
}

///
/// PropertyMember
///
/// One named member of one declaring type: declared shape metadata plus the
/// accessor compiled against the concrete declaring type. The only runtime
/// dispatch left on a read is a single `downcast_ref`.
///

#[derive(Clone)]
pub struct PropertyMember {
    name: &'static str,
    cardinality: Cardinality,
    shape: MemberShape,
    unique: bool,
    getter: Getter,
    identity: Option<IdentityAccessor>,
}

impl PropertyMember {
    fn new(
        name: &'static str,
        cardinality: Cardinality,
        shape: MemberShape,
        getter: Getter,
    ) -> Self {
        Self {
            name,
            cardinality,
            shape,
            unique: false,
            getter,
            identity: None,
        }
    }

    ///
    /// SCALAR CONSTRUCTORS
    ///

    pub fn scalar<T: 'static, V: ScalarValue>(name: &'static str, get: fn(&T) -> V) -> Self {
        Self::new(
            name,
            Cardinality::One,
            MemberShape::Scalar(V::KIND),
            getter(move |item: &dyn Any| Ok(FieldRead::Scalar(get(downcast::<T>(item)?).to_value()))),
        )
    }

    pub fn scalar_opt<T: 'static, V: ScalarValue>(
        name: &'static str,
        get: fn(&T) -> Option<V>,
    ) -> Self {
        Self::new(
            name,
            Cardinality::Opt,
            MemberShape::Scalar(V::KIND),
            getter(move |item: &dyn Any| {
                Ok(match get(downcast::<T>(item)?) {
                    Some(v) => FieldRead::Scalar(v.to_value()),
                    None => FieldRead::Missing,
                })
            }),
        )
    }

    pub fn scalar_list<T: 'static, V: ScalarValue>(
        name: &'static str,
        get: fn(&T) -> &[V],
    ) -> Self {
        Self::new(
            name,
            Cardinality::Many,
            MemberShape::Scalar(V::KIND),
            getter(move |item: &dyn Any| {
                let items = get(downcast::<T>(item)?);
                Ok(FieldRead::List(
                    items
                        .iter()
                        .map(|v| FieldRead::Scalar(v.to_value()))
                        .collect(),
                ))
            }),
        )
    }

    ///
    /// NODE CONSTRUCTORS
    ///

    pub fn node<T: 'static, U: 'static>(
        name: &'static str,
        node_type: &'static str,
        get: fn(&T) -> &U,
    ) -> Self {
        Self::new(
            name,
            Cardinality::One,
            MemberShape::Node(node_type),
            getter(move |item: &dyn Any| Ok(FieldRead::Node(get(downcast::<T>(item)?)))),
        )
    }

    pub fn node_opt<T: 'static, U: 'static>(
        name: &'static str,
        node_type: &'static str,
        get: fn(&T) -> Option<&U>,
    ) -> Self {
        Self::new(
            name,
            Cardinality::Opt,
            MemberShape::Node(node_type),
            getter(move |item: &dyn Any| {
                Ok(match get(downcast::<T>(item)?) {
                    Some(node) => FieldRead::Node(node),
                    None => FieldRead::Missing,
                })
            }),
        )
    }

    pub fn node_list<T: 'static, U: 'static>(
        name: &'static str,
        node_type: &'static str,
        get: fn(&T) -> &[U],
    ) -> Self {
        Self::new(
            name,
            Cardinality::Many,
            MemberShape::Node(node_type),
            getter(move |item: &dyn Any| {
                let items = get(downcast::<T>(item)?);
                Ok(FieldRead::List(
                    items.iter().map(|u| FieldRead::Node(u as &dyn Any)).collect(),
                ))
            }),
        )
    }

    ///
    /// IDENTITY CONSTRUCTORS
    ///
    /// Identity reads and writes happen on every structure insert/update,
    /// so both directions are compiled up front in two specializations:
    /// plain value and nullable-unwrapping.
    ///

    pub fn id<T: 'static, V: ScalarValue>(
        name: &'static str,
        get: fn(&T) -> V,
        set: fn(&mut T, V),
    ) -> Self {
        let mut member = Self::scalar(name, get);
        member.identity = Some(IdentityAccessor {
            get: Arc::new(move |item: &dyn Any| Ok(get(downcast::<T>(item)?).to_value())),
            set: Arc::new(move |item: &mut dyn Any, value: Value| {
                let node = downcast_mut::<T>(item)?;
                let v = V::from_value(&value)
                    .ok_or(AccessError::identity_payload(V::KIND, value.label()))?;
                set(node, v);
                Ok(())
            }),
        });

        member
    }

    pub fn id_opt<T: 'static, V: ScalarValue>(
        name: &'static str,
        get: fn(&T) -> Option<V>,
        set: fn(&mut T, Option<V>),
    ) -> Self {
        let mut member = Self::scalar_opt(name, get);
        member.identity = Some(IdentityAccessor {
            get: Arc::new(move |item: &dyn Any| {
                Ok(get(downcast::<T>(item)?).map_or(Value::Null, |v| v.to_value()))
            }),
            set: Arc::new(move |item: &mut dyn Any, value: Value| {
                let node = downcast_mut::<T>(item)?;
                let v = match value {
                    Value::Null => None,
                    value => Some(
                        V::from_value(&value)
                            .ok_or(AccessError::identity_payload(V::KIND, value.label()))?,
                    ),
                };
                set(node, v);
                Ok(())
            }),
        });

        member
    }

    /// Attach the uniqueness marker. Validated against the declared shape
    /// at descriptor construction, not here.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    #[must_use]
    pub const fn shape(&self) -> MemberShape {
        self.shape
    }

    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    /// Simple-typed shape: scalar base, not a collection. Nullable scalars
    /// are simple; nodes and collections are not.
    #[must_use]
    pub const fn is_simple_shape(&self) -> bool {
        self.shape.is_scalar() && !matches!(self.cardinality, Cardinality::Many)
    }

    #[must_use]
    pub const fn has_identity(&self) -> bool {
        self.identity.is_some()
    }

    ///
    /// READS
    ///

    /// Run the compiled read accessor against an erased node.
    pub fn read<'a>(&self, node: &'a dyn Any) -> Result<FieldRead<'a>, AccessError> {
        (self.getter)(node)
    }

    pub(crate) fn read_id(&self, item: &dyn Any) -> Option<Result<Value, AccessError>> {
        self.identity.as_ref().map(|accessor| (accessor.get)(item))
    }

    pub(crate) fn write_id(
        &self,
        item: &mut dyn Any,
        value: Value,
    ) -> Option<Result<(), AccessError>> {
        self.identity
            .as_ref()
            .map(|accessor| (accessor.set)(item, value))
    }
}

impl Debug for PropertyMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMember")
            .field("name", &self.name)
            .field("cardinality", &self.cardinality)
            .field("shape", &self.shape)
            .field("unique", &self.unique)
            .field("identity", &self.identity.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        label: String,
    }

    struct Other;

    #[test]
    fn read_downcasts_the_declaring_type() {
        let member = PropertyMember::scalar("label", |s: &Sample| s.label.clone());
        let sample = Sample {
            label: "a".to_string(),
        };

        match member.read(&sample).unwrap() {
            FieldRead::Scalar(Value::Text(text)) => assert_eq!(text, "a"),
            other => panic!("unexpected read: {other:?}"),
        }
    }

    #[test]
    fn read_rejects_a_foreign_node() {
        let member = PropertyMember::scalar("label", |s: &Sample| s.label.clone());
        let err = member.read(&Other).unwrap_err();

        assert_eq!(err.found, "foreign node type");
    }

    #[test]
    fn unique_marker_is_metadata_only() {
        let member = PropertyMember::scalar("label", |s: &Sample| s.label.clone()).unique();
        assert!(member.is_unique());
    }
}
