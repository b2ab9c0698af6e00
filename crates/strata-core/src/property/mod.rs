
use crate::{
    error::SchemaError,
    member::{AccessError, Cardinality, FieldRead, MemberShape, PropertyMember},
    value::{ScalarKind, ScalarValue, Value},
};
use std::any::Any;

///
/// Property
///
/// Descriptor for one member at one nesting level within a structure type.
/// Immutable once constructed: the path and the root→self member chain are
/// pure functions of the ancestor chain, computed at construction.
///
/// `parent` is a non-owning index into the schema's descriptor arena; the
/// schema owns every descriptor's lifetime.
///

#[derive(Debug)]
pub struct Property {
    member: PropertyMember,
    path: String,
    level: usize,
    parent: Option<usize>,
    is_element: bool,
    callstack: Vec<PropertyMember>,
}

impl Property {
    ///
    /// CONSTRUCTION
    ///

    /// Descriptor for a root-level member (level 0, no parent).
    pub fn root(member: PropertyMember) -> Result<Self, SchemaError> {
        let path = member.name().to_string();
        Self::check_unique_marker(&member, &path)?;

        Ok(Self {
            callstack: vec![member.clone()],
            member,
            path,
            level: 0,
            parent: None,
            is_element: false,
        })
    }

    /// Descriptor for a member nested under `parent_index` in `arena`.
    pub fn nested(
        member: PropertyMember,
        parent_index: usize,
        arena: &[Property],
    ) -> Result<Self, SchemaError> {
        let parent = arena
            .get(parent_index)
            .expect("parent index must point into the descriptor arena");

        let path = format!("{}.{}", parent.path, member.name());
        Self::check_unique_marker(&member, &path)?;

        let mut callstack = parent.callstack.clone();
        callstack.push(member.clone());

        Ok(Self {
            member,
            path,
            level: parent.level + 1,
            parent: Some(parent_index),
            is_element: parent.is_element || parent.is_enumerable(),
            callstack,
        })
    }

    fn check_unique_marker(member: &PropertyMember, path: &str) -> Result<(), SchemaError> {
        if member.is_unique() && !member.is_simple_shape() {
            return Err(SchemaError::InvalidConstraintDeclaration {
                path: path.to_string(),
            });
        }

        Ok(())
    }

    ///
    /// CLASSIFICATION
    ///

    #[must_use]
    pub const fn member(&self) -> &PropertyMember {
        &self.member
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.member.name()
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub const fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Simple scalar declared type: one value, not a collection, not a node.
    #[must_use]
    pub const fn is_simple(&self) -> bool {
        self.member.is_simple_shape()
    }

    /// Nullable wrapper around a scalar declared type.
    #[must_use]
    pub const fn is_nullable_value(&self) -> bool {
        self.member.shape().is_scalar() && matches!(self.member.cardinality(), Cardinality::Opt)
    }

    /// Collection-valued declared type. Text is never enumerable.
    #[must_use]
    pub const fn is_enumerable(&self) -> bool {
        matches!(self.member.cardinality(), Cardinality::Many)
    }

    /// Element shape of an enumerable property; `None` otherwise.
    #[must_use]
    pub const fn element_shape(&self) -> Option<MemberShape> {
        if self.is_enumerable() {
            Some(self.member.shape())
        } else {
            None
        }
    }

    /// True when an ancestor is a collection: this property is evaluated
    /// once per element of that collection.
    #[must_use]
    pub const fn is_element(&self) -> bool {
        self.is_element
    }

    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.member.is_unique()
    }

    ///
    /// IDENTITY ACCESS
    ///

    /// Typed read of the identity value. Defined only for the root identity
    /// descriptor; `Null` surfaces as `None`.
    pub fn id_value<V: ScalarValue>(&self, item: &dyn Any) -> Result<Option<V>, SchemaError> {
        self.check_identity_level()?;

        let value = self
            .member
            .read_id(item)
            .expect("identity accessor checked above")
            .map_err(|err| self.mismatch(err))?;

        match value {
            Value::Null => Ok(None),
            value => V::from_value(&value)
                .map(Some)
                .ok_or_else(|| self.mismatch(Self::kind_mismatch(V::KIND, &value))),
        }
    }

    /// Typed write of the identity value, mirroring [`Self::id_value`].
    pub fn set_id_value<V: ScalarValue>(
        &self,
        item: &mut dyn Any,
        value: Option<V>,
    ) -> Result<(), SchemaError> {
        self.check_identity_level()?;

        let value = value.map_or(Value::Null, |v| v.to_value());
        self.member
            .write_id(item, value)
            .expect("identity accessor checked above")
            .map_err(|err| self.mismatch(err))
    }

    fn check_identity_level(&self) -> Result<(), SchemaError> {
        if self.level != 0 || !self.member.has_identity() {
            return Err(SchemaError::InvalidPropertyLevel {
                path: self.path.clone(),
                level: self.level,
            });
        }

        Ok(())
    }

    const fn kind_mismatch(expected: ScalarKind, found: &Value) -> AccessError {
        AccessError {
            expected: expected.label(),
            found: found.label(),
        }
    }

    ///
    /// FLATTENING
    ///

    /// Every scalar value reachable from `item` through this property's
    /// path, depth-first in collection iteration order.
    ///
    /// Cardinality contract: a path with no collections yields exactly one
    /// entry; each collection along the path multiplies the output by its
    /// element count; an absent link truncates its branch to a single
    /// `Value::Null` entry; an empty collection contributes zero entries.
    pub fn values(&self, item: &dyn Any) -> Result<Vec<Value>, SchemaError> {
        let mut out = Vec::new();
        self.descend(&self.callstack, FieldRead::Node(item), &mut out)?;

        Ok(out)
    }

    /// One traversal step: apply the next member of the chain to the
    /// current node, fanning out over collections. Recursion depth is
    /// bounded by the callstack length, never by the object graph.
    fn descend(
        &self,
        chain: &[PropertyMember],
        node: FieldRead<'_>,
        out: &mut Vec<Value>,
    ) -> Result<(), SchemaError> {
        let (next, rest) = chain
            .split_first()
            .expect("callstack is non-empty by construction");

        if rest.is_empty() {
            return self.terminal(next, node, out);
        }

        match node {
            FieldRead::Node(obj) => match self.read(next, obj)? {
                FieldRead::Missing => {
                    out.push(Value::Null);
                    Ok(())
                }
                read => self.descend(rest, read, out),
            },
            FieldRead::List(elements) => {
                for element in elements {
                    self.descend(chain, element, out)?;
                }
                Ok(())
            }
            FieldRead::Missing => {
                out.push(Value::Null);
                Ok(())
            }
            FieldRead::Scalar(_) => Err(self.mismatch(AccessError {
                expected: "node or collection",
                found: "scalar",
            })),
        }
    }

    /// Final chain step: emit scalar leaves. A collection-valued read under
    /// a collection parent flattens one level; nulls among elements are
    /// preserved as explicit entries, never skipped.
    fn terminal(
        &self,
        last: &PropertyMember,
        node: FieldRead<'_>,
        out: &mut Vec<Value>,
    ) -> Result<(), SchemaError> {
        match node {
            FieldRead::Node(obj) => {
                let read = self.read(last, obj)?;
                self.emit(read, out)
            }
            FieldRead::List(elements) => {
                for element in elements {
                    match element {
                        FieldRead::Node(obj) => {
                            let read = self.read(last, obj)?;
                            self.emit(read, out)?;
                        }
                        FieldRead::Missing => out.push(Value::Null),
                        found => {
                            return Err(self.mismatch(AccessError {
                                expected: "node element",
                                found: found.label(),
                            }));
                        }
                    }
                }
                Ok(())
            }
            FieldRead::Missing => {
                out.push(Value::Null);
                Ok(())
            }
            FieldRead::Scalar(_) => Err(self.mismatch(AccessError {
                expected: "node or collection",
                found: "scalar",
            })),
        }
    }

    /// Emit the scalar payload of one terminal read.
    fn emit(&self, read: FieldRead<'_>, out: &mut Vec<Value>) -> Result<(), SchemaError> {
        match read {
            FieldRead::Scalar(value) => out.push(value),
            FieldRead::Missing => out.push(Value::Null),
            FieldRead::List(elements) => {
                for element in elements {
                    match element {
                        FieldRead::Scalar(value) => out.push(value),
                        FieldRead::Missing => out.push(Value::Null),
                        found => {
                            return Err(self.mismatch(AccessError {
                                expected: "scalar element",
                                found: found.label(),
                            }));
                        }
                    }
                }
            }
            FieldRead::Node(_) => {
                return Err(self.mismatch(AccessError {
                    expected: "scalar",
                    found: "node",
                }));
            }
        }

        Ok(())
    }

    fn read<'a>(
        &self,
        member: &PropertyMember,
        obj: &'a dyn Any,
    ) -> Result<FieldRead<'a>, SchemaError> {
        member.read(obj).map_err(|err| self.mismatch(err))
    }

    fn mismatch(&self, err: AccessError) -> SchemaError {
        SchemaError::PropertyAccessMismatch {
            path: self.path.clone(),
            expected: err.expected,
            found: err.found,
        }
    }
}
