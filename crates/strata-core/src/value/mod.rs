
use crate::types::{Date, Float64, Timestamp};
use derive_more::Display;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

///
/// Value
///
/// Scalar runtime value emitted by property flattening.
///
/// Null → the traversal hit an absent link; the slot is preserved so the
/// consumer sees positional "no value" entries rather than silent gaps.
///

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Value {
    Bool(bool),
    Date(Date),
    Enum(ValueEnum),
    Float64(Float64),
    Int(i64),
    Null,
    Text(String),
    Timestamp(Timestamp),
    Uint(u64),
    Ulid(Ulid),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Declared-kind classification of this value; `None` for `Null`.
    #[must_use]
    pub const fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Self::Bool(_) => Some(ScalarKind::Bool),
            Self::Date(_) => Some(ScalarKind::Date),
            Self::Enum(_) => Some(ScalarKind::Enum),
            Self::Float64(_) => Some(ScalarKind::Float64),
            Self::Int(_) => Some(ScalarKind::Int),
            Self::Text(_) => Some(ScalarKind::Text),
            Self::Timestamp(_) => Some(ScalarKind::Timestamp),
            Self::Uint(_) => Some(ScalarKind::Uint),
            Self::Ulid(_) => Some(ScalarKind::Ulid),
            Self::Null => None,
        }
    }

    /// Stable label used in shape-mismatch diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self.scalar_kind() {
            Some(kind) => kind.label(),
            None => "null",
        }
    }
}

#[macro_export]
macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool      => Bool,
    Date      => Date,
    Float64   => Float64,
    i32       => Int,
    i64       => Int,
    &str      => Text,
    String    => Text,
    Timestamp => Timestamp,
    u32       => Uint,
    u64       => Uint,
    Ulid      => Ulid,
}

impl From<ValueEnum> for Value {
    fn from(v: ValueEnum) -> Self {
        Self::Enum(v)
    }
}

///
/// ScalarKind
///
/// Declared-type classification mirror of [`Value`].
/// A property whose base shape is one of these kinds is simple-typed.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    Bool,
    Date,
    Enum,
    Float64,
    Int,
    Text,
    Timestamp,
    Uint,
    Ulid,
}

impl ScalarKind {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Float64 | Self::Int | Self::Uint)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Date => "date",
            Self::Enum => "enum",
            Self::Float64 => "float64",
            Self::Int => "int",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Uint => "uint",
            Self::Ulid => "ulid",
        }
    }
}

///
/// ScalarValue
///
/// Conversion boundary between concrete field types and [`Value`].
/// Compiled accessors are monomorphized over implementors; `from_value`
/// narrows strictly and returns `None` on any kind or range mismatch.
///

pub trait ScalarValue: Clone + Send + Sync + 'static {
    const KIND: ScalarKind;

    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>;
}

impl ScalarValue for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl ScalarValue for i32 {
    const KIND: ScalarKind = ScalarKind::Int;

    fn to_value(&self) -> Value {
        Value::Int(i64::from(*self))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => v.to_i32(),
            _ => None,
        }
    }
}

impl ScalarValue for i64 {
    const KIND: ScalarKind = ScalarKind::Int;

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl ScalarValue for u32 {
    const KIND: ScalarKind = ScalarKind::Uint;

    fn to_value(&self) -> Value {
        Value::Uint(u64::from(*self))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Uint(v) => v.to_u32(),
            _ => None,
        }
    }
}

impl ScalarValue for u64 {
    const KIND: ScalarKind = ScalarKind::Uint;

    fn to_value(&self) -> Value {
        Value::Uint(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Uint(v) => Some(*v),
            _ => None,
        }
    }
}

impl ScalarValue for String {
    const KIND: ScalarKind = ScalarKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl ScalarValue for Float64 {
    const KIND: ScalarKind = ScalarKind::Float64;

    fn to_value(&self) -> Value {
        Value::Float64(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

impl ScalarValue for Date {
    const KIND: ScalarKind = ScalarKind::Date;

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Date(v) => Some(*v),
            _ => None,
        }
    }
}

impl ScalarValue for Timestamp {
    const KIND: ScalarKind = ScalarKind::Timestamp;

    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Timestamp(v) => Some(*v),
            _ => None,
        }
    }
}

impl ScalarValue for Ulid {
    const KIND: ScalarKind = ScalarKind::Ulid;

    fn to_value(&self) -> Value {
        Value::Ulid(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Ulid(v) => Some(*v),
            _ => None,
        }
    }
}

impl ScalarValue for ValueEnum {
    const KIND: ScalarKind = ScalarKind::Enum;

    fn to_value(&self) -> Value {
        Value::Enum(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Enum(v) => Some(v.clone()),
            _ => None,
        }
    }
}

///
/// ValueEnum
/// handles the Enum case; `path` is optional to allow strict (typed) or loose matching.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Hash, Serialize)]
pub struct ValueEnum {
    pub variant: String,
    pub path: Option<String>,
}

impl ValueEnum {
    #[must_use]
    /// Build a strict enum value matching the provided variant and path.
    pub fn new(variant: &str, path: Option<&str>) -> Self {
        Self {
            variant: variant.to_string(),
            path: path.map(ToString::to_string),
        }
    }

    #[must_use]
    /// Build an enum value that ignores the path for loose matching.
    pub fn loose(variant: &str) -> Self {
        Self::new(variant, None)
    }
}
