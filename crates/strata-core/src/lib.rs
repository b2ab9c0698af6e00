//! Core runtime for Strata: scalar values, structure layouts, property
//! descriptors, the flattening traversal, and the schema registry.

pub mod error;
pub mod member;
pub mod obs;
pub mod property;
pub mod registry;
pub mod schema;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Maximum nesting depth of a structure layout.
///
/// Layouts are finite and acyclic by construction; this bound turns an
/// accidental cycle through shared nested layouts into a build error
/// instead of unbounded recursion.
pub const MAX_PROPERTY_DEPTH: usize = 16;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
///

pub mod prelude {
    pub use crate::{
        error::SchemaError,
        member::{Cardinality, FieldRead, MemberShape, PropertyMember},
        property::Property,
        registry::SchemaRegistry,
        schema::{LayoutMember, Schema, StructureKind, StructureLayout, build_schema},
        types::{Date, Float64, Timestamp},
        value::{ScalarKind, ScalarValue, Value, ValueEnum},
    };
}
