//! ## Crate layout
//! - `core`: scalar values, structure layouts, property descriptors, the
//!   flattening traversal, and the schema registry.
//!
//! The `prelude` module mirrors the runtime surface used by storage and
//! indexing code.

pub use strata_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        error::SchemaError,
        member::{Cardinality, FieldRead, MemberShape, PropertyMember},
        obs::{RegistryTraceEvent, RegistryTraceSink},
        property::Property,
        registry::SchemaRegistry,
        schema::{LayoutMember, Schema, StructureKind, StructureLayout, build_schema},
        types::{Date, Float64, Timestamp},
        value::{ScalarKind, ScalarValue, Value, ValueEnum},
    };
}
