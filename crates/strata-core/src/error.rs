use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Fatal error surface for schema construction and property access.
/// Every variant propagates synchronously to the caller; none are retried
/// and none produce partial results.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    /// A unique marker was declared on a property whose type cannot back a
    /// uniqueness constraint. Raised at descriptor construction; the
    /// registry caches nothing for the type.
    #[error("unique marker on non-scalar property '{path}'")]
    InvalidConstraintDeclaration { path: String },

    /// Identity get/set invoked on a descriptor that is not the root
    /// identity property.
    #[error("identity access on non-identity property '{path}' (level {level})")]
    InvalidPropertyLevel { path: String, level: usize },

    /// A runtime value did not match the shape the descriptor was compiled
    /// against. Indicates a stale schema or a malformed instance; callers
    /// should evict the cached schema and rebuild, or reject the instance.
    #[error("property '{path}': expected {expected}, found {found}")]
    PropertyAccessMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Two declared members of one structure resolved to the same path.
    #[error("structure '{name}': duplicate property path '{path}'")]
    DuplicatePath { name: &'static str, path: String },

    /// The root layout has no identity member.
    #[error("structure '{name}' declares no identity member")]
    MissingIdentity { name: &'static str },

    /// An identity member was declared anywhere but first on the root.
    #[error("structure '{name}': identity member '{path}' must be declared first")]
    MisplacedIdentity { name: &'static str, path: String },

    /// A node-shaped member was declared without the nested type's layout.
    #[error("structure '{name}': node member '{path}' has no nested layout")]
    UnresolvedNode { name: &'static str, path: String },

    /// Layout nesting ran past [`MAX_PROPERTY_DEPTH`](crate::MAX_PROPERTY_DEPTH),
    /// which only happens when layouts form a cycle through shared nesting.
    #[error("structure '{name}': property '{path}' exceeds depth limit {max}")]
    DepthExceeded {
        name: &'static str,
        path: String,
        max: usize,
    },
}
