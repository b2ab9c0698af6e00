//! Registry tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect cache
//! semantics.

///
/// RegistryTraceSink
///

pub trait RegistryTraceSink: Send + Sync {
    fn on_event(&self, event: RegistryTraceEvent);
}

///
/// RegistryTraceEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegistryTraceEvent {
    /// A cached schema served a lookup.
    Hit { name: &'static str },

    /// A first lookup built and cached a schema.
    Built {
        name: &'static str,
        properties: usize,
    },

    /// One entry was evicted.
    Evicted { name: String },

    /// The whole cache was evicted.
    Cleared { evicted: usize },
}
