use crate::{
    error::SchemaError,
    obs::{RegistryTraceEvent, RegistryTraceSink},
    schema::{Schema, StructureKind, build_schema},
};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

///
/// SchemaRegistry
///
/// Memoizing front end over the schema builder, keyed by structure name.
/// Entries are write-once `Arc`s with exactly two states per key, absent
/// and present; eviction and clear are the only mutations.
///
/// Builds are serialized per registry under the write lock with a double
/// check after acquisition, so concurrent first lookups for one type
/// never produce duplicate schemas. Cached reads take the read lock only
/// and never block each other.
///

#[derive(Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<&'static str, Arc<Schema>>>,
    trace: Option<Arc<dyn RegistryTraceSink>>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with an attached trace sink.
    #[must_use]
    pub fn with_trace(trace: Arc<dyn RegistryTraceSink>) -> Self {
        Self {
            schemas: RwLock::new(HashMap::new()),
            trace: Some(trace),
        }
    }

    /// The cached schema for `T`, building and caching it on first lookup.
    /// A failed build caches nothing and surfaces the build error.
    pub fn get<T: StructureKind>(&self) -> Result<Arc<Schema>, SchemaError> {
        if let Some(schema) = self
            .schemas
            .read()
            .expect("schema cache lock poisoned while reading")
            .get(T::NAME)
        {
            self.emit(RegistryTraceEvent::Hit { name: T::NAME });
            return Ok(schema.clone());
        }

        let mut schemas = self
            .schemas
            .write()
            .expect("schema cache lock poisoned while building");

        // Another caller may have built the entry between the read miss
        // and the write acquisition.
        if let Some(schema) = schemas.get(T::NAME) {
            self.emit(RegistryTraceEvent::Hit { name: T::NAME });
            return Ok(schema.clone());
        }

        let schema = Arc::new(build_schema(&T::layout())?);
        schemas.insert(T::NAME, schema.clone());

        self.emit(RegistryTraceEvent::Built {
            name: T::NAME,
            properties: schema.property_count(),
        });

        Ok(schema)
    }

    /// Evict the entry for `T`. Returns whether an entry was present;
    /// a subsequent `get` rebuilds from scratch.
    pub fn remove<T: StructureKind>(&self) -> bool {
        self.remove_named(T::NAME)
    }

    /// Evict one entry by structure name. No-op when absent.
    pub fn remove_named(&self, name: &str) -> bool {
        let evicted = self
            .schemas
            .write()
            .expect("schema cache lock poisoned while evicting")
            .remove(name)
            .is_some();

        if evicted {
            self.emit(RegistryTraceEvent::Evicted {
                name: name.to_string(),
            });
        }

        evicted
    }

    /// Evict every entry.
    pub fn clear(&self) {
        let mut schemas = self
            .schemas
            .write()
            .expect("schema cache lock poisoned while clearing");

        let evicted = schemas.len();
        schemas.clear();
        drop(schemas);

        self.emit(RegistryTraceEvent::Cleared { evicted });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas
            .read()
            .expect("schema cache lock poisoned while reading")
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn emit(&self, event: RegistryTraceEvent) {
        if let Some(trace) = &self.trace {
            trace.on_event(event);
        }
    }
}
