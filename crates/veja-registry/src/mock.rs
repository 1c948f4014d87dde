//! Mock registry for deterministic testing.
//!
//! ## Usage
//!
//! ```rust
//! use veja_core::ModelRegistry;
//! use veja_registry::MockRegistry;
//!
//! # async fn demo() {
//! let registry = MockRegistry::new().with_entry(111, "LORA", "StyleX", "abc123");
//! let entry = registry.lookup(111).await.unwrap();
//! assert_eq!(entry.hash, "abc123");
//! assert_eq!(registry.lookup_count(), 1);
//! # }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use veja_core::{Error, ModelRegistry, RegistryEntry, Result};

/// Deterministic in-memory registry with a call log for assertions.
#[derive(Clone, Default)]
pub struct MockRegistry {
    entries: HashMap<i64, RegistryEntry>,
    fail_all: bool,
    call_log: Arc<Mutex<Vec<i64>>>,
}

impl MockRegistry {
    /// Create an empty mock; every lookup misses until entries are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry served for the given version id.
    pub fn with_entry(
        mut self,
        version_id: i64,
        kind: impl Into<String>,
        name: impl Into<String>,
        hash: impl Into<String>,
    ) -> Self {
        self.entries.insert(
            version_id,
            RegistryEntry {
                kind: kind.into(),
                name: name.into(),
                hash: hash.into(),
            },
        );
        self
    }

    /// Make every lookup fail with a request error, for testing fail-soft
    /// behavior.
    pub fn with_all_lookups_failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Version ids looked up so far, in call order.
    pub fn lookup_log(&self) -> Vec<i64> {
        self.call_log.lock().unwrap().clone()
    }

    /// Number of lookups performed.
    pub fn lookup_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelRegistry for MockRegistry {
    async fn lookup(&self, version_id: i64) -> Result<RegistryEntry> {
        self.call_log.lock().unwrap().push(version_id);

        if self.fail_all {
            return Err(Error::Request("mock registry configured to fail".to_string()));
        }
        self.entries
            .get(&version_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("model version {}", version_id)))
    }
}
