//! In-memory registry store.
//!
//! Keeps the registry as serialized JSON so every load and save goes through
//! the same encoding as the file store.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use docverify_core::error::{DocVerifyError, Result};
use docverify_core::traits::RegistryStore;
use docverify_core::types::Registry;

/// Location reported in errors raised by the memory store.
const MEMORY_LOCATION: &str = "<memory>";

/// In-memory registry store.
///
/// Starts out with nothing persisted, so the first load returns an empty
/// registry. Counts loads and saves and can be told to reject writes, which
/// makes it the usual fake for service tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Serialized registry; `None` until the first save
    contents: RwLock<Option<Vec<u8>>>,
    /// Reject every save while set
    fail_writes: AtomicBool,
    /// Number of load calls
    loads: AtomicU64,
    /// Number of successful save calls
    saves: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store with nothing persisted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `registry`.
    pub fn with_registry(registry: &Registry) -> Result<Self> {
        let store = Self::new();
        *store.contents.write() = Some(serde_json::to_vec_pretty(registry)?);
        Ok(store)
    }

    /// Creates a store holding arbitrary bytes, e.g. a corrupt document.
    pub fn with_raw(bytes: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        *store.contents.write() = Some(bytes.into());
        store
    }

    /// Makes subsequent saves fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of loads performed.
    pub fn loads(&self) -> u64 {
        self.loads.load(Ordering::SeqCst)
    }

    /// Returns the number of successful saves performed.
    pub fn saves(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistryStore for MemoryStore {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<Registry> {
        self.loads.fetch_add(1, Ordering::SeqCst);

        let contents = self.contents.read();
        let registry = match contents.as_deref() {
            None => Registry::default(),
            Some(bytes) => serde_json::from_slice(bytes)
                .map_err(|e| DocVerifyError::read(MEMORY_LOCATION, e))?,
        };

        debug!(count = registry.len(), "Loaded registry from memory");
        Ok(registry)
    }

    #[instrument(skip(self, registry), fields(count = registry.len()))]
    async fn save(&self, registry: &Registry) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DocVerifyError::write(MEMORY_LOCATION, "writes disabled"));
        }

        let bytes = serde_json::to_vec_pretty(registry)
            .map_err(|e| DocVerifyError::write(MEMORY_LOCATION, e))?;
        *self.contents.write() = Some(bytes);
        self.saves.fetch_add(1, Ordering::SeqCst);

        debug!("Saved registry to memory");
        Ok(())
    }
}
