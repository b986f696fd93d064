//! Common traits for DocVerify.
//!
//! These traits define the interfaces that different implementations can satisfy,
//! enabling modularity and testing.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Registry;

// ═══════════════════════════════════════════════════════════════════════════════
// STORAGE PORT
// ═══════════════════════════════════════════════════════════════════════════════

/// Whole-aggregate persistence for the document registry.
///
/// The registry is always read and written as a single unit. Implementations
/// might use:
/// - In-memory storage (for testing)
/// - A JSON file on local disk (single-node deployments)
/// - An object store with atomic whole-object replace
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Loads the persisted registry.
    ///
    /// Returns an empty registry when nothing has been persisted yet. Returns
    /// [`DocVerifyError::StorageRead`](crate::DocVerifyError::StorageRead) when
    /// persisted state exists but cannot be read; that case must never be
    /// reported as an empty registry.
    async fn load(&self) -> Result<Registry>;

    /// Replaces the persisted registry with `registry`.
    ///
    /// A concurrent reader observes either the previous or the new registry,
    /// never a partial write.
    async fn save(&self, registry: &Registry) -> Result<()>;
}
