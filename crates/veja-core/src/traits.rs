//! Trait seams for pluggable collaborators.
//!
//! The extraction pipeline consumes the registry through this trait so the
//! core carries no implicit dependency on network configuration; concrete
//! clients live in `veja-registry`.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::RegistryEntry;

/// External auxiliary-model registry, keyed by numeric version id.
///
/// One lookup per unresolved reference, single attempt, bounded by the
/// implementation's own timeout. Callers treat any `Err` as "leave the
/// reference unresolved": a lookup failure must never fail an extraction.
#[async_trait]
pub trait ModelRegistry: Send + Sync {
    /// Fetch the canonical name and content hash for a model version.
    async fn lookup(&self, version_id: i64) -> Result<RegistryEntry>;
}
