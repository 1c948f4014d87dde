//! Fail-soft enrichment of auxiliary-model references.

use std::sync::Arc;

use tracing::{debug, warn};

use veja_core::{LoraRef, ModelRegistry};

/// Resolves bare lora references against an injected registry collaborator.
///
/// The registry is held as a capability rather than reached through any
/// global client, so the pipeline carries no implicit network configuration.
#[derive(Clone)]
pub struct LoraResolver {
    registry: Arc<dyn ModelRegistry>,
}

impl LoraResolver {
    pub fn new(registry: Arc<dyn ModelRegistry>) -> Self {
        Self { registry }
    }

    /// Enrich one reference.
    ///
    /// Self-describing refs (non-empty hash) and refs with no version id
    /// pass through untouched; for the rest, a registry lookup fills in the
    /// canonical hash (and the name, when the source text carried none).
    /// Lookup failures are logged and leave the ref unresolved; resolution
    /// is never fatal to an extraction.
    pub async fn resolve(&self, lora: LoraRef) -> LoraRef {
        if lora.is_resolved() {
            return lora;
        }
        let Some(id) = lora.id else {
            debug!("lora ref without hash or version id left unresolved");
            return lora;
        };

        match self.registry.lookup(id).await {
            Ok(entry) => {
                let mut resolved = lora;
                resolved.hash = entry.hash;
                if resolved.name.is_empty() {
                    resolved.name = entry.name;
                }
                resolved
            }
            Err(err) => {
                warn!("registry lookup failed for model version {}: {}", id, err);
                lora
            }
        }
    }
}
