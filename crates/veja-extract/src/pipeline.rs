//! The extraction orchestrator.

use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;

use veja_core::{ExtractionOutcome, ExtractionReport, ModelRegistry};

use crate::resolve::LoraResolver;
use crate::sniff::ImageFormat;
use crate::{jpeg, params, png, sniff};

/// Extracts generation metadata from uploaded image bytes.
///
/// Straight-line pipeline: sniff the container format, read embedded text,
/// parse it, resolve auxiliary-model references through the injected
/// registry. Anticipated format problems (unknown container, truncated
/// chunks, undecodable segments, unparseable text) degrade to an
/// all-default record with an explanatory [`ExtractionOutcome`]; the
/// surrounding upload flow never fails because of a malformed image.
pub struct MetadataExtractor {
    resolver: LoraResolver,
}

impl MetadataExtractor {
    /// Create an extractor backed by the given registry collaborator.
    pub fn new(registry: Arc<dyn ModelRegistry>) -> Self {
        Self {
            resolver: LoraResolver::new(registry),
        }
    }

    /// Run one extraction over a full file buffer.
    ///
    /// Registry lookups for unresolved loras run concurrently against each
    /// other and all settle (or individually fail soft) before the report
    /// is returned; output order matches source-text order. Dropping the
    /// returned future abandons any pending lookups, and each lookup is
    /// bounded by the registry client's own timeout.
    pub async fn extract(&self, buffer: &[u8]) -> ExtractionReport {
        let text = match sniff::classify(buffer) {
            ImageFormat::Png => png::read_text(buffer),
            ImageFormat::Jpeg => jpeg::read_text(buffer),
            ImageFormat::Unsupported => {
                debug!("buffer matches no known image signature, skipping extraction");
                return ExtractionReport::empty(ExtractionOutcome::UnsupportedFormat);
            }
        };

        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            debug!("no embedded text recovered from container");
            return ExtractionReport::empty(ExtractionOutcome::NoEmbeddedText);
        };

        let mut metadata = params::parse(&text);

        if !metadata.loras.is_empty() {
            let loras = std::mem::take(&mut metadata.loras);
            let pending = loras.into_iter().map(|lora| self.resolver.resolve(lora));
            metadata.loras = join_all(pending).await;
        }

        ExtractionReport {
            metadata,
            outcome: ExtractionOutcome::Extracted,
        }
    }
}
