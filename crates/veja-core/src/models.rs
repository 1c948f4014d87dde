//! Data model for extracted generation metadata.
//!
//! The serialized field names (`negativePrompt`, `cfgScale`, ...) are the
//! contract the surrounding gallery layers consume when the record is merged
//! into an image-metadata aggregate, so every serde derive here renames to
//! camelCase.

use serde::{Deserialize, Serialize};

// =============================================================================
// GENERATION METADATA
// =============================================================================

/// Structured generation parameters recovered from an uploaded image.
///
/// Every field defaults to its empty/zero value, so the record is never
/// partially undefined. A field the source text does not carry simply keeps
/// its default; callers cannot distinguish "absent" from "empty", which
/// matches the loose text convention being parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    /// Positive prompt (free text, possibly multi-line)
    #[serde(default)]
    pub prompt: String,

    /// Negative prompt
    #[serde(default)]
    pub negative_prompt: String,

    /// Base model name
    #[serde(default)]
    pub model: String,

    /// Sampler name (e.g. "Euler a", "DPM++ 2M")
    #[serde(default)]
    pub sampler: String,

    /// Scheduler / schedule type (e.g. "Karras")
    #[serde(default)]
    pub scheduler: String,

    /// Sampling step count
    #[serde(default)]
    pub steps: u32,

    /// Classifier-free guidance scale
    #[serde(default)]
    pub cfg_scale: f64,

    /// Generation seed. Kept as a string: seeds may overflow native integer
    /// ranges or be non-numeric tokens (e.g. "-1", "random").
    #[serde(default)]
    pub seed: String,

    /// Output resolution as "WIDTHxHEIGHT" (e.g. "512x768")
    #[serde(default)]
    pub size: String,

    /// Auxiliary models applied during generation, in source-text order
    #[serde(default)]
    pub loras: Vec<LoraRef>,
}

impl GenerationMetadata {
    /// True if nothing was recovered from the source text.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Reference to an auxiliary model (LoRA) used during generation.
///
/// May arrive self-describing (non-empty `hash`) or bare, in which case the
/// registry collaborator can resolve the canonical hash by version id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoraRef {
    /// External registry version id, when the source text carried one
    #[serde(default)]
    pub id: Option<i64>,

    /// Canonical content hash; empty until resolved
    #[serde(default)]
    pub hash: String,

    /// Human-readable model name
    #[serde(default)]
    pub name: String,

    /// Application weight, when the source text carried one
    #[serde(default)]
    pub weight: Option<f64>,
}

impl LoraRef {
    /// A reference is self-describing once it carries a hash; the registry
    /// is only consulted for refs that are not.
    pub fn is_resolved(&self) -> bool {
        !self.hash.is_empty()
    }
}

// =============================================================================
// IMAGE SIZE
// =============================================================================

/// Image dimensions parsed from the "WIDTHxHEIGHT" convention.
///
/// `GenerationMetadata.size` stays a plain string (the wire contract);
/// this value type lets callers interpret it without re-implementing the
/// format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Parse a "WIDTHxHEIGHT" string (case-insensitive separator).
    ///
    /// Returns `None` for anything malformed: a zero dimension, a missing
    /// separator, or non-numeric parts. Never panics.
    pub fn parse(s: &str) -> Option<Self> {
        let lowered = s.trim().to_lowercase();
        let (w, h) = lowered.split_once('x')?;
        let width = w.trim().parse::<u32>().ok()?;
        let height = h.trim().parse::<u32>().ok()?;
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height })
    }

    /// Width / height ratio.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Pixel count in megapixels.
    pub fn megapixels(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height) / 1_000_000.0
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// =============================================================================
// EXTRACTION REPORT
// =============================================================================

/// Why an extraction produced (or failed to produce) metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Embedded text was found and parsed
    Extracted,
    /// Buffer matched neither known container signature
    UnsupportedFormat,
    /// Container walked cleanly but carried no recognizable text
    NoEmbeddedText,
}

/// Result of one extraction call.
///
/// `metadata` is always present (all-default on the non-`Extracted`
/// outcomes) so downstream code can assert *why* a record stayed default
/// instead of parsing log output.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionReport {
    pub metadata: GenerationMetadata,
    pub outcome: ExtractionOutcome,
}

impl ExtractionReport {
    /// An all-default record with the given non-success outcome.
    pub fn empty(outcome: ExtractionOutcome) -> Self {
        Self {
            metadata: GenerationMetadata::default(),
            outcome,
        }
    }

    /// Discard the outcome and keep the record (the plain-record contract
    /// consumed by the upload flow).
    pub fn into_metadata(self) -> GenerationMetadata {
        self.metadata
    }
}

// =============================================================================
// REGISTRY ENTRY
// =============================================================================

/// A registry collaborator's answer for a model version id.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryEntry {
    /// Model kind as reported by the registry (e.g. "LORA", "Checkpoint")
    pub kind: String,
    /// Canonical model name
    pub name: String,
    /// Content hash under the configured hash algorithm preference
    pub hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_defaults_are_empty() {
        let meta = GenerationMetadata::default();
        assert!(meta.prompt.is_empty());
        assert!(meta.negative_prompt.is_empty());
        assert!(meta.model.is_empty());
        assert!(meta.sampler.is_empty());
        assert!(meta.scheduler.is_empty());
        assert_eq!(meta.steps, 0);
        assert_eq!(meta.cfg_scale, 0.0);
        assert!(meta.seed.is_empty());
        assert!(meta.size.is_empty());
        assert!(meta.loras.is_empty());
        assert!(meta.is_empty());
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let meta = GenerationMetadata {
            negative_prompt: "blurry".to_string(),
            cfg_scale: 7.5,
            ..Default::default()
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["negativePrompt"], "blurry");
        assert_eq!(json["cfgScale"], 7.5);
        assert!(json.get("negative_prompt").is_none());
    }

    #[test]
    fn test_metadata_deserializes_partial_body() {
        let meta: GenerationMetadata =
            serde_json::from_str(r#"{"prompt": "a cat", "steps": 20}"#).unwrap();
        assert_eq!(meta.prompt, "a cat");
        assert_eq!(meta.steps, 20);
        assert!(meta.seed.is_empty());
        assert!(meta.loras.is_empty());
    }

    #[test]
    fn test_lora_ref_is_resolved() {
        let bare = LoraRef {
            id: Some(111),
            ..Default::default()
        };
        assert!(!bare.is_resolved());

        let hashed = LoraRef {
            hash: "abc123".to_string(),
            ..Default::default()
        };
        assert!(hashed.is_resolved());
    }

    #[test]
    fn test_size_parse_valid() {
        let size = Size::parse("512x768").unwrap();
        assert_eq!(size.width, 512);
        assert_eq!(size.height, 768);
    }

    #[test]
    fn test_size_parse_uppercase_separator() {
        let size = Size::parse("1024X1024").unwrap();
        assert_eq!(size.width, 1024);
        assert_eq!(size.height, 1024);
        assert!(size.is_square());
    }

    #[test]
    fn test_size_parse_malformed() {
        assert!(Size::parse("abc").is_none());
        assert!(Size::parse("512x").is_none());
        assert!(Size::parse("512").is_none());
        assert!(Size::parse("x768").is_none());
        assert!(Size::parse("0x768").is_none());
        assert!(Size::parse("").is_none());
    }

    #[test]
    fn test_size_display_round_trip() {
        let size = Size::parse("512x768").unwrap();
        assert_eq!(size.to_string(), "512x768");
        assert_eq!(Size::parse(&size.to_string()), Some(size));
    }

    #[test]
    fn test_size_orientation() {
        let landscape = Size::parse("768x512").unwrap();
        assert!(landscape.is_landscape());
        assert!(!landscape.is_portrait());
        assert!(landscape.aspect_ratio() > 1.0);

        let portrait = Size::parse("512x768").unwrap();
        assert!(portrait.is_portrait());
        assert!((portrait.megapixels() - 0.393216).abs() < 1e-9);
    }

    #[test]
    fn test_report_empty_carries_outcome() {
        let report = ExtractionReport::empty(ExtractionOutcome::UnsupportedFormat);
        assert_eq!(report.outcome, ExtractionOutcome::UnsupportedFormat);
        assert!(report.metadata.is_empty());
        assert!(report.into_metadata().is_empty());
    }
}
