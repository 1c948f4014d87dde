//! # veja-extract
//!
//! Generation-metadata extraction pipeline for the MiraVeja gallery.
//!
//! Given the raw bytes of an uploaded image, the pipeline sniffs the
//! container format (PNG or JPEG), walks the container structure to recover
//! embedded free-text metadata, parses the text against the generation-tool
//! convention (prompt / negative prompt / parameter line), and enriches
//! auxiliary-model references through an injected registry collaborator.
//!
//! Malformed or unusual image files never fail an extraction: every stage
//! degrades to "less metadata", and the [`pipeline::MetadataExtractor`]
//! reports *why* via [`veja_core::ExtractionOutcome`].

pub mod jpeg;
pub mod params;
pub mod pipeline;
pub mod png;
pub mod resolve;
pub mod sniff;

pub use pipeline::MetadataExtractor;
pub use resolve::LoraResolver;
pub use sniff::{classify, ImageFormat};
