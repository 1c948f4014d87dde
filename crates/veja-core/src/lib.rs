//! # veja-core
//!
//! Core types, traits, and abstractions for the MiraVeja generation-metadata
//! pipeline.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the extraction and registry crates depend on.

pub mod defaults;
pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{
    ExtractionOutcome, ExtractionReport, GenerationMetadata, LoraRef, RegistryEntry, Size,
};
pub use traits::ModelRegistry;
