//! # veja-registry
//!
//! Auxiliary-model registry collaborator for the MiraVeja metadata
//! pipeline.
//!
//! Implements the [`veja_core::ModelRegistry`] trait against the Civitai
//! public API, plus a deterministic mock for tests and offline use. The
//! extraction pipeline never talks to the network itself; it receives one
//! of these implementations as an injected capability.

pub mod civitai;
pub mod config;
pub mod mock;

pub use civitai::CivitaiRegistry;
pub use config::RegistryConfig;
pub use mock::MockRegistry;
