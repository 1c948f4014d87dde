//! Civitai model-version lookup client.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use veja_core::{defaults, Error, ModelRegistry, RegistryEntry, Result};

/// Registry client for the Civitai public API.
///
/// One `GET /model-versions/{id}` per lookup, single attempt, bounded by
/// the configured timeout. The hash returned is selected by the configured
/// algorithm preference, falling back to SHA256 and then to any hash the
/// registry published.
pub struct CivitaiRegistry {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    hash_algorithm: String,
}

impl CivitaiRegistry {
    /// Create a client from an explicit configuration.
    pub fn new(config: crate::RegistryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        info!(
            "Initializing model registry client: url={}, hash_algorithm={}, timeout={}s",
            config.base_url, config.hash_algorithm, config.timeout_secs
        );

        Ok(Self {
            client,
            base_url: config.base_url,
            api_key: config.api_key,
            hash_algorithm: config.hash_algorithm,
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(crate::RegistryConfig::from_env())
    }

    /// Pick a hash from the published files: preferred algorithm first,
    /// then SHA256, then anything available.
    fn select_hash(&self, files: &[ModelVersionFile]) -> Option<String> {
        for algorithm in [
            self.hash_algorithm.as_str(),
            defaults::FALLBACK_HASH_ALGORITHM,
        ] {
            if let Some(hash) = files.iter().find_map(|f| f.hashes.get(algorithm)) {
                return Some(hash.clone());
            }
        }
        files.iter().find_map(|f| f.hashes.values().next().cloned())
    }
}

#[async_trait]
impl ModelRegistry for CivitaiRegistry {
    async fn lookup(&self, version_id: i64) -> Result<RegistryEntry> {
        let url = format!("{}/model-versions/{}", self.base_url, version_id);
        debug!("looking up model version {}", version_id);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("model version {}", version_id)));
        }
        if !response.status().is_success() {
            return Err(Error::Request(format!(
                "registry returned {} for model version {}",
                response.status(),
                version_id
            )));
        }

        let body = response.text().await?;
        let parsed: ModelVersionResponse = serde_json::from_str(&body)?;

        let hash = self.select_hash(&parsed.files).ok_or_else(|| {
            Error::NotFound(format!("no hash published for model version {}", version_id))
        })?;
        let model = parsed.model.unwrap_or_default();

        Ok(RegistryEntry {
            kind: model.kind,
            name: model.name,
            hash,
        })
    }
}

// ---------------------------------------------------------------------------
// Response DTOs (subset of the model-version payload this client consumes)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ModelVersionResponse {
    #[serde(default)]
    model: Option<ModelDescriptor>,
    #[serde(default)]
    files: Vec<ModelVersionFile>,
}

#[derive(Debug, Default, Deserialize)]
struct ModelDescriptor {
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ModelVersionFile {
    #[serde(default)]
    hashes: HashMap<String, String>,
}
