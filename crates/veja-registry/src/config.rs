//! Registry client configuration.

use veja_core::defaults;

/// Configuration for the Civitai registry client.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Base URL for the registry API.
    pub base_url: String,
    /// Optional bearer token (the public API works without one, at a lower
    /// rate limit).
    pub api_key: Option<String>,
    /// Per-lookup timeout in seconds.
    pub timeout_secs: u64,
    /// Preferred hash algorithm requested from registry responses. Chosen
    /// once at construction, not per call.
    pub hash_algorithm: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::REGISTRY_URL.to_string(),
            api_key: None,
            timeout_secs: defaults::REGISTRY_TIMEOUT_SECS,
            hash_algorithm: defaults::HASH_ALGORITHM.to_string(),
        }
    }
}

impl RegistryConfig {
    /// Build a configuration from environment variables, falling back to
    /// the shared defaults for anything unset or unparseable.
    ///
    /// Variables: `MIRAVEJA_REGISTRY_URL`, `MIRAVEJA_REGISTRY_API_KEY`,
    /// `MIRAVEJA_REGISTRY_TIMEOUT_SECS`, `MIRAVEJA_HASH_ALGORITHM`.
    pub fn from_env() -> Self {
        let base_url = std::env::var("MIRAVEJA_REGISTRY_URL")
            .unwrap_or_else(|_| defaults::REGISTRY_URL.to_string());
        let api_key = std::env::var("MIRAVEJA_REGISTRY_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let timeout_secs = std::env::var("MIRAVEJA_REGISTRY_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::REGISTRY_TIMEOUT_SECS);
        let hash_algorithm = std::env::var("MIRAVEJA_HASH_ALGORITHM")
            .unwrap_or_else(|_| defaults::HASH_ALGORITHM.to_string());

        Self {
            base_url,
            api_key,
            timeout_secs,
            hash_algorithm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.base_url, defaults::REGISTRY_URL);
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_secs, defaults::REGISTRY_TIMEOUT_SECS);
        assert_eq!(config.hash_algorithm, defaults::HASH_ALGORITHM);
    }

    #[test]
    fn test_timeout_is_single_digit_seconds() {
        // One slow registry lookup must not stall an upload
        assert!(RegistryConfig::default().timeout_secs < 10);
    }
}
