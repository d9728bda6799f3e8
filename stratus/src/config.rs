//! Client configuration.
//!
//! A [`Config`] names the search domain and region the client talks to.
//! Sandbox mode is an explicit per-client flag, not process-wide state:
//! a sandboxed client answers every call locally without network I/O.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// The search domain name, e.g. `products-abc123`.
    pub search_domain: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Host suffix of the service endpoints. Overridable for tests and
    /// self-hosted gateways.
    #[serde(default = "default_endpoint_suffix")]
    pub endpoint_suffix: String,
    #[serde(default)]
    pub sandbox: bool,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_api_version() -> String {
    "2013-01-01".to_string()
}

fn default_endpoint_suffix() -> String {
    "cloudsearch.amazonaws.com".to_string()
}

impl Config {
    pub fn new(search_domain: impl Into<String>) -> Self {
        Config {
            search_domain: search_domain.into(),
            region: default_region(),
            api_version: default_api_version(),
            endpoint_suffix: default_endpoint_suffix(),
            sandbox: false,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_endpoint_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.endpoint_suffix = suffix.into();
        self
    }

    pub fn sandboxed(mut self) -> Self {
        self.sandbox = true;
        self
    }

    /// Loads configuration from `STRATUS_*` environment variables.
    ///
    /// `STRATUS_SEARCH_DOMAIN` is required; `STRATUS_REGION`,
    /// `STRATUS_API_VERSION`, `STRATUS_ENDPOINT_SUFFIX` and `STRATUS_SANDBOX`
    /// override the defaults.
    pub fn from_env() -> Result<Self> {
        let search_domain =
            std::env::var("STRATUS_SEARCH_DOMAIN").map_err(|_| Error::MissingSearchDomain)?;
        let mut config = Config::new(search_domain);

        if let Ok(region) = std::env::var("STRATUS_REGION") {
            config.region = region;
        }
        if let Ok(api_version) = std::env::var("STRATUS_API_VERSION") {
            config.api_version = api_version;
        }
        if let Ok(suffix) = std::env::var("STRATUS_ENDPOINT_SUFFIX") {
            config.endpoint_suffix = suffix;
        }
        if let Ok(sandbox) = std::env::var("STRATUS_SANDBOX") {
            config.sandbox = matches!(sandbox.as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("products-abc123");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.api_version, "2013-01-01");
        assert_eq!(config.endpoint_suffix, "cloudsearch.amazonaws.com");
        assert!(!config.sandbox);
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::new("products-abc123")
            .with_region("eu-west-1")
            .with_api_version("2011-02-01")
            .sandboxed();
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.api_version, "2011-02-01");
        assert!(config.sandbox);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"search_domain": "products-abc123"}"#).unwrap();
        assert_eq!(config.region, "us-east-1");
        assert!(!config.sandbox);
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("STRATUS_SEARCH_DOMAIN", "env-domain");
        std::env::set_var("STRATUS_REGION", "us-west-2");
        std::env::set_var("STRATUS_SANDBOX", "true");

        let config = Config::from_env().unwrap();
        assert_eq!(config.search_domain, "env-domain");
        assert_eq!(config.region, "us-west-2");
        assert!(config.sandbox);

        std::env::remove_var("STRATUS_SEARCH_DOMAIN");
        std::env::remove_var("STRATUS_REGION");
        std::env::remove_var("STRATUS_SANDBOX");
    }
}
