//! Client configuration
//!
//! Connection settings shared by every request a client makes. Can be built
//! in code or loaded from YAML:
//!
//! ```yaml
//! domain: tenant.example.com
//! base_path: api/v2
//! telemetry: false
//! timeout_secs: 10
//! default_headers:
//!   Authorization: Bearer eyJ...
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Configuration for an API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Tenant domain, with or without scheme
    pub domain: String,

    /// Path prefix for every endpoint
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Headers sent with every request
    #[serde(default)]
    pub default_headers: BTreeMap<String, String>,

    /// Send the SDK telemetry header
    #[serde(default = "default_telemetry")]
    pub telemetry: bool,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_path() -> String {
    "api/v2".to_string()
}

fn default_telemetry() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("{}/{}", crate::NAME, crate::VERSION)
}

impl ClientConfig {
    /// Create a config with defaults for the given domain
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            base_path: default_base_path(),
            default_headers: BTreeMap::new(),
            telemetry: default_telemetry(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }

    /// Create a new config builder
    pub fn builder(domain: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(domain),
        }
    }

    /// Parse a config from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        let host = strip_scheme(self.domain.trim()).trim_matches('/');
        if host.is_empty() {
            return Err(Error::missing_field("domain"));
        }
        if host.contains(char::is_whitespace) {
            return Err(Error::config(format!("Invalid domain: '{}'", self.domain)));
        }
        Ok(())
    }

    /// Absolute URL every request path is appended to
    pub fn base_url(&self) -> String {
        let domain = self.domain.trim().trim_end_matches('/');
        let domain = if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{domain}")
        };

        let base_path = self.base_path.trim_matches('/');
        if base_path.is_empty() {
            domain
        } else {
            format!("{domain}/{base_path}")
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn strip_scheme(domain: &str) -> &str {
    domain
        .strip_prefix("https://")
        .or_else(|| domain.strip_prefix("http://"))
        .unwrap_or(domain)
}

/// Builder for client config
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base path
    pub fn base_path(mut self, path: impl Into<String>) -> Self {
        self.config.base_path = path.into();
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn bearer_token(self, token: impl AsRef<str>) -> Self {
        let value = format!("Bearer {}", token.as_ref());
        self.header("Authorization", value)
    }

    /// Enable or disable the telemetry header
    pub fn telemetry(mut self, enabled: bool) -> Self {
        self.config.telemetry = enabled;
        self
    }

    /// Set the transport timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs();
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
