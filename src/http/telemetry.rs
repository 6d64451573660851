//! Client telemetry header
//!
//! Identifies the SDK to the API as `base64url(json)` without padding.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Serialize;
use std::collections::BTreeMap;

/// Header carrying the encoded telemetry payload
pub const TELEMETRY_HEADER: &str = "idm-client";

/// SDK identification sent with each request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Telemetry {
    pub name: String,
    pub version: String,
    pub env: BTreeMap<String, String>,
}

impl Default for Telemetry {
    fn default() -> Self {
        let mut env = BTreeMap::new();
        env.insert("rust".to_string(), rust_version().to_string());
        Self {
            name: crate::NAME.to_string(),
            version: crate::VERSION.to_string(),
            env,
        }
    }
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an additional library in the environment block
    #[must_use]
    pub fn with_dependency(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.env.insert(name.into(), version.into());
        self
    }

    /// Encoded header value
    pub fn header_value(&self) -> String {
        // Serializing plain strings and maps cannot fail.
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }
}

fn rust_version() -> &'static str {
    option_env!("CARGO_PKG_RUST_VERSION")
        .filter(|v| !v.is_empty())
        .unwrap_or("stable")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_telemetry() {
        let telemetry = Telemetry::new();
        assert_eq!(telemetry.name, "idm-client");
        assert_eq!(telemetry.version, crate::VERSION);
        assert!(telemetry.env.contains_key("rust"));
    }

    #[test]
    fn test_header_value_round_trips() {
        let telemetry = Telemetry::new().with_dependency("my-app", "2.1.0");
        let encoded = telemetry.header_value();

        assert!(!encoded.contains('='));
        let decoded = URL_SAFE_NO_PAD.decode(encoded).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(value["name"], "idm-client");
        assert_eq!(value["env"]["my-app"], "2.1.0");
    }
}
