//! Agent configuration.

use serde::Deserialize;
use tracing::warn;

/// Configuration for the hello agent, read from `agent.toml` and the
/// environment (`FLASK_PORT`, `AGENT_PRIVATE_KEY`, `THEORIQ_URI`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::bind_host")]
    pub bind_host: String,

    #[serde(default = "defaults::flask_port")]
    pub flask_port: u16,

    /// Hex ed25519 seed, `0x` prefix optional.
    #[serde(default)]
    pub agent_private_key: Option<String>,

    #[serde(default)]
    pub theoriq_uri: Option<String>,

    /// Comma separated; `*` allows any origin.
    #[serde(default = "defaults::cors_allowed_origins")]
    pub cors_allowed_origins: String,

    #[serde(default = "defaults::request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_host: defaults::bind_host(),
            flask_port: defaults::flask_port(),
            agent_private_key: None,
            theoriq_uri: None,
            cors_allowed_origins: defaults::cors_allowed_origins(),
            request_timeout_secs: defaults::request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load from the optional `agent` config file, then the environment.
    ///
    /// Falls back to defaults only when nothing is configured; parse errors
    /// (e.g. a non-numeric `FLASK_PORT`) are returned.
    pub fn load() -> Result<Self, crate::Error> {
        let loaded = config::Config::builder()
            .add_source(config::File::with_name("agent").required(false))
            .add_source(config::Environment::default())
            .build()
            .and_then(|c| c.try_deserialize::<Config>());

        match loaded {
            Ok(config) => Ok(config),
            Err(e) => {
                let err_str = format!("{e}");
                if err_str.contains("not found") || err_str.contains("missing field") {
                    warn!(error = %e, "No configuration found, using defaults");
                    Ok(Config::default())
                } else {
                    Err(crate::Error::Config(err_str))
                }
            }
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.flask_port)
    }

    /// Platform URI with a scheme, if one is configured.
    pub fn theoriq_uri(&self) -> Option<String> {
        self.theoriq_uri.as_deref().and_then(normalize_uri)
    }

    /// Allowed CORS origins; empty means any origin. A `*` entry anywhere
    /// in the list wins over explicit origins.
    pub fn cors_origins(&self) -> Vec<String> {
        let entries: Vec<&str> = self
            .cors_allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .collect();
        if entries.contains(&"*") {
            return Vec::new();
        }
        entries.into_iter().map(String::from).collect()
    }
}

/// Prefix `http://` when the URI carries no scheme. Blank input yields `None`.
pub fn normalize_uri(raw: &str) -> Option<String> {
    let uri = raw.trim();
    if uri.is_empty() {
        return None;
    }
    if uri.contains("://") {
        Some(uri.to_string())
    } else {
        Some(format!("http://{uri}"))
    }
}

mod defaults {
    pub fn bind_host() -> String {
        "0.0.0.0".into()
    }

    pub fn flask_port() -> u16 {
        8000
    }

    pub fn cors_allowed_origins() -> String {
        "*".into()
    }

    pub fn request_timeout_secs() -> u64 {
        30
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_address() {
        assert_eq!(Config::default().bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_normalize_uri_adds_scheme() {
        assert_eq!(
            normalize_uri("theoriq.example:8080").as_deref(),
            Some("http://theoriq.example:8080")
        );
    }

    #[test]
    fn test_normalize_uri_keeps_scheme() {
        assert_eq!(
            normalize_uri(" https://theoriq.ai ").as_deref(),
            Some("https://theoriq.ai")
        );
        assert_eq!(normalize_uri("   "), None);
    }

    #[test]
    fn test_cors_origins() {
        let mut config = Config::default();
        assert!(config.cors_origins().is_empty());

        config.cors_allowed_origins = "https://a.example, https://b.example,".into();
        assert_eq!(
            config.cors_origins(),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );

        config.cors_allowed_origins = "https://a.example, *".into();
        assert!(config.cors_origins().is_empty());
    }

    #[test]
    fn test_deserialize_port_from_string() {
        let config: Config = config::Config::builder()
            .set_override("flask_port", "9100")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.flask_port, 9100);
        assert_eq!(config.request_timeout_secs, 30);
    }
}
