// src/config.rs
use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 1000;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are LaunchPath AI, a smart, helpful assistant \
specializing in business, finance, entrepreneurship, productivity, school support, and motivation.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR '{value}': {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Server settings, read once at startup.
#[derive(Clone, Debug)]
pub struct ProxyConfig {
    /// `None` keeps the server up; every chat request then fails with a
    /// configuration error.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub bind_addr: SocketAddr,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Echo the provider's own error text in the `details` field.
    pub expose_provider_errors: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
            expose_provider_errors: false,
        }
    }
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind
            .parse()
            .map_err(|source| ConfigError::BindAddr { value: bind.clone(), source })?;

        let defaults = Self::default();
        Ok(Self {
            api_key: get("GEMINI_API_KEY"),
            model: get("GEMINI_MODEL").unwrap_or(defaults.model),
            base_url: get("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            bind_addr,
            system_prompt: get("CHAT_SYSTEM_PROMPT").unwrap_or(defaults.system_prompt),
            temperature: defaults.temperature,
            max_output_tokens: defaults.max_output_tokens,
            expose_provider_errors: get("EXPOSE_PROVIDER_ERRORS")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    /// Defaults aimed at another provider host, with an optional key.
    pub fn with_provider(base_url: impl Into<String>, api_key: Option<&str>) -> Self {
        Self {
            api_key: api_key.map(str::to_string),
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<ProxyConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ProxyConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = load(&[]).unwrap();
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.bind_addr.port(), 3000);
        assert_eq!(cfg.max_output_tokens, 1000);
        assert!(!cfg.expose_provider_errors);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = load(&[("GEMINI_API_KEY", "   ")]).unwrap();
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn reads_overrides() {
        let cfg = load(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_BASE_URL", "http://localhost:9000/"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("EXPOSE_PROVIDER_ERRORS", "TRUE"),
        ])
        .unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("k"));
        assert_eq!(cfg.base_url, "http://localhost:9000");
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8080");
        assert!(cfg.expose_provider_errors);
    }

    #[test]
    fn rejects_bad_bind_addr() {
        let err = load(&[("BIND_ADDR", "nowhere")]).unwrap_err();
        assert!(err.to_string().contains("nowhere"));
    }
}
