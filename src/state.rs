// src/state.rs
use std::sync::Arc;

use crate::config::ProxyConfig;
use crate::services::gemini::GeminiClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: ProxyConfig,
    pub gemini: GeminiClient,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> Self {
        let gemini = GeminiClient::new(
            reqwest::Client::new(),
            config.base_url.clone(),
            config.model.clone(),
        );
        Self { config, gemini }
    }

    pub fn shared(config: ProxyConfig) -> SharedState {
        Arc::new(Self::new(config))
    }
}
