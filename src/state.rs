// SCRIPTFORGE Service State - Immutable Process-Wide Configuration
// Copyright (c) 2026 ScriptForge | SCRIPTFORGE

use std::sync::Arc;

use tracing::info;

use crate::script::llm::ModelClient;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Model-service configuration, read once at startup and never mutated.
/// Handlers receive it through `Arc<ServiceState>`, never from the
/// environment ad hoc.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("LLM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_key = std::env::var("LLM_API_KEY").ok().filter(|k| !k.is_empty());
        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        if api_key.is_none() {
            info!("[CONFIG] LLM_API_KEY not set, model calls will run unauthenticated");
        }
        Self { api_url, api_key, model }
    }
}

pub struct ServiceState {
    pub config: ServiceConfig,
    pub llm: ModelClient,
}

impl ServiceState {
    pub fn new(config: ServiceConfig) -> Self {
        let llm = ModelClient::new(&config);
        Self { config, llm }
    }
}

pub type AppState = Arc<ServiceState>;
