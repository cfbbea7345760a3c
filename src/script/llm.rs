// SCRIPTFORGE Model Client - OpenAI-Compatible Completion Bridge
// Copyright (c) 2026 ScriptForge | SCRIPTFORGE

use serde_json::json;
use tracing::{error, info};

use crate::state::ServiceConfig;

/// Thin client over an OpenAI-compatible chat completion endpoint. One
/// outbound call per request, awaited to completion; no retry and no
/// timeout at this layer. Output shape is never trusted: JSON validity and
/// language compliance are enforced downstream by the normalizer.
pub struct ModelClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl ModelClient {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Send a prompt, get raw text back. Transport failures and non-2xx
    /// statuses come back as `Err`; callers degrade to a fallback script
    /// instead of surfacing an HTTP error.
    pub async fn generate(&self, prompt: &str) -> Result<String, String> {
        info!("[LLM] Prompting {} ({} chars)", self.model, prompt.len());

        let payload = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": "Tu es un générateur de scripts vidéo. Réponds uniquement avec du JSON valide."
                },
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "temperature": 0.7
        });

        let endpoint = format!("{}/chat/completions", self.api_url.trim_end_matches('/'));

        let mut request = self.client.post(&endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        match request.send().await {
            Ok(resp) => {
                if resp.status().is_success() {
                    let body: serde_json::Value = resp.json().await.map_err(|e| e.to_string())?;
                    // Extract content from: choices[0].message.content
                    let content = body["choices"][0]["message"]["content"]
                        .as_str()
                        .unwrap_or("")
                        .to_string();
                    Ok(content)
                } else {
                    Err(format!("API Error: {}", resp.status()))
                }
            }
            Err(e) => {
                error!("[LLM] Connection failed: {}", e);
                Err(e.to_string())
            }
        }
    }
}
