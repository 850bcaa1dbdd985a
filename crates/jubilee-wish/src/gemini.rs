use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::timeout;
use tracing::debug;

use jubilee_core::config::WishConfig;

use crate::error::WishError;
use crate::provider::WishProvider;

/// Gemini-backed wish generator.
///
/// Talks to the `generateContent` endpoint with a bounded timeout. The base
/// URL is injectable so tests can point the client at a mock server.
#[derive(Debug)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

impl GeminiClient {
    /// Build a client from config, reading the API key from the configured
    /// environment variable. A missing key means the capability is absent.
    pub fn from_env(config: &WishConfig) -> Result<Self, WishError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| WishError::MissingApiKey(config.api_key_env.clone()))?;
        Ok(Self::new(
            api_key,
            config.base_url.clone(),
            config.model.clone(),
            config.timeout_secs,
        ))
    }

    /// Build a client with explicit parameters.
    pub fn new(api_key: String, base_url: String, model: String, timeout_secs: u64) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            timeout_secs,
        }
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, WishError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let request = self.http.post(&url).json(&payload).send();
        let response = timeout(Duration::from_secs(self.timeout_secs), request)
            .await
            .map_err(|_| WishError::Timeout(self.timeout_secs))??;

        let status = response.status();
        if !status.is_success() {
            return Err(WishError::BadStatus(status.as_u16()));
        }

        let json: serde_json::Value = response.json().await?;
        let text = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(WishError::EmptyResponse);
        }

        debug!(chars = text.len(), "Wish generated");
        Ok(text)
    }
}

#[async_trait]
impl WishProvider for GeminiClient {
    async fn generate(&self, name: &str) -> Result<String, WishError> {
        let prompt = format!(
            "Generate a warm and personalized birthday wish for {}. Make it heartfelt, \
             positive, and celebratory. Keep it under 100 words.",
            name
        );
        self.generate_content(&prompt).await
    }

    async fn generate_with_age(&self, name: &str, age: u32) -> Result<String, WishError> {
        let prompt = format!(
            "Generate a warm and personalized birthday wish for {} who is turning {} \
             years old. Make it heartfelt, positive, and celebratory. Keep it under \
             100 words.",
            name, age
        );
        self.generate_content(&prompt).await
    }
}

// =============================================================================
// Tests
// =============================================================================
