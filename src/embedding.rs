use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ScoringConfig;

#[derive(Clone)]
pub struct EmbeddingClient {
    endpoint: String,
    dimension: usize,
    client: reqwest::Client,
}

#[derive(Debug, Clone, Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

impl EmbeddingClient {
    pub fn from_config(config: &ScoringConfig) -> Result<Self, String> {
        let timeout = Duration::from_millis(config.embedding.timeout_ms);
        EmbeddingClient::new(
            config.embedding.endpoint.clone(),
            config.embedding.dimension,
            timeout,
        )
    }

    pub fn new(endpoint: String, dimension: usize, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| format!("failed to build embedding client: {}", err))?;
        Ok(Self {
            endpoint,
            dimension,
            client,
        })
    }

    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, String> {
        let url = format!("{}/embed", self.endpoint.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .json(&EmbedRequest { text })
            .send()
            .await
            .map_err(|err| format!("embedding request failed: {}", err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("embedding error {}: {}", status, body));
        }

        let parsed = response
            .json::<EmbedResponse>()
            .await
            .map_err(|err| format!("embedding response parse failed: {}", err))?;

        if parsed.embedding.len() != self.dimension {
            return Err(format!(
                "embedding dimension mismatch: expected {}, got {}",
                self.dimension,
                parsed.embedding.len()
            ));
        }
        Ok(parsed.embedding)
    }
}
