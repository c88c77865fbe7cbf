use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("generation endpoint returned status {0}")]
    Status(u16),
}

/// Text-generation collaborator.
///
/// The call may fail or come back empty; the dispatcher maps both to the
/// canned fallback reply, so implementations never need to retry.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Generator backed by an Ollama-compatible HTTP gateway
pub struct HttpResponseGenerator {
    http_client: Client,
    endpoint: String,
    model: String,
}

impl HttpResponseGenerator {
    pub fn new(endpoint: String, model: String) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            endpoint,
            model,
        }
    }
}

#[async_trait]
impl ResponseGenerator for HttpResponseGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        tracing::debug!("Requesting generation from {}", self.endpoint);

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                "Generation endpoint {} returned status {}",
                self.endpoint,
                status.as_u16()
            );
            return Err(GenerationError::Status(status.as_u16()));
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.response)
    }
}
