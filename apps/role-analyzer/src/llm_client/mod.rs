//! LLM client: the single point of entry for all text-generation calls.
//!
//! ARCHITECTURAL RULE: No other module may talk to a backend over HTTP directly.
//! The analyzer only sees `TextBackend`; the concrete client is picked at startup
//! from `Config::backend`.
//!
//! Model names and endpoints come from configuration. Nothing here is retried:
//! a failed call is reported once and the caller moves on.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::{BackendKind, Config};

pub mod gemini;
pub mod ollama;

pub use gemini::GeminiClient;
pub use ollama::OllamaClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A backend that turns one prompt into one block of generated text.
#[async_trait]
pub trait TextBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Model identifier sent with every request.
    fn model(&self) -> &str;
}

/// Builds the client selected by `config.backend`.
pub fn from_config(config: &Config) -> Result<Arc<dyn TextBackend>, LlmError> {
    let http = build_http_client(config.request_timeout)?;

    let backend: Arc<dyn TextBackend> = match config.backend {
        BackendKind::Ollama => Arc::new(OllamaClient::new(
            http,
            config.ollama_url.clone(),
            config.model.clone(),
        )),
        BackendKind::Gemini => Arc::new(GeminiClient::new(
            http,
            config.gemini_api_base.clone(),
            config.gemini_api_key.clone().unwrap_or_default(),
            config.model.clone(),
        )),
    };

    Ok(backend)
}

fn build_http_client(timeout: Option<Duration>) -> Result<Client, LlmError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Sends a JSON request and returns the raw body of a 2xx response.
/// Any other status becomes `LlmError::Api` carrying the backend's own message.
async fn send_json<B: Serialize + ?Sized>(
    request: RequestBuilder,
    body: &B,
) -> Result<String, LlmError> {
    let response = request
        .header("content-type", "application/json")
        .json(body)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(LlmError::Api {
            status: status.as_u16(),
            message: api_error_message(text),
        });
    }

    debug!("Backend call succeeded: status={}, bytes={}", status, text.len());
    Ok(text)
}

/// Ollama answers `{"error": "..."}`, Gemini answers `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiErrorDetail {
    Nested { message: String },
    Plain(String),
}

fn api_error_message(body: String) -> String {
    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(ApiErrorBody {
            error: ApiErrorDetail::Nested { message },
        }) => message,
        Ok(ApiErrorBody {
            error: ApiErrorDetail::Plain(message),
        }) => message,
        Err(_) => body,
    }
}
