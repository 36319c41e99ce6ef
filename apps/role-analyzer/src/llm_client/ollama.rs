//! Ollama `/api/generate` client (non-streaming).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{send_json, LlmError, TextBackend};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,
    pub prompt_eval_count: Option<u32>,
    pub eval_count: Option<u32>,
}

#[derive(Clone)]
pub struct OllamaClient {
    http: Client,
    api_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(http: Client, api_url: String, model: String) -> Self {
        Self {
            http,
            api_url,
            model,
        }
    }
}

#[async_trait]
impl TextBackend for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let raw = send_json(self.http.post(&self.api_url), &body).await?;
        decode_response(&raw)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn decode_response(raw: &str) -> Result<String, LlmError> {
    let parsed: GenerateResponse = serde_json::from_str(raw)?;

    debug!(
        "Ollama call succeeded: prompt_tokens={:?}, output_tokens={:?}",
        parsed.prompt_eval_count, parsed.eval_count
    );

    Ok(parsed.response)
}
