//! Gemini `models/{model}:generateContent` client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{send_json, LlmError, TextBackend};

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(http: Client, api_base: String, api_key: String, model: String) -> Self {
        Self {
            http,
            api_base,
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl TextBackend for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let request = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key);

        let raw = send_json(request, &body).await?;
        decode_response(&raw)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn decode_response(raw: &str) -> Result<String, LlmError> {
    let parsed: GenerateContentResponse = serde_json::from_str(raw)?;

    if let Some(usage) = &parsed.usage_metadata {
        debug!(
            "Gemini call succeeded: input_tokens={:?}, output_tokens={:?}",
            usage.prompt_token_count, usage.candidates_token_count
        );
    }

    Ok(parsed.text())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_base: &str) -> GeminiClient {
        GeminiClient::new(
            Client::new(),
            api_base.to_string(),
            "test-key".to_string(),
            "gemini-2.0-flash".to_string(),
        )
    }

    #[test]
    fn test_endpoint_includes_model() {
        let c = client("https://generativelanguage.googleapis.com/v1beta/");
        assert_eq!(
            c.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_request_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"contents": [{"parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn test_decode_joins_parts_of_first_candidate() {
        let raw = r###"{
            "candidates": [
                {"content": {"parts": [{"text": "# Data Analyst\n"}, {"text": "SQL, Python"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 30, "candidatesTokenCount": 12}
        }"###;
        assert_eq!(decode_response(raw).unwrap(), "# Data Analyst\nSQL, Python");
    }

    #[test]
    fn test_decode_without_candidates_is_empty_text() {
        let raw = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        assert_eq!(decode_response(raw).unwrap(), "");
    }
}
