use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::config::LlmConfig;

/// Language-model completion used to produce candidate reports.
pub trait CompletionEngine: Send + Sync {
    fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("response could not be decoded: {0}")]
    Decode(String),
    #[error("model returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: [InputMessage<'a>; 2],
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    part_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl ResponsesResponse {
    /// Concatenation of every `output_text` part, mirroring the SDK's
    /// `output_text` convenience accessor.
    fn output_text(&self) -> String {
        self.output
            .iter()
            .flat_map(|item| item.content.iter())
            .filter(|part| part.part_type == "output_text")
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

/// OpenAI Responses API client. A single attempt per call; callers treat
/// failures as "no report this run".
pub struct OpenAiClient {
    http: Client,
    api_url: String,
    api_key: String,
    model: String,
    max_output_tokens: u32,
    runtime: Arc<Runtime>,
}

impl OpenAiClient {
    pub fn new(
        config: &LlmConfig,
        api_key: &str,
        runtime: Arc<Runtime>,
    ) -> Result<Self, CompletionError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(180))
            .build()
            .map_err(|err| CompletionError::Http(err.to_string()))?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: config.model.clone(),
            max_output_tokens: config.max_output_tokens,
            runtime,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn request(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let body = ResponsesRequest {
            model: &self.model,
            input: [
                InputMessage {
                    role: "system",
                    content: system,
                },
                InputMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_output_tokens: self.max_output_tokens,
        };

        let response = self
            .http
            .post(format!("{}/responses", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| CompletionError::Http(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
                .map(|envelope| envelope.error.message)
                .unwrap_or(raw);
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ResponsesResponse = response
            .json()
            .await
            .map_err(|err| CompletionError::Decode(err.to_string()))?;

        let text = parsed.output_text();
        if text.trim().is_empty() {
            return Err(CompletionError::EmptyContent);
        }

        debug!(model = %self.model, chars = text.len(), "completion received");
        Ok(text)
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl CompletionEngine for OpenAiClient {
    fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        self.runtime.block_on(self.request(system, user))
    }
}
