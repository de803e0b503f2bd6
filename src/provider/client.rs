//! OpenAI-compatible chat-completions client.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{CompletionClient, CompletionError};
use crate::config::Config;
use crate::transcript::Entry;

/// Client for `POST {base_url}/chat/completions` in JSON-object mode.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Entry],
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    /// Builds a client from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            anyhow::anyhow!(
                "No API key found. Set OPENAI_KEY (or OPENAI_API_KEY), or api_key in {}",
                Config::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| crate::constants::CONFIG_FILENAME.to_string())
            )
        })?;
        Self::new(
            api_key,
            config.base_url(),
            config.model.clone(),
            Duration::from_secs(config.request_timeout_secs()),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Pull a readable message out of an error body, falling back to the raw text.
fn parse_error(status: u16, body: &str) -> CompletionError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    CompletionError::Api { status, message }
}

#[async_trait::async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, transcript: &[Entry]) -> Result<String, CompletionError> {
        let body = ChatRequest {
            model: &self.model,
            messages: transcript,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        tracing::debug!(
            model = %self.model,
            entries = transcript.len(),
            "requesting completion"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(parse_error(status.as_u16(), &text));
        }

        let text = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        Ok(content.trim().to_string())
    }
}
