use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::Config,
    error::{AppError, Result},
    models::completion::{
        ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat, Role,
    },
};

pub const MODEL: &str = "gpt-4o-mini";
pub const TEMPERATURE: f64 = 0.7;

/// Returned when the model answers with no content at all.
const EMPTY_CONTENT: &str = "{}";

/// A single-shot chat completion: one system turn, one user turn, JSON mode.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Returns the first choice's message content.
    ///
    /// A non-success upstream status is `AppError::Upstream` carrying the raw
    /// response body; transport and decoding failures are `AppError::Other`.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

pub struct OpenAiClient {
    http: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            api_key: config.openai_api_key.clone(),
            endpoint: format!("{}/chat/completions", config.openai_base_url),
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Upstream("OPENAI_API_KEY is not set".into()))?;

        debug_log_preview(system, user);

        let body = ChatCompletionRequest {
            model: MODEL,
            temperature: TEMPERATURE,
            response_format: ResponseFormat::JSON_OBJECT,
            messages: vec![
                ChatMessage { role: Role::System, content: system },
                ChatMessage { role: Role::User, content: user },
            ],
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to call OpenAI at {}", self.endpoint))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.context("Failed to read OpenAI error body")?;
            tracing::error!(%status, body = %text, "OpenAI returned an error status");
            return Err(AppError::Upstream(text));
        }

        let completion: ChatCompletionResponse = resp
            .json()
            .await
            .context("Failed to decode OpenAI response")?;

        Ok(completion
            .first_content()
            .unwrap_or(EMPTY_CONTENT)
            .to_string())
    }
}

fn debug_log_preview(system: &str, user: &str) {
    tracing::debug!(
        model = MODEL,
        system_len = system.len(),
        user_len = user.len(),
        user_preview = %user.chars().take(80).collect::<String>(),
        "Sending chat completion"
    );
}
