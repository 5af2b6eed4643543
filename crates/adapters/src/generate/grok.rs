// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! x.ai chat completions backend (OpenAI-compatible).

use super::http::send_json;
use super::{build_envelope, non_empty, GenerateError, GenerationAdapter, TEMPERATURE};
use async_trait::async_trait;
use mage_core::{GenerationRequest, Provider};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug)]
pub struct GrokAdapter {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

impl GrokAdapter {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.x.ai/v1";
    pub const DEFAULT_MODEL: &'static str = "grok-2-latest";

    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerationAdapter for GrokAdapter {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        if request.credential.is_empty() {
            return Err(GenerateError::MissingCredential(Provider::Grok));
        }

        let envelope = build_envelope(request);
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage { role: "user", content: &envelope }],
            temperature: TEMPERATURE,
            stream: false,
        };

        tracing::debug!(model = %self.model, agent = %request.agent_name, "sending grok request");
        let reply = send_json(
            self.client
                .post(format!("{}/chat/completions", self.base_url))
                .bearer_auth(&request.credential)
                .json(&body),
        )
        .await
        .inspect_err(|e| tracing::warn!(model = %self.model, error = %e, "grok request failed"))?;

        let parsed: ChatResponse = serde_json::from_value(reply).map_err(|e| {
            tracing::warn!(model = %self.model, error = %e, "grok reply did not match chat schema");
            GenerateError::Failure(format!("unexpected response shape: {}", e))
        })?;
        let text = parsed.choices.into_iter().next().and_then(|c| c.message.content);
        Ok(non_empty(text.unwrap_or_default()))
    }
}

#[cfg(test)]
#[path = "grok_tests.rs"]
mod tests;
