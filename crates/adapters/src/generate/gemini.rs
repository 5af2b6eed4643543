// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Google Generative Language `generateContent` backend.

use super::http::send_json;
use super::{build_envelope, non_empty, GenerateError, GenerationAdapter, TEMPERATURE};
use async_trait::async_trait;
use mage_core::{GenerationRequest, Provider};
use serde_json::{json, Value};

#[derive(Clone, Debug)]
pub struct GeminiAdapter {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiAdapter {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";
    pub const DEFAULT_MODEL: &'static str = "gemini-2.5-flash";

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

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Concatenated text parts of the first candidate.
fn response_text(value: &Value) -> String {
    value
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .map(|parts| parts.iter().filter_map(|p| p.get("text").and_then(Value::as_str)).collect())
        .unwrap_or_default()
}

#[async_trait]
impl GenerationAdapter for GeminiAdapter {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        if request.credential.is_empty() {
            return Err(GenerateError::MissingCredential(Provider::Gemini));
        }

        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": build_envelope(request) }] }],
            "generationConfig": { "temperature": TEMPERATURE },
        });

        tracing::debug!(model = %self.model, agent = %request.agent_name, "sending gemini request");
        let reply = send_json(
            self.client
                .post(self.endpoint())
                .header("x-goog-api-key", &request.credential)
                .json(&body),
        )
        .await
        .inspect_err(|e| tracing::warn!(model = %self.model, error = %e, "gemini request failed"))?;

        Ok(non_empty(response_text(&reply)))
    }
}

#[cfg(test)]
#[path = "gemini_tests.rs"]
mod tests;
