// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared HTTP plumbing for the JSON backends.

use super::GenerateError;
use serde_json::Value;
use std::time::Duration;

/// Build the client shared by every backend. The timeout bounds the whole
/// request so a hung connection cannot leave an agent working forever.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}

/// Send a prepared request and decode the JSON reply.
///
/// Non-success statuses become a [`GenerateError::Failure`] carrying the
/// service's own error message when it provides one.
pub(crate) async fn send_json(request: reqwest::RequestBuilder) -> Result<Value, GenerateError> {
    let response = request.send().await.map_err(|e| GenerateError::Failure(transport_message(&e)))?;
    let status = response.status();
    let body = response.text().await.map_err(|e| GenerateError::Failure(e.to_string()))?;
    let value: Option<Value> = serde_json::from_str(&body).ok();

    if !status.is_success() {
        let message = value
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| format!("service returned HTTP {}", status.as_u16()));
        return Err(GenerateError::Failure(message));
    }

    value.ok_or_else(|| GenerateError::Failure("response was not valid JSON".to_string()))
}

/// Extract `error.message` or a bare `error` string from a reply.
pub(crate) fn error_message(value: &Value) -> Option<String> {
    let error = value.get("error")?;
    match error {
        Value::String(s) => Some(s.clone()),
        other => other.get("message").and_then(Value::as_str).map(str::to_string),
    }
}

fn transport_message(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        format!("could not connect: {}", e)
    } else {
        e.to_string()
    }
}
