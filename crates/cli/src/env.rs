// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::time::Duration;

use mage_core::{CredentialsPatch, Provider};

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Gemini key: GEMINI_API_KEY > API_KEY
pub fn gemini_key() -> Option<String> {
    non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY"))
}

pub fn grok_key() -> Option<String> {
    non_empty("GROK_API_KEY")
}

pub fn dataforseo_key() -> Option<String> {
    non_empty("DATAFORSEO_API_KEY")
}

/// Credentials found in the environment. Unset providers are omitted.
pub fn credentials() -> CredentialsPatch {
    [
        (Provider::Gemini, gemini_key()),
        (Provider::Grok, grok_key()),
        (Provider::DataForSeo, dataforseo_key()),
    ]
    .into_iter()
    .fold(CredentialsPatch::new(), |patch, (provider, key)| match key {
        Some(key) => patch.with(provider, key),
        None => patch,
    })
}

pub fn gemini_model() -> Option<String> {
    non_empty("MAGE_GEMINI_MODEL")
}

pub fn gemini_base_url() -> Option<String> {
    non_empty("MAGE_GEMINI_BASE_URL")
}

pub fn grok_model() -> Option<String> {
    non_empty("MAGE_GROK_MODEL")
}

pub fn grok_base_url() -> Option<String> {
    non_empty("MAGE_GROK_BASE_URL")
}

/// Whole-request HTTP timeout (default 120s, configurable via `MAGE_HTTP_TIMEOUT_MS`).
pub fn http_timeout() -> Duration {
    std::env::var("MAGE_HTTP_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(120))
}

/// Tracing filter directive (default `warn`)
pub fn log_filter() -> String {
    non_empty("MAGE_LOG").unwrap_or_else(|| "warn".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
