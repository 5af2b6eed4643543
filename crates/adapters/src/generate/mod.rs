// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text generation backends.
//!
//! Every backend receives the same [`GenerationRequest`], wraps it in the
//! shared instruction envelope, and returns the response text verbatim.

mod envelope;
mod gemini;
mod grok;
mod http;
mod router;

pub use envelope::build_envelope;
pub use gemini::GeminiAdapter;
pub use grok::GrokAdapter;
pub use http::http_client;
pub use router::ProviderRouter;

use async_trait::async_trait;
use mage_core::{GenerationRequest, Provider};
use thiserror::Error;

/// Sampling temperature sent with every request
pub const TEMPERATURE: f32 = 0.7;

/// Substituted when the service answers with empty text
pub const EMPTY_OUTPUT: &str = "No output generated.";

/// Errors from generation calls.
///
/// Each variant renders as a message fit to show the user directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("API Key is missing. Please configure it in Settings.")]
    MissingCredential(Provider),
    #[error("{} cannot generate content", .0.label())]
    UnsupportedProvider(Provider),
    #[error("Error generating content: {0}")]
    Failure(String),
}

/// Adapter for producing text from a generation request
#[async_trait]
pub trait GenerationAdapter: Clone + Send + Sync + 'static {
    /// Submit one request and return the response text
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError>;
}

/// Replace an empty response with the fixed placeholder.
pub(crate) fn non_empty(text: String) -> String {
    if text.is_empty() {
        EMPTY_OUTPUT.to_string()
    } else {
        text
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeGenerationAdapter, GenerationCall};

