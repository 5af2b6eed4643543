// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{GeminiAdapter, GenerateError, GenerationAdapter, GrokAdapter};
use async_trait::async_trait;
use mage_core::{GenerationRequest, Provider};

/// Dispatches each request to the backend named by its provider.
#[derive(Clone, Debug)]
pub struct ProviderRouter<G = GeminiAdapter, X = GrokAdapter> {
    gemini: G,
    grok: X,
}

impl<G, X> ProviderRouter<G, X>
where
    G: GenerationAdapter,
    X: GenerationAdapter,
{
    pub fn new(gemini: G, grok: X) -> Self {
        Self { gemini, grok }
    }
}

#[async_trait]
impl<G, X> GenerationAdapter for ProviderRouter<G, X>
where
    G: GenerationAdapter,
    X: GenerationAdapter,
{
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        match request.provider {
            Provider::Gemini => self.gemini.generate(request).await,
            Provider::Grok => self.grok.generate(request).await,
            Provider::DataForSeo => Err(GenerateError::UnsupportedProvider(request.provider)),
        }
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
