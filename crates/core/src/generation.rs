// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inputs to a single generation call.

use crate::settings::Provider;
use std::fmt;

/// The flat set of strings a generation call is built from.
#[derive(Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Backend that should serve the call
    pub provider: Provider,
    pub credential: String,
    pub agent_name: String,
    pub prompt: String,
    pub domain: String,
    pub niche: String,
    /// Upstream output spliced in as context; empty when there is none
    pub prior_context: String,
}

impl fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("provider", &self.provider)
            .field("credential", &if self.credential.is_empty() { "" } else { "<redacted>" })
            .field("agent_name", &self.agent_name)
            .field("domain", &self.domain)
            .field("niche", &self.niche)
            .field("prompt_len", &self.prompt.len())
            .field("prior_context_len", &self.prior_context.len())
            .finish()
    }
}
