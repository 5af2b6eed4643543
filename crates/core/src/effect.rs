// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects represent side effects the workspace needs to perform

use crate::agent::AgentId;
use crate::event::Event;
use crate::generation::GenerationRequest;
use crate::id::RunId;

/// Effects that need to be executed by the runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Apply an event to the state store
    Emit { event: Event },

    /// Call the agent's generation provider
    Generate { id: AgentId, run: RunId, request: GenerationRequest },

    /// Show a blocking notice to the user
    Notify { title: String, message: String },
}

impl Effect {
    /// Effect name for log spans (e.g., "generate", "notify")
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Emit { .. } => "emit",
            Effect::Generate { .. } => "generate",
            Effect::Notify { .. } => "notify",
        }
    }

    /// Key/value pairs describing the effect, for log lines.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::Emit { event } => {
                let mut fields = vec![("event", event.name().to_string())];
                if let Some(id) = event.agent_id() {
                    fields.push(("agent", id.to_string()));
                }
                fields
            }
            Effect::Generate { id, run, request } => vec![
                ("agent", id.to_string()),
                ("run", run.to_string()),
                ("provider", request.provider.to_string()),
            ],
            Effect::Notify { title, .. } => vec![("title", title.clone())],
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
