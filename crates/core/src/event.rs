// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events that drive every state change.
//!
//! The state store never mutates outside `apply_event`; UI surfaces and the
//! workspace controller describe what happened by emitting one of these.

use crate::agent::{AgentId, DefinitionPatch, RuntimePatch};
use crate::id::RunId;
use crate::settings::CredentialsPatch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Domain and/or niche edited. `None` leaves the field unchanged.
    SettingsChanged { domain: Option<String>, niche: Option<String> },

    /// Credentials saved from the settings surface. Only listed providers change.
    CredentialsSaved { credentials: CredentialsPatch },

    /// Partial update to an agent definition (e.g. an edited prompt).
    DefinitionPatched { id: AgentId, patch: DefinitionPatch },

    /// Partial update to an agent's runtime state.
    RuntimePatched { id: AgentId, patch: RuntimePatch },

    /// A run was dispatched; the agent is now working.
    RunStarted { id: AgentId, run: RunId },

    /// The generation call returned text.
    RunCompleted { id: AgentId, run: RunId, output: String, finished_at_ms: u64 },

    /// The generation call failed.
    RunFailed { id: AgentId, run: RunId, error: String },
}

impl Event {
    /// Event name for log lines (e.g. "run:started")
    pub fn name(&self) -> &'static str {
        match self {
            Event::SettingsChanged { .. } => "settings:changed",
            Event::CredentialsSaved { .. } => "credentials:saved",
            Event::DefinitionPatched { .. } => "definition:patched",
            Event::RuntimePatched { .. } => "runtime:patched",
            Event::RunStarted { .. } => "run:started",
            Event::RunCompleted { .. } => "run:completed",
            Event::RunFailed { .. } => "run:failed",
        }
    }

    /// The agent this event concerns, if any.
    pub fn agent_id(&self) -> Option<&AgentId> {
        match self {
            Event::SettingsChanged { .. } | Event::CredentialsSaved { .. } => None,
            Event::DefinitionPatched { id, .. }
            | Event::RuntimePatched { id, .. }
            | Event::RunStarted { id, .. }
            | Event::RunCompleted { id, .. }
            | Event::RunFailed { id, .. } => Some(id),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
