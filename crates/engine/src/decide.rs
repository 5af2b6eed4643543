// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure run decisions: what happens when a run is requested or finishes.
//!
//! Nothing here performs I/O. The workspace applies the returned events and
//! hands the effects to the executor.

use crate::RunError;
use mage_adapters::GenerateError;
use mage_core::{AgentId, Effect, Event, GenerationRequest, RunId};
use mage_storage::AppState;

/// Result of asking to start a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunDecision {
    /// Apply `started`, then execute `generate`
    Start { started: Event, generate: Effect },
    /// Nothing changes in state; `notices` are still shown
    Refuse { error: RunError, notices: Vec<Effect> },
}

/// Decide whether `id` may run now and build its generation request.
///
/// Guards in order: the agent exists, its provider has a credential, and it
/// is not already working.
pub fn begin_run(state: &AppState, id: &str, run: RunId) -> RunDecision {
    let Some(entry) = state.get(id) else {
        return RunDecision::Refuse { error: RunError::UnknownAgent(AgentId::new(id)), notices: vec![] };
    };
    let def = &entry.definition;

    let Some(credential) = state.settings.credentials.get(def.provider) else {
        let notice = Effect::Notify {
            title: "Missing API Key".to_string(),
            message: format!(
                "Please set your {} API Key in Settings to run {}.",
                def.provider.label(),
                def.name
            ),
        };
        return RunDecision::Refuse {
            error: RunError::MissingCredential { agent: def.id.clone(), provider: def.provider },
            notices: vec![notice],
        };
    };

    if !entry.runtime.status.can_start() {
        return RunDecision::Refuse { error: RunError::AlreadyRunning(def.id.clone()), notices: vec![] };
    }

    let request = GenerationRequest {
        provider: def.provider,
        credential: credential.to_string(),
        agent_name: def.name.clone(),
        prompt: def.prompt.clone(),
        domain: state.settings.domain.clone(),
        niche: state.settings.niche.clone(),
        prior_context: context_fragment(state, id),
    };

    RunDecision::Start {
        started: Event::RunStarted { id: def.id.clone(), run: run.clone() },
        generate: Effect::Generate { id: def.id.clone(), run, request },
    }
}

/// Upstream output prefixed by the agent's context label, or empty when the
/// agent has no upstream or the upstream has not produced anything.
pub fn context_fragment(state: &AppState, id: &str) -> String {
    let Some(output) = state.upstream_output(id) else {
        return String::new();
    };
    let label = state.get(id).and_then(|e| e.definition.context_label.as_deref()).unwrap_or("");
    format!("{}{}", label, output)
}

/// Event recording how a generation call ended.
pub fn finish_run(
    id: AgentId,
    run: RunId,
    result: Result<String, GenerateError>,
    finished_at_ms: u64,
) -> Event {
    match result {
        Ok(output) => Event::RunCompleted { id, run, output, finished_at_ms },
        Err(e) => Event::RunFailed { id, run, error: e.to_string() },
    }
}

#[cfg(test)]
#[path = "decide_tests.rs"]
mod tests;
