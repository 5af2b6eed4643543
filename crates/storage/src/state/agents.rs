// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent definition and run lifecycle event handlers.

use mage_core::{AgentStatus, Event, RuntimePatch};

use super::AppState;

pub(crate) fn apply(state: &mut AppState, event: &Event) {
    let Some(id) = event.agent_id() else { return };
    let Some(entry) = state.agents.get_mut(id.as_str()) else {
        tracing::debug!(agent = %id, event = event.name(), "event for unknown agent ignored");
        return;
    };
    let runtime = &mut entry.runtime;

    match event {
        Event::DefinitionPatched { patch, .. } => patch.apply_to(&mut entry.definition),

        Event::RuntimePatched { patch, .. } => patch.apply_to(runtime),

        Event::RunStarted { run, .. } => {
            if runtime.active_run.as_ref() == Some(run) {
                return;
            }
            if let Some(previous) = runtime.active_run.replace(run.clone()) {
                tracing::warn!(agent = %id, %previous, %run, "run superseded before finishing");
            }
            RuntimePatch::new()
                .status(AgentStatus::Working)
                .log(format!("{} started", run))
                .apply_to(runtime);
        }

        Event::RunCompleted { run, output, finished_at_ms, .. } => {
            if runtime.active_run.as_ref() != Some(run) {
                tracing::debug!(agent = %id, %run, "completion for inactive run ignored");
                return;
            }
            runtime.active_run = None;
            RuntimePatch::new()
                .status(AgentStatus::Completed)
                .last_output(output.clone())
                .last_run_ms(*finished_at_ms)
                .clear_error()
                .log(format!("{} completed ({} bytes)", run, output.len()))
                .apply_to(runtime);
        }

        Event::RunFailed { run, error, .. } => {
            if runtime.active_run.as_ref() != Some(run) {
                tracing::debug!(agent = %id, %run, "failure for inactive run ignored");
                return;
            }
            runtime.active_run = None;
            RuntimePatch::new()
                .status(AgentStatus::Error)
                .last_error(error.clone())
                .log(format!("{} failed: {}", run, error))
                .apply_to(runtime);
        }

        Event::SettingsChanged { .. } | Event::CredentialsSaved { .. } => {}
    }
}
