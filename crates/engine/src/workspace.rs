// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace controller: owns the state store and drives runs.
//!
//! The state lock is taken only to read a snapshot or apply an event and is
//! never held across a generation call, so runs on different agents
//! proceed concurrently.

use crate::decide::{begin_run, RunDecision};
use crate::{Executor, RunError};
use mage_adapters::{GenerationAdapter, NotifyAdapter};
use mage_core::{AgentId, Clock, CredentialsPatch, DefinitionPatch, Effect, Event, RunId};
use mage_storage::AppState;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// How a started run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { output: String },
    Failed { error: String },
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub agent: AgentId,
    pub run: RunId,
    pub outcome: RunOutcome,
    pub elapsed_ms: u64,
}

pub struct Workspace<G, N, C> {
    state: Arc<Mutex<AppState>>,
    executor: Arc<Executor<G, N, C>>,
}

impl<G, N, C> Clone for Workspace<G, N, C> {
    fn clone(&self) -> Self {
        Self { state: Arc::clone(&self.state), executor: Arc::clone(&self.executor) }
    }
}

impl<G, N, C> Workspace<G, N, C>
where
    G: GenerationAdapter,
    N: NotifyAdapter,
    C: Clock,
{
    pub fn new(state: AppState, generator: G, notifier: N, clock: C) -> Self {
        let state = Arc::new(Mutex::new(state));
        let executor = Arc::new(Executor::new(generator, notifier, clock, Arc::clone(&state)));
        Self { state, executor }
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> AppState {
        self.state.lock().clone()
    }

    /// Read the state without copying it.
    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.lock())
    }

    pub fn apply(&self, event: &Event) {
        tracing::debug!(event = event.name(), "applying event");
        self.state.lock().apply_event(event);
    }

    pub fn set_domain(&self, domain: impl Into<String>) {
        self.apply(&Event::SettingsChanged { domain: Some(domain.into()), niche: None });
    }

    pub fn set_niche(&self, niche: impl Into<String>) {
        self.apply(&Event::SettingsChanged { domain: None, niche: Some(niche.into()) });
    }

    pub fn save_credentials(&self, credentials: CredentialsPatch) {
        if !credentials.is_empty() {
            self.apply(&Event::CredentialsSaved { credentials });
        }
    }

    /// Replace an agent's prompt template. The next run uses it.
    pub fn set_prompt(&self, id: &str, prompt: impl Into<String>) -> Result<(), RunError> {
        let mut state = self.state.lock();
        let Some(entry) = state.get(id) else {
            return Err(RunError::UnknownAgent(AgentId::new(id)));
        };
        let event = Event::DefinitionPatched {
            id: entry.id().clone(),
            patch: DefinitionPatch::new().prompt(prompt),
        };
        state.apply_event(&event);
        Ok(())
    }

    /// Run one agent to completion.
    ///
    /// Returns `Err` only when the run was refused before starting; a
    /// generation failure is reported as [`RunOutcome::Failed`].
    pub async fn run(&self, id: &str) -> Result<RunReport, RunError> {
        let run = RunId::new();
        let decision = {
            let mut state = self.state.lock();
            let decision = begin_run(&state, id, run.clone());
            if let RunDecision::Start { started, .. } = &decision {
                state.apply_event(started);
            }
            decision
        };

        let generate = match decision {
            RunDecision::Start { generate, .. } => generate,
            RunDecision::Refuse { error, notices } => {
                tracing::info!(agent = id, error = %error, "run refused");
                for notice in notices {
                    self.executor.execute(notice).await;
                }
                return Err(error);
            }
        };

        let agent = AgentId::new(id);
        tracing::info!(%agent, %run, "run started");
        let start = Instant::now();

        let Some(finished) = self.executor.execute(generate).await else {
            return Err(RunError::Incomplete(agent));
        };
        let outcome = match &finished {
            Event::RunCompleted { output, .. } => RunOutcome::Completed { output: output.clone() },
            Event::RunFailed { error, .. } => RunOutcome::Failed { error: error.clone() },
            _ => return Err(RunError::Incomplete(agent)),
        };
        self.executor.execute(Effect::Emit { event: finished }).await;

        let elapsed_ms = start.elapsed().as_millis() as u64;
        match &outcome {
            RunOutcome::Completed { output } => {
                tracing::info!(%agent, %run, elapsed_ms, bytes = output.len(), "run completed")
            }
            RunOutcome::Failed { error } => {
                tracing::warn!(%agent, %run, elapsed_ms, %error, "run failed")
            }
        }

        Ok(RunReport { agent, run, outcome, elapsed_ms })
    }

    /// Run in a background task. State reflects progress as it happens.
    pub fn spawn_run(&self, id: impl Into<String>) -> JoinHandle<Result<RunReport, RunError>> {
        let workspace = self.clone();
        let id = id.into();
        tokio::spawn(async move { workspace.run(&id).await })
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;
