// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application state derived from events

mod agents;
mod settings;

use indexmap::IndexMap;
use mage_core::{AgentDefinition, AgentEntry, AgentId, Event, GlobalSettings, Registry};
use serde::Serialize;

/// Everything the workbench knows, in memory only.
///
/// Agents keep registry order. Each definition is paired with its runtime
/// state at construction and the pair lives as long as the state does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppState {
    pub agents: IndexMap<AgentId, AgentEntry>,
    pub settings: GlobalSettings,
}

impl AppState {
    pub fn new(registry: Registry) -> Self {
        Self::from_definitions(registry.into_definitions())
    }

    /// Build state from definitions. A repeated id keeps its first position
    /// and last definition.
    pub fn from_definitions(definitions: impl IntoIterator<Item = AgentDefinition>) -> Self {
        let agents = definitions
            .into_iter()
            .map(|def| (def.id.clone(), AgentEntry::new(def)))
            .collect();
        Self { agents, settings: GlobalSettings::default() }
    }

    pub fn get(&self, id: &str) -> Option<&AgentEntry> {
        self.agents.get(id)
    }

    /// All agents in registry order.
    pub fn agents(&self) -> impl Iterator<Item = &AgentEntry> {
        self.agents.values()
    }

    /// Last output of the agent `id` declares as its upstream, if both exist.
    pub fn upstream_output(&self, id: &str) -> Option<&str> {
        let upstream = self.get(id)?.definition.depends_on.as_ref()?;
        self.get(upstream)?.runtime.last_output.as_deref()
    }

    /// Apply an event to derive state changes.
    ///
    /// Events naming an unknown agent are ignored and leave every other
    /// agent untouched.
    ///
    /// # Idempotency Requirement
    ///
    /// Run events may be applied more than once with the same result as
    /// applying them once. They are keyed by run id: a start for the run
    /// already in flight, or a finish for a run that is no longer in flight,
    /// is a no-op. A `RuntimePatched` carrying a log line appends it on
    /// every application.
    pub fn apply_event(&mut self, event: &Event) {
        match event {
            Event::SettingsChanged { .. } | Event::CredentialsSaved { .. } => {
                settings::apply(self, event)
            }

            Event::DefinitionPatched { .. }
            | Event::RuntimePatched { .. }
            | Event::RunStarted { .. }
            | Event::RunCompleted { .. }
            | Event::RunFailed { .. } => agents::apply(self, event),
        }
    }
}

#[cfg(test)]
#[path = "../state_tests/mod.rs"]
mod tests;
