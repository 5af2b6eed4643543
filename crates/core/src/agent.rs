// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent definitions and their runtime state.
//!
//! An [`AgentDefinition`] is the static persona (role, prompt template,
//! declared output). An [`AgentRuntimeState`] is what happened the last time
//! it ran. The two are paired 1:1 in an [`AgentEntry`] for the lifetime of
//! the process.

use crate::settings::Provider;
use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Stable identifier of an agent definition (e.g. `mage_crafter`).
    ///
    /// Unique within a registry and never changes for the process lifetime.
    pub struct AgentId;
}

/// Run status of an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    #[default]
    Idle,
    Working,
    Completed,
    Error,
}

crate::simple_display! {
    AgentStatus {
        Idle => "idle",
        Working => "working",
        Completed => "completed",
        Error => "error",
    }
}

impl AgentStatus {
    /// Whether a new run may begin from this status.
    pub fn can_start(&self) -> bool {
        !matches!(self, AgentStatus::Working)
    }
}

/// Grouping tag shown in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cluster {
    Visionaries,
    Artificers,
    Guardians,
}

crate::simple_display! {
    Cluster {
        Visionaries => "Visionaries",
        Artificers => "Artificers",
        Guardians => "Guardians",
    }
}

/// Declared shape of an agent's output. Descriptive: never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    #[serde(rename = "JSON", alias = "json")]
    Json,
    #[serde(rename = "Markdown", alias = "markdown")]
    Markdown,
    #[serde(rename = "HTML", alias = "html")]
    Html,
}

crate::simple_display! {
    OutputFormat {
        Json => "JSON",
        Markdown => "Markdown",
        Html => "HTML",
    }
}

/// A named persona with an editable prompt template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub id: AgentId,
    pub name: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    /// Prompt template sent as the agent's system instruction
    pub prompt: String,
    pub cluster: Cluster,
    /// Descriptive only; nothing fires on it
    pub trigger: String,
    pub output_format: OutputFormat,
    #[serde(default)]
    pub tools: Vec<String>,
    /// Upstream agent whose last output is spliced into this agent's context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<AgentId>,
    /// Lead-in placed before the spliced upstream output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_label: Option<String>,
    #[serde(default)]
    pub provider: Provider,
}

/// What the last run of an agent left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentRuntimeState {
    pub status: AgentStatus,
    /// Replaced wholesale by each successful run; failures leave it alone
    pub last_output: Option<String>,
    /// Epoch milliseconds of the last successful run
    pub last_run_ms: Option<u64>,
    /// Message from the most recent failed run, cleared on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    /// Run currently in flight, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_run: Option<crate::RunId>,
    pub logs: Vec<String>,
}

/// A definition paired with its runtime state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentEntry {
    pub definition: AgentDefinition,
    pub runtime: AgentRuntimeState,
}

impl AgentEntry {
    pub fn new(definition: AgentDefinition) -> Self {
        Self { definition, runtime: AgentRuntimeState::default() }
    }

    pub fn id(&self) -> &AgentId {
        &self.definition.id
    }
}

/// Partial update to an [`AgentDefinition`]. `None` fields are left as-is.
///
/// The id is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub goal: Option<String>,
    pub backstory: Option<String>,
    pub prompt: Option<String>,
    pub trigger: Option<String>,
    pub output_format: Option<OutputFormat>,
    pub provider: Option<Provider>,
}

impl DefinitionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    crate::setters! {
        option {
            name: String,
            role: String,
            goal: String,
            backstory: String,
            prompt: String,
            trigger: String,
            output_format: OutputFormat,
            provider: Provider,
        }
    }

    pub fn apply_to(&self, def: &mut AgentDefinition) {
        macro_rules! assign {
            ($($field:ident),*) => {
                $(if let Some(v) = &self.$field { def.$field = v.clone(); })*
            };
        }
        assign!(name, role, goal, backstory, prompt, trigger, output_format, provider);
    }
}

/// Partial update to an [`AgentRuntimeState`]. `None` fields are left as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimePatch {
    pub status: Option<AgentStatus>,
    pub last_output: Option<String>,
    pub last_run_ms: Option<u64>,
    /// `Some(None)` clears the stored error
    pub last_error: Option<Option<String>>,
    pub log: Option<String>,
}

impl RuntimePatch {
    pub fn new() -> Self {
        Self::default()
    }

    crate::setters! {
        option {
            status: AgentStatus,
            last_output: String,
            last_run_ms: u64,
            log: String,
        }
    }

    pub fn last_error(mut self, error: impl Into<String>) -> Self {
        self.last_error = Some(Some(error.into()));
        self
    }

    pub fn clear_error(mut self) -> Self {
        self.last_error = Some(None);
        self
    }

    pub fn apply_to(&self, rt: &mut AgentRuntimeState) {
        if let Some(status) = self.status {
            rt.status = status;
        }
        if let Some(output) = &self.last_output {
            rt.last_output = Some(output.clone());
        }
        if let Some(ms) = self.last_run_ms {
            rt.last_run_ms = Some(ms);
        }
        if let Some(error) = &self.last_error {
            rt.last_error = error.clone();
        }
        if let Some(line) = &self.log {
            rt.logs.push(line.clone());
        }
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
