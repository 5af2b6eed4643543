// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent registry: the ordered list of agent definitions known at startup.
//!
//! The built-in registry ships as TOML inside the binary. A replacement can
//! be loaded from any TOML document with the same `[[agent]]` layout.
//! Only structure is validated (ids, dependencies); prompt text never is.

use crate::agent::{AgentDefinition, AgentId};
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

const BUILTIN: &str = include_str!("registry/builtin.toml");

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to parse registry: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("registry defines no agents")]
    Empty,
    #[error("agent id must not be empty")]
    EmptyId,
    #[error("duplicate agent id: {0}")]
    DuplicateId(AgentId),
    #[error("agent {0} depends on itself")]
    SelfDependency(AgentId),
    #[error("agent {agent} depends on unknown agent {upstream}")]
    UnknownDependency { agent: AgentId, upstream: AgentId },
}

#[derive(Deserialize)]
struct RegistryFile {
    #[serde(default, rename = "agent")]
    agents: Vec<AgentDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    agents: Vec<AgentDefinition>,
}

impl Registry {
    /// Validate and wrap an ordered list of definitions.
    pub fn new(agents: Vec<AgentDefinition>) -> Result<Self, RegistryError> {
        if agents.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for def in &agents {
            if def.id.is_empty() {
                return Err(RegistryError::EmptyId);
            }
            if !seen.insert(def.id.as_str()) {
                return Err(RegistryError::DuplicateId(def.id.clone()));
            }
        }

        for def in &agents {
            let Some(upstream) = &def.depends_on else { continue };
            if upstream == &def.id {
                return Err(RegistryError::SelfDependency(def.id.clone()));
            }
            if !seen.contains(upstream.as_str()) {
                return Err(RegistryError::UnknownDependency {
                    agent: def.id.clone(),
                    upstream: upstream.clone(),
                });
            }
        }

        Ok(Self { agents })
    }

    /// The registry compiled into the binary.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_toml(BUILTIN)
    }

    pub fn from_toml(src: &str) -> Result<Self, RegistryError> {
        let file: RegistryFile = toml::from_str(src)?;
        Self::new(file.agents)
    }

    pub fn definitions(&self) -> &[AgentDefinition] {
        &self.agents
    }

    pub fn get(&self, id: &str) -> Option<&AgentDefinition> {
        self.agents.iter().find(|d| d.id == id)
    }

    pub fn into_definitions(self) -> Vec<AgentDefinition> {
        self.agents
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
