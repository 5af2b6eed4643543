// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mage agents` and `mage show`

use anyhow::Result;
use mage_core::{AgentEntry, Registry};
use mage_storage::AppState;

use crate::exit_error::ExitError;
use crate::output::{agent_detail, agent_table, AgentRow, OutputFormat};

pub fn list(registry: Registry, format: OutputFormat) -> Result<()> {
    let state = AppState::new(registry);
    match format {
        OutputFormat::Text => print!("{}", agent_table(state.agents())),
        OutputFormat::Json => {
            let rows: Vec<AgentRow<'_>> = state.agents().map(AgentRow::from).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}

pub fn show(registry: Registry, id: &str, format: OutputFormat) -> Result<()> {
    let state = AppState::new(registry);
    let entry = find(&state, id)?;
    match format {
        OutputFormat::Text => print!("{}", agent_detail(entry)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entry)?),
    }
    Ok(())
}

/// Look up an agent, listing the known ids when it is missing.
pub fn find<'a>(state: &'a AppState, id: &str) -> Result<&'a AgentEntry, ExitError> {
    state.get(id).ok_or_else(|| {
        let known: Vec<_> = state.agents().map(|e| e.id().as_str()).collect();
        ExitError::new(1, format!("unknown agent '{}' (known: {})", id, known.join(", ")))
    })
}
