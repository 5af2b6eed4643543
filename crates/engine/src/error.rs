// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use mage_core::{AgentId, Provider};
use thiserror::Error;

/// Reasons a run never started.
///
/// A run that starts and then fails is not an error; it is reported as
/// [`RunOutcome::Failed`](crate::RunOutcome::Failed).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("unknown agent: {0}")]
    UnknownAgent(AgentId),
    #[error("agent {0} is already running")]
    AlreadyRunning(AgentId),
    #[error("no {} API key configured for {agent}", provider.label())]
    MissingCredential { agent: AgentId, provider: Provider },
    #[error("run for {0} finished without a result")]
    Incomplete(AgentId),
}
