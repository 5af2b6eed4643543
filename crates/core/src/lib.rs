// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mage-core: data model, events, and effects for the mage agent workbench

pub mod macros;

pub mod agent;
pub mod clock;
pub mod effect;
pub mod event;
pub mod generation;
pub mod id;
pub mod preview;
pub mod registry;
pub mod settings;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use agent::{
    AgentDefinition, AgentEntry, AgentId, AgentRuntimeState, AgentStatus, Cluster,
    DefinitionPatch, OutputFormat, RuntimePatch,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use effect::Effect;
pub use event::Event;
pub use generation::GenerationRequest;
pub use id::{short, RunId};
pub use preview::{Preview, QueueEntry, ViewMode};
pub use registry::{Registry, RegistryError};
pub use settings::{Credentials, CredentialsPatch, GlobalSettings, Provider, UnknownProvider};
pub use time_fmt::format_elapsed_ms;
