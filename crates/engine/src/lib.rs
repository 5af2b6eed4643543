// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mage-engine: the run protocol and the workspace controller

mod decide;
mod error;
mod executor;
mod workspace;

pub use decide::{begin_run, context_fragment, finish_run, RunDecision};
pub use error::RunError;
pub use executor::Executor;
pub use workspace::{RunOutcome, RunReport, Workspace};
