// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mage-adapters: generation backends and user notification

pub mod generate;
pub mod notify;

pub use generate::{
    build_envelope, http_client, GeminiAdapter, GenerateError, GenerationAdapter, GrokAdapter,
    ProviderRouter, EMPTY_OUTPUT, TEMPERATURE,
};
pub use notify::{ConsoleNotifyAdapter, NotifyAdapter, NotifyError};

#[cfg(any(test, feature = "test-support"))]
pub use generate::{FakeGenerationAdapter, GenerationCall};
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
