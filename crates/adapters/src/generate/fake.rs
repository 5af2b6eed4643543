// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted generation adapter for tests.

use super::{build_envelope, GenerateError, GenerationAdapter};
use async_trait::async_trait;
use mage_core::GenerationRequest;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::watch;

/// Recorded generation call
#[derive(Debug, Clone)]
pub struct GenerationCall {
    pub request: GenerationRequest,
    /// The envelope a real backend would have sent
    pub envelope: String,
}

#[derive(Default)]
struct FakeGenerationState {
    calls: Vec<GenerationCall>,
    responses: VecDeque<Result<String, GenerateError>>,
}

/// Fake generation adapter.
///
/// Returns queued responses in order, then `"output of {agent_name}"`.
/// While held, calls are recorded but do not return until released.
#[derive(Clone)]
pub struct FakeGenerationAdapter {
    inner: Arc<Mutex<FakeGenerationState>>,
    hold: Arc<watch::Sender<bool>>,
}

impl Default for FakeGenerationAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeGenerationState::default())),
            hold: Arc::new(watch::Sender::new(false)),
        }
    }
}

impl FakeGenerationAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response.
    pub fn respond(&self, text: impl Into<String>) -> &Self {
        self.inner.lock().responses.push_back(Ok(text.into()));
        self
    }

    /// Queue a failure.
    pub fn fail(&self, error: GenerateError) -> &Self {
        self.inner.lock().responses.push_back(Err(error));
        self
    }

    /// Block calls until [`release`](Self::release).
    pub fn hold(&self) {
        self.hold.send_replace(true);
    }

    pub fn release(&self) {
        self.hold.send_replace(false);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<GenerationCall> {
        self.inner.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().calls.len()
    }
}

#[async_trait]
impl GenerationAdapter for FakeGenerationAdapter {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        let response = {
            let mut inner = self.inner.lock();
            inner
                .calls
                .push(GenerationCall { request: request.clone(), envelope: build_envelope(request) });
            inner.responses.pop_front()
        };

        let mut held = self.hold.subscribe();
        let _ = held.wait_for(|held| !*held).await;

        response.unwrap_or_else(|| Ok(format!("output of {}", request.agent_name)))
    }
}
