// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use crate::decide::finish_run;
use mage_adapters::{GenerationAdapter, NotifyAdapter};
use mage_core::{Clock, Effect, Event};
use mage_storage::AppState;
use parking_lot::Mutex;
use std::sync::Arc;

/// Executes effects using the configured adapters
pub struct Executor<G, N, C> {
    generator: G,
    notifier: N,
    clock: C,
    state: Arc<Mutex<AppState>>,
}

impl<G, N, C> Executor<G, N, C>
where
    G: GenerationAdapter,
    N: NotifyAdapter,
    C: Clock,
{
    pub fn new(generator: G, notifier: N, clock: C, state: Arc<Mutex<AppState>>) -> Self {
        Self { generator, notifier, clock, state }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Execute a single effect with tracing.
    ///
    /// Returns an event that should be fed back as an `Emit` (the outcome of
    /// a generation call). Effects never fail: adapter errors become events
    /// or log lines.
    pub async fn execute(&self, effect: Effect) -> Option<Event> {
        let info = effect
            .fields()
            .into_iter()
            .map(|(key, val)| format!("{}={}", key, val))
            .collect::<Vec<_>>()
            .join(" ");
        let op = effect.name();

        let start = std::time::Instant::now();
        let event = self.execute_inner(effect).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(event = event.is_some(), elapsed_ms, "executed effect={} {}", op, info);

        event
    }

    async fn execute_inner(&self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::Emit { event } => {
                self.state.lock().apply_event(&event);
                None
            }

            Effect::Generate { id, run, request } => {
                let result = self.generator.generate(&request).await;
                if let Err(e) = &result {
                    tracing::warn!(agent = %id, %run, error = %e, "generation failed");
                }
                Some(finish_run(id, run, result, self.clock.epoch_ms()))
            }

            Effect::Notify { title, message } => {
                if let Err(e) = self.notifier.notify(&title, &message).await {
                    tracing::warn!(%title, error = %e, "notification send failed");
                }
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
