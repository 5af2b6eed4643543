// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::agent::{AgentDefinition, AgentId, Cluster, OutputFormat};
use crate::settings::Provider;
use crate::{Event, RunId};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for state store inputs.
pub mod strategies {
    use crate::agent::{AgentStatus, DefinitionPatch, OutputFormat, RuntimePatch};
    use crate::settings::Provider;
    use proptest::prelude::*;

    pub fn arb_status() -> impl Strategy<Value = AgentStatus> {
        prop_oneof![
            Just(AgentStatus::Idle),
            Just(AgentStatus::Working),
            Just(AgentStatus::Completed),
            Just(AgentStatus::Error),
        ]
    }

    pub fn arb_output_format() -> impl Strategy<Value = OutputFormat> {
        prop_oneof![Just(OutputFormat::Json), Just(OutputFormat::Markdown), Just(OutputFormat::Html)]
    }

    pub fn arb_provider() -> impl Strategy<Value = Provider> {
        prop_oneof![Just(Provider::Gemini), Just(Provider::Grok), Just(Provider::DataForSeo)]
    }

    pub fn arb_runtime_patch() -> impl Strategy<Value = RuntimePatch> {
        (
            proptest::option::of(arb_status()),
            proptest::option::of(".{0,16}"),
            proptest::option::of(any::<u64>()),
            proptest::option::of(proptest::option::of(".{0,16}")),
            proptest::option::of(".{0,16}"),
        )
            .prop_map(|(status, last_output, last_run_ms, last_error, log)| RuntimePatch {
                status,
                last_output,
                last_run_ms,
                last_error,
                log,
            })
    }

    pub fn arb_definition_patch() -> impl Strategy<Value = DefinitionPatch> {
        (
            proptest::option::of(".{0,16}"),
            proptest::option::of(".{0,32}"),
            proptest::option::of(arb_output_format()),
            proptest::option::of(arb_provider()),
        )
            .prop_map(|(name, prompt, output_format, provider)| DefinitionPatch {
                name,
                prompt,
                output_format,
                provider,
                ..Default::default()
            })
    }
}

// ── Definition factories ────────────────────────────────────────────────

/// A minimal Markdown agent served by Gemini.
pub fn definition(id: &str) -> AgentDefinition {
    AgentDefinition {
        id: AgentId::new(id),
        name: format!("Agent {}", id),
        role: "test role".to_string(),
        goal: "test goal".to_string(),
        backstory: "test backstory".to_string(),
        prompt: format!("You are agent {}.", id),
        cluster: Cluster::Visionaries,
        trigger: "manual".to_string(),
        output_format: OutputFormat::Markdown,
        tools: Vec::new(),
        depends_on: None,
        context_label: None,
        provider: Provider::Gemini,
    }
}

/// An agent that consumes `upstream`'s output.
pub fn consumer(id: &str, upstream: &str, label: &str) -> AgentDefinition {
    AgentDefinition {
        depends_on: Some(AgentId::new(upstream)),
        context_label: Some(label.to_string()),
        ..definition(id)
    }
}

// ── Event factory functions ─────────────────────────────────────────────

pub fn run_started_event(id: &str, run: &str) -> Event {
    Event::RunStarted { id: AgentId::new(id), run: RunId::from_string(run) }
}

pub fn run_completed_event(id: &str, run: &str, output: &str) -> Event {
    Event::RunCompleted {
        id: AgentId::new(id),
        run: RunId::from_string(run),
        output: output.to_string(),
        finished_at_ms: 2_000_000,
    }
}

pub fn run_failed_event(id: &str, run: &str, error: &str) -> Event {
    Event::RunFailed { id: AgentId::new(id), run: RunId::from_string(run), error: error.to_string() }
}
