// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use mage_core::test_support::{
    consumer, definition, run_completed_event, run_failed_event, run_started_event,
};
use mage_core::{AgentStatus, CredentialsPatch, DefinitionPatch, Provider, RuntimePatch};

mod properties;
mod runs;

fn state_with(ids: &[&str]) -> AppState {
    AppState::from_definitions(ids.iter().map(|id| definition(id)))
}

fn patch_runtime(id: &str, patch: RuntimePatch) -> Event {
    Event::RuntimePatched { id: AgentId::new(id), patch }
}

#[test]
fn builtin_state_pairs_every_definition_with_idle_runtime() {
    let state = AppState::new(Registry::builtin().unwrap());
    let ids: Vec<_> = state.agents().map(|e| e.id().to_string()).collect();

    assert_eq!(ids, ["mage_founder", "mage_prospector", "mage_crafter", "mage_architect"]);
    for entry in state.agents() {
        assert_eq!(entry.runtime.status, AgentStatus::Idle);
        assert!(entry.runtime.last_output.is_none());
        assert!(entry.runtime.logs.is_empty());
    }
    assert_eq!(state.settings.domain, "");
    assert_eq!(state.settings.niche, "");
}

#[test]
fn settings_change_only_touches_present_fields() {
    let mut state = state_with(&["a"]);
    state.apply_event(&Event::SettingsChanged {
        domain: Some("example.com".into()),
        niche: Some("finance".into()),
    });
    state.apply_event(&Event::SettingsChanged { domain: None, niche: Some("travel".into()) });

    assert_eq!(state.settings.domain, "example.com");
    assert_eq!(state.settings.niche, "travel");
}

#[test]
fn credentials_saved_merges_listed_providers() {
    let mut state = state_with(&["a"]);
    state.apply_event(&Event::CredentialsSaved {
        credentials: CredentialsPatch::new().with(Provider::Gemini, "K1"),
    });
    state.apply_event(&Event::CredentialsSaved {
        credentials: CredentialsPatch::new().with(Provider::Grok, "G1"),
    });

    assert_eq!(state.settings.credentials.get(Provider::Gemini), Some("K1"));
    assert_eq!(state.settings.credentials.get(Provider::Grok), Some("G1"));
    assert!(!state.settings.credentials.is_configured(Provider::DataForSeo));
}

#[test]
fn prompt_patch_is_visible_on_next_read() {
    let mut state = state_with(&["a", "b"]);
    state.apply_event(&Event::DefinitionPatched {
        id: AgentId::new("a"),
        patch: DefinitionPatch::new().prompt("X"),
    });

    assert_eq!(state.get("a").unwrap().definition.prompt, "X");
    assert_eq!(state.get("b").unwrap().definition.prompt, "You are agent b.");
}

#[test]
fn runtime_patch_appends_log_and_keeps_other_fields() {
    let mut state = state_with(&["a"]);
    state.apply_event(&patch_runtime("a", RuntimePatch::new().last_output("old")));
    state.apply_event(&patch_runtime("a", RuntimePatch::new().log("one")));
    state.apply_event(&patch_runtime("a", RuntimePatch::new().log("two")));

    let rt = &state.get("a").unwrap().runtime;
    assert_eq!(rt.last_output.as_deref(), Some("old"));
    assert_eq!(rt.logs, ["one", "two"]);
}

#[test]
fn repeated_log_patch_appends_each_time() {
    let mut state = state_with(&["a"]);
    let event = patch_runtime("a", RuntimePatch::new().log("retry"));
    state.apply_event(&event);
    state.apply_event(&event);

    assert_eq!(state.get("a").unwrap().runtime.logs, ["retry", "retry"]);
}

#[yare::parameterized(
    definition = { Event::DefinitionPatched { id: AgentId::new("ghost"), patch: DefinitionPatch::new().prompt("X") } },
    runtime    = { Event::RuntimePatched { id: AgentId::new("ghost"), patch: RuntimePatch::new().status(AgentStatus::Working) } },
    started    = { run_started_event("ghost", "run-1") },
    completed  = { run_completed_event("ghost", "run-1", "out") },
    failed     = { run_failed_event("ghost", "run-1", "boom") },
)]
fn unknown_agent_is_a_no_op(event: Event) {
    let mut state = state_with(&["a", "b"]);
    let before = state.clone();

    state.apply_event(&event);

    assert_eq!(state, before);
}

#[test]
fn upstream_output_follows_depends_on() {
    let mut state = AppState::from_definitions([
        definition("up"),
        consumer("down", "up", "Context: "),
    ]);
    assert_eq!(state.upstream_output("down"), None);

    state.apply_event(&run_started_event("up", "run-1"));
    state.apply_event(&run_completed_event("up", "run-1", "OUT_A"));

    assert_eq!(state.upstream_output("down"), Some("OUT_A"));
    assert_eq!(state.upstream_output("up"), None);
    assert_eq!(state.upstream_output("missing"), None);
}

#[test]
fn snapshot_serializes_without_credentials() {
    let mut state = state_with(&["a"]);
    state.apply_event(&Event::CredentialsSaved {
        credentials: CredentialsPatch::new().with(Provider::Gemini, "SECRET"),
    });

    let json = serde_json::to_string(&state).unwrap();
    assert!(!json.contains("SECRET"));
    assert!(json.contains("\"a\""));
}
