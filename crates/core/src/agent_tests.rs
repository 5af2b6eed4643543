// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::definition;

#[yare::parameterized(
    idle      = { AgentStatus::Idle,      true },
    working   = { AgentStatus::Working,   false },
    completed = { AgentStatus::Completed, true },
    error     = { AgentStatus::Error,     true },
)]
fn can_start_unless_working(status: AgentStatus, expected: bool) {
    assert_eq!(status.can_start(), expected);
}

#[yare::parameterized(
    idle      = { AgentStatus::Idle,      "\"idle\"" },
    working   = { AgentStatus::Working,   "\"working\"" },
    completed = { AgentStatus::Completed, "\"completed\"" },
    error     = { AgentStatus::Error,     "\"error\"" },
)]
fn status_serializes_snake_case(status: AgentStatus, expected: &str) {
    assert_eq!(serde_json::to_string(&status).unwrap(), expected);
    assert_eq!(format!("\"{}\"", status), expected);
}

#[yare::parameterized(
    json_upper = { "\"JSON\"",     OutputFormat::Json },
    json_lower = { "\"json\"",     OutputFormat::Json },
    markdown   = { "\"Markdown\"", OutputFormat::Markdown },
    html_upper = { "\"HTML\"",     OutputFormat::Html },
    html_lower = { "\"html\"",     OutputFormat::Html },
)]
fn output_format_accepts_aliases(input: &str, expected: OutputFormat) {
    assert_eq!(serde_json::from_str::<OutputFormat>(input).unwrap(), expected);
}

#[test]
fn new_entry_starts_idle_without_output() {
    let entry = AgentEntry::new(definition("a"));
    assert_eq!(entry.runtime.status, AgentStatus::Idle);
    assert!(entry.runtime.last_output.is_none());
    assert!(entry.runtime.last_run_ms.is_none());
    assert!(entry.runtime.logs.is_empty());
    assert_eq!(entry.id(), "a");
}

#[test]
fn definition_patch_only_touches_set_fields() {
    let mut def = definition("a");
    let before = def.clone();

    DefinitionPatch::new().prompt("new prompt").apply_to(&mut def);

    assert_eq!(def.prompt, "new prompt");
    assert_eq!(def.name, before.name);
    assert_eq!(def.goal, before.goal);
    assert_eq!(def.output_format, before.output_format);
    assert_eq!(def.provider, before.provider);
}

#[test]
fn definition_patch_can_switch_provider() {
    let mut def = definition("a");
    DefinitionPatch::new().provider(Provider::Grok).apply_to(&mut def);
    assert_eq!(def.provider, Provider::Grok);
}

#[test]
fn empty_runtime_patch_is_identity() {
    let mut rt = AgentRuntimeState {
        status: AgentStatus::Completed,
        last_output: Some("x".into()),
        last_run_ms: Some(5),
        ..Default::default()
    };
    let before = rt.clone();
    RuntimePatch::new().apply_to(&mut rt);
    assert_eq!(rt, before);
}

#[test]
fn runtime_patch_sets_and_clears_error() {
    let mut rt = AgentRuntimeState::default();
    RuntimePatch::new().status(AgentStatus::Error).last_error("boom").apply_to(&mut rt);
    assert_eq!(rt.status, AgentStatus::Error);
    assert_eq!(rt.last_error.as_deref(), Some("boom"));

    RuntimePatch::new().clear_error().apply_to(&mut rt);
    assert_eq!(rt.last_error, None);
    assert_eq!(rt.status, AgentStatus::Error);
}

#[test]
fn runtime_patch_appends_log_lines() {
    let mut rt = AgentRuntimeState::default();
    RuntimePatch::new().log("one").apply_to(&mut rt);
    RuntimePatch::new().log("two").apply_to(&mut rt);
    assert_eq!(rt.logs, vec!["one".to_string(), "two".to_string()]);
}

#[test]
fn definition_toml_defaults_optional_fields() {
    let def: AgentDefinition = toml::from_str(
        r#"
        id = "solo"
        name = "Solo"
        role = "r"
        goal = "g"
        backstory = "b"
        prompt = "p"
        cluster = "Guardians"
        trigger = "manual"
        output_format = "Markdown"
        "#,
    )
    .unwrap();
    assert!(def.tools.is_empty());
    assert_eq!(def.depends_on, None);
    assert_eq!(def.context_label, None);
    assert_eq!(def.provider, Provider::Gemini);
}
