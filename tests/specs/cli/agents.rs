// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mage agents` and `mage show` specs

use crate::prelude::*;

const REGISTRY: &str = r#"
[[agent]]
id = "writer"
name = "The Writer"
role = "Writer"
goal = "Write"
backstory = "Writes things."
prompt = "Write a haiku."
cluster = "Artificers"
trigger = "manual"
output_format = "Markdown"
"#;

#[test]
fn agents_lists_builtin_registry_in_order() {
    let stdout = cli().args(&["agents"]).passes().stdout();
    let ids: Vec<_> = stdout.lines().skip(1).filter_map(|l| l.split_whitespace().next()).collect();

    assert_eq!(ids, ["mage_founder", "mage_prospector", "mage_crafter", "mage_architect"]);
}

#[test]
fn agents_json_carries_dependencies() {
    let json = cli().args(&["agents", "-o", "json"]).passes().json();
    let agents = json.as_array().unwrap();

    assert_eq!(agents.len(), 4);
    assert_eq!(agents[2]["id"], "mage_crafter");
    assert_eq!(agents[2]["depends_on"], "mage_prospector");
    assert_eq!(agents[2]["output_format"], "HTML");
    assert_eq!(agents[1]["status"], "idle");
}

#[test]
fn show_prints_definition_and_prompt() {
    cli()
        .args(&["show", "mage_prospector"])
        .passes()
        .stdout_has("The Prospector (mage_prospector)")
        .stdout_has("Format:")
        .stdout_has("JSON")
        .stdout_has("Prompt:");
}

#[test]
fn show_unknown_agent_fails_with_known_ids() {
    cli().args(&["show", "mage_ghost"]).exits(1).stderr_has("unknown agent 'mage_ghost'");
}

#[test]
fn custom_registry_replaces_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agents.toml");
    std::fs::write(&path, REGISTRY).unwrap();

    cli()
        .args(&["agents", "--registry", path.to_str().unwrap()])
        .passes()
        .stdout_has("writer")
        .stdout_lacks("mage_founder");
}

#[test]
fn invalid_registry_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agents.toml");
    std::fs::write(&path, "[[agent]]\nid = 3\n").unwrap();

    cli()
        .args(&["agents", "--registry", path.to_str().unwrap()])
        .exits(1)
        .stderr_has("invalid registry");
}
