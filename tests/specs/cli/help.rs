// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_fails() {
    cli().exits(2);
}

#[test]
fn help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("agents")
        .stdout_has("show")
        .stdout_has("run")
        .stdout_has("shell");
}

#[test]
fn run_help_documents_flags() {
    cli()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--domain")
        .stdout_has("--niche")
        .stdout_has("--gemini-key")
        .stdout_has("--prompt-file")
        .stdout_has("--code");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn run_requires_an_agent() {
    cli().args(&["run"]).exits(2);
}
