// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mage shell` specs

use crate::prelude::*;

#[test]
fn shell_help_and_quit() {
    cli()
        .args(&["shell"])
        .stdin("help\nquit\n")
        .passes()
        .stdout_has("set domain|niche <value>")
        .stdout_has("preview <agent> [code]");
}

#[test]
fn shell_run_without_key_is_refused() {
    cli()
        .args(&["shell"])
        .stdin("run mage_founder\n")
        .passes()
        .stdout_has("run refused")
        .stderr_has("Missing API Key");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shell_session_keeps_state_between_commands() {
    let service = FakeService::gemini(&["# Edited"]).await;

    cli()
        .env("MAGE_GEMINI_BASE_URL", &service.base_url())
        .args(&["shell"])
        .stdin("set domain example.com\nkey gemini K1\nprompt mage_founder\nSay hi.\n.\nrun mage_founder\npreview mage_founder code\n")
        .passes()
        .stdout_has("domain = example.com")
        .stdout_has("Gemini key saved")
        .stdout_has("prompt for mage_founder updated (1 lines)")
        .stdout_has("# Edited")
        .stdout_lacks("K1");

    let requests = service.requests().await;
    assert!(requests[0].contains("Say hi."));
    assert!(requests[0].contains("Target Domain: example.com"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shell_background_run_finishes_before_exit() {
    let service = FakeService::gemini(&["background output"]).await;

    cli()
        .env("MAGE_GEMINI_BASE_URL", &service.base_url())
        .args(&["shell", "--gemini-key", "K1"])
        .stdin("start mage_founder\n")
        .passes()
        .stdout_has("started mage_founder in background")
        .stdout_has("background output");

    assert_eq!(service.requests().await.len(), 1);
}
