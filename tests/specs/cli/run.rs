// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mage run` specs
//!
//! Runs talk to a local stand-in for the generation service.

use crate::prelude::*;

#[test]
fn run_without_key_exits_two_and_notifies() {
    cli()
        .args(&["run", "mage_founder"])
        .exits(2)
        .stderr_has("Missing API Key")
        .stderr_has("no Gemini API key configured for mage_founder");
}

#[test]
fn run_unknown_agent_fails() {
    cli().args(&["run", "mage_ghost", "--gemini-key", "K1"]).exits(1).stderr_has("unknown agent");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn run_prints_markdown_output_and_footer() {
    let service = FakeService::gemini(&["# Blueprint\n\nAll files ready."]).await;

    cli()
        .env("MAGE_GEMINI_BASE_URL", &service.base_url())
        .args(&["run", "mage_founder", "--gemini-key", "K1", "--domain", "example.com"])
        .passes()
        .stdout_has("The Founder (mage_founder) completed")
        .stdout_has("# Blueprint")
        .stdout_has("Markdown · last run");

    let requests = service.requests().await;
    assert!(requests[0].contains("Target Domain: example.com"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn pipeline_splices_prospector_queue_into_crafter() {
    let queue = r#"[{"keyword":"best travel card","intent":"buy","city":"Austin","tool":"calculator"}]"#;
    let service = FakeService::gemini(&[queue, "<article>done</article>"]).await;

    cli()
        .env("GEMINI_API_KEY", "K1")
        .env("MAGE_GEMINI_BASE_URL", &service.base_url())
        .args(&["run", "mage_prospector", "mage_crafter", "--niche", "finance"])
        .passes()
        .stdout_has("Content Queue (1 items)")
        .stdout_has("best travel card [BUY]")
        .stdout_has("<article>done</article>");

    let requests = service.requests().await;
    assert_eq!(requests.len(), 2);
    assert!(requests[1].contains("Use this Content Queue JSON: "));
    assert!(requests[1].contains("best travel card"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn code_flag_shows_raw_json() {
    let service = FakeService::gemini(&["not json at all"]).await;

    cli()
        .env("MAGE_GEMINI_BASE_URL", &service.base_url())
        .args(&["run", "mage_prospector", "--gemini-key", "K1", "--code"])
        .passes()
        .stdout_has("not json at all")
        .stdout_lacks("Invalid JSON Output");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unparseable_queue_is_flagged_in_preview() {
    let service = FakeService::gemini(&["not json at all"]).await;

    cli()
        .env("MAGE_GEMINI_BASE_URL", &service.base_url())
        .args(&["run", "mage_prospector", "--gemini-key", "K1"])
        .passes()
        .stdout_has("Invalid JSON Output");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn json_output_reports_each_run() {
    let service = FakeService::gemini(&["OUT_A"]).await;

    let ran = cli()
        .env("MAGE_GEMINI_BASE_URL", &service.base_url())
        .args(&["run", "mage_founder", "--gemini-key", "K1", "-o", "json"])
        .passes();
    let json = ran.json();

    assert_eq!(json[0]["agent"], "mage_founder");
    assert_eq!(json[0]["status"], "completed");
    assert_eq!(json[0]["output"], "OUT_A");
    assert!(json[0]["run"].as_str().unwrap().starts_with("run-"));
}

#[test]
fn unreachable_service_fails_run_with_exit_one() {
    cli()
        .env("MAGE_GEMINI_BASE_URL", "http://127.0.0.1:1")
        .args(&["run", "mage_founder", "--gemini-key", "K1"])
        .exits(1)
        .stdout_has("failed after")
        .stdout_has("Error generating content:")
        .stdout_has("No artifacts generated yet.");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn prompt_file_overrides_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("founder.txt");
    std::fs::write(&path, "Reply with the word PINEAPPLE.").unwrap();
    let service = FakeService::gemini(&["PINEAPPLE"]).await;
    let prompt_arg = format!("mage_founder={}", path.display());

    cli()
        .env("MAGE_GEMINI_BASE_URL", &service.base_url())
        .args(&["run", "mage_founder", "--gemini-key", "K1", "--prompt-file", &prompt_arg])
        .passes();

    let requests = service.requests().await;
    assert!(requests[0].contains("Reply with the word PINEAPPLE."));
}
