// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use mage_adapters::{FakeGenerationAdapter, FakeNotifyAdapter, GenerateError};
use mage_core::test_support::{consumer, definition};
use mage_core::{AgentStatus, FakeClock, Provider, Registry};
use std::time::Duration;

type TestWorkspace = Workspace<FakeGenerationAdapter, FakeNotifyAdapter, FakeClock>;

struct TestHarness {
    workspace: TestWorkspace,
    generator: FakeGenerationAdapter,
    notifier: FakeNotifyAdapter,
}

fn setup_with(state: AppState) -> TestHarness {
    let generator = FakeGenerationAdapter::new();
    let notifier = FakeNotifyAdapter::new();
    let workspace = Workspace::new(state, generator.clone(), notifier.clone(), FakeClock::default());
    TestHarness { workspace, generator, notifier }
}

/// Agent `a` feeds agent `b`; the workspace is configured for the example site.
fn setup() -> TestHarness {
    let harness = setup_with(AppState::from_definitions([
        definition("a"),
        consumer("b", "a", "Use this: "),
    ]));
    harness.workspace.set_domain("example.com");
    harness.workspace.set_niche("finance");
    harness.workspace.save_credentials(CredentialsPatch::new().with(Provider::Gemini, "K1"));
    harness
}

fn status(workspace: &TestWorkspace, id: &str) -> AgentStatus {
    workspace.with_state(|s| s.get(id).unwrap().runtime.status)
}

async fn wait_for_calls(generator: &FakeGenerationAdapter, n: usize) {
    for _ in 0..200 {
        if generator.call_count() >= n {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("generator never reached {} calls", n);
}

#[tokio::test]
async fn missing_credential_notifies_once_and_changes_nothing() {
    let harness = setup_with(AppState::from_definitions([definition("a")]));
    let before = harness.workspace.snapshot();

    let err = harness.workspace.run("a").await.unwrap_err();

    assert_eq!(
        err,
        RunError::MissingCredential { agent: AgentId::new("a"), provider: Provider::Gemini }
    );
    assert_eq!(harness.notifier.calls().len(), 1);
    assert_eq!(harness.generator.call_count(), 0);
    assert_eq!(harness.workspace.snapshot(), before);
}

#[tokio::test]
async fn unknown_agent_is_an_error_without_notice() {
    let harness = setup();

    let err = harness.workspace.run("ghost").await.unwrap_err();

    assert_eq!(err, RunError::UnknownAgent(AgentId::new("ghost")));
    assert!(harness.notifier.calls().is_empty());
}

#[tokio::test]
async fn successful_run_stores_output_verbatim() {
    let harness = setup();
    let output = "  # Title\n\n{\"not\": \"parsed\"}\n";
    harness.generator.respond(output);

    let report = harness.workspace.run("a").await.unwrap();

    assert_eq!(report.outcome, RunOutcome::Completed { output: output.to_string() });
    assert_eq!(report.agent, "a");
    let state = harness.workspace.snapshot();
    let rt = &state.get("a").unwrap().runtime;
    assert_eq!(rt.status, AgentStatus::Completed);
    assert_eq!(rt.last_output.as_deref(), Some(output));
    assert_eq!(rt.last_run_ms, Some(1_000_000));
    assert!(rt.active_run.is_none());
}

#[tokio::test]
async fn failed_run_keeps_previous_output() {
    let harness = setup();
    harness.generator.respond("first");
    harness.generator.fail(GenerateError::Failure("quota exceeded".into()));

    harness.workspace.run("a").await.unwrap();
    let report = harness.workspace.run("a").await.unwrap();

    assert_eq!(
        report.outcome,
        RunOutcome::Failed { error: "Error generating content: quota exceeded".into() }
    );
    let state = harness.workspace.snapshot();
    let rt = &state.get("a").unwrap().runtime;
    assert_eq!(rt.status, AgentStatus::Error);
    assert_eq!(rt.last_output.as_deref(), Some("first"));
    assert_eq!(rt.last_error.as_deref(), Some("Error generating content: quota exceeded"));
}

#[tokio::test]
async fn pipeline_scenario_splices_upstream_output() {
    let harness = setup();
    harness.generator.respond("OUT_A");
    harness.generator.fail(GenerateError::Failure("timeout".into()));

    let first = harness.workspace.run("a").await.unwrap();
    assert!(first.outcome.is_completed());

    let second = harness.workspace.run("b").await.unwrap();
    assert!(!second.outcome.is_completed());

    let calls = harness.generator.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].request.prior_context, "");
    assert_eq!(calls[1].request.prior_context, "Use this: OUT_A");
    assert!(calls[1].envelope.contains("OUT_A"));
    assert!(calls[1].envelope.contains("Target Domain: example.com"));
    assert!(calls[1].envelope.contains("Target Niche: finance"));

    let state = harness.workspace.snapshot();
    assert_eq!(state.get("a").unwrap().runtime.last_output.as_deref(), Some("OUT_A"));
    let b = &state.get("b").unwrap().runtime;
    assert_eq!(b.status, AgentStatus::Error);
    assert!(b.last_output.is_none());
}

#[tokio::test]
async fn consumer_runs_without_upstream_output() {
    let harness = setup();

    let report = harness.workspace.run("b").await.unwrap();

    assert!(report.outcome.is_completed());
    assert_eq!(harness.generator.calls()[0].request.prior_context, "");
}

#[tokio::test]
async fn edited_prompt_is_used_by_next_run() {
    let harness = setup();
    harness.workspace.set_prompt("a", "Only say hi.").unwrap();

    harness.workspace.run("a").await.unwrap();

    assert_eq!(harness.generator.calls()[0].request.prompt, "Only say hi.");
    assert_eq!(
        harness.workspace.set_prompt("ghost", "x"),
        Err(RunError::UnknownAgent(AgentId::new("ghost")))
    );
}

#[tokio::test]
async fn agent_is_working_while_generation_is_in_flight() {
    let harness = setup();
    harness.generator.hold();

    let handle = harness.workspace.spawn_run("a");
    wait_for_calls(&harness.generator, 1).await;
    assert_eq!(status(&harness.workspace, "a"), AgentStatus::Working);

    let again = harness.workspace.run("a").await.unwrap_err();
    assert_eq!(again, RunError::AlreadyRunning(AgentId::new("a")));
    assert_eq!(harness.generator.call_count(), 1);

    harness.generator.release();
    let report = handle.await.unwrap().unwrap();
    assert!(report.outcome.is_completed());
    assert_eq!(status(&harness.workspace, "a"), AgentStatus::Completed);
}

#[tokio::test]
async fn runs_on_different_agents_overlap() {
    let harness = setup();
    harness.generator.hold();

    let a = harness.workspace.spawn_run("a");
    let b = harness.workspace.spawn_run("b");
    wait_for_calls(&harness.generator, 2).await;
    assert_eq!(status(&harness.workspace, "a"), AgentStatus::Working);
    assert_eq!(status(&harness.workspace, "b"), AgentStatus::Working);

    // State stays readable while both calls are pending
    assert_eq!(harness.workspace.snapshot().agents.len(), 2);

    harness.generator.release();
    assert!(a.await.unwrap().unwrap().outcome.is_completed());
    assert!(b.await.unwrap().unwrap().outcome.is_completed());
}

#[tokio::test]
async fn grok_agent_needs_grok_key() {
    let mut grok = definition("g");
    grok.provider = Provider::Grok;
    let harness = setup_with(AppState::from_definitions([grok]));
    harness.workspace.save_credentials(CredentialsPatch::new().with(Provider::Gemini, "K1"));

    let err = harness.workspace.run("g").await.unwrap_err();
    assert!(matches!(err, RunError::MissingCredential { provider: Provider::Grok, .. }));

    harness.workspace.save_credentials(CredentialsPatch::new().with(Provider::Grok, "G1"));
    harness.workspace.run("g").await.unwrap();
    assert_eq!(harness.generator.calls()[0].request.credential, "G1");
}

#[tokio::test]
async fn builtin_pipeline_runs_end_to_end() {
    let harness = setup_with(AppState::new(Registry::builtin().unwrap()));
    harness.workspace.save_credentials(CredentialsPatch::new().with(Provider::Gemini, "K1"));
    harness.generator.respond(r#"[{"keyword":"best card","intent":"buy"}]"#);
    harness.generator.respond("<article>html</article>");

    harness.workspace.run("mage_prospector").await.unwrap();
    harness.workspace.run("mage_crafter").await.unwrap();
    harness.workspace.run("mage_architect").await.unwrap();

    let calls = harness.generator.calls();
    assert!(calls[1].request.prior_context.starts_with("Use this Content Queue JSON: "));
    assert!(calls[1].request.prior_context.contains("best card"));
    assert_eq!(
        calls[2].request.prior_context,
        "Embed this Article HTML: <article>html</article>"
    );
}
