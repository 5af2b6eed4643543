// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run lifecycle: start, finish, and duplicate or stale run events.

use super::*;

#[test]
fn run_start_marks_working_and_logs() {
    let mut state = state_with(&["a"]);
    state.apply_event(&run_started_event("a", "run-1"));

    let rt = &state.get("a").unwrap().runtime;
    assert_eq!(rt.status, AgentStatus::Working);
    assert_eq!(rt.active_run.as_ref().map(|r| r.as_str()), Some("run-1"));
    assert_eq!(rt.logs, ["run-1 started"]);
}

#[test]
fn completion_stores_output_and_timestamp() {
    let mut state = state_with(&["a"]);
    state.apply_event(&run_started_event("a", "run-1"));
    state.apply_event(&run_completed_event("a", "run-1", "OUT_A"));

    let rt = &state.get("a").unwrap().runtime;
    assert_eq!(rt.status, AgentStatus::Completed);
    assert_eq!(rt.last_output.as_deref(), Some("OUT_A"));
    assert_eq!(rt.last_run_ms, Some(2_000_000));
    assert!(rt.active_run.is_none());
    assert!(rt.last_error.is_none());
    assert_eq!(rt.logs.len(), 2);
}

#[test]
fn failure_keeps_previous_output() {
    let mut state = state_with(&["a"]);
    state.apply_event(&run_started_event("a", "run-1"));
    state.apply_event(&run_completed_event("a", "run-1", "first"));
    state.apply_event(&run_started_event("a", "run-2"));
    state.apply_event(&run_failed_event("a", "run-2", "Error generating content: quota"));

    let rt = &state.get("a").unwrap().runtime;
    assert_eq!(rt.status, AgentStatus::Error);
    assert_eq!(rt.last_output.as_deref(), Some("first"));
    assert_eq!(rt.last_run_ms, Some(2_000_000));
    assert_eq!(rt.last_error.as_deref(), Some("Error generating content: quota"));
    assert!(rt.logs.last().unwrap().contains("quota"));
}

#[test]
fn success_after_failure_clears_error() {
    let mut state = state_with(&["a"]);
    state.apply_event(&run_started_event("a", "run-1"));
    state.apply_event(&run_failed_event("a", "run-1", "boom"));
    state.apply_event(&run_started_event("a", "run-2"));
    state.apply_event(&run_completed_event("a", "run-2", "ok"));

    let rt = &state.get("a").unwrap().runtime;
    assert_eq!(rt.status, AgentStatus::Completed);
    assert!(rt.last_error.is_none());
}

#[yare::parameterized(
    started   = { run_started_event("a", "run-1") },
    completed = { run_completed_event("a", "run-1", "out") },
    failed    = { run_failed_event("a", "run-1", "boom") },
)]
fn replaying_last_run_event_is_idempotent(last: Event) {
    let mut state = state_with(&["a"]);
    if !matches!(last, Event::RunStarted { .. }) {
        state.apply_event(&run_started_event("a", "run-1"));
    }
    state.apply_event(&last);
    let once = state.clone();

    state.apply_event(&last);

    assert_eq!(state, once);
}

#[test]
fn finish_for_unknown_run_is_ignored() {
    let mut state = state_with(&["a"]);
    state.apply_event(&run_started_event("a", "run-2"));
    let before = state.clone();

    state.apply_event(&run_completed_event("a", "run-1", "stale"));
    state.apply_event(&run_failed_event("a", "run-1", "stale"));

    assert_eq!(state, before);
}

#[test]
fn newer_start_supersedes_in_flight_run() {
    let mut state = state_with(&["a"]);
    state.apply_event(&run_started_event("a", "run-1"));
    state.apply_event(&run_started_event("a", "run-2"));
    state.apply_event(&run_completed_event("a", "run-1", "stale"));

    let rt = &state.get("a").unwrap().runtime;
    assert_eq!(rt.status, AgentStatus::Working);
    assert!(rt.last_output.is_none());

    state.apply_event(&run_completed_event("a", "run-2", "fresh"));
    let rt = &state.get("a").unwrap().runtime;
    assert_eq!(rt.last_output.as_deref(), Some("fresh"));
}

#[test]
fn runs_on_one_agent_leave_others_untouched() {
    let mut state = state_with(&["a", "b"]);
    let b_before = state.get("b").unwrap().clone();

    state.apply_event(&run_started_event("a", "run-1"));
    state.apply_event(&run_completed_event("a", "run-1", "out"));

    assert_eq!(state.get("b").unwrap(), &b_before);
}
