// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use mage_core::test_support::strategies::{arb_definition_patch, arb_runtime_patch};
use proptest::prelude::*;

fn arb_event() -> impl Strategy<Value = Event> {
    let id = prop_oneof![Just("a"), Just("b"), Just("ghost")];
    let run = prop_oneof![Just("run-1"), Just("run-2")];
    prop_oneof![
        (id.clone(), arb_definition_patch())
            .prop_map(|(id, patch)| Event::DefinitionPatched { id: AgentId::new(id), patch }),
        (id.clone(), arb_runtime_patch()).prop_map(|(id, patch)| patch_runtime(id, patch)),
        (id.clone(), run.clone()).prop_map(|(id, run)| run_started_event(id, run)),
        (id.clone(), run.clone(), ".{0,8}")
            .prop_map(|(id, run, out)| run_completed_event(id, run, &out)),
        (id, run, ".{0,8}").prop_map(|(id, run, err)| run_failed_event(id, run, &err)),
    ]
}

proptest! {
    #[test]
    fn agent_set_never_changes(events in proptest::collection::vec(arb_event(), 0..24)) {
        let mut state = state_with(&["a", "b"]);
        for event in &events {
            state.apply_event(event);
        }
        let ids: Vec<_> = state.agents().map(|e| e.id().to_string()).collect();
        prop_assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn run_events_apply_idempotently(
        prefix in proptest::collection::vec(arb_event(), 0..12),
        last in arb_event(),
    ) {
        prop_assume!(matches!(
            last,
            Event::RunStarted { .. } | Event::RunCompleted { .. } | Event::RunFailed { .. }
        ));
        let mut state = state_with(&["a", "b"]);
        for event in &prefix {
            state.apply_event(event);
        }
        state.apply_event(&last);
        let once = state.clone();
        state.apply_event(&last);
        prop_assert_eq!(state, once);
    }

    #[test]
    fn failure_never_erases_output(prefix in proptest::collection::vec(arb_event(), 0..12)) {
        let mut state = state_with(&["a"]);
        for event in &prefix {
            state.apply_event(event);
        }
        let before = state.get("a").unwrap().runtime.last_output.clone();
        state.apply_event(&run_started_event("a", "run-9"));
        state.apply_event(&run_failed_event("a", "run-9", "boom"));
        prop_assert_eq!(&state.get("a").unwrap().runtime.last_output, &before);
    }
}
