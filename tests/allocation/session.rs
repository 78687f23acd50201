use leasing_planner::{
    allocation::{
        AllocationError, AllocationErrorKind, AllocationMode, AllocationSession, AllocationSettings,
        AvailabilityGuard, LeaseItem, NoopAvailabilityGuard, RateDefaults, SelectionMode,
        SessionCommand, SessionEvent, error::availability_conflict,
    },
    inventory::{AvailabilitySnapshot, Tower},
};

use super::{
    assert_area, example_floor, example_snapshot, lease_context, session_on_floor, unit,
};

struct RefusingGuard;

impl AvailabilityGuard for RefusingGuard {
    fn confirm(
        &self,
        _snapshot: &AvailabilitySnapshot,
        items: &[LeaseItem],
    ) -> Result<(), AllocationError> {
        Err(availability_conflict(format!(
            "unit '{}' was leased meanwhile",
            items[0].unit_id
        )))
    }
}

fn session_with_guard(guard: Box<dyn AvailabilityGuard>) -> AllocationSession {
    let mut session = AllocationSession::new(
        example_snapshot(),
        lease_context(),
        AllocationSettings::default(),
        RateDefaults::default(),
        guard,
    );
    session.select_tower("T1").expect("tower should exist");
    session.select_floor("F1").expect("floor should exist");
    session
}

#[test]
fn given_seventy_percent_of_floor_when_selecting_then_target_is_met_exactly() {
    let mut session = session_on_floor("F1");

    let output = session
        .select_percent_floor(70.0)
        .expect("percent selection should succeed");

    assert!(output.events.contains(&SessionEvent::AllocationApplied {
        target_area_sqft: 700.0,
        remaining_area_sqft: 0.0,
        selected_units: 2,
    }));
    let summary = session.summary();
    assert_eq!(summary.selection_mode, SelectionMode::Percent);
    assert_eq!(summary.target_area_sqft, Some(700.0));
    assert_area(summary.selected_area_sqft, 700.0);
    assert_eq!(summary.remaining_area_sqft, Some(0.0));
    assert!(!session.selection_invalid());
}

#[test]
fn given_custom_area_beyond_floor_when_selecting_then_nothing_is_allocated() {
    let mut session = session_on_floor("F1");
    session.toggle_unit("A").expect("toggle should succeed");

    let output = session
        .select_custom_area("1200")
        .expect("custom area selection should succeed");

    assert!(output.events.contains(&SessionEvent::AllocationSkipped {
        target_area_sqft: 1200.0,
        floor_available_area_sqft: 1000.0,
    }));
    assert!(session.state().selections.is_empty());
    assert_eq!(session.target_area(), Some(1200.0));
    assert!(session.selection_invalid());
    assert_eq!(
        session.validation().issues[0].code(),
        "custom_area_exceeds_floor"
    );
}

#[test]
fn given_manual_toggle_when_summarising_then_no_target_constrains_the_selection() {
    let mut session = session_on_floor("F1");

    session.toggle_unit("A").expect("toggle should succeed");

    assert_eq!(session.target_area(), None);
    assert_area(session.selected_area_total(), 400.0);
    assert_eq!(session.remaining_area(), None);
    assert!(!session.selection_invalid());
}

#[test]
fn given_residential_unit_flagged_divisible_when_toggled_then_it_is_selected_full() {
    let mut session = session_on_floor("F2");

    session.toggle_unit("C").expect("toggle should succeed");

    let selection = session
        .state()
        .selections
        .get("C")
        .expect("C should be selected");
    assert_eq!(selection.allocation_mode, AllocationMode::Full);
    assert!(selection.segments.is_empty());
}

#[test]
fn given_full_floor_or_hundred_percent_when_selecting_then_remaining_is_exactly_zero() {
    let mut session = session_on_floor("F2");

    session.select_full_floor().expect("full floor should succeed");
    assert_eq!(session.remaining_area(), Some(0.0));
    assert!(!session.selection_invalid());
    let full_floor = session.state().selections.clone();

    session
        .select_percent_floor(100.0)
        .expect("percent selection should succeed");
    assert_eq!(session.remaining_area(), Some(0.0));
    assert_eq!(session.state().selections, full_floor);
}

#[test]
fn given_partial_grown_past_target_when_summarising_then_remaining_goes_negative() {
    let mut session = session_on_floor("F1");
    session
        .select_percent_floor(70.0)
        .expect("percent selection should succeed");

    session
        .update_segment("B", 0, "400")
        .expect("segment update should succeed");

    assert_area(session.selected_area_total(), 800.0);
    assert_eq!(session.remaining_area(), Some(-100.0));
    let codes: Vec<&str> = session
        .validation()
        .issues
        .iter()
        .map(|issue| issue.code())
        .collect();
    assert!(codes.contains(&"over_allocated"));
}

#[test]
fn given_only_segment_removed_when_submitting_then_submission_is_rejected() {
    let mut session = session_on_floor("F1");
    session.toggle_unit("A").expect("toggle should succeed");
    session.toggle_unit("B").expect("toggle should succeed");

    session.remove_segment("B", 0).expect("removal should succeed");

    let b = session
        .state()
        .selections
        .get("B")
        .expect("B stays selected");
    assert!(b.segments.is_empty());
    assert!(session.selection_invalid());

    let err = session.submit().expect_err("empty partial must block submission");
    assert_eq!(err.kind, AllocationErrorKind::SubmissionRejected);
    assert!(err.message.contains("empty_partial_selection"));
    assert!(session.state().selections.contains_key("B"));
}

#[test]
fn given_nothing_selected_when_submitting_then_submission_is_rejected() {
    let mut session = session_on_floor("F1");

    let err = session.submit().expect_err("empty selection must be rejected");

    assert_eq!(err.kind, AllocationErrorKind::SubmissionRejected);
    assert_eq!(err.message, "no leasable units are selected");
}

#[test]
fn given_valid_selection_when_submitting_then_payload_is_built_and_selection_discarded() {
    let mut session = session_on_floor("F1");
    session
        .select_percent_floor(70.0)
        .expect("percent selection should succeed");
    let digest = session.snapshot().digest();

    let payload = session.submit().expect("submission should succeed");

    assert_eq!(payload.lease.lease_id.as_deref(), Some("lease-42"));
    assert_eq!(payload.lease.site_id.as_deref(), Some("site-1"));
    let ui = &payload.lease.terms.ui_selection;
    assert_eq!(ui.tower_id.as_deref(), Some("T1"));
    assert_eq!(ui.floor_id.as_deref(), Some("F1"));
    assert_eq!(ui.target_floor_area_sqft, Some(700.0));
    assert_eq!(ui.selection_mode, SelectionMode::Percent);
    assert_eq!(ui.snapshot_digest.as_deref(), Some(digest.as_str()));

    assert_eq!(payload.items.len(), 2);
    assert_eq!(payload.items[0].unit_id, "A");
    assert_eq!(payload.items[0].allocation_mode, AllocationMode::Full);
    assert_eq!(payload.items[0].base_rent_rate, 30.0);
    assert_eq!(payload.items[1].unit_id, "B");
    assert_eq!(payload.items[1].allocated_area_sqft, Some(300.0));
    assert_eq!(payload.items[1].cam_rate, 4.5);

    assert_eq!(session.state().mode, SelectionMode::Manual);
    assert!(session.state().selections.is_empty());
}

#[test]
fn given_segment_that_rounds_to_zero_when_submitting_then_unit_is_not_silently_dropped() {
    let mut session = session_on_floor("F1");
    session.toggle_unit("A").expect("toggle should succeed");
    session.toggle_unit("B").expect("toggle should succeed");

    session
        .update_segment("B", 0, "0.004")
        .expect("segment update should succeed");

    assert!(session.selection_invalid());
    assert!(
        session
            .validation()
            .blocking()
            .any(|issue| issue.code() == "empty_partial_selection")
    );
    let err = session.submit().expect_err("B has no submittable area");
    assert_eq!(err.kind, AllocationErrorKind::SubmissionRejected);
    assert!(session.state().selections.contains_key("B"));
}

#[test]
fn given_segments_past_availability_when_submitting_then_rejection_is_local() {
    let mut session = session_on_floor("F1");
    session.toggle_unit("B").expect("toggle should succeed");

    session
        .update_segment("B", 0, "700")
        .expect("segment update should succeed");

    // Reported total stays capped at what B has available.
    assert_area(session.selected_area_total(), 600.0);
    assert!(session.selection_invalid());
    assert_eq!(
        session.validation().issues[0].code(),
        "segments_exceed_availability"
    );

    let err = session.submit().expect_err("over-claimed unit must be refused");
    assert_eq!(err.kind, AllocationErrorKind::SubmissionRejected);
    assert!(err.message.contains("segments_exceed_availability"));
}

#[test]
fn given_percent_remainder_below_minimum_split_when_selecting_then_selection_is_flagged() {
    let mut session = session_on_floor("F1");

    session
        .select_percent_floor(45.0)
        .expect("percent selection should succeed");

    assert_eq!(session.target_area(), Some(450.0));
    assert!(session.state().selections.contains_key("A"));
    assert!(!session.state().selections.contains_key("B"));
    assert_eq!(session.remaining_area(), Some(50.0));
    assert!(session.selection_invalid());
    assert_eq!(
        session
            .validation()
            .blocking()
            .map(|issue| issue.code())
            .collect::<Vec<_>>(),
        vec!["inexact_fill"]
    );

    let err = session.submit().expect_err("unfilled target must block submission");
    assert_eq!(err.kind, AllocationErrorKind::SubmissionRejected);
}

#[test]
fn given_infeasible_custom_area_when_selecting_then_selection_is_flagged() {
    let mut session = session_on_floor("F1");

    session
        .select_custom_area("450")
        .expect("custom area selection should succeed");

    assert_eq!(session.remaining_area(), Some(50.0));
    assert!(session.selection_invalid());
}

#[test]
fn given_guard_conflict_when_submitting_then_selection_is_kept() {
    let mut session = session_with_guard(Box::new(RefusingGuard));
    session.toggle_unit("A").expect("toggle should succeed");

    let err = session.submit().expect_err("guard must refuse");

    assert_eq!(err.kind, AllocationErrorKind::AvailabilityConflict);
    assert!(err.message.contains("'A'"));
    assert!(session.state().selections.contains_key("A"));
}

#[test]
fn given_noop_guard_when_submitting_then_submission_passes() {
    let mut session = session_with_guard(Box::new(NoopAvailabilityGuard));
    session.toggle_unit("A").expect("toggle should succeed");

    let payload = session.submit().expect("noop guard never refuses");
    assert_eq!(payload.items.len(), 1);
}

#[test]
fn given_selection_on_floor_when_switching_floor_then_selection_is_cleared() {
    let mut session = session_on_floor("F1");
    session
        .select_percent_floor(70.0)
        .expect("percent selection should succeed");

    let output = session.select_floor("F2").expect("floor should exist");

    assert!(output.events.contains(&SessionEvent::SelectionCleared));
    assert_eq!(session.state().mode, SelectionMode::Manual);
    assert!(session.state().selections.is_empty());
}

#[test]
fn given_no_floor_selected_when_editing_then_request_is_invalid() {
    let mut session = AllocationSession::with_defaults(example_snapshot(), lease_context());

    let err = session.toggle_unit("A").expect_err("edit needs a floor");
    assert_eq!(err.kind, AllocationErrorKind::InvalidRequest);

    let err = session.select_floor("F1").expect_err("floor needs a tower");
    assert_eq!(err.kind, AllocationErrorKind::InvalidRequest);

    let err = session.select_tower("T9").expect_err("tower must exist");
    assert_eq!(err.kind, AllocationErrorKind::InvalidRequest);
}

#[test]
fn given_unknown_floor_when_selecting_then_request_is_invalid() {
    let mut session = AllocationSession::with_defaults(example_snapshot(), lease_context());
    session.select_tower("T1").expect("tower should exist");

    let err = session.select_floor("F9").expect_err("floor must exist");

    assert_eq!(err.kind, AllocationErrorKind::InvalidRequest);
    assert!(err.message.contains("F9"));
}

#[test]
fn given_new_snapshot_when_replacing_then_location_and_selection_reset() {
    let mut session = session_on_floor("F1");
    session.toggle_unit("A").expect("toggle should succeed");
    let replacement = AvailabilitySnapshot::new(
        Some("site-2".to_string()),
        vec![Tower {
            tower_id: "T2".to_string(),
            tower_name: "South".to_string(),
            floors: vec![example_floor()],
        }],
    );
    let expected_digest = replacement.digest();

    let output = session
        .step(SessionCommand::ReplaceSnapshot {
            snapshot: replacement,
        })
        .expect("valid snapshot should be accepted");

    assert_eq!(
        output.events[0],
        SessionEvent::SnapshotReplaced {
            snapshot_digest: expected_digest
        }
    );
    assert_eq!(session.state().tower_id, None);
    assert_eq!(session.state().floor_id, None);
    assert!(session.state().selections.is_empty());
    assert_eq!(session.current_floor(), None);
}

#[test]
fn given_inconsistent_snapshot_when_replacing_then_current_snapshot_is_kept() {
    let mut session = session_on_floor("F1");
    let broken = AvailabilitySnapshot::new(
        None,
        vec![Tower {
            tower_id: "T1".to_string(),
            tower_name: "North".to_string(),
            floors: vec![super::floor(
                "F1",
                vec![unit("A", 10.0, false, 0.0), unit("A", 20.0, false, 0.0)],
            )],
        }],
    );

    let err = session
        .step(SessionCommand::ReplaceSnapshot { snapshot: broken })
        .expect_err("duplicate unit ids must be refused");

    assert_eq!(err.kind, AllocationErrorKind::Internal);
    assert_eq!(session.snapshot().site_id.as_deref(), Some("site-1"));
    assert_eq!(session.state().floor_id.as_deref(), Some("F1"));
}
