use leasing_planner::allocation::{
    AllocationMode, AllocationSettings, SegmentManager, SelectionAction, SelectionMap, reduce,
};

use super::{assert_area, example_floor, mixed_floor, unit};

fn settings() -> AllocationSettings {
    AllocationSettings::default()
}

#[test]
fn given_default_chunk_when_sizing_first_segment_then_bounds_are_respected() {
    let settings = settings();
    assert_area(
        SegmentManager::default_segment_area(&unit("B", 600.0, true, 100.0), &settings),
        100.0,
    );
    assert_area(
        SegmentManager::default_segment_area(&unit("M", 600.0, true, 250.0), &settings),
        250.0,
    );
    assert_area(
        SegmentManager::default_segment_area(&unit("S", 40.0, true, 0.0), &settings),
        40.0,
    );
}

#[test]
fn given_unselected_units_when_toggling_then_mode_follows_divisibility() {
    let floor = example_floor();
    let mut selections = SelectionMap::new();

    SegmentManager::toggle_unit(&mut selections, &floor.units[0], &settings());
    SegmentManager::toggle_unit(&mut selections, &floor.units[1], &settings());

    let a = selections.get("A").expect("A should be selected");
    assert_eq!(a.allocation_mode, AllocationMode::Full);
    assert!(a.segments.is_empty());

    let b = selections.get("B").expect("B should be selected");
    assert_eq!(b.allocation_mode, AllocationMode::Partial);
    assert_eq!(b.segments.len(), 1);
    assert_area(b.segments[0].area(), 100.0);
}

#[test]
fn given_unit_toggled_twice_when_inspecting_then_selection_is_unchanged() {
    let floor = example_floor();
    let mut selections = SelectionMap::new();
    SegmentManager::toggle_unit(&mut selections, &floor.units[0], &settings());
    let before = selections.clone();

    SegmentManager::toggle_unit(&mut selections, &floor.units[1], &settings());
    SegmentManager::toggle_unit(&mut selections, &floor.units[1], &settings());

    assert_eq!(selections, before);
}

#[test]
fn given_unit_without_availability_when_toggling_then_nothing_is_selected() {
    let floor = mixed_floor();
    let reserved = floor.unit("D").expect("D is on the floor");
    let mut selections = SelectionMap::new();

    SegmentManager::toggle_unit(&mut selections, reserved, &settings());

    assert!(selections.is_empty());
}

#[test]
fn given_residential_unit_flagged_divisible_when_toggling_then_it_is_selected_full() {
    let floor = mixed_floor();
    let residential = floor.unit("C").expect("C is on the floor");
    let mut selections = SelectionMap::new();

    SegmentManager::toggle_unit(&mut selections, residential, &settings());

    assert_eq!(
        selections.get("C").map(|selection| selection.allocation_mode),
        Some(AllocationMode::Full)
    );
}

#[test]
fn given_non_divisible_unit_when_requesting_partial_then_request_is_ignored() {
    let floor = example_floor();
    let mut selections = SelectionMap::new();

    SegmentManager::set_unit_mode(
        &mut selections,
        &floor.units[0],
        AllocationMode::Partial,
        &settings(),
    );
    assert!(selections.is_empty());

    SegmentManager::set_unit_mode(
        &mut selections,
        &floor.units[0],
        AllocationMode::Full,
        &settings(),
    );
    assert_eq!(
        selections.get("A").map(|selection| selection.allocation_mode),
        Some(AllocationMode::Full)
    );
}

#[test]
fn given_partial_unit_when_switching_to_full_and_back_then_segments_are_kept() {
    let floor = example_floor();
    let b = &floor.units[1];
    let mut selections = SelectionMap::new();
    SegmentManager::toggle_unit(&mut selections, b, &settings());
    SegmentManager::update_segment(&mut selections, "B", 0, "275");

    SegmentManager::set_unit_mode(&mut selections, b, AllocationMode::Full, &settings());
    SegmentManager::set_unit_mode(&mut selections, b, AllocationMode::Partial, &settings());

    let selection = selections.get("B").expect("B stays selected");
    assert_eq!(selection.allocation_mode, AllocationMode::Partial);
    assert_eq!(selection.segments.len(), 1);
    assert_area(selection.segments[0].area(), 275.0);
}

#[test]
fn given_full_selection_when_adding_segment_then_nothing_changes() {
    let floor = example_floor();
    let b = &floor.units[1];
    let mut selections = SelectionMap::new();
    SegmentManager::set_unit_mode(&mut selections, b, AllocationMode::Full, &settings());

    SegmentManager::add_segment(&mut selections, b);

    assert!(selections.get("B").expect("B is selected").segments.is_empty());
}

#[test]
fn given_partial_selection_when_adding_segment_then_empty_segment_is_appended() {
    let floor = example_floor();
    let b = &floor.units[1];
    let mut selections = SelectionMap::new();
    SegmentManager::toggle_unit(&mut selections, b, &settings());

    SegmentManager::add_segment(&mut selections, b);

    let segments = &selections.get("B").expect("B is selected").segments;
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1].allocated_area, "");
    assert_area(segments[1].area(), 0.0);
}

#[test]
fn given_free_text_when_updating_segment_then_text_is_stored_verbatim() {
    let floor = example_floor();
    let mut selections = SelectionMap::new();
    SegmentManager::toggle_unit(&mut selections, &floor.units[1], &settings());

    SegmentManager::update_segment(&mut selections, "B", 0, "1,50 sq");

    let segment = &selections.get("B").expect("B is selected").segments[0];
    assert_eq!(segment.allocated_area, "1,50 sq");
    assert_area(segment.area(), 150.0);
}

#[test]
fn given_out_of_range_index_when_editing_segments_then_nothing_changes() {
    let floor = example_floor();
    let mut selections = SelectionMap::new();
    SegmentManager::toggle_unit(&mut selections, &floor.units[1], &settings());
    let before = selections.clone();

    SegmentManager::update_segment(&mut selections, "B", 5, "300");
    SegmentManager::remove_segment(&mut selections, "B", 5);
    SegmentManager::update_segment(&mut selections, "Z", 0, "300");

    assert_eq!(selections, before);
}

#[test]
fn given_only_segment_when_removed_then_unit_stays_selected_with_no_segments() {
    let floor = example_floor();
    let mut selections = SelectionMap::new();
    SegmentManager::toggle_unit(&mut selections, &floor.units[1], &settings());

    SegmentManager::remove_segment(&mut selections, "B", 0);

    let selection = selections.get("B").expect("B stays selected");
    assert_eq!(selection.allocation_mode, AllocationMode::Partial);
    assert!(selection.segments.is_empty());
}

#[test]
fn given_action_sequence_when_reducing_then_map_reflects_each_step() {
    let floor = example_floor();
    let settings = settings();
    let actions = [
        SelectionAction::ToggleUnit {
            unit_id: "B".to_string(),
        },
        SelectionAction::AddSegment {
            unit_id: "B".to_string(),
        },
        SelectionAction::UpdateSegment {
            unit_id: "B".to_string(),
            index: 1,
            value: "200".to_string(),
        },
        SelectionAction::ToggleUnit {
            unit_id: "A".to_string(),
        },
        SelectionAction::ToggleUnit {
            unit_id: "missing".to_string(),
        },
    ];

    let selections = actions
        .iter()
        .fold(SelectionMap::new(), |map, action| {
            reduce(map, &floor, action, &settings)
        });

    assert_eq!(selections.len(), 2);
    let b = selections.get("B").expect("B is selected");
    assert_area(b.segment_area_sum(), 300.0);
    assert_eq!(
        selections.get("A").map(|selection| selection.allocation_mode),
        Some(AllocationMode::Full)
    );
}
