use crate::{
    allocation::types::{
        AllocationMode, AllocationSettings, Segment, SelectionAction, SelectionMap, UnitSelection,
    },
    inventory::types::{Floor, Unit},
};

/// Manual edits of the selection map. Every operation is a plain state
/// transition; requests that make no sense for the unit leave the map as is.
pub struct SegmentManager;

impl SegmentManager {
    /// Starting chunk for a new partial selection: never zero, never below the
    /// unit's minimum divisible area, never above what is available.
    pub fn default_segment_area(unit: &Unit, settings: &AllocationSettings) -> f64 {
        let available = unit.available_area_sqft;
        let chunk = settings.default_segment_chunk_sqft.min(available);
        available.min(unit.min_divisible_area_sqft.max(chunk))
    }

    pub fn toggle_unit(selections: &mut SelectionMap, unit: &Unit, settings: &AllocationSettings) {
        if !unit.has_availability() {
            return;
        }

        if selections.remove(&unit.unit_id).is_some() {
            return;
        }

        let selection = if unit.divisible() {
            UnitSelection::partial(vec![Segment::with_area(Self::default_segment_area(
                unit, settings,
            ))])
        } else {
            UnitSelection::full()
        };
        selections.insert(unit.unit_id.clone(), selection);
    }

    pub fn set_unit_mode(
        selections: &mut SelectionMap,
        unit: &Unit,
        mode: AllocationMode,
        settings: &AllocationSettings,
    ) {
        if !unit.has_availability() {
            return;
        }

        if !unit.divisible() {
            if mode == AllocationMode::Full {
                selections.insert(unit.unit_id.clone(), UnitSelection::full());
            }
            return;
        }

        let selection = selections
            .entry(unit.unit_id.clone())
            .or_insert_with(|| UnitSelection::partial(Vec::new()));
        selection.allocation_mode = mode;
        if mode == AllocationMode::Partial && selection.segments.is_empty() {
            selection
                .segments
                .push(Segment::with_area(Self::default_segment_area(unit, settings)));
        }
    }

    pub fn add_segment(selections: &mut SelectionMap, unit: &Unit) {
        if !unit.has_availability() {
            return;
        }

        if let Some(selection) = selections.get_mut(&unit.unit_id)
            && selection.allocation_mode == AllocationMode::Partial
        {
            selection.segments.push(Segment::empty());
        }
    }

    pub fn update_segment(
        selections: &mut SelectionMap,
        unit_id: &str,
        index: usize,
        value: impl Into<String>,
    ) {
        if let Some(segment) = selections
            .get_mut(unit_id)
            .and_then(|selection| selection.segments.get_mut(index))
        {
            segment.allocated_area = value.into();
        }
    }

    /// Removes one segment. The unit stays selected even with no segments left.
    pub fn remove_segment(selections: &mut SelectionMap, unit_id: &str, index: usize) {
        if let Some(selection) = selections.get_mut(unit_id)
            && index < selection.segments.len()
        {
            selection.segments.remove(index);
        }
    }

    pub fn apply(
        selections: &mut SelectionMap,
        floor: &Floor,
        action: &SelectionAction,
        settings: &AllocationSettings,
    ) {
        match action {
            SelectionAction::UpdateSegment {
                unit_id,
                index,
                value,
            } => Self::update_segment(selections, unit_id, *index, value.clone()),
            SelectionAction::RemoveSegment { unit_id, index } => {
                Self::remove_segment(selections, unit_id, *index)
            }
            SelectionAction::ToggleUnit { unit_id }
            | SelectionAction::SetUnitMode { unit_id, .. }
            | SelectionAction::AddSegment { unit_id } => {
                let Some(unit) = floor.unit(unit_id) else {
                    tracing::warn!(
                        target: "allocation",
                        floor_id = %floor.floor_id,
                        unit_id = %unit_id,
                        "selection_action_for_unknown_unit"
                    );
                    return;
                };

                match action {
                    SelectionAction::ToggleUnit { .. } => {
                        Self::toggle_unit(selections, unit, settings)
                    }
                    SelectionAction::SetUnitMode {
                        allocation_mode, ..
                    } => Self::set_unit_mode(selections, unit, *allocation_mode, settings),
                    _ => Self::add_segment(selections, unit),
                }
            }
        }
    }
}

/// Reducer form of [`SegmentManager::apply`].
pub fn reduce(
    mut selections: SelectionMap,
    floor: &Floor,
    action: &SelectionAction,
    settings: &AllocationSettings,
) -> SelectionMap {
    SegmentManager::apply(&mut selections, floor, action, settings);
    selections
}
