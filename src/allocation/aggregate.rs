use crate::{
    allocation::{
        area::round2,
        types::{AllocationMode, SelectionMap, UnitSelection},
    },
    inventory::types::Unit,
};

/// Area a selected unit contributes. A partial selection is never credited
/// beyond the unit's availability, whatever its segments add up to.
pub fn contributed_area(selection: &UnitSelection, unit: &Unit) -> f64 {
    match selection.allocation_mode {
        AllocationMode::Full => unit.available_area_sqft,
        AllocationMode::Partial => selection
            .segment_area_sum()
            .min(unit.available_area_sqft),
    }
}

/// Sum of contributed areas over the given units, rounded to two decimals.
/// Selections for units outside `units` contribute nothing.
pub fn selected_area_total(selections: &SelectionMap, units: &[Unit]) -> f64 {
    let total: f64 = units
        .iter()
        .filter_map(|unit| {
            selections
                .get(&unit.unit_id)
                .map(|selection| contributed_area(selection, unit))
        })
        .sum();
    round2(total)
}

pub fn remaining_area(target_area_sqft: Option<f64>, selected_area_sqft: f64) -> Option<f64> {
    target_area_sqft.map(|target| round2(target - selected_area_sqft))
}
