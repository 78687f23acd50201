use crate::{
    allocation::{
        area::{AREA_EPSILON, round2},
        types::{AllocationPlan, Segment, SelectionMap, UnitSelection},
    },
    inventory::types::Floor,
};

/// First-fit allocation over a floor's units in display order. Units are taken
/// whole while the remainder covers them; only the unit that absorbs the final
/// remainder is split, and only when it is divisible.
pub struct GreedyAllocator;

impl GreedyAllocator {
    pub fn allocate(floor: &Floor, target_area_sqft: f64) -> AllocationPlan {
        let mut selections = SelectionMap::new();
        let mut remaining = target_area_sqft;

        for unit in &floor.units {
            if remaining <= AREA_EPSILON {
                break;
            }

            let available = unit.available_area_sqft;
            if available <= 0.0 {
                continue;
            }

            if remaining >= available - AREA_EPSILON {
                selections.insert(unit.unit_id.clone(), UnitSelection::full());
                remaining -= available;
            } else if unit.divisible() && remaining >= unit.min_divisible_area_sqft - AREA_EPSILON {
                selections.insert(
                    unit.unit_id.clone(),
                    UnitSelection::partial(vec![Segment::with_area(remaining)]),
                );
                remaining = 0.0;
            }
        }

        let remaining_area_sqft = round2(remaining);
        tracing::debug!(
            target: "allocation",
            floor_id = %floor.floor_id,
            target_area_sqft,
            remaining_area_sqft,
            selected_units = selections.len(),
            "greedy_allocation_computed"
        );

        AllocationPlan {
            selections,
            remaining_area_sqft,
        }
    }

    /// Whole-floor selection: every unit with availability is taken in full,
    /// with no tolerance arithmetic involved.
    pub fn fill_floor(floor: &Floor) -> AllocationPlan {
        let selections: SelectionMap = floor
            .units
            .iter()
            .filter(|unit| unit.has_availability())
            .map(|unit| (unit.unit_id.clone(), UnitSelection::full()))
            .collect();

        let selected: f64 = floor
            .units
            .iter()
            .filter(|unit| unit.has_availability())
            .map(|unit| unit.available_area_sqft)
            .sum();

        AllocationPlan {
            selections,
            remaining_area_sqft: round2(floor.floor_available_area_sqft - selected),
        }
    }
}
