use std::collections::BTreeSet;

use crate::{
    allocation::{
        area::AREA_EPSILON,
        error::{AllocationError, availability_conflict},
        ports::AvailabilityGuard,
        types::LeaseItem,
    },
    inventory::snapshot::AvailabilitySnapshot,
};

/// Re-checks every item against the snapshot the selection was planned on.
#[derive(Debug, Clone, Default)]
pub struct SnapshotAvailabilityGuard;

impl AvailabilityGuard for SnapshotAvailabilityGuard {
    fn confirm(
        &self,
        snapshot: &AvailabilitySnapshot,
        items: &[LeaseItem],
    ) -> Result<(), AllocationError> {
        let mut seen = BTreeSet::new();
        for item in items {
            if !seen.insert(item.unit_id.as_str()) {
                return Err(availability_conflict(format!(
                    "unit '{}' appears more than once in the submission",
                    item.unit_id
                )));
            }

            let unit = snapshot.unit(&item.unit_id).ok_or_else(|| {
                availability_conflict(format!(
                    "unit '{}' is not part of the availability snapshot",
                    item.unit_id
                ))
            })?;

            if !unit.has_availability() {
                return Err(availability_conflict(format!(
                    "unit '{}' has no available area",
                    item.unit_id
                )));
            }

            if let Some(claimed) = item.claimed_area_sqft()
                && claimed - unit.available_area_sqft > AREA_EPSILON
            {
                return Err(availability_conflict(format!(
                    "unit '{}' claims {} sqft but only {} sqft is available",
                    item.unit_id, claimed, unit.available_area_sqft
                )));
            }
        }

        Ok(())
    }
}
