use crate::{
    allocation::{error::AllocationError, types::LeaseItem},
    inventory::snapshot::AvailabilitySnapshot,
};

/// Last check before a submission leaves the planner. Implementations may
/// compare the items against fresher availability than the session snapshot.
pub trait AvailabilityGuard: Send + Sync {
    fn confirm(
        &self,
        snapshot: &AvailabilitySnapshot,
        items: &[LeaseItem],
    ) -> Result<(), AllocationError>;
}
