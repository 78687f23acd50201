use crate::{
    allocation::{error::AllocationError, ports::AvailabilityGuard, types::LeaseItem},
    inventory::snapshot::AvailabilitySnapshot,
};

#[derive(Debug, Clone, Default)]
pub struct NoopAvailabilityGuard;

impl AvailabilityGuard for NoopAvailabilityGuard {
    fn confirm(
        &self,
        _snapshot: &AvailabilitySnapshot,
        _items: &[LeaseItem],
    ) -> Result<(), AllocationError> {
        Ok(())
    }
}
