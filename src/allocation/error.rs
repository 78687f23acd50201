use serde::{Deserialize, Serialize};

use crate::inventory::error::{InventoryError, InventoryErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationErrorKind {
    InvalidRequest,
    SubmissionRejected,
    AvailabilityConflict,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct AllocationError {
    pub kind: AllocationErrorKind,
    pub message: String,
}

impl AllocationError {
    pub fn new(kind: AllocationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<InventoryError> for AllocationError {
    fn from(err: InventoryError) -> Self {
        let kind = match err.kind {
            InventoryErrorKind::NotFound | InventoryErrorKind::Parse => {
                AllocationErrorKind::InvalidRequest
            }
            InventoryErrorKind::InvariantViolation => AllocationErrorKind::Internal,
        };
        Self::new(kind, err.message)
    }
}

pub fn invalid_request(message: impl Into<String>) -> AllocationError {
    AllocationError::new(AllocationErrorKind::InvalidRequest, message)
}

pub fn submission_rejected(message: impl Into<String>) -> AllocationError {
    AllocationError::new(AllocationErrorKind::SubmissionRejected, message)
}

pub fn availability_conflict(message: impl Into<String>) -> AllocationError {
    AllocationError::new(AllocationErrorKind::AvailabilityConflict, message)
}
