use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryErrorKind {
    Parse,
    InvariantViolation,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct InventoryError {
    pub kind: InventoryErrorKind,
    pub message: String,
}

impl InventoryError {
    pub fn new(kind: InventoryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub fn parse_error(message: impl Into<String>) -> InventoryError {
    InventoryError::new(InventoryErrorKind::Parse, message)
}

pub fn invariant_violation(message: impl Into<String>) -> InventoryError {
    InventoryError::new(InventoryErrorKind::InvariantViolation, message)
}

pub fn not_found(message: impl Into<String>) -> InventoryError {
    InventoryError::new(InventoryErrorKind::NotFound, message)
}
