pub mod error;
pub mod snapshot;
pub mod types;

pub use error::{InventoryError, InventoryErrorKind};
pub use snapshot::AvailabilitySnapshot;
pub use types::{Floor, FloorId, SiteId, Tower, TowerId, Unit, UnitId, UnitType};
