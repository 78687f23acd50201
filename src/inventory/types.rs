use serde::{Deserialize, Serialize};

pub type SiteId = String;
pub type TowerId = String;
pub type FloorId = String;
pub type UnitId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    Residential,
    Commercial,
    Office,
    Retail,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub unit_id: UnitId,
    #[serde(default)]
    pub unit_name: String,
    #[serde(default)]
    pub unit_type: UnitType,
    #[serde(default)]
    pub total_area_sqft: f64,
    #[serde(default)]
    pub reserved_area_sqft: f64,
    pub available_area_sqft: f64,
    #[serde(default)]
    pub is_divisible: bool,
    #[serde(default)]
    pub min_divisible_area_sqft: f64,
    #[serde(default)]
    pub default_base_rent: Option<f64>,
    #[serde(default)]
    pub default_cam_rate: Option<f64>,
}

impl Unit {
    pub fn is_residential(&self) -> bool {
        self.unit_type == UnitType::Residential
    }

    /// Residential units are never split, whatever the inventory flag says.
    pub fn divisible(&self) -> bool {
        self.is_divisible && !self.is_residential()
    }

    pub fn has_availability(&self) -> bool {
        self.available_area_sqft > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub floor_id: FloorId,
    #[serde(default)]
    pub floor_name: String,
    #[serde(default)]
    pub floor_total_area_sqft: f64,
    #[serde(default)]
    pub floor_available_area_sqft: f64,
    #[serde(default)]
    pub units: Vec<Unit>,
}

impl Floor {
    pub fn unit(&self, unit_id: &str) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.unit_id == unit_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub tower_id: TowerId,
    #[serde(default)]
    pub tower_name: String,
    #[serde(default)]
    pub floors: Vec<Floor>,
}

impl Tower {
    pub fn floor(&self, floor_id: &str) -> Option<&Floor> {
        self.floors.iter().find(|floor| floor.floor_id == floor_id)
    }
}
