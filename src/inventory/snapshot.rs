use std::{
    collections::BTreeSet,
    fs,
    path::Path,
};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::inventory::{
    error::{InventoryError, invariant_violation, not_found, parse_error},
    types::{Floor, SiteId, Tower, Unit},
};

const AREA_TOLERANCE_SQFT: f64 = 0.01;

/// Read-only availability tree for one site, replaced wholesale on site change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AvailabilitySnapshot {
    #[serde(default)]
    pub site_id: Option<SiteId>,
    #[serde(default)]
    pub towers: Vec<Tower>,
}

impl AvailabilitySnapshot {
    pub fn new(site_id: Option<SiteId>, towers: Vec<Tower>) -> Self {
        Self { site_id, towers }
    }

    pub fn from_json_str(content: &str) -> Result<Self, InventoryError> {
        let snapshot: Self = serde_json::from_str(content)
            .map_err(|err| parse_error(format!("failed to parse availability snapshot: {err}")))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let content = fs::read_to_string(path).map_err(|err| {
            parse_error(format!(
                "failed to read availability snapshot '{}': {err}",
                path.display()
            ))
        })?;
        let snapshot = Self::from_json_str(&content)?;
        tracing::info!(
            target: "inventory",
            path = %path.display(),
            towers = snapshot.towers.len(),
            units = snapshot.units().count(),
            "snapshot_loaded"
        );
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<(), InventoryError> {
        let mut tower_ids = BTreeSet::new();
        let mut floor_ids = BTreeSet::new();
        let mut unit_ids = BTreeSet::new();

        for tower in &self.towers {
            if !tower_ids.insert(tower.tower_id.as_str()) {
                return Err(invariant_violation(format!(
                    "duplicate tower id '{}'",
                    tower.tower_id
                )));
            }

            for floor in &tower.floors {
                if !floor_ids.insert((tower.tower_id.as_str(), floor.floor_id.as_str())) {
                    return Err(invariant_violation(format!(
                        "duplicate floor id '{}' in tower '{}'",
                        floor.floor_id, tower.tower_id
                    )));
                }
                if floor.floor_available_area_sqft < 0.0 {
                    return Err(invariant_violation(format!(
                        "floor '{}' has negative available area {}",
                        floor.floor_id, floor.floor_available_area_sqft
                    )));
                }

                for unit in &floor.units {
                    if !unit_ids.insert(unit.unit_id.as_str()) {
                        return Err(invariant_violation(format!(
                            "duplicate unit id '{}'",
                            unit.unit_id
                        )));
                    }
                    if unit.available_area_sqft < 0.0 {
                        return Err(invariant_violation(format!(
                            "unit '{}' has negative available area {}",
                            unit.unit_id, unit.available_area_sqft
                        )));
                    }
                    if unit.total_area_sqft > 0.0
                        && unit.available_area_sqft > unit.total_area_sqft + AREA_TOLERANCE_SQFT
                    {
                        return Err(invariant_violation(format!(
                            "unit '{}' available area {} exceeds total area {}",
                            unit.unit_id, unit.available_area_sqft, unit.total_area_sqft
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    pub fn tower(&self, tower_id: &str) -> Option<&Tower> {
        self.towers.iter().find(|tower| tower.tower_id == tower_id)
    }

    pub fn floor(&self, tower_id: &str, floor_id: &str) -> Option<&Floor> {
        self.tower(tower_id)?.floor(floor_id)
    }

    pub fn require_floor(&self, tower_id: &str, floor_id: &str) -> Result<&Floor, InventoryError> {
        let tower = self
            .tower(tower_id)
            .ok_or_else(|| not_found(format!("unknown tower '{}'", tower_id)))?;
        tower.floor(floor_id).ok_or_else(|| {
            not_found(format!(
                "unknown floor '{}' in tower '{}'",
                floor_id, tower_id
            ))
        })
    }

    /// Every unit of the site, in tower, floor and display order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.towers
            .iter()
            .flat_map(|tower| tower.floors.iter())
            .flat_map(|floor| floor.units.iter())
    }

    pub fn unit(&self, unit_id: &str) -> Option<&Unit> {
        self.units().find(|unit| unit.unit_id == unit_id)
    }

    /// Stable content hash, usable as a compare-and-swap token at submission.
    pub fn digest(&self) -> String {
        let canonical = serde_json::to_value(self).unwrap_or(serde_json::Value::Null);
        let mut hasher = Sha256::new();
        hasher.update(canonical.to_string().as_bytes());
        let digest = hasher.finalize();
        let hex = format!("{:x}", digest);
        format!("snap:{}", &hex[..24])
    }
}
