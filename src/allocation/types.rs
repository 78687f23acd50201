use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    allocation::area::{format_area, parse_area_input, round2},
    inventory::{
        snapshot::AvailabilitySnapshot,
        types::{FloorId, TowerId, UnitId},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationMode {
    Full,
    Partial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionMode {
    #[default]
    Manual,
    FullFloor,
    Percent,
    CustomArea,
}

impl SelectionMode {
    /// Modes whose target must be met exactly before submission.
    pub fn requires_exact_fill(self) -> bool {
        matches!(self, Self::Percent | Self::CustomArea)
    }
}

/// One carve-out inside a partial unit selection. The area keeps the text the
/// user typed and is parsed whenever it is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Segment {
    #[serde(default)]
    pub allocated_area: String,
}

impl Segment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_area(area_sqft: f64) -> Self {
        Self {
            allocated_area: format_area(area_sqft),
        }
    }

    pub fn area(&self) -> f64 {
        parse_area_input(&self.allocated_area)
    }

    /// Area as submitted; a segment that rounds to zero carries no area.
    pub fn submitted_area(&self) -> f64 {
        round2(self.area())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSelection {
    pub allocation_mode: AllocationMode,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl UnitSelection {
    pub fn full() -> Self {
        Self {
            allocation_mode: AllocationMode::Full,
            segments: Vec::new(),
        }
    }

    pub fn partial(segments: Vec<Segment>) -> Self {
        Self {
            allocation_mode: AllocationMode::Partial,
            segments,
        }
    }

    pub fn segment_area_sum(&self) -> f64 {
        self.segments.iter().map(Segment::area).sum()
    }
}

/// Unit id to selection. A missing key means the unit is not selected.
pub type SelectionMap = BTreeMap<UnitId, UnitSelection>;

/// Mode-specific inputs for the target resolver. Switching modes resets the
/// parameters the new mode does not use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TargetParams {
    #[serde(default)]
    pub percent: f64,
    #[serde(default)]
    pub custom_area: String,
}

impl TargetParams {
    pub fn for_percent(percent: f64) -> Self {
        Self {
            percent,
            custom_area: String::new(),
        }
    }

    pub fn for_custom_area(custom_area: impl Into<String>) -> Self {
        Self {
            percent: 0.0,
            custom_area: custom_area.into(),
        }
    }

    pub fn custom_area_sqft(&self) -> f64 {
        parse_area_input(&self.custom_area)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub selections: SelectionMap,
    pub remaining_area_sqft: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSummary {
    pub selection_mode: SelectionMode,
    #[serde(default)]
    pub target_area_sqft: Option<f64>,
    pub selected_area_sqft: f64,
    #[serde(default)]
    pub remaining_area_sqft: Option<f64>,
    pub selected_unit_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateType {
    Fixed,
    PerSqft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPayload {
    pub allocated_area: f64,
}

/// One line of the lease submission. Exactly one of `segments` and
/// `allocated_area_sqft` is present for partial items, neither for full ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseItem {
    pub unit_id: UnitId,
    pub allocation_mode: AllocationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<SegmentPayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocated_area_sqft: Option<f64>,
    pub base_rent_rate: f64,
    pub base_rent_rate_type: RateType,
    pub cam_rate: f64,
    pub cam_rate_type: RateType,
}

impl LeaseItem {
    /// Area the item claims, or `None` for a full-unit item.
    pub fn claimed_area_sqft(&self) -> Option<f64> {
        match (&self.segments, self.allocated_area_sqft) {
            (Some(segments), _) => Some(segments.iter().map(|s| s.allocated_area).sum()),
            (None, Some(area)) => Some(area),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSelection {
    #[serde(default)]
    pub tower_id: Option<TowerId>,
    #[serde(default)]
    pub floor_id: Option<FloorId>,
    #[serde(default)]
    pub target_floor_area_sqft: Option<f64>,
    pub selection_mode: SelectionMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_digest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseTerms {
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
    pub ui_selection: UiSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseEnvelope {
    pub lease_id: Option<String>,
    pub tenant: Option<String>,
    pub site_id: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
    pub terms: LeaseTerms,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub lease: LeaseEnvelope,
    pub items: Vec<LeaseItem>,
}

fn default_segment_chunk_sqft() -> f64 {
    100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSettings {
    /// Upper bound for the first segment seeded into a new partial selection.
    #[serde(default = "default_segment_chunk_sqft")]
    pub default_segment_chunk_sqft: f64,
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self {
            default_segment_chunk_sqft: default_segment_chunk_sqft(),
        }
    }
}

/// Lease-level rate fallbacks for units without their own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RateDefaults {
    #[serde(default)]
    pub base_rent_rate: f64,
    #[serde(default)]
    pub cam_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionAction {
    ToggleUnit {
        unit_id: UnitId,
    },
    SetUnitMode {
        unit_id: UnitId,
        allocation_mode: AllocationMode,
    },
    AddSegment {
        unit_id: UnitId,
    },
    UpdateSegment {
        unit_id: UnitId,
        index: usize,
        value: String,
    },
    RemoveSegment {
        unit_id: UnitId,
        index: usize,
    },
}

impl SelectionAction {
    pub fn unit_id(&self) -> &UnitId {
        match self {
            Self::ToggleUnit { unit_id }
            | Self::SetUnitMode { unit_id, .. }
            | Self::AddSegment { unit_id }
            | Self::UpdateSegment { unit_id, .. }
            | Self::RemoveSegment { unit_id, .. } => unit_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionCommand {
    ReplaceSnapshot { snapshot: AvailabilitySnapshot },
    SelectTower { tower_id: TowerId },
    SelectFloor { floor_id: FloorId },
    SelectManual,
    SelectFullFloor,
    SelectPercentFloor { percent: f64 },
    SelectCustomArea { custom_area: String },
    Edit { action: SelectionAction },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SnapshotReplaced {
        snapshot_digest: String,
    },
    TowerSelected {
        tower_id: TowerId,
    },
    FloorSelected {
        floor_id: FloorId,
    },
    ModeChanged {
        selection_mode: SelectionMode,
    },
    SelectionCleared,
    AllocationApplied {
        target_area_sqft: f64,
        remaining_area_sqft: f64,
        selected_units: usize,
    },
    AllocationSkipped {
        target_area_sqft: f64,
        floor_available_area_sqft: f64,
    },
    SelectionEdited {
        unit_id: UnitId,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionOutput {
    pub events: Vec<SessionEvent>,
}
