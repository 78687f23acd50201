use serde::{Deserialize, Serialize};

use crate::{
    allocation::{
        aggregate::{remaining_area, selected_area_total},
        area::{AREA_EPSILON, approx_zero},
        resolver::TargetResolver,
        types::{AllocationMode, Segment, SelectionMap, SelectionMode, TargetParams},
    },
    inventory::types::{Unit, UnitId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Blocking,
    Advisory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationIssue {
    CustomAreaNonPositive {
        custom_area_sqft: f64,
    },
    CustomAreaExceedsFloor {
        custom_area_sqft: f64,
        floor_available_area_sqft: f64,
    },
    OverAllocated {
        target_area_sqft: f64,
        selected_area_sqft: f64,
    },
    InexactFill {
        remaining_area_sqft: f64,
    },
    EmptyPartialSelection {
        unit_id: UnitId,
    },
    SegmentsExceedAvailability {
        unit_id: UnitId,
        segment_area_sqft: f64,
        available_area_sqft: f64,
    },
    SegmentBelowMinimum {
        unit_id: UnitId,
        index: usize,
        segment_area_sqft: f64,
        min_divisible_area_sqft: f64,
    },
}

impl ValidationIssue {
    pub fn code(&self) -> &'static str {
        match self {
            Self::CustomAreaNonPositive { .. } => "custom_area_non_positive",
            Self::CustomAreaExceedsFloor { .. } => "custom_area_exceeds_floor",
            Self::OverAllocated { .. } => "over_allocated",
            Self::InexactFill { .. } => "inexact_fill",
            Self::EmptyPartialSelection { .. } => "empty_partial_selection",
            Self::SegmentsExceedAvailability { .. } => "segments_exceed_availability",
            Self::SegmentBelowMinimum { .. } => "segment_below_minimum",
        }
    }

    pub fn severity(&self) -> IssueSeverity {
        match self {
            Self::SegmentBelowMinimum { .. } => IssueSeverity::Advisory,
            _ => IssueSeverity::Blocking,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn selection_invalid(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.severity() == IssueSeverity::Blocking)
    }

    pub fn blocking(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == IssueSeverity::Blocking)
    }
}

pub struct ValidationInput<'a> {
    pub mode: SelectionMode,
    pub target_area_sqft: Option<f64>,
    pub floor_available_area_sqft: f64,
    pub params: &'a TargetParams,
    pub selections: &'a SelectionMap,
    pub units: &'a [Unit],
}

pub struct ValidationEngine;

impl ValidationEngine {
    pub fn evaluate(input: &ValidationInput<'_>) -> ValidationReport {
        let mut issues = Vec::new();

        if input.mode == SelectionMode::CustomArea {
            let custom_area_sqft = input.params.custom_area_sqft();
            if custom_area_sqft <= 0.0 {
                issues.push(ValidationIssue::CustomAreaNonPositive { custom_area_sqft });
            } else if !TargetResolver::custom_area_in_bounds(
                custom_area_sqft,
                input.floor_available_area_sqft,
            ) {
                issues.push(ValidationIssue::CustomAreaExceedsFloor {
                    custom_area_sqft,
                    floor_available_area_sqft: input.floor_available_area_sqft,
                });
            }
        }

        let selected_area_sqft = selected_area_total(input.selections, input.units);
        if let Some(target_area_sqft) = input.target_area_sqft
            && selected_area_sqft - target_area_sqft > AREA_EPSILON
        {
            issues.push(ValidationIssue::OverAllocated {
                target_area_sqft,
                selected_area_sqft,
            });
        }

        if input.mode.requires_exact_fill()
            && let Some(remaining_area_sqft) =
                remaining_area(input.target_area_sqft, selected_area_sqft)
            && !approx_zero(remaining_area_sqft)
        {
            issues.push(ValidationIssue::InexactFill {
                remaining_area_sqft,
            });
        }

        for unit in input.units {
            let Some(selection) = input.selections.get(&unit.unit_id) else {
                continue;
            };
            if selection.allocation_mode != AllocationMode::Partial {
                continue;
            }

            if selection
                .segments
                .iter()
                .all(|segment| segment.submitted_area() <= 0.0)
            {
                issues.push(ValidationIssue::EmptyPartialSelection {
                    unit_id: unit.unit_id.clone(),
                });
                continue;
            }

            // Same figure the submission claims for this unit.
            let segment_area_sqft: f64 = selection
                .segments
                .iter()
                .map(Segment::submitted_area)
                .filter(|area| *area > 0.0)
                .sum();
            if segment_area_sqft - unit.available_area_sqft > AREA_EPSILON {
                issues.push(ValidationIssue::SegmentsExceedAvailability {
                    unit_id: unit.unit_id.clone(),
                    segment_area_sqft,
                    available_area_sqft: unit.available_area_sqft,
                });
            }

            for (index, segment) in selection.segments.iter().enumerate() {
                let area = segment.submitted_area();
                if area > 0.0 && area < unit.min_divisible_area_sqft - AREA_EPSILON {
                    issues.push(ValidationIssue::SegmentBelowMinimum {
                        unit_id: unit.unit_id.clone(),
                        index,
                        segment_area_sqft: area,
                        min_divisible_area_sqft: unit.min_divisible_area_sqft,
                    });
                }
            }
        }

        ValidationReport { issues }
    }

    pub fn selection_invalid(input: &ValidationInput<'_>) -> bool {
        Self::evaluate(input).selection_invalid()
    }
}
