use crate::{
    allocation::{
        context::LeaseContext,
        types::{
            AllocationMode, LeaseEnvelope, LeaseItem, LeaseTerms, RateDefaults, RateType, Segment,
            SegmentPayload, SelectionMap, SubmissionPayload, UiSelection, UnitSelection,
        },
    },
    inventory::{snapshot::AvailabilitySnapshot, types::Unit},
};

const RESERVED_LEASE_KEYS: [&str; 4] = ["lease_id", "tenant", "site_id", "terms"];
const RESERVED_TERMS_KEYS: [&str; 1] = ["ui_selection"];

pub struct PayloadBuilder;

impl PayloadBuilder {
    /// Lease items for every selected unit that still has availability, in
    /// snapshot display order.
    pub fn build_items(
        snapshot: &AvailabilitySnapshot,
        selections: &SelectionMap,
        rates: &RateDefaults,
    ) -> Vec<LeaseItem> {
        for unit_id in selections.keys() {
            if snapshot.unit(unit_id).is_none() {
                tracing::warn!(
                    target: "allocation",
                    unit_id = %unit_id,
                    "selected_unit_missing_from_snapshot"
                );
            }
        }

        snapshot
            .units()
            .filter(|unit| unit.has_availability())
            .filter_map(|unit| {
                let selection = selections.get(&unit.unit_id)?;
                Self::build_item(unit, selection, rates)
            })
            .collect()
    }

    pub fn build_item(
        unit: &Unit,
        selection: &UnitSelection,
        rates: &RateDefaults,
    ) -> Option<LeaseItem> {
        let rate_type = if unit.is_residential() {
            RateType::Fixed
        } else {
            RateType::PerSqft
        };
        let mut item = LeaseItem {
            unit_id: unit.unit_id.clone(),
            allocation_mode: AllocationMode::Full,
            segments: None,
            allocated_area_sqft: None,
            base_rent_rate: unit.default_base_rent.unwrap_or(rates.base_rent_rate),
            base_rent_rate_type: rate_type,
            cam_rate: unit.default_cam_rate.unwrap_or(rates.cam_rate),
            cam_rate_type: rate_type,
        };

        if !unit.divisible() || selection.allocation_mode == AllocationMode::Full {
            return Some(item);
        }

        let segments: Vec<SegmentPayload> = selection
            .segments
            .iter()
            .map(Segment::submitted_area)
            .filter(|area| *area > 0.0)
            .map(|allocated_area| SegmentPayload { allocated_area })
            .collect();

        item.allocation_mode = AllocationMode::Partial;
        match segments.as_slice() {
            [] => {
                tracing::warn!(
                    target: "allocation",
                    unit_id = %unit.unit_id,
                    "partial_selection_without_area_skipped"
                );
                return None;
            }
            [single] => item.allocated_area_sqft = Some(single.allocated_area),
            _ => item.segments = Some(segments),
        }

        Some(item)
    }

    pub fn build_submission(
        context: &LeaseContext,
        snapshot: &AvailabilitySnapshot,
        ui_selection: UiSelection,
        items: Vec<LeaseItem>,
    ) -> SubmissionPayload {
        let mut extra = context.lease_fields.clone();
        for key in RESERVED_LEASE_KEYS {
            extra.remove(key);
        }
        if let Some(organization_id) = &context.organization_id {
            extra.insert(
                "organization_id".to_string(),
                serde_json::Value::String(organization_id.clone()),
            );
        }

        let mut terms_extra = context.terms.clone();
        for key in RESERVED_TERMS_KEYS {
            terms_extra.remove(key);
        }

        SubmissionPayload {
            lease: LeaseEnvelope {
                lease_id: context.lease_id.clone(),
                tenant: context.tenant.clone(),
                site_id: context.site_id.clone().or_else(|| snapshot.site_id.clone()),
                extra,
                terms: LeaseTerms {
                    extra: terms_extra,
                    ui_selection,
                },
            },
            items,
        }
    }
}
