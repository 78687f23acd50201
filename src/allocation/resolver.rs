use crate::allocation::{
    area::round2,
    types::{SelectionMode, TargetParams},
};

pub struct TargetResolver;

impl TargetResolver {
    /// Target area for the selected floor, `None` when the mode carries no
    /// target. Custom areas are returned unclamped; validation flags them.
    pub fn resolve(
        mode: SelectionMode,
        floor_available_area_sqft: f64,
        params: &TargetParams,
    ) -> Option<f64> {
        match mode {
            SelectionMode::Manual => None,
            SelectionMode::FullFloor => Some(floor_available_area_sqft),
            SelectionMode::Percent => {
                let percent = if params.percent.is_finite() {
                    params.percent.clamp(0.0, 100.0)
                } else {
                    0.0
                };
                Some(round2(floor_available_area_sqft * percent / 100.0))
            }
            SelectionMode::CustomArea => Some(params.custom_area_sqft()),
        }
    }

    /// Whether a custom area can be allocated at all on this floor.
    pub fn custom_area_in_bounds(custom_area_sqft: f64, floor_available_area_sqft: f64) -> bool {
        custom_area_sqft > 0.0 && custom_area_sqft <= floor_available_area_sqft
    }
}
