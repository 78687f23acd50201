use serde::{Deserialize, Serialize};

use crate::allocation::types::RateDefaults;

/// Caller-supplied scope for one lease draft: organization, lease identity and
/// lease-level rate defaults. Passed in explicitly, never read from ambient state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LeaseContext {
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub lease_id: Option<String>,
    #[serde(default)]
    pub tenant: Option<String>,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub default_base_rent_rate: Option<f64>,
    #[serde(default)]
    pub default_cam_rate: Option<f64>,
    /// Additional lease fields forwarded verbatim.
    #[serde(default)]
    pub lease_fields: serde_json::Map<String, serde_json::Value>,
    /// Additional lease terms forwarded verbatim next to `ui_selection`.
    #[serde(default)]
    pub terms: serde_json::Map<String, serde_json::Value>,
}

impl LeaseContext {
    /// Lease-level rates, falling back to the configured defaults.
    pub fn rate_defaults(&self, fallback: &RateDefaults) -> RateDefaults {
        RateDefaults {
            base_rent_rate: self.default_base_rent_rate.unwrap_or(fallback.base_rent_rate),
            cam_rate: self.default_cam_rate.unwrap_or(fallback.cam_rate),
        }
    }
}
