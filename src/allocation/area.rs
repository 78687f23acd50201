use std::sync::OnceLock;

use regex::Regex;

/// Tolerance for every area comparison, matching two-decimal rounding.
pub const AREA_EPSILON: f64 = 0.01;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn approx_zero(value: f64) -> bool {
    value.abs() <= AREA_EPSILON
}

/// Coerces free-text area input to a number: strips everything but digits and
/// the decimal point, reads the leading numeric prefix, and falls back to 0.
pub fn parse_area_input(raw: &str) -> f64 {
    static NON_NUMERIC: OnceLock<Regex> = OnceLock::new();
    let pattern =
        NON_NUMERIC.get_or_init(|| Regex::new(r"[^0-9.]").expect("area input pattern is valid"));
    let stripped = pattern.replace_all(raw, "");

    let numeric_prefix = match stripped.match_indices('.').nth(1) {
        Some((second_dot, _)) => &stripped[..second_dot],
        None => &stripped[..],
    };

    numeric_prefix
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Renders an engine-computed area the way a user would type it.
pub fn format_area(value: f64) -> String {
    format!("{}", round2(value))
}
