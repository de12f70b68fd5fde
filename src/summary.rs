// src/summary.rs

use crate::requests::RouteResponse;
use std::fmt;

/// Distance and skating time of a calculated route, formatted for display.
///
/// Values are shown as received; negative or non-finite numbers are not validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub skate_time_min: f64,
}

impl RouteSummary {
    pub fn new(distance_km: f64, skate_time_min: f64) -> Self {
        RouteSummary {
            distance_km,
            skate_time_min,
        }
    }

    /// Distance with two decimals, e.g. `"5.68 km"`.
    pub fn distance_text(&self) -> String {
        format!("{} km", fixed_two(&self.distance_km))
    }

    /// Skating time in whole minutes, e.g. `"13 min"`. Halves round up.
    pub fn time_text(&self) -> String {
        format!("{} min", round_half_up(self.skate_time_min))
    }
}

impl From<&RouteResponse> for RouteSummary {
    fn from(response: &RouteResponse) -> Self {
        RouteSummary::new(response.distance_km, response.skate_time_min)
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Distance: {}", self.distance_text())?;
        write!(f, "Skating Time: {}", self.time_text())
    }
}

/// Formats a number with two decimals, taking the larger candidate when the value sits
/// exactly halfway between two hundredths (`1.125` gives `"1.13"`).
///
/// `{:.2}` alone rounds such ties to even.
pub(crate) fn fixed_two(value: &f64) -> String {
    let value = *value;
    // Exact hundredth ties are odd multiples of 1/8; scaling by 8 is exact.
    let eighths = value * 8.0;
    if value.is_finite() && eighths.fract() == 0.0 && eighths.rem_euclid(2.0) == 1.0 {
        return format!("{:.2}", value + 0.001_f64.copysign(value));
    }
    format!("{:.2}", value)
}

// Ties go toward positive infinity, so -2.5 becomes -2.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    // Avoid printing "-0".
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
