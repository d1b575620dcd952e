//! Unit conversions and the epsilon-flooring policy shared by every formula.
//!
//! No stage divides by a raw input. Divisors go through [`floor_positive`]
//! or [`safe_div`] so a misconfigured profile or a degenerate draft yields an
//! extreme but finite number instead of `inf`/`NaN`. Extreme outputs are
//! still suspect; the floors only keep the pipeline total.

/// Smallest value any volume, time or efficiency is allowed to take.
pub const EPSILON: f64 = 0.001;

pub const LITERS_TO_GALLONS: f64 = 0.264172;
pub const KG_TO_LB: f64 = 2.20462;
pub const OZ_TO_G: f64 = 28.3495;

/// Wort shrinks this much between boiling and room temperature.
pub const THERMAL_CONTRACTION: f64 = 0.96;

/// Returns `value` if it is finite and at least `floor`, otherwise `floor`.
pub fn floor_positive(value: f64, floor: f64) -> f64 {
    if value.is_finite() && value >= floor {
        value
    } else {
        floor
    }
}

/// Divides by `denominator` floored at `floor`.
pub fn safe_div(numerator: f64, denominator: f64, floor: f64) -> f64 {
    numerator / floor_positive(denominator, floor)
}

pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

pub fn liters_to_gallons(liters: f64) -> f64 {
    liters * LITERS_TO_GALLONS
}

pub fn kg_to_lb(kg: f64) -> f64 {
    kg * KG_TO_LB
}

pub fn lb_to_kg(lb: f64) -> f64 {
    lb / KG_TO_LB
}

pub fn oz_to_g(oz: f64) -> f64 {
    oz * OZ_TO_G
}
