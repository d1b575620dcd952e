use crate::numeric::{
    finite_or_zero, floor_positive, kg_to_lb, liters_to_gallons, round_to, EPSILON,
};
use brewforge_schemas::recipe::Recipe;
use std::collections::BTreeMap;
use tracing::debug;

pub const MAX_EBC: f64 = 80.0;
pub const SRM_TO_EBC: f64 = 1.97;

/// Malt color units contributed by every malt, summed.
pub fn total_mcu(recipe: &Recipe, masses_kg: &BTreeMap<String, f64>, post_boil_liters: f64) -> f64 {
    let gallons = liters_to_gallons(floor_positive(post_boil_liters, EPSILON));
    let mcu: f64 = masses_kg
        .iter()
        .map(|(name, kg)| {
            let color = recipe.metadata(name).and_then(|m| m.color).unwrap_or(0.0);
            finite_or_zero(color * kg_to_lb(*kg) / gallons)
        })
        .sum();
    mcu.max(0.0)
}

/// Morey: SRM from total MCU.
pub fn srm_from_mcu(mcu: f64) -> f64 {
    1.49 * mcu.max(0.0).powf(0.69)
}

/// Beer color in EBC, clamped to `[0, 80]`.
pub fn solve_color(
    recipe: &Recipe,
    masses_kg: &BTreeMap<String, f64>,
    post_boil_liters: f64,
) -> f64 {
    let mcu = total_mcu(recipe, masses_kg, post_boil_liters);
    let srm = srm_from_mcu(mcu);
    let ebc = finite_or_zero(srm * SRM_TO_EBC).clamp(0.0, MAX_EBC);
    debug!(mcu, srm, ebc, "color solved");
    round_to(ebc, 1)
}
