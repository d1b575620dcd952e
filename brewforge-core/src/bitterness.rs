//! Hop masses from bitterness targets (Tinseth), and dry-hop dosing.
//!
//! Boil additions carry a target IBU and the mass is the free variable, so
//! the Tinseth formula is inverted. Utilization is always evaluated against
//! [`REFERENCE_GRAVITY`], not the recipe's solved OG.

use crate::numeric::{
    finite_or_zero, floor_positive, liters_to_gallons, oz_to_g, round_to, safe_div, EPSILON,
};
use brewforge_schemas::{
    calculated::{BitternessResult, HopResult},
    equipment::EquipmentParams,
    recipe::{HopAddition, HopUsage, Recipe},
};
use tracing::debug;

pub const REFERENCE_GRAVITY: f64 = 1.050;
pub const MAX_TOTAL_IBU: f64 = 150.0;

/// mg/L of alpha acid per oz/gal, as used by the Tinseth formula.
const ALPHA_CONVERSION: f64 = 7489.2;
const MIN_ALPHA_FRACTION: f64 = 0.001;
const MIN_UTILIZATION: f64 = 0.0001;

/// Tinseth utilization (0-1) for a boil of `minutes` at the reference gravity.
pub fn tinseth_utilization(minutes: f64) -> f64 {
    let bigness = 1.65 * 0.000125_f64.powf(REFERENCE_GRAVITY - 1.0);
    let boil_time = (1.0 - (-0.04 * minutes).exp()) / 4.15;
    finite_or_zero(bigness * boil_time)
}

pub fn solve_bitterness(
    recipe: &Recipe,
    params: &EquipmentParams,
    post_boil_liters: f64,
) -> BitternessResult {
    let gallons = liters_to_gallons(floor_positive(post_boil_liters, EPSILON));
    let batch_liters = floor_positive(params.batch_size, EPSILON);

    let hops: Vec<HopResult> = recipe
        .hops
        .iter()
        .map(|hop| solve_hop(hop, gallons, batch_liters))
        .collect();

    // Dry hops report 0, so summing every row counts boil targets only.
    let declared: f64 = hops.iter().map(|hop| hop.ibu_contribution).sum();
    let total = round_to(declared.clamp(0.0, MAX_TOTAL_IBU), 1);
    debug!(total, additions = hops.len(), "bitterness solved");

    BitternessResult { total, hops }
}

fn solve_hop(hop: &HopAddition, gallons: f64, batch_liters: f64) -> HopResult {
    let (ibu_contribution, grams, utilization) = match hop.usage {
        HopUsage::Boil { ibu_contribution } => {
            let target = finite_or_zero(ibu_contribution).max(0.0);
            let utilization = floor_positive(tinseth_utilization(hop.time), MIN_UTILIZATION);
            let alpha = floor_positive(hop.alpha / 100.0, MIN_ALPHA_FRACTION);
            let ounces =
                safe_div(target * gallons, alpha * ALPHA_CONVERSION * utilization, EPSILON);
            (target, oz_to_g(ounces), utilization * 100.0)
        }
        HopUsage::DryHop { rate_g_per_l } => {
            let rate = finite_or_zero(rate_g_per_l).max(0.0);
            (0.0, batch_liters * rate, 0.0)
        }
    };

    HopResult {
        name: hop.name.clone(),
        alpha: hop.alpha,
        time: hop.time,
        usage: hop.usage.kind(),
        ibu_contribution,
        calculated_amount: round_to(grams, 1),
        utilization: round_to(utilization, 2),
    }
}
