//! Malt bill solver: percentages and a target gravity in, kilograms out.
//!
//! Converting each percentage to a weight directly does not reproduce the
//! requested percentages once the malts' potentials differ, so the solve runs
//! in two passes: preliminary pounds per malt, then the summed weight is split
//! back out by percentage. The reported OG is recomputed from the rounded
//! masses and is what every later stage sees.

use crate::numeric::{
    floor_positive, kg_to_lb, lb_to_kg, liters_to_gallons, round_to, safe_div, EPSILON,
};
use crate::volume::post_boil_volume_liters;
use brewforge_schemas::{equipment::EquipmentParams, recipe::Recipe};
use std::collections::BTreeMap;
use tracing::debug;

pub const MIN_POTENTIAL: f64 = 1.001;
pub const MIN_PPG: f64 = 0.1;
pub const MIN_TOTAL_LB: f64 = 0.001;

#[derive(Debug, Clone, PartialEq)]
pub struct GravitySolution {
    /// Original gravity reached by the rounded masses, three decimals.
    pub og: f64,
    /// Malt name to kilograms, two decimals.
    pub fermentables: BTreeMap<String, f64>,
}

/// Points per pound per gallon for a potential specific gravity.
pub fn ppg(potential: f64) -> f64 {
    let potential = floor_positive(potential, MIN_POTENTIAL);
    floor_positive((potential - 1.0) * 1000.0, MIN_PPG)
}

fn efficiency_fraction(params: &EquipmentParams) -> f64 {
    floor_positive(params.efficiency / 100.0, EPSILON)
}

pub fn solve_gravity(recipe: &Recipe, params: &EquipmentParams) -> GravitySolution {
    let gallons = liters_to_gallons(post_boil_volume_liters(params));
    let efficiency = efficiency_fraction(params);
    let required_points = (recipe.target_og - 1.0) * gallons * 1000.0;

    let preliminary_total: f64 = recipe
        .fermentables
        .values()
        .map(|share| {
            share.percentage / 100.0 * required_points / (ppg(share.potential) * efficiency)
        })
        .sum();
    let preliminary_total = floor_positive(preliminary_total, MIN_TOTAL_LB);
    debug!(required_points, preliminary_total, "gravity preliminary pass");

    let fermentables: BTreeMap<String, f64> = recipe
        .fermentables
        .iter()
        .map(|(name, share)| {
            let pounds = share.percentage / 100.0 * preliminary_total;
            (name.clone(), round_to(lb_to_kg(pounds), 2))
        })
        .collect();

    let og = gravity_from_masses(recipe, &fermentables, params);
    debug!(og, target = recipe.target_og, "gravity solved");

    GravitySolution { og, fermentables }
}

/// Original gravity produced by the given malt masses (kg) on this equipment.
pub fn gravity_from_masses(
    recipe: &Recipe,
    masses: &BTreeMap<String, f64>,
    params: &EquipmentParams,
) -> f64 {
    let gallons = liters_to_gallons(post_boil_volume_liters(params));
    let efficiency = efficiency_fraction(params);

    let points: f64 = masses
        .iter()
        .map(|(name, kg)| {
            let potential = recipe
                .fermentables
                .get(name)
                .map_or(MIN_POTENTIAL, |share| share.potential);
            kg_to_lb(*kg) * ppg(potential) * efficiency
        })
        .sum();

    round_to(1.0 + safe_div(points, gallons * 1000.0, EPSILON), 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewforge_schemas::{draft::FermentableShare, recipe::Yeast};

    fn equipment() -> EquipmentParams {
        EquipmentParams {
            batch_size: 23.0,
            boil_size: 27.0,
            boil_time: 60.0,
            efficiency: 75.0,
            evaporation_rate: 7.41,
            trub_loss: 1.0,
            deadspace: 3.5,
        }
    }

    fn recipe(target_og: f64, malts: &[(&str, f64, f64)]) -> Recipe {
        Recipe {
            name: "Test".to_string(),
            target_og,
            fermentables: malts
                .iter()
                .map(|(name, percentage, potential)| {
                    let share = FermentableShare { percentage: *percentage, potential: *potential };
                    (name.to_string(), share)
                })
                .collect(),
            fermentables_metadata: BTreeMap::new(),
            hops: Vec::new(),
            yeast: Yeast {
                yeast_type: "US-05".to_string(),
                amount: 1.0,
                form: "Dry".to_string(),
                laboratory: "Fermentis".to_string(),
            },
            mash: None,
            style: None,
        }
    }

    #[test]
    fn single_pilsner_hits_target() {
        let solution = solve_gravity(&recipe(1.046, &[("Pilsner", 100.0, 1.039)]), &equipment());
        assert_eq!(solution.og, 1.046);
        let kg = solution.fermentables["Pilsner"];
        assert!((kg - 4.52).abs() < 0.02, "got {kg}");
    }

    #[test]
    fn masses_follow_percentages_despite_different_potentials() {
        let r = recipe(
            1.060,
            &[
                ("Maris Otter", 80.0, 1.038),
                ("Crystal 60", 15.0, 1.034),
                ("Table Sugar", 5.0, 1.046),
            ],
        );
        let solution = solve_gravity(&r, &equipment());
        let total: f64 = solution.fermentables.values().sum();
        for (name, share) in &r.fermentables {
            let pct = solution.fermentables[name] / total * 100.0;
            assert!((pct - share.percentage).abs() < 0.1, "{name}: {pct}");
        }
        assert!((solution.og - 1.060).abs() <= 0.002, "og {}", solution.og);
    }

    #[test]
    fn degenerate_potential_does_not_blow_up() {
        let solution = solve_gravity(&recipe(1.050, &[("Water", 100.0, 0.9)]), &equipment());
        assert!(solution.og.is_finite());
        assert!(solution.fermentables["Water"].is_finite());
    }

    #[test]
    fn zero_efficiency_profile_stays_finite() {
        let mut params = equipment();
        params.efficiency = 0.0;
        let solution = solve_gravity(&recipe(1.050, &[("Pilsner", 100.0, 1.037)]), &params);
        assert!(solution.fermentables["Pilsner"].is_finite());
        assert!(solution.og.is_finite());
    }
}
