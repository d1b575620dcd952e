use brewforge_core::{
    bitterness::solve_bitterness,
    color::solve_color,
    gravity::solve_gravity,
    volume::post_boil_volume_liters,
};
use brewforge_schemas::{
    draft::{FermentableMetadata, FermentableShare},
    equipment::EquipmentParams,
    recipe::{HopAddition, HopUsage, Recipe, Yeast},
};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn params_strategy() -> impl Strategy<Value = EquipmentParams> {
    (15.0..80.0f64, 30.0..90.0f64, 55.0..90.0f64, 3.0..12.0f64).prop_map(
        |(boil_size, boil_time, efficiency, evaporation_rate)| EquipmentParams {
            batch_size: boil_size * 0.85,
            boil_size,
            boil_time,
            efficiency,
            evaporation_rate,
            trub_loss: 1.0,
            deadspace: 2.0,
        },
    )
}

fn bill_strategy() -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
    // (weight, potential, color)
    prop::collection::vec((1.0..20.0f64, 1.025..1.046f64, 1.0..300.0f64), 1..5)
}

fn recipe(target_og: f64, bill: &[(f64, f64, f64)], hops: Vec<HopAddition>) -> Recipe {
    let total_weight: f64 = bill.iter().map(|(w, _, _)| w).sum();
    let mut fermentables = BTreeMap::new();
    let mut metadata = BTreeMap::new();
    for (i, (weight, potential, color)) in bill.iter().enumerate() {
        let name = format!("Malt {i}");
        fermentables.insert(
            name.clone(),
            FermentableShare { percentage: weight / total_weight * 100.0, potential: *potential },
        );
        metadata.insert(name, FermentableMetadata { color: Some(*color), ..Default::default() });
    }
    Recipe {
        name: "Generated".to_string(),
        target_og,
        fermentables,
        fermentables_metadata: metadata,
        hops,
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

fn hop_strategy() -> impl Strategy<Value = HopAddition> {
    (-5.0..40.0f64, 0.0..120.0f64, -50.0..200.0f64, prop::bool::ANY).prop_map(
        |(alpha, time, amount, dry)| HopAddition {
            name: "Hop".to_string(),
            alpha,
            time: if dry { 0.0 } else { time.max(1.0) },
            form: "Pellet".to_string(),
            usage: if dry {
                HopUsage::DryHop { rate_g_per_l: amount.abs() / 20.0 }
            } else {
                HopUsage::Boil { ibu_contribution: amount }
            },
        },
    )
}

proptest! {
    #[test]
    fn mass_ratios_follow_percentages(
        params in params_strategy(),
        bill in bill_strategy(),
        target_og in 1.035..1.100f64,
    ) {
        let r = recipe(target_og, &bill, Vec::new());
        let solution = solve_gravity(&r, &params);
        let total: f64 = solution.fermentables.values().sum();
        prop_assert!(total > 0.0);

        // rounding every mass to 10 g can move a ratio slightly past 0.1 on small bills
        let slack = 100.0 * 0.005 * (bill.len() as f64 + 1.0) / total;
        let ratio_sum: f64 = solution.fermentables.values().map(|kg| kg / total * 100.0).sum();
        prop_assert!((ratio_sum - 100.0).abs() <= 0.1);
        for (name, share) in &r.fermentables {
            let ratio = solution.fermentables[name] / total * 100.0;
            prop_assert!(
                (ratio - share.percentage).abs() <= 0.1 + slack,
                "{} {} vs {}",
                name,
                ratio,
                share.percentage
            );
        }
    }

    #[test]
    fn gravity_solve_is_idempotent(
        params in params_strategy(),
        bill in bill_strategy(),
        target_og in 1.035..1.100f64,
    ) {
        let first = solve_gravity(&recipe(target_og, &bill, Vec::new()), &params);
        let total: f64 = first.fermentables.values().sum();

        let mut again = recipe(target_og, &bill, Vec::new());
        for (name, share) in again.fermentables.iter_mut() {
            share.percentage = first.fermentables[name] / total * 100.0;
        }
        let second = solve_gravity(&again, &params);
        prop_assert!((first.og - second.og).abs() <= 0.0015, "{} vs {}", first.og, second.og);
    }

    #[test]
    fn bitterness_and_color_stay_in_bounds(
        params in params_strategy(),
        bill in prop::collection::vec((0.0..20.0f64, 0.5..1.2f64, -100.0..5000.0f64), 1..5),
        hops in prop::collection::vec(hop_strategy(), 0..8),
        post_boil in -10.0..100.0f64,
    ) {
        let r = recipe(1.050, &bill, hops);
        let bitterness = solve_bitterness(&r, &params, post_boil);
        prop_assert!((0.0..=150.0).contains(&bitterness.total));
        for hop in &bitterness.hops {
            prop_assert!(hop.calculated_amount.is_finite());
        }

        let masses: BTreeMap<String, f64> = r
            .fermentables
            .keys()
            .cloned()
            .zip(bill.iter().map(|(w, _, _)| *w))
            .collect();
        let ebc = solve_color(&r, &masses, post_boil);
        prop_assert!((0.0..=80.0).contains(&ebc));
    }

    #[test]
    fn dry_hops_never_add_bitterness(
        params in params_strategy(),
        boil in prop::collection::vec(hop_strategy(), 0..5),
        rates in prop::collection::vec(0.0..20.0f64, 1..5),
    ) {
        let boil: Vec<HopAddition> = boil
            .into_iter()
            .filter(|h| matches!(h.usage, HopUsage::Boil { .. }))
            .collect();
        let post_boil = post_boil_volume_liters(&params);
        let bill = [(1.0, 1.037, 3.0)];
        let base = solve_bitterness(&recipe(1.050, &bill, boil.clone()), &params, post_boil);

        let mut with_dry = boil;
        with_dry.extend(rates.iter().map(|rate| HopAddition {
            name: "Dry".to_string(),
            alpha: 12.0,
            time: 0.0,
            form: "Pellet".to_string(),
            usage: HopUsage::DryHop { rate_g_per_l: *rate },
        }));
        let dry = solve_bitterness(&recipe(1.050, &bill, with_dry), &params, post_boil);
        prop_assert_eq!(base.total, dry.total);
        for hop in dry.hops.iter().filter(|h| h.time == 0.0) {
            prop_assert_eq!(hop.ibu_contribution, 0.0);
        }
    }
}
