//! Structural checks on a recipe draft.
//!
//! Missing sections reject the draft. Gaps inside hop and yeast entries are
//! filled with the defaults below and reported as warnings. The caller's draft
//! is never touched: a valid draft comes back as a fresh [`Recipe`].

use brewforge_schemas::{
    draft::{DraftHop, DraftYeast, RecipeDraft},
    recipe::{HopAddition, HopUsage, Recipe, Yeast},
};
use crate::error::BrewforgeError;
use tracing::warn;

pub const PERCENTAGE_TOLERANCE: f64 = 0.1;

pub const DEFAULT_ALPHA: f64 = 10.0;
pub const DEFAULT_BOIL_TIME: f64 = 15.0;
pub const DEFAULT_BOIL_IBU: f64 = 10.0;
pub const DEFAULT_DRY_HOP_RATE: f64 = 2.0;
pub const DEFAULT_HOP_FORM: &str = "Pellet";
pub const DEFAULT_YEAST: &str = "Generic Ale Yeast";
pub const DEFAULT_YEAST_AMOUNT: f64 = 1.0;
pub const DEFAULT_YEAST_FORM: &str = "Dry";
pub const DEFAULT_LABORATORY: &str = "Unknown";
pub const DEFAULT_RECIPE_NAME: &str = "Untitled Recipe";
pub const DEFAULT_TARGET_OG: f64 = 1.050;

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub valid: bool,
    pub message: String,
    pub warnings: Vec<String>,
    /// The normalized recipe; `None` when `valid` is false.
    pub recipe: Option<Recipe>,
}

impl Validation {
    fn rejected(message: impl Into<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
            warnings,
            recipe: None,
        }
    }

    /// Turns a rejection into [`BrewforgeError::InvalidDraft`].
    pub fn into_recipe(self) -> Result<Recipe, BrewforgeError> {
        match self.recipe {
            Some(recipe) if self.valid => Ok(recipe),
            _ => Err(BrewforgeError::InvalidDraft(self.message)),
        }
    }
}

pub fn validate(draft: &RecipeDraft) -> Validation {
    let mut warnings = Vec::new();

    let fermentables = match &draft.fermentables {
        Some(malts) if !malts.is_empty() => malts,
        _ => return Validation::rejected("Missing fermentables section", warnings),
    };

    for (malt, share) in fermentables {
        if !(0.0..=100.0).contains(&share.percentage) {
            return Validation::rejected(
                format!(
                    "Fermentable '{}' has percentage {}, expected 0 to 100",
                    malt, share.percentage
                ),
                warnings,
            );
        }
    }

    let total: f64 = fermentables.values().map(|share| share.percentage).sum();
    if !total.is_finite() || (total - 100.0).abs() > PERCENTAGE_TOLERANCE {
        return Validation::rejected(
            format!("Fermentable percentages sum to {:.2}, expected 100", total),
            warnings,
        );
    }

    let Some(draft_hops) = &draft.hops else {
        return Validation::rejected("Missing hops section", warnings);
    };

    let Some(draft_yeast) = &draft.yeast else {
        return Validation::rejected("Missing yeast section", warnings);
    };

    for malt in fermentables.keys() {
        if !draft.fermentables_metadata.contains_key(malt) {
            note(
                &mut warnings,
                format!("Fermentable '{}' has no metadata; color counts as 0", malt),
            );
        }
    }

    let name = match draft.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            note(&mut warnings, format!("Recipe name missing, using '{}'", DEFAULT_RECIPE_NAME));
            DEFAULT_RECIPE_NAME.to_string()
        }
    };

    let target_og = match draft.target_og {
        Some(og) if og > 1.0 => og,
        _ => {
            note(
                &mut warnings,
                format!("Target OG missing or not above 1.000, using {:.3}", DEFAULT_TARGET_OG),
            );
            DEFAULT_TARGET_OG
        }
    };

    let hops = draft_hops
        .iter()
        .enumerate()
        .map(|(index, hop)| normalize_hop(index, hop, &mut warnings))
        .collect();

    let yeast = normalize_yeast(draft_yeast, &mut warnings);

    let recipe = Recipe {
        name,
        target_og,
        fermentables: fermentables.clone(),
        fermentables_metadata: draft.fermentables_metadata.clone(),
        hops,
        yeast,
        mash: draft.mash.clone(),
        style: draft.style.clone(),
    };

    let message = if warnings.is_empty() {
        "Draft is valid".to_string()
    } else {
        format!("Draft is valid with {} warning(s)", warnings.len())
    };

    Validation {
        valid: true,
        message,
        warnings,
        recipe: Some(recipe),
    }
}

fn note(warnings: &mut Vec<String>, message: String) {
    warn!("{}", message);
    warnings.push(message);
}

fn normalize_hop(index: usize, hop: &DraftHop, warnings: &mut Vec<String>) -> HopAddition {
    let position = index + 1;

    let name = match hop.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            let fallback = format!("Unnamed Hop {}", position);
            note(warnings, format!("Hop {} is missing a name, using '{}'", position, fallback));
            fallback
        }
    };

    let alpha = hop.alpha.unwrap_or_else(|| {
        note(warnings, format!("Hop '{}' is missing alpha, assuming {}%", name, DEFAULT_ALPHA));
        DEFAULT_ALPHA
    });

    let time = match hop.time {
        Some(t) if t < 0.0 => {
            note(
                warnings,
                format!("Hop '{}' has negative time {}, treating it as a dry hop", name, t),
            );
            0.0
        }
        Some(t) => t,
        None => {
            note(
                warnings,
                format!("Hop '{}' is missing time, assuming {} minutes", name, DEFAULT_BOIL_TIME),
            );
            DEFAULT_BOIL_TIME
        }
    };

    let usage = if time == 0.0 {
        let rate_g_per_l = hop.dry_hop_rate.unwrap_or_else(|| {
            note(
                warnings,
                format!(
                    "Dry hop '{}' is missing dry_hop_rate, assuming {} g/L",
                    name, DEFAULT_DRY_HOP_RATE
                ),
            );
            DEFAULT_DRY_HOP_RATE
        });
        HopUsage::DryHop { rate_g_per_l }
    } else {
        let ibu_contribution = hop.ibu_contribution.unwrap_or_else(|| {
            note(
                warnings,
                format!(
                    "Boil hop '{}' is missing ibu_contribution, assuming {} IBU",
                    name, DEFAULT_BOIL_IBU
                ),
            );
            DEFAULT_BOIL_IBU
        });
        HopUsage::Boil { ibu_contribution }
    };

    HopAddition {
        name,
        alpha,
        time,
        form: hop.form.clone().unwrap_or_else(|| DEFAULT_HOP_FORM.to_string()),
        usage,
    }
}

fn normalize_yeast(yeast: &DraftYeast, warnings: &mut Vec<String>) -> Yeast {
    let yeast_type = yeast.yeast_type.clone().unwrap_or_else(|| {
        note(warnings, format!("Yeast type missing, using '{}'", DEFAULT_YEAST));
        DEFAULT_YEAST.to_string()
    });
    let amount = yeast.amount.unwrap_or_else(|| {
        note(warnings, format!("Yeast amount missing, using {} package", DEFAULT_YEAST_AMOUNT));
        DEFAULT_YEAST_AMOUNT
    });

    Yeast {
        yeast_type,
        amount,
        form: yeast.form.clone().unwrap_or_else(|| DEFAULT_YEAST_FORM.to_string()),
        laboratory: yeast.laboratory.clone().unwrap_or_else(|| DEFAULT_LABORATORY.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewforge_schemas::draft::{FermentableMetadata, FermentableShare};
    use std::collections::BTreeMap;

    fn complete_draft() -> RecipeDraft {
        let mut fermentables = BTreeMap::new();
        let share = |percentage, potential| FermentableShare { percentage, potential };
        fermentables.insert("Pilsner".to_string(), share(95.0, 1.037));
        fermentables.insert("Carapils".to_string(), share(5.0, 1.033));
        let mut metadata = BTreeMap::new();
        for malt in ["Pilsner", "Carapils"] {
            let entry = FermentableMetadata { color: Some(2.0), ..Default::default() };
            metadata.insert(malt.to_string(), entry);
        }
        RecipeDraft {
            name: Some("Pils".to_string()),
            target_og: Some(1.048),
            fermentables: Some(fermentables),
            fermentables_metadata: metadata,
            hops: Some(vec![DraftHop {
                name: Some("Saaz".to_string()),
                alpha: Some(3.5),
                time: Some(60.0),
                ibu_contribution: Some(30.0),
                ..Default::default()
            }]),
            yeast: Some(DraftYeast {
                yeast_type: Some("W-34/70".to_string()),
                amount: Some(2.0),
                form: Some("Dry".to_string()),
                laboratory: Some("Fermentis".to_string()),
            }),
            mash: None,
            style: None,
        }
    }

    #[test]
    fn complete_draft_passes_without_warnings() {
        let result = validate(&complete_draft());
        assert!(result.valid, "{}", result.message);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        let recipe = result.recipe.unwrap();
        assert_eq!(recipe.hops[0].usage, HopUsage::Boil { ibu_contribution: 30.0 });
        assert_eq!(recipe.yeast.laboratory, "Fermentis");
    }

    #[test]
    fn missing_yeast_is_rejected_by_name() {
        let mut draft = complete_draft();
        draft.yeast = None;
        let result = validate(&draft);
        assert!(!result.valid);
        assert!(result.message.to_lowercase().contains("yeast"));
        assert!(result.recipe.is_none());
        assert!(matches!(result.into_recipe(), Err(BrewforgeError::InvalidDraft(_))));
    }

    #[test]
    fn missing_fermentables_or_hops_is_rejected() {
        let mut draft = complete_draft();
        draft.fermentables = None;
        assert!(validate(&draft).message.contains("fermentables"));

        let mut draft = complete_draft();
        draft.fermentables = Some(BTreeMap::new());
        assert!(!validate(&draft).valid);

        let mut draft = complete_draft();
        draft.hops = None;
        let result = validate(&draft);
        assert!(!result.valid);
        assert!(result.message.contains("hops"));
    }

    #[test]
    fn percentages_must_sum_to_one_hundred() {
        let mut draft = complete_draft();
        if let Some(malts) = draft.fermentables.as_mut() {
            malts.get_mut("Carapils").unwrap().percentage = 4.0;
        }
        let result = validate(&draft);
        assert!(!result.valid);
        assert!(result.message.contains("99.00"));

        let mut draft = complete_draft();
        if let Some(malts) = draft.fermentables.as_mut() {
            malts.get_mut("Carapils").unwrap().percentage = 5.05;
        }
        assert!(validate(&draft).valid);
    }

    #[test]
    fn shares_outside_zero_to_one_hundred_are_rejected() {
        let mut draft = complete_draft();
        let mut malts = BTreeMap::new();
        let share = |percentage| FermentableShare { percentage, potential: 1.037 };
        malts.insert("Base".to_string(), share(150.0));
        malts.insert("Offset".to_string(), share(-50.0));
        draft.fermentables = Some(malts);
        let result = validate(&draft);
        assert!(!result.valid);
        assert!(result.recipe.is_none());
        assert!(result.message.contains("'Base'"), "{}", result.message);

        let mut draft = complete_draft();
        if let Some(malts) = draft.fermentables.as_mut() {
            malts.get_mut("Pilsner").unwrap().percentage = f64::NAN;
        }
        let result = validate(&draft);
        assert!(!result.valid);
        assert!(result.message.contains("'Pilsner'"), "{}", result.message);
    }

    #[test]
    fn hop_gaps_are_filled_and_warned() {
        let mut draft = complete_draft();
        draft.hops = Some(vec![
            DraftHop::default(),
            DraftHop {
                name: Some("Citra".to_string()),
                alpha: Some(12.0),
                time: Some(0.0),
                ..Default::default()
            },
        ]);
        let result = validate(&draft);
        assert!(result.valid);
        let recipe = result.recipe.unwrap();

        let first = &recipe.hops[0];
        assert_eq!(first.name, "Unnamed Hop 1");
        assert_eq!(first.alpha, DEFAULT_ALPHA);
        assert_eq!(first.time, DEFAULT_BOIL_TIME);
        assert_eq!(first.usage, HopUsage::Boil { ibu_contribution: DEFAULT_BOIL_IBU });
        assert_eq!(first.form, DEFAULT_HOP_FORM);

        let second = &recipe.hops[1];
        assert_eq!(second.usage, HopUsage::DryHop { rate_g_per_l: DEFAULT_DRY_HOP_RATE });

        // name, alpha, time, ibu for the first hop; rate for the second
        assert_eq!(result.warnings.len(), 5);
    }

    #[test]
    fn negative_time_becomes_dry_hop() {
        let mut draft = complete_draft();
        draft.hops = Some(vec![DraftHop {
            name: Some("Mosaic".to_string()),
            alpha: Some(11.0),
            time: Some(-5.0),
            dry_hop_rate: Some(4.0),
            ..Default::default()
        }]);
        let recipe = validate(&draft).into_recipe().unwrap();
        assert_eq!(recipe.hops[0].time, 0.0);
        assert_eq!(recipe.hops[0].usage, HopUsage::DryHop { rate_g_per_l: 4.0 });
    }

    #[test]
    fn yeast_and_header_defaults() {
        let mut draft = complete_draft();
        draft.name = None;
        draft.target_og = None;
        draft.yeast = Some(DraftYeast::default());
        let result = validate(&draft);
        let recipe = result.recipe.unwrap();
        assert_eq!(recipe.name, DEFAULT_RECIPE_NAME);
        assert_eq!(recipe.target_og, DEFAULT_TARGET_OG);
        assert_eq!(recipe.yeast.yeast_type, DEFAULT_YEAST);
        assert_eq!(recipe.yeast.amount, DEFAULT_YEAST_AMOUNT);
        assert_eq!(recipe.yeast.form, DEFAULT_YEAST_FORM);
        assert_eq!(result.warnings.len(), 4);
    }

    #[test]
    fn caller_draft_is_left_untouched() {
        let mut draft = complete_draft();
        draft.hops = Some(vec![DraftHop::default()]);
        let before = draft.clone();
        let _ = validate(&draft);
        assert_eq!(draft, before);
    }
}
