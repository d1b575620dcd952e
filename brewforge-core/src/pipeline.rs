use crate::{
    beerxml,
    bitterness::solve_bitterness,
    color::solve_color,
    equipment::sanitize,
    error::BrewforgeError,
    gravity::solve_gravity,
    validate::validate,
    volume::post_boil_volume_liters,
};
use brewforge_schemas::{
    calculated::CalculatedRecipe, draft::RecipeDraft, equipment::EquipmentProfile, recipe::Recipe,
};
use tracing::info;

/// Everything one run of the pipeline produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub recipe: Recipe,
    pub calculated: CalculatedRecipe,
    /// Liters.
    pub post_boil_volume: f64,
    pub warnings: Vec<String>,
}

impl Calculation {
    pub fn to_beerxml(&self, equipment: &EquipmentProfile) -> String {
        beerxml::serialize(&self.recipe, &self.calculated, equipment)
    }
}

/// Validates `draft` and runs volume, gravity, bitterness and color in order.
///
/// # Errors
///
/// Returns `BrewforgeError::InvalidDraft` when a required section is missing;
/// no calculation stage runs in that case.
pub fn calculate(
    draft: &RecipeDraft,
    equipment: &EquipmentProfile,
) -> Result<Calculation, BrewforgeError> {
    let validation = validate(draft);
    let warnings = validation.warnings.clone();
    let recipe = validation.into_recipe()?;

    let params = sanitize(&equipment.params);
    let post_boil_volume = post_boil_volume_liters(&params);
    let gravity = solve_gravity(&recipe, &params);
    let ibu = solve_bitterness(&recipe, &params, post_boil_volume);
    let ebc = solve_color(&recipe, &gravity.fermentables, post_boil_volume);

    info!(
        recipe = %recipe.name,
        equipment = %equipment.name,
        og = gravity.og,
        ibu = ibu.total,
        ebc,
        "recipe calculated"
    );

    Ok(Calculation {
        calculated: CalculatedRecipe {
            og: gravity.og,
            fermentables: gravity.fermentables,
            ibu,
            ebc,
        },
        recipe,
        post_boil_volume,
        warnings,
    })
}

/// A fluent builder for a single pipeline run.
#[derive(Default)]
pub struct RecipeCalculator {
    equipment: Option<EquipmentProfile>,
    draft: Option<RecipeDraft>,
}

impl RecipeCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_equipment(mut self, equipment: EquipmentProfile) -> Self {
        self.equipment = Some(equipment);
        self
    }

    pub fn with_draft(mut self, draft: RecipeDraft) -> Self {
        self.draft = Some(draft);
        self
    }

    /// Runs the pipeline and returns the calculation together with its BeerXML document.
    ///
    /// # Errors
    ///
    /// Returns a `BrewforgeError` if the equipment or the draft was never
    /// provided, or if the draft fails validation.
    pub fn build(self) -> Result<(Calculation, String), BrewforgeError> {
        let equipment = self.equipment.ok_or(BrewforgeError::EquipmentNotDefined)?;
        let draft = self.draft.ok_or(BrewforgeError::DraftNotDefined)?;
        let calculation = calculate(&draft, &equipment)?;
        let document = calculation.to_beerxml(&equipment);
        Ok((calculation, document))
    }
}
