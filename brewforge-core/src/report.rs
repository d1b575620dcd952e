use crate::numeric::round_to;
use brewforge_schemas::{calculated::CalculatedRecipe, recipe::Recipe};

/// Typical apparent attenuation of an ale yeast.
pub const DEFAULT_ATTENUATION: f64 = 0.75;
const ABV_FACTOR: f64 = 131.25;

/// Final gravity after the yeast ferments away `attenuation` of the points.
pub fn estimate_fg(og: f64, attenuation: f64) -> f64 {
    let attenuation = attenuation.clamp(0.0, 1.0);
    round_to(1.0 + (og - 1.0) * (1.0 - attenuation), 3)
}

pub fn estimate_abv(og: f64, fg: f64) -> f64 {
    round_to((og - fg) * ABV_FACTOR, 2)
}

/// Plain-text summary of a calculated recipe.
pub fn format_summary(recipe: &Recipe, calculated: &CalculatedRecipe) -> String {
    let fg = estimate_fg(calculated.og, DEFAULT_ATTENUATION);
    let abv = estimate_abv(calculated.og, fg);
    let style = recipe
        .style
        .as_ref()
        .and_then(|s| s.name.as_deref())
        .unwrap_or("Unknown Style");

    let mut out = format!("Recipe Name: {}\n", recipe.name);
    out.push_str(&format!("Style: {}\n", style));
    out.push_str(&format!("OG: {:.3}  FG: {:.3}  ABV: {:.2}%\n", calculated.og, fg, abv));
    out.push_str(&format!("IBU: {:.1}  EBC: {:.1}\n", calculated.ibu.total, calculated.ebc));

    out.push_str("\nFermentables:\n");
    for (name, kg) in &calculated.fermentables {
        out.push_str(&format!("- {} ({:.2} kg)\n", name, kg));
    }

    out.push_str("\nHops:\n");
    for hop in &calculated.ibu.hops {
        out.push_str(&format!(
            "- {} ({:.1} g, {:.1}% alpha acids, {} {} min)\n",
            hop.name, hop.calculated_amount, hop.alpha, hop.usage, hop.time
        ));
    }

    out.push_str("\nYeasts:\n");
    out.push_str(&format!("- {} ({} packs)", recipe.yeast.yeast_type, recipe.yeast.amount));
    out
}
