//! Style guideline filtering and fit checks against a calculated recipe.

use brewforge_schemas::{
    calculated::CalculatedRecipe,
    style::{Range, StyleGuideline},
};
use crate::{color::SRM_TO_EBC, error::BrewforgeError};
use tracing::warn;

/// Parses a BJCP catalog (a JSON array of guidelines).
pub fn parse_catalog(json: &str) -> Result<Vec<StyleGuideline>, BrewforgeError> {
    Ok(serde_json::from_str(json)?)
}

/// Window a guideline's ranges must fall inside to be kept.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleFilter {
    /// Case-insensitive substring of the guideline category.
    pub category: Option<String>,
    pub abv: Range,
    pub ibu: Range,
    pub srm: Range,
    pub og: Range,
    pub fg: Range,
}

impl Default for StyleFilter {
    fn default() -> Self {
        Self {
            category: None,
            abv: Range { min: 0.0, max: 100.0 },
            ibu: Range { min: 0.0, max: 1000.0 },
            srm: Range { min: 0.0, max: 100.0 },
            og: Range { min: 0.0, max: 2.0 },
            fg: Range { min: 0.0, max: 2.0 },
        }
    }
}

fn within(inner: Range, outer: Range) -> bool {
    inner.min >= outer.min && inner.max <= outer.max
}

impl StyleFilter {
    /// Styles with a bound that is present but not numeric never pass.
    pub fn accepts(&self, style: &StyleGuideline) -> bool {
        if !style.invalid_bounds().is_empty() {
            return false;
        }
        if let Some(category) = &self.category {
            if !style.category.to_lowercase().contains(&category.to_lowercase()) {
                return false;
            }
        }
        within(style.abv(), self.abv)
            && within(style.ibu(), self.ibu)
            && within(style.srm(), self.srm)
            && within(style.og(), self.og)
            && within(style.fg(), self.fg)
    }
}

pub fn filter_styles<'a>(
    styles: &'a [StyleGuideline],
    filter: &StyleFilter,
) -> Vec<&'a StyleGuideline> {
    for style in styles {
        let invalid = style.invalid_bounds();
        if !invalid.is_empty() {
            warn!(style = %style.name, bounds = ?invalid, "skipping style with non-numeric bounds");
        }
    }
    styles.iter().filter(|style| filter.accepts(style)).collect()
}

/// Unique categories, sorted.
pub fn categories(styles: &[StyleGuideline]) -> Vec<String> {
    let mut categories: Vec<String> = styles.iter().map(|s| s.category.clone()).collect();
    categories.sort();
    categories.dedup();
    categories
}

pub fn find_by_number<'a>(
    styles: &'a [StyleGuideline],
    number: &str,
) -> Option<&'a StyleGuideline> {
    styles.iter().find(|s| s.number.as_deref() == Some(number))
}

/// One metric of a recipe that lies outside its style's range.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDeviation {
    pub metric: &'static str,
    pub value: f64,
    pub range: Range,
}

/// Compares OG, IBU, color (as SRM) and ABV against the guideline.
/// An empty result means the recipe fits the style.
pub fn style_fit(
    style: &StyleGuideline,
    calculated: &CalculatedRecipe,
    abv: f64,
) -> Vec<StyleDeviation> {
    let srm = calculated.ebc / SRM_TO_EBC;
    [
        ("og", calculated.og, style.og()),
        ("ibu", calculated.ibu.total, style.ibu()),
        ("srm", srm, style.srm()),
        ("abv", abv, style.abv()),
    ]
    .into_iter()
    .filter(|(_, value, range)| !range.contains(*value))
    .map(|(metric, value, range)| StyleDeviation { metric, value, range })
    .collect()
}
