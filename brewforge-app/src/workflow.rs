use crate::config;
use anyhow::{Context, Result};
use brewforge_core::{
    breakdown::BreakdownWriter,
    calculate,
    equipment::EquipmentCatalog,
    report::{estimate_abv, estimate_fg, format_summary, DEFAULT_ATTENUATION},
    styles::{self, StyleFilter},
    validate::validate,
};
use brewforge_schemas::{calculated::CalculatedRecipe, style::StyleGuideline};
use std::{fs, path::{Path, PathBuf}};
use tracing::info;

pub struct CalculateRequest<'a> {
    pub draft_path: &'a Path,
    pub profile: &'a str,
    pub output: Option<PathBuf>,
    pub breakdown: Option<PathBuf>,
    pub summary: bool,
    /// Style catalog and style number to check the result against.
    pub style_check: Option<(PathBuf, String)>,
}

/// Runs the full pipeline for one draft and writes the BeerXML document.
pub fn run_calculate(catalog: &EquipmentCatalog, request: CalculateRequest) -> Result<PathBuf> {
    println!("\n--- [Workflow] Calculating recipe ---");
    let draft = config::load_draft(request.draft_path)?;
    let equipment = catalog.get(request.profile)?;

    let calculation = calculate(&draft, equipment)
        .with_context(|| format!("Failed to calculate {:?}", request.draft_path))?;
    for warning in &calculation.warnings {
        println!("Warning: {}", warning);
    }

    let output = request
        .output
        .unwrap_or_else(|| default_output_name(&calculation.recipe.name));
    let document = calculation.to_beerxml(equipment);
    fs::write(&output, document)
        .with_context(|| format!("Failed to write BeerXML to {:?}", output))?;
    info!(output = %output.display(), "BeerXML written");

    if let Some(path) = request.breakdown {
        let path_str = path.to_str().context("Breakdown path is not valid UTF-8")?;
        let mut writer = BreakdownWriter::new(path_str)?;
        writer.write(&calculation.recipe, &calculation.calculated)?;
        println!("Ingredient breakdown written to '{}'", path.display());
    }

    let c = &calculation.calculated;
    let fg = estimate_fg(c.og, DEFAULT_ATTENUATION);
    println!("Equipment:        {}", equipment.name);
    println!("Post-boil volume: {:.2} L", calculation.post_boil_volume);
    println!(
        "OG: {:.3} | FG: {:.3} | ABV: {:.2}% | IBU: {:.1} | EBC: {:.1}",
        c.og,
        fg,
        estimate_abv(c.og, fg),
        c.ibu.total,
        c.ebc
    );

    if request.summary {
        println!("\n{}", format_summary(&calculation.recipe, c));
    }

    if let Some((catalog_path, number)) = &request.style_check {
        report_style_fit(catalog_path, number, c)?;
    }

    Ok(output)
}

/// Reports whether a draft passes validation. Returns the validity flag.
pub fn run_validate(draft_path: &Path) -> Result<bool> {
    let draft = config::load_draft(draft_path)?;
    let validation = validate(&draft);
    println!("{}: {}", if validation.valid { "VALID" } else { "INVALID" }, validation.message);
    for warning in &validation.warnings {
        println!("  - {}", warning);
    }
    Ok(validation.valid)
}

pub fn list_profiles(catalog: &EquipmentCatalog) {
    println!(
        "{:<24} {:>8} {:>8} {:>6} {:>6} {:>6}",
        "Profile", "Batch L", "Boil L", "Min", "Eff %", "Evap %"
    );
    println!("{}", "-".repeat(63));
    for profile in catalog.profiles() {
        let p = &profile.params;
        println!(
            "{:<24} {:>8.1} {:>8.1} {:>6.0} {:>6.1} {:>6.1}",
            profile.name, p.batch_size, p.boil_size, p.boil_time, p.efficiency, p.evaporation_rate
        );
    }
}

/// Prints every metric that falls outside the style; returns how many did.
pub fn report_style_fit(path: &Path, number: &str, calculated: &CalculatedRecipe) -> Result<usize> {
    let catalog = config::load_styles(path)?;
    let style = styles::find_by_number(&catalog, number)
        .with_context(|| format!("Style '{}' not found in {:?}", number, path))?;
    let fg = estimate_fg(calculated.og, DEFAULT_ATTENUATION);
    let deviations = styles::style_fit(style, calculated, estimate_abv(calculated.og, fg));

    if deviations.is_empty() {
        println!("Within style {} ({}).", number, style.name);
    }
    for deviation in &deviations {
        println!(
            "Out of style {} ({}): {} {:.3} outside {:.3}..{:.3}",
            number,
            style.name,
            deviation.metric,
            deviation.value,
            deviation.range.min,
            deviation.range.max
        );
    }
    Ok(deviations.len())
}

pub fn list_categories(path: &Path) -> Result<Vec<String>> {
    let catalog = config::load_styles(path)?;
    let categories = styles::categories(&catalog);
    for category in &categories {
        println!("{}", category);
    }
    Ok(categories)
}

pub fn show_style(path: &Path, number: &str) -> Result<StyleGuideline> {
    let catalog = config::load_styles(path)?;
    let style = styles::find_by_number(&catalog, number)
        .with_context(|| format!("Style '{}' not found in {:?}", number, path))?;
    let (abv, ibu, srm, og, fg) = (style.abv(), style.ibu(), style.srm(), style.og(), style.fg());
    println!("{} {} ({})", number, style.name, style.category);
    println!("  ABV {:.1}-{:.1} %", abv.min, abv.max);
    println!("  IBU {:.0}-{:.0}", ibu.min, ibu.max);
    println!("  SRM {:.0}-{:.0}", srm.min, srm.max);
    println!("  OG  {:.3}-{:.3}", og.min, og.max);
    println!("  FG  {:.3}-{:.3}", fg.min, fg.max);
    Ok(style.clone())
}

pub fn run_styles(path: &Path, filter: &StyleFilter) -> Result<usize> {
    let catalog = config::load_styles(path)?;
    let matches = styles::filter_styles(&catalog, filter);
    for style in &matches {
        println!(
            "{:<6} {:<36} {}",
            style.number.as_deref().unwrap_or("-"),
            style.name,
            style.category
        );
    }
    println!("{} of {} styles match.", matches.len(), catalog.len());
    Ok(matches.len())
}

fn default_output_name(recipe_name: &str) -> PathBuf {
    let slug: String = recipe_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    PathBuf::from(format!("{}_{}.xml", slug, chrono::Utc::now().format("%Y%m%d_%H%M%S")))
}
