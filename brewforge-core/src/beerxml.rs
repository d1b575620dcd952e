//! BeerXML rendering of a calculated recipe.
//!
//! Tag names, their order and their casing are read by external brewing
//! tools and must not change. Nothing is computed here; values are only
//! formatted. Values the engine rounds (gravity, masses, IBU, EBC) get fixed
//! places; values copied from the draft or the equipment are written at full
//! precision. Non-finite numbers are written as `0.0`.

use crate::numeric::finite_or_zero;
use brewforge_schemas::{
    calculated::{CalculatedRecipe, HopResult},
    draft::{FermentableMetadata, Mash, Style},
    equipment::EquipmentProfile,
    recipe::Recipe,
};

pub const DEFAULT_STYLE_NAME: &str = "Custom Style";
pub const DEFAULT_STYLE_CATEGORY: &str = "Custom";
pub const DEFAULT_CATEGORY_NUMBER: &str = "1";
pub const DEFAULT_STYLE_LETTER: &str = "A";
pub const DEFAULT_STYLE_GUIDE: &str = "BJCP";
pub const DEFAULT_GRAIN_TEMP: f64 = 20.0;
pub const DEFAULT_STEP_TYPE: &str = "Infusion";
pub const DEFAULT_STEP_TEMP: f64 = 66.0;
pub const DEFAULT_STEP_TIME: f64 = 60.0;
pub const DEFAULT_FERMENTABLE_TYPE: &str = "Grain";
pub const DEFAULT_YIELD: f64 = 80.0;

struct Document {
    text: String,
    depth: usize,
}

impl Document {
    fn new() -> Self {
        Self {
            text: String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"),
            depth: 0,
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.text.push_str("  ");
        }
    }

    fn open(&mut self, tag: &str) {
        self.indent();
        self.text.push_str(&format!("<{}>\n", tag));
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth -= 1;
        self.indent();
        self.text.push_str(&format!("</{}>\n", tag));
    }

    fn field(&mut self, tag: &str, value: &str) {
        self.indent();
        self.text.push_str(&format!("<{tag}>{}</{tag}>\n", escape(value)));
    }

    fn number(&mut self, tag: &str, value: f64, places: usize) {
        self.field(tag, &decimal(value, places));
    }

    fn verbatim(&mut self, tag: &str, value: f64) {
        self.field(tag, &shortest(value));
    }

    fn minutes(&mut self, tag: &str, value: f64) {
        let value = finite_or_zero(value);
        if value.fract() == 0.0 {
            self.number(tag, value, 0);
        } else {
            self.verbatim(tag, value);
        }
    }

    fn finish(self) -> String {
        self.text
    }
}

/// Fixed-point text for `value`; non-finite values become zero.
pub fn decimal(value: f64, places: usize) -> String {
    format!("{:.*}", places, finite_or_zero(value))
}

/// Shortest text that reads back as `value`, always with a decimal point.
pub fn shortest(value: f64) -> String {
    let text = finite_or_zero(value).to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn flag(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

pub fn serialize(
    recipe: &Recipe,
    calculated: &CalculatedRecipe,
    equipment: &EquipmentProfile,
) -> String {
    let params = &equipment.params;
    let mut doc = Document::new();

    doc.open("RECIPES");
    doc.open("RECIPE");
    doc.field("NAME", &recipe.name);
    doc.field("VERSION", "1");
    doc.field("TYPE", "All Grain");
    doc.verbatim("BATCH_SIZE", params.batch_size);
    doc.verbatim("BOIL_SIZE", params.boil_size);
    doc.minutes("BOIL_TIME", params.boil_time);
    doc.verbatim("EFFICIENCY", params.efficiency);

    if let Some(style) = &recipe.style {
        write_style(&mut doc, style);
    }

    doc.number("OG", calculated.og, 3);
    doc.number("IBU", calculated.ibu.total, 1);
    doc.number("EST_COLOR", calculated.ebc, 1);

    doc.open("FERMENTABLES");
    for (name, kg) in &calculated.fermentables {
        let metadata = recipe.metadata(name).cloned().unwrap_or_default();
        write_fermentable(&mut doc, name, *kg, &metadata);
    }
    doc.close("FERMENTABLES");

    doc.open("HOPS");
    for (index, (hop, form)) in calculated
        .ibu
        .hops
        .iter()
        .zip(recipe.hops.iter().map(|h| h.form.as_str()))
        .enumerate()
    {
        write_hop(&mut doc, index + 1, hop, form);
    }
    doc.close("HOPS");

    doc.open("YEASTS");
    doc.open("YEAST");
    doc.field("ID", "yeast_1");
    doc.field("NAME", &recipe.yeast.yeast_type);
    doc.field("VERSION", "1");
    doc.field("TYPE", yeast_kind(&recipe.yeast.yeast_type));
    doc.field("FORM", &recipe.yeast.form);
    doc.verbatim("AMOUNT", recipe.yeast.amount);
    doc.field("LABORATORY", &recipe.yeast.laboratory);
    doc.close("YEAST");
    doc.close("YEASTS");

    if let Some(mash) = &recipe.mash {
        write_mash(&mut doc, mash);
    }

    doc.close("RECIPE");
    doc.close("RECIPES");
    doc.finish()
}

fn write_style(doc: &mut Document, style: &Style) {
    doc.open("STYLE");
    doc.field("NAME", style.name.as_deref().unwrap_or(DEFAULT_STYLE_NAME));
    doc.field("CATEGORY", style.category.as_deref().unwrap_or(DEFAULT_STYLE_CATEGORY));
    doc.field(
        "CATEGORY_NUMBER",
        style.category_number.as_deref().unwrap_or(DEFAULT_CATEGORY_NUMBER),
    );
    doc.field("STYLE_LETTER", style.style_letter.as_deref().unwrap_or(DEFAULT_STYLE_LETTER));
    doc.field("STYLE_GUIDE", style.style_guide.as_deref().unwrap_or(DEFAULT_STYLE_GUIDE));
    doc.field("VERSION", "1");
    doc.field("TYPE", "Ale");
    doc.close("STYLE");
}

fn write_fermentable(doc: &mut Document, name: &str, kg: f64, metadata: &FermentableMetadata) {
    doc.open("FERMENTABLE");
    doc.field("NAME", name);
    doc.field("VERSION", "1");
    doc.field("TYPE", metadata.kind.as_deref().unwrap_or(DEFAULT_FERMENTABLE_TYPE));
    doc.number("AMOUNT", kg, 2);
    doc.verbatim("YIELD", metadata.yield_percent.unwrap_or(DEFAULT_YIELD));
    doc.verbatim("COLOR", metadata.color.unwrap_or(0.0));
    doc.field("SUPPLIER", metadata.supplier.as_deref().unwrap_or(""));
    doc.field("ORIGIN", metadata.origin.as_deref().unwrap_or(""));
    doc.field("NOT_FERMENTABLE", flag(metadata.not_fermentable.unwrap_or(false)));
    doc.close("FERMENTABLE");
}

fn write_hop(doc: &mut Document, position: usize, hop: &HopResult, form: &str) {
    doc.open("HOP");
    doc.field("ID", &format!("hop_{}", position));
    doc.field("NAME", &hop.name);
    doc.field("VERSION", "1");
    doc.verbatim("ALPHA", hop.alpha);
    doc.number("AMOUNT", hop.calculated_amount / 1000.0, 4);
    doc.field("USE", &hop.usage.to_string());
    doc.minutes("TIME", hop.time);
    doc.field("FORM", form);
    doc.close("HOP");
}

fn write_mash(doc: &mut Document, mash: &Mash) {
    doc.open("MASH");
    doc.field("NAME", "Mash Profile");
    doc.field("VERSION", "1");
    doc.verbatim("GRAIN_TEMP", mash.grain_temp.unwrap_or(DEFAULT_GRAIN_TEMP));
    doc.open("MASH_STEPS");
    for (index, step) in mash.steps.iter().enumerate() {
        let fallback_name = format!("Step {}", index + 1);
        doc.open("MASH_STEP");
        doc.field("NAME", step.name.as_deref().unwrap_or(&fallback_name));
        doc.field("VERSION", "1");
        doc.field("TYPE", step.step_type.as_deref().unwrap_or(DEFAULT_STEP_TYPE));
        doc.verbatim("STEP_TEMP", step.temp.unwrap_or(DEFAULT_STEP_TEMP));
        doc.minutes("STEP_TIME", step.time.unwrap_or(DEFAULT_STEP_TIME));
        doc.close("MASH_STEP");
    }
    doc.close("MASH_STEPS");
    doc.close("MASH");
}

fn yeast_kind(name: &str) -> &'static str {
    if name.to_lowercase().contains("lager") {
        "Lager"
    } else {
        "Ale"
    }
}
