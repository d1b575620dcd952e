use crate::error::BrewforgeError;
use brewforge_schemas::{calculated::CalculatedRecipe, recipe::Recipe};
use csv::Writer;
use serde::Serialize;
use std::fs;

#[derive(Debug, Serialize)]
struct BreakdownRow<'a> {
    kind: &'a str,
    name: &'a str,
    amount: f64,
    unit: &'a str,
    detail: String,
}

/// Writes one CSV row per ingredient of a calculated recipe.
pub struct BreakdownWriter {
    writer: Writer<fs::File>,
}

impl BreakdownWriter {
    pub fn new(path: &str) -> Result<Self, BrewforgeError> {
        let writer = Writer::from_path(path)
            .map_err(|e| BrewforgeError::CsvError(path.to_string(), e))?;
        Ok(Self { writer })
    }

    pub fn write(
        &mut self,
        recipe: &Recipe,
        calculated: &CalculatedRecipe,
    ) -> Result<(), BrewforgeError> {
        self.write_rows(recipe, calculated)?;
        Ok(())
    }

    fn write_rows(
        &mut self,
        recipe: &Recipe,
        calculated: &CalculatedRecipe,
    ) -> Result<(), anyhow::Error> {
        for (name, kg) in &calculated.fermentables {
            let share = recipe.fermentables.get(name).map_or(0.0, |s| s.percentage);
            self.writer.serialize(BreakdownRow {
                kind: "fermentable",
                name,
                amount: *kg,
                unit: "kg",
                detail: format!("{}% of bill", share),
            })?;
        }

        for hop in &calculated.ibu.hops {
            self.writer.serialize(BreakdownRow {
                kind: "hop",
                name: &hop.name,
                amount: hop.calculated_amount,
                unit: "g",
                detail: format!(
                    "{} {} min, {} IBU, {}% utilization",
                    hop.usage, hop.time, hop.ibu_contribution, hop.utilization
                ),
            })?;
        }

        self.writer.serialize(BreakdownRow {
            kind: "yeast",
            name: &recipe.yeast.yeast_type,
            amount: recipe.yeast.amount,
            unit: "pkg",
            detail: recipe.yeast.laboratory.clone(),
        })?;

        self.writer.flush()?;
        Ok(())
    }
}
