use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HopUse {
    #[serde(rename = "Boil")]
    Boil,
    #[serde(rename = "Dry Hop")]
    DryHop,
}

impl fmt::Display for HopUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HopUse::Boil => write!(f, "Boil"),
            HopUse::DryHop => write!(f, "Dry Hop"),
        }
    }
}

/// Per-addition output of the bitterness calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopResult {
    pub name: String,
    pub alpha: f64,
    pub time: f64,
    #[serde(rename = "use")]
    pub usage: HopUse,
    /// Declared target; always zero for dry hops.
    pub ibu_contribution: f64,
    /// Grams.
    pub calculated_amount: f64,
    /// Percent.
    pub utilization: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BitternessResult {
    pub total: f64,
    pub hops: Vec<HopResult>,
}

/// Result of one calculation run. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedRecipe {
    /// Actual original gravity from the rounded malt masses.
    pub og: f64,
    /// Malt name to kilograms.
    pub fermentables: BTreeMap<String, f64>,
    pub ibu: BitternessResult,
    pub ebc: f64,
}
