use crate::draft::{FermentableMetadata, FermentableShare, Mash, Style};
use crate::calculated::HopUse;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a hop addition is used, together with the quantity its class requires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "use", rename_all = "snake_case")]
pub enum HopUsage {
    /// Boiled for `time` minutes; mass is solved from the target bitterness.
    Boil { ibu_contribution: f64 },
    /// Added without boiling; mass is `batch_size * rate_g_per_l`.
    DryHop { rate_g_per_l: f64 },
}

impl HopUsage {
    pub fn kind(&self) -> HopUse {
        match self {
            HopUsage::Boil { .. } => HopUse::Boil,
            HopUsage::DryHop { .. } => HopUse::DryHop,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopAddition {
    pub name: String,
    pub alpha: f64,
    pub time: f64,
    pub form: String,
    #[serde(flatten)]
    pub usage: HopUsage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Yeast {
    #[serde(rename = "type")]
    pub yeast_type: String,
    pub amount: f64,
    pub form: String,
    pub laboratory: String,
}

/// A draft that passed validation, with every recoverable gap filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub target_og: f64,
    pub fermentables: BTreeMap<String, FermentableShare>,
    pub fermentables_metadata: BTreeMap<String, FermentableMetadata>,
    pub hops: Vec<HopAddition>,
    pub yeast: Yeast,
    pub mash: Option<Mash>,
    pub style: Option<Style>,
}

impl Recipe {
    pub fn metadata(&self, malt: &str) -> Option<&FermentableMetadata> {
        self.fermentables_metadata.get(malt)
    }
}
