//! The loosely structured recipe draft handed over by an external producer.
//!
//! Every field is optional: deciding what is missing, and what can be
//! defaulted, is the validator's job.

use crate::lenient;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One line of the malt bill: share of the grist and potential gravity.
///
/// Accepted either as a `[percentage, potential]` pair or as an object with
/// named fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ShareRepr")]
pub struct FermentableShare {
    /// Percentage of the bill, 0-100.
    pub percentage: f64,
    /// Potential specific gravity per unit, e.g. 1.037.
    pub potential: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ShareRepr {
    Pair(f64, f64),
    Fields { percentage: f64, potential: f64 },
}

impl From<ShareRepr> for FermentableShare {
    fn from(repr: ShareRepr) -> Self {
        match repr {
            ShareRepr::Pair(percentage, potential)
            | ShareRepr::Fields { percentage, potential } => Self { percentage, potential },
        }
    }
}

/// Descriptive attributes of a malt. Only `color` feeds a calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FermentableMetadata {
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub supplier: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub origin: Option<String>,
    /// Color rating in SRM-equivalent units.
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub color: Option<f64>,
    /// Yield as a percentage.
    #[serde(rename = "yield", default, deserialize_with = "lenient::option_f64")]
    pub yield_percent: Option<f64>,
    /// Grain, Sugar, Extract, Dry Extract or Adjunct.
    #[serde(rename = "type", default, deserialize_with = "lenient::option_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_bool")]
    pub not_fermentable: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftHop {
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub name: Option<String>,
    /// Alpha-acid percentage.
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub alpha: Option<f64>,
    /// Boil minutes; zero marks a dry hop.
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub time: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub ibu_contribution: Option<f64>,
    /// Grams per liter of batch.
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub dry_hop_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub form: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftYeast {
    #[serde(rename = "type", default, deserialize_with = "lenient::option_string")]
    pub yeast_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub form: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub laboratory: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MashStep {
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub name: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient::option_string")]
    pub step_type: Option<String>,
    /// Celsius.
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub temp: Option<f64>,
    /// Minutes.
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub time: Option<f64>,
}

/// Mash profile, passed through to the document untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mash {
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub grain_temp: Option<f64>,
    #[serde(default)]
    pub steps: Vec<MashStep>,
}

/// Style classification, passed through to the document untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub category_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub style_letter: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub style_guide: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub name: Option<String>,
    /// Desired original gravity, e.g. 1.050.
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub target_og: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fermentables: Option<BTreeMap<String, FermentableShare>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fermentables_metadata: BTreeMap<String, FermentableMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hops: Option<Vec<DraftHop>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yeast: Option<DraftYeast>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mash: Option<Mash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}
