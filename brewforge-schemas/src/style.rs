use crate::lenient;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One bound of a guideline range as read from a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Bound {
    #[default]
    Missing,
    Value(f64),
    /// Present in the catalog but not a number.
    Invalid,
}

impl Bound {
    pub fn value(self) -> Option<f64> {
        match self {
            Bound::Value(v) => Some(v),
            Bound::Missing | Bound::Invalid => None,
        }
    }

    pub fn is_invalid(self) -> bool {
        self == Bound::Invalid
    }

    fn or(self, default: f64) -> f64 {
        self.value().unwrap_or(default)
    }
}

impl<'de> Deserialize<'de> for Bound {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) => Bound::Missing,
            Some(value) => lenient::value_to_f64(&value).map_or(Bound::Invalid, Bound::Value),
        })
    }
}

impl Serialize for Bound {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Bound::Value(v) => serializer.serialize_f64(*v),
            Bound::Missing | Bound::Invalid => serializer.serialize_none(),
        }
    }
}

/// One entry of a BJCP style catalog.
///
/// Catalogs ship their ranges as strings. An absent bound reads as the widest
/// value a filter would accept; a bound that is present but not numeric is
/// kept as [`Bound::Invalid`] so filters can drop the style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleGuideline {
    pub name: String,
    #[serde(default, deserialize_with = "lenient::option_string")]
    pub number: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub abvmin: Bound,
    #[serde(default)]
    pub abvmax: Bound,
    #[serde(default)]
    pub ibumin: Bound,
    #[serde(default)]
    pub ibumax: Bound,
    #[serde(default)]
    pub srmmin: Bound,
    #[serde(default)]
    pub srmmax: Bound,
    #[serde(default)]
    pub ogmin: Bound,
    #[serde(default)]
    pub ogmax: Bound,
    #[serde(default)]
    pub fgmin: Bound,
    #[serde(default)]
    pub fgmax: Bound,
}

/// Closed interval of a guideline metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl StyleGuideline {
    pub fn abv(&self) -> Range {
        Range { min: self.abvmin.or(0.0), max: self.abvmax.or(100.0) }
    }

    pub fn ibu(&self) -> Range {
        Range { min: self.ibumin.or(0.0), max: self.ibumax.or(1000.0) }
    }

    pub fn srm(&self) -> Range {
        Range { min: self.srmmin.or(0.0), max: self.srmmax.or(100.0) }
    }

    pub fn og(&self) -> Range {
        Range { min: self.ogmin.or(0.0), max: self.ogmax.or(2.0) }
    }

    pub fn fg(&self) -> Range {
        Range { min: self.fgmin.or(0.0), max: self.fgmax.or(2.0) }
    }

    /// Names of the bounds that are present but not numeric.
    pub fn invalid_bounds(&self) -> Vec<&'static str> {
        [
            ("abvmin", self.abvmin),
            ("abvmax", self.abvmax),
            ("ibumin", self.ibumin),
            ("ibumax", self.ibumax),
            ("srmmin", self.srmmin),
            ("srmmax", self.srmmax),
            ("ogmin", self.ogmin),
            ("ogmax", self.ogmax),
            ("fgmin", self.fgmin),
            ("fgmax", self.fgmax),
        ]
        .into_iter()
        .filter(|(_, bound)| bound.is_invalid())
        .map(|(name, _)| name)
        .collect()
    }
}
