use serde::{Deserialize, Serialize};

/// Fixed brewing-system parameters every quantity in a recipe is scaled against.
///
/// Volumes are liters, times are minutes, `efficiency` and `evaporation_rate`
/// are percentages (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquipmentParams {
    /// Volume that ends up in the fermenter.
    pub batch_size: f64,
    /// Pre-boil kettle volume.
    pub boil_size: f64,
    pub boil_time: f64,
    /// Mash/brewhouse extraction efficiency.
    pub efficiency: f64,
    /// Percent of boil volume lost per hour.
    pub evaporation_rate: f64,
    #[serde(default)]
    pub trub_loss: f64,
    /// Informational only; no calculation reads it.
    #[serde(default)]
    pub deadspace: f64,
}

/// A named equipment profile as held by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentProfile {
    pub name: String,
    pub params: EquipmentParams,
}
