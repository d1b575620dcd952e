use crate::equipment::EquipmentProfile;
use serde::{Deserialize, Serialize};

/// Wrapper for YAML files holding one or more equipment profiles.
#[derive(Debug, Serialize, Deserialize)]
pub struct EquipmentFile {
    pub equipment: Vec<EquipmentProfile>,
}
