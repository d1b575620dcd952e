use crate::{error::BrewforgeError, numeric::{floor_positive, EPSILON}};
use brewforge_schemas::{
    equipment::{EquipmentParams, EquipmentProfile},
    file_formats::EquipmentFile,
};
use std::{collections::BTreeMap, fs, path::Path};
use tracing::{debug, info};

pub const DEFAULT_PROFILE: &str = "Grainfather G30";

/// Floors every parameter at [`EPSILON`] so all of them are strictly positive.
pub fn sanitize(params: &EquipmentParams) -> EquipmentParams {
    EquipmentParams {
        batch_size: floor_positive(params.batch_size, EPSILON),
        boil_size: floor_positive(params.boil_size, EPSILON),
        boil_time: floor_positive(params.boil_time, EPSILON),
        efficiency: floor_positive(params.efficiency, EPSILON),
        evaporation_rate: floor_positive(params.evaporation_rate, EPSILON),
        trub_loss: floor_positive(params.trub_loss, EPSILON),
        deadspace: floor_positive(params.deadspace, EPSILON),
    }
}

/// Named equipment profiles. Lookups never return partial profiles.
#[derive(Debug, Clone, Default)]
pub struct EquipmentCatalog {
    profiles: BTreeMap<String, EquipmentProfile>,
}

impl EquipmentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The profiles shipped with the application.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert(EquipmentProfile {
            name: DEFAULT_PROFILE.to_string(),
            params: EquipmentParams {
                batch_size: 23.0,
                boil_size: 27.0,
                boil_time: 60.0,
                efficiency: 75.0,
                evaporation_rate: 7.4,
                trub_loss: 1.0,
                deadspace: 3.5,
            },
        });
        catalog
    }

    /// Adds or replaces a profile by name.
    pub fn insert(&mut self, profile: EquipmentProfile) {
        self.profiles.insert(profile.name.clone(), profile);
    }

    /// # Errors
    ///
    /// Returns `BrewforgeError::ProfileNotFound` for an unknown name.
    pub fn get(&self, name: &str) -> Result<&EquipmentProfile, BrewforgeError> {
        self.profiles
            .get(name)
            .ok_or_else(|| BrewforgeError::ProfileNotFound(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &EquipmentProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Merges every profile of one YAML `EquipmentFile`, returning how many were read.
    pub fn merge_file(&mut self, path: &Path) -> Result<usize, BrewforgeError> {
        let file_name = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|e| BrewforgeError::FileIO(file_name.clone(), e))?;
        let file: EquipmentFile = serde_yaml::from_str(&content)
            .map_err(|e| BrewforgeError::YamlParsing(file_name.clone(), e))?;
        let count = file.equipment.len();
        for profile in file.equipment {
            debug!(profile = %profile.name, file = %file_name, "loaded equipment profile");
            self.insert(profile);
        }
        Ok(count)
    }

    /// Merges every `.yaml`/`.yml` file in `dir`.
    pub fn merge_dir(&mut self, dir: &Path) -> Result<usize, BrewforgeError> {
        let dir_name = dir.display().to_string();
        let entries = fs::read_dir(dir).map_err(|e| BrewforgeError::FileIO(dir_name.clone(), e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| BrewforgeError::FileIO(dir_name.clone(), e))?.path();
            if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut total = 0;
        for path in paths {
            total += self.merge_file(&path)?;
        }
        info!(dir = %dir_name, profiles = total, "equipment profiles merged");
        Ok(total)
    }
}
