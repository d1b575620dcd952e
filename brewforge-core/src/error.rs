use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrewforgeError {
    #[error("Equipment profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("Invalid recipe draft: {0}")]
    InvalidDraft(String),

    #[error("Equipment profile is missing")]
    EquipmentNotDefined,

    #[error("Recipe draft is missing")]
    DraftNotDefined,

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to write CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("An error occurred while writing the breakdown: {0}")]
    BreakdownError(#[from] anyhow::Error),
}
