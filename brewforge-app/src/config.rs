use anyhow::{Context, Result};
use brewforge_core::{equipment::EquipmentCatalog, styles::parse_catalog};
use brewforge_schemas::{draft::RecipeDraft, style::StyleGuideline};
use std::{fs, path::Path};

/// Built-in equipment profiles plus any YAML files found in `dir`.
pub fn load_catalog(dir: Option<&Path>) -> Result<EquipmentCatalog> {
    let mut catalog = EquipmentCatalog::builtin();
    if let Some(dir) = dir {
        println!("Loading equipment profiles from '{}'...", dir.display());
        let count = catalog
            .merge_dir(dir)
            .with_context(|| format!("Failed to load equipment profiles from {:?}", dir))?;
        println!("Loaded {} additional profile(s).", count);
    }
    Ok(catalog)
}

/// Reads a recipe draft; `.yaml`/`.yml` files are parsed as YAML, anything else as JSON.
pub fn load_draft(path: &Path) -> Result<RecipeDraft> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft {:?}", path))?;
    let is_yaml = path
        .extension()
        .map_or(false, |ext| ext == "yaml" || ext == "yml");

    let draft = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from {:?}", path))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from {:?}", path))?
    };
    Ok(draft)
}

/// Reads a BJCP style catalog (a JSON array of guidelines).
pub fn load_styles(path: &Path) -> Result<Vec<StyleGuideline>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read style catalog {:?}", path))?;
    parse_catalog(&content).with_context(|| format!("Failed to parse style catalog {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drafts_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("draft.yml");
        fs::write(
            &yaml,
            "name: Stout\nfermentables:\n  Pale: [90, 1.037]\n  Roast: [10, 1.025]\n",
        )
        .unwrap();
        let json = dir.path().join("draft.json");
        fs::write(&json, r#"{"name": "Stout", "target_og": "1.060"}"#).unwrap();

        assert_eq!(load_draft(&yaml).unwrap().fermentables.unwrap().len(), 2);
        assert_eq!(load_draft(&json).unwrap().target_og, Some(1.06));
    }

    #[test]
    fn broken_draft_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_draft(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.json"));
    }

    #[test]
    fn catalog_without_dir_is_builtin() {
        let catalog = load_catalog(None).unwrap();
        assert!(catalog.get("Grainfather G30").is_ok());
    }
}
