//! Catalog file location and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::defaults::builtin_catalog;
use crate::schema::{CatalogError, SectionCatalog};

/// Catalog file name within the config directory.
const CATALOG_FILE_NAME: &str = "sections.json";

/// Resolve the benchforge config directory.
/// Priority: `BENCHFORGE_CONFIG_DIR` env > `~/.benchforge/`
pub fn config_dir() -> PathBuf {
    config_dir_with(|key| std::env::var(key).ok())
}

pub fn config_dir_with(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(dir) = lookup("BENCHFORGE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".benchforge"),
        None => PathBuf::from(".benchforge"),
    }
}

pub fn catalog_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CATALOG_FILE_NAME)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
    Toml,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(CatalogFormat::Json),
            "yaml" | "yml" => Ok(CatalogFormat::Yaml),
            "toml" => Ok(CatalogFormat::Toml),
            _ => Err(CatalogError::UnsupportedFormat(ext)),
        }
    }
}

/// Parse catalog text in the given format.
pub fn parse_catalog(raw: &str, format: CatalogFormat) -> Result<SectionCatalog> {
    let value: Value = match format {
        CatalogFormat::Json => serde_json::from_str(raw).context("Failed to parse catalog JSON")?,
        CatalogFormat::Yaml => serde_yaml::from_str(raw).context("Failed to parse catalog YAML")?,
        CatalogFormat::Toml => toml::from_str(raw).context("Failed to parse catalog TOML")?,
    };
    Ok(SectionCatalog::from_value(&value)?)
}

/// Load a catalog from disk.
///
/// A missing file is not an error: the built-in catalog is returned and a
/// warning logged.
pub async fn load_catalog(path: &Path) -> Result<SectionCatalog> {
    if !path.exists() {
        warn!(path = %path.display(), "Section catalog not found; using built-in catalog");
        return Ok(builtin_catalog());
    }

    let format = CatalogFormat::from_path(path)?;
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read section catalog: {}", path.display()))?;
    debug!(path = %path.display(), bytes = raw.len(), ?format, "Read section catalog");

    let catalog = parse_catalog(&raw, format)
        .with_context(|| format!("Invalid section catalog at: {}", path.display()))?;
    info!(path = %path.display(), families = catalog.families.len(), "Loaded section catalog");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(CatalogFormat::from_path(Path::new("a.JSON")).unwrap(), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_path(Path::new("a.yml")).unwrap(), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_path(Path::new("a.toml")).unwrap(), CatalogFormat::Toml);
        assert!(CatalogFormat::from_path(Path::new("a.ini")).is_err());
    }

    #[test]
    fn yaml_and_toml_keep_order() {
        let yaml = "windows:\n  \"2\": LOCAL POLICIES\n  \"1\": ACCOUNT POLICIES\n";
        let toml = "[windows]\n\"2\" = \"LOCAL POLICIES\"\n\"1\" = \"ACCOUNT POLICIES\"\n";
        for (raw, format) in [(yaml, CatalogFormat::Yaml), (toml, CatalogFormat::Toml)] {
            let map = parse_catalog(raw, format).unwrap().section_map("windows").unwrap();
            assert_eq!(map.entries()[0].prefix, 2, "{format:?}");
            assert_eq!(map.entries()[1].name, "ACCOUNT POLICIES");
        }
    }

    #[test]
    fn config_dir_prefers_env() {
        let dir = config_dir_with(|key| {
            (key == "BENCHFORGE_CONFIG_DIR").then(|| "/etc/benchforge".to_string())
        });
        assert_eq!(catalog_file_path(&dir), PathBuf::from("/etc/benchforge/sections.json"));
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = load_catalog(&dir.path().join("absent.json")).await.unwrap();
        assert_eq!(catalog, builtin_catalog());
    }

    #[tokio::test]
    async fn loads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sections.json");
        std::fs::write(&path, r#"{"windows": {"1": "ACCOUNT POLICIES"}}"#).unwrap();
        let catalog = load_catalog(&path).await.unwrap();
        assert_eq!(catalog.family_names().collect::<Vec<_>>(), vec!["windows"]);
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sections.yaml");
        std::fs::write(&path, "- just\n- a list\n").unwrap();
        let err = load_catalog(&path).await.unwrap_err();
        assert!(format!("{err:#}").contains("table of families"), "{err:#}");
    }
}
