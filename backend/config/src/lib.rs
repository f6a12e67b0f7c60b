//! `benchforge-config`: section catalogs and run settings.
//!
//! Provides:
//! - Section catalog schema (family → ordered prefix/name table)
//! - JSON / YAML / TOML loading with a built-in fallback
//! - Catalog validation
//! - Document family detection from file names

pub mod defaults;
pub mod detect;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::{builtin_catalog, DEFAULT_START_PAGE};
pub use detect::{detect_family, KNOWN_FAMILIES};
pub use io::{catalog_file_path, config_dir, load_catalog, parse_catalog, CatalogFormat};
pub use schema::{CatalogError, FamilyTable, SectionCatalog, DEFAULT_FAMILY};
pub use validation::{validate, CatalogValidationError, ValidationReport};

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use benchforge_core::SectionMap;
use tracing::{error, info, warn};

/// Where the section catalog for a run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// `--sections` on the command line.
    Flag(PathBuf),
    /// `BENCHFORGE_SECTIONS`.
    Env(PathBuf),
    /// `sections.json` in the config directory.
    ConfigDir(PathBuf),
    BuiltIn,
}

impl CatalogSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            CatalogSource::Flag(p) | CatalogSource::Env(p) | CatalogSource::ConfigDir(p) => Some(p),
            CatalogSource::BuiltIn => None,
        }
    }
}

/// Pick the catalog location: flag, then env, then config dir, then built-in.
pub fn locate_catalog(flag: Option<&Path>) -> CatalogSource {
    locate_catalog_with(flag, |key| std::env::var(key).ok())
}

pub fn locate_catalog_with(
    flag: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> CatalogSource {
    if let Some(path) = flag {
        return CatalogSource::Flag(path.to_path_buf());
    }
    if let Some(path) = lookup("BENCHFORGE_SECTIONS").filter(|p| !p.trim().is_empty()) {
        return CatalogSource::Env(PathBuf::from(path));
    }
    let candidate = catalog_file_path(&io::config_dir_with(&lookup));
    if candidate.exists() {
        return CatalogSource::ConfigDir(candidate);
    }
    CatalogSource::BuiltIn
}

/// Load and validate the catalog. Validation warnings are logged;
/// validation errors fail the load.
pub async fn load_and_validate(source: &CatalogSource) -> Result<SectionCatalog> {
    let catalog = match source.path() {
        Some(path) => load_catalog(path).await?,
        None => builtin_catalog(),
    };

    let report = validate(&catalog);
    for warning in &report.warnings {
        warn!(path = %warning.path, message = %warning.message, "Catalog warning");
    }
    for err in &report.errors {
        error!(path = %err.path, message = %err.message, "Catalog error");
    }
    if !report.is_valid() {
        let first = &report.errors[0];
        bail!(
            "section catalog has {} error(s); first: {}",
            report.errors.len(),
            first
        );
    }
    Ok(catalog)
}

/// Resolve the [`SectionMap`] for `family` from the located catalog.
pub async fn resolve_section_map(flag: Option<&Path>, family: &str) -> Result<SectionMap> {
    let source = locate_catalog(flag);
    let catalog = load_and_validate(&source).await?;
    let map = catalog.section_map(family)?;
    if is_fallback_family(family, map.family()) {
        warn!(requested = family, used = map.family(), "Family not in catalog; using fallback family");
    }
    info!(family = map.family(), sections = map.len(), ?source, "Section map ready");
    Ok(map)
}

/// Family names compare case-insensitively, as in [`SectionCatalog::family`].
fn is_fallback_family(requested: &str, used: &str) -> bool {
    !requested.eq_ignore_ascii_case(used)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_env() {
        let source = locate_catalog_with(Some(Path::new("mine.yaml")), |_| {
            Some("/env/sections.json".to_string())
        });
        assert_eq!(source, CatalogSource::Flag(PathBuf::from("mine.yaml")));
    }

    #[test]
    fn env_then_config_dir_then_builtin() {
        let source = locate_catalog_with(None, |key| {
            (key == "BENCHFORGE_SECTIONS").then(|| "/env/sections.toml".to_string())
        });
        assert_eq!(source, CatalogSource::Env(PathBuf::from("/env/sections.toml")));

        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_string_lossy().to_string();
        let lookup = |key: &str| (key == "BENCHFORGE_CONFIG_DIR").then(|| dir_str.clone());
        assert_eq!(locate_catalog_with(None, lookup), CatalogSource::BuiltIn);

        std::fs::write(dir.path().join("sections.json"), "{}").unwrap();
        assert_eq!(
            locate_catalog_with(None, lookup),
            CatalogSource::ConfigDir(dir.path().join("sections.json"))
        );
    }

    #[tokio::test]
    async fn invalid_catalog_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sections.json");
        std::fs::write(&path, r#"{"windows": {"zero": "ACCOUNT POLICIES"}}"#).unwrap();
        let err = load_and_validate(&CatalogSource::Flag(path)).await.unwrap_err();
        assert!(err.to_string().contains("1 error"), "{err}");
    }

    #[tokio::test]
    async fn builtin_source_resolves_windows() {
        let catalog = load_and_validate(&CatalogSource::BuiltIn).await.unwrap();
        let map = catalog.section_map("windows").unwrap();
        assert_eq!(map.lookup(1).unwrap().name, "ACCOUNT POLICIES");
    }

    #[test]
    fn family_case_is_not_a_fallback() {
        assert!(!is_fallback_family("Windows", "windows"));
        assert!(!is_fallback_family("RHEL", "rhel"));
        assert!(is_fallback_family("solaris", "default"));
    }

    #[tokio::test]
    async fn mixed_case_family_resolves_to_its_table() {
        let catalog = load_and_validate(&CatalogSource::BuiltIn).await.unwrap();
        let map = catalog.section_map("Windows").unwrap();
        assert_eq!(map.family(), "windows");
        assert!(!is_fallback_family("Windows", map.family()));
    }
}
