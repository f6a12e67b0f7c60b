//! Built-in defaults: the bundled section catalog and run settings.

use once_cell::sync::Lazy;

use crate::schema::SectionCatalog;

/// First page scanned when the caller does not choose one. Benchmark
/// documents open with cover, legal and contents pages.
pub const DEFAULT_START_PAGE: usize = 10;

const BUILTIN_CATALOG_JSON: &str = include_str!("../data/sections.json");

static BUILTIN_CATALOG: Lazy<SectionCatalog> = Lazy::new(|| {
    serde_json::from_str(BUILTIN_CATALOG_JSON)
        .ok()
        .and_then(|value| SectionCatalog::from_value(&value).ok())
        .unwrap_or_default()
});

/// Catalog shipped with the binary (debian, ubuntu, rhel, windows,
/// windows_server, default).
pub fn builtin_catalog() -> SectionCatalog {
    BUILTIN_CATALOG.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::KNOWN_FAMILIES;
    use crate::validation::validate;

    #[test]
    fn builtin_catalog_covers_every_known_family() {
        let catalog = builtin_catalog();
        for family in KNOWN_FAMILIES {
            assert!(catalog.family(family).is_some(), "missing {family}");
        }
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let report = validate(&builtin_catalog());
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    }

    #[test]
    fn windows_local_policies() {
        let map = builtin_catalog().section_map("windows").unwrap();
        assert_eq!(map.lookup(2).unwrap().name, "LOCAL POLICIES");
        assert_eq!(map.lookup(18).unwrap().name, "ADMIN TEMPLATES (COMPUTER)");
    }
}
