//! Section catalog schema.
//!
//! A catalog is a table keyed by document family; each family is an
//! ordered mapping from top-level prefix (as a string) to section name:
//!
//! ```json
//! { "windows": { "1": "ACCOUNT POLICIES", "2": "LOCAL POLICIES" } }
//! ```
//!
//! Entries are kept as raw strings so validation can point at bad prefixes
//! instead of failing the whole parse.

use benchforge_core::SectionMap;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Family used when the requested one is missing from the catalog.
pub const DEFAULT_FAMILY: &str = "default";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("section catalog must be a table of families")]
    NotATable,

    #[error("family '{0}' must map prefixes to section names")]
    FamilyNotATable(String),

    #[error("family '{family}', prefix '{prefix}': section name must be a string")]
    NameNotAString { family: String, prefix: String },

    #[error("unknown document family '{0}' and no '{DEFAULT_FAMILY}' family to fall back on")]
    UnknownFamily(String),

    #[error("unsupported catalog format '{0}' (expected .json, .yaml, .yml or .toml)")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FamilyTable {
    pub name: String,
    /// `(prefix, section name)` in file order.
    pub sections: Vec<(String, String)>,
}

impl FamilyTable {
    /// Build the run's [`SectionMap`]. Entries whose prefix is not a
    /// positive integer are skipped; validation reports them.
    pub fn to_section_map(&self) -> SectionMap {
        let pairs = self.sections.iter().filter_map(|(prefix, name)| {
            parse_prefix(prefix).map(|p| (p, name.trim().to_string()))
        });
        SectionMap::new(self.name.clone(), pairs)
    }
}

/// Parse a catalog prefix; `None` unless it is a positive integer.
pub fn parse_prefix(prefix: &str) -> Option<u32> {
    prefix.trim().parse::<u32>().ok().filter(|p| *p > 0)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionCatalog {
    pub families: Vec<FamilyTable>,
}

impl SectionCatalog {
    /// Convert a parsed document (from any supported format) into a catalog.
    pub fn from_value(value: &Value) -> Result<Self, CatalogError> {
        let Value::Object(families) = value else {
            return Err(CatalogError::NotATable);
        };

        let mut catalog = SectionCatalog::default();
        for (family, table) in families {
            let Value::Object(entries) = table else {
                return Err(CatalogError::FamilyNotATable(family.clone()));
            };
            let mut sections = Vec::with_capacity(entries.len());
            for (prefix, name) in entries {
                let Value::String(name) = name else {
                    return Err(CatalogError::NameNotAString {
                        family: family.clone(),
                        prefix: prefix.clone(),
                    });
                };
                sections.push((prefix.clone(), name.clone()));
            }
            catalog.families.push(FamilyTable {
                name: family.clone(),
                sections,
            });
        }
        Ok(catalog)
    }

    pub fn family(&self, name: &str) -> Option<&FamilyTable> {
        self.families
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    pub fn family_names(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(|f| f.name.as_str())
    }

    /// Table for `family`, or the default family when it is not listed.
    pub fn resolve(&self, family: &str) -> Result<&FamilyTable, CatalogError> {
        self.family(family)
            .or_else(|| self.family(DEFAULT_FAMILY))
            .ok_or_else(|| CatalogError::UnknownFamily(family.to_string()))
    }

    pub fn section_map(&self, family: &str) -> Result<SectionMap, CatalogError> {
        self.resolve(family).map(FamilyTable::to_section_map)
    }
}
