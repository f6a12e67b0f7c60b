//! Catalog validation with user-friendly messages.

use std::collections::HashSet;

use thiserror::Error;

use crate::schema::{parse_prefix, SectionCatalog};

/// Longest name a worksheet accepts; longer section names get shortened.
const MAX_SHEET_NAME_LEN: usize = 31;

/// A catalog problem with the entry path and a message.
#[derive(Debug, Error)]
#[error("Catalog validation error at '{path}': {message}")]
pub struct CatalogValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<CatalogValidationError>,
    pub warnings: Vec<CatalogValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(CatalogValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(CatalogValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

pub fn validate(catalog: &SectionCatalog) -> ValidationReport {
    let mut report = ValidationReport::default();
    if catalog.families.is_empty() {
        report.warn("", "Catalog defines no families; every record will be uncategorized");
    }
    for family in &catalog.families {
        if family.name.trim().is_empty() {
            report.error("", "Family name cannot be empty");
        }
        if family.sections.is_empty() {
            report.warn(&family.name, "Family has no sections");
        }

        let mut names = HashSet::new();
        for (prefix, name) in &family.sections {
            let path = format!("{}.{}", family.name, prefix);
            if parse_prefix(prefix).is_none() {
                report.error(&path, format!("Prefix '{prefix}' must be a positive integer"));
            }
            let name = name.trim();
            if name.is_empty() {
                report.error(&path, "Section name cannot be empty");
                continue;
            }
            if !names.insert(name.to_lowercase()) {
                report.warn(&path, format!("Section name '{name}' is used more than once"));
            }
            if name.chars().count() > MAX_SHEET_NAME_LEN {
                report.warn(
                    &path,
                    format!("Section name is longer than {MAX_SHEET_NAME_LEN} characters and will be shortened"),
                );
            }
        }
    }
    report
}
