//! Document family detection from the input file name.

use std::path::Path;

use crate::schema::DEFAULT_FAMILY;

/// Families the built-in catalog knows about.
pub const KNOWN_FAMILIES: [&str; 6] = [
    "debian",
    "ubuntu",
    "rhel",
    "windows",
    "windows_server",
    DEFAULT_FAMILY,
];

// Checked in order; windows_server must precede windows.
const FAMILY_HINTS: &[(&str, &[&str])] = &[
    ("debian", &["debian"]),
    ("ubuntu", &["ubuntu"]),
    ("rhel", &["red_hat", "redhat", "rhel", "rocky", "almalinux"]),
    ("windows_server", &["windows_server"]),
    ("windows", &["windows"]),
];

/// Best-effort family guess; falls back to `default`.
pub fn detect_family(path: &Path) -> &'static str {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let normalized: String = stem
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect();

    FAMILY_HINTS
        .iter()
        .find(|(_, hints)| hints.iter().any(|h| normalized.contains(h)))
        .map(|(family, _)| *family)
        .unwrap_or(DEFAULT_FAMILY)
}
