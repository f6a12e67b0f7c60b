//! Benchmark title and version from the document's cover page.

/// Title used when the cover page yields no text.
pub const DEFAULT_TITLE: &str = "CIS Benchmark";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub version: Option<String>,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            version: None,
        }
    }
}

/// Read the cover page: title lines run until the version line, which
/// starts with `v` and contains a dash (e.g. `v2.0.0 - 03-28-2024`).
pub fn read_front_matter(first_page: &str) -> DocumentInfo {
    let mut title_lines: Vec<&str> = Vec::new();
    let mut version = None;

    for line in first_page.lines().map(str::trim) {
        if line.to_lowercase().starts_with('v') && line.contains('-') {
            version = Some(line.to_string());
            break;
        }
        if !line.is_empty() {
            title_lines.push(line);
        }
    }

    if title_lines.is_empty() {
        return DocumentInfo {
            version,
            ..Default::default()
        };
    }
    DocumentInfo {
        title: title_lines.join(" "),
        version,
    }
}
