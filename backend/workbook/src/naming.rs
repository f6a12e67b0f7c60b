//! Worksheet naming rules.

use std::collections::HashSet;

pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Make `name` legal as a worksheet name: forbidden characters become `_`,
/// leading/trailing apostrophes are dropped and the result is cut to 31
/// characters. A legal name comes back unchanged.
pub fn sanitize_sheet_name(name: &str) -> String {
    let replaced: String = name
        .trim()
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();
    let trimmed = replaced.trim_matches('\'');
    let cut: String = trimmed.chars().take(MAX_SHEET_NAME_LEN).collect();
    let cut = cut.trim_end_matches('\'').trim_end().to_string();
    if cut.is_empty() {
        "Sheet".to_string()
    } else {
        cut
    }
}

/// Quote a sheet name for use in a formula reference.
pub fn quote_sheet_name(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}

/// Hands out legal names that are unique case-insensitively within one
/// workbook.
#[derive(Debug, Default)]
pub struct SheetNamer {
    taken: HashSet<String>,
}

impl SheetNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, wanted: &str) -> String {
        let base = sanitize_sheet_name(wanted);
        if self.taken.insert(base.to_lowercase()) {
            return base;
        }
        let mut n = 2;
        loop {
            let suffix = format!(" ({n})");
            let room = MAX_SHEET_NAME_LEN - suffix.chars().count();
            let stem: String = base.chars().take(room).collect();
            let candidate = format!("{}{suffix}", stem.trim_end());
            if self.taken.insert(candidate.to_lowercase()) {
                return candidate;
            }
            n += 1;
        }
    }
}
