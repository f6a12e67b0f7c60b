//! Line cleanup, page selection, and per-field whitespace normalization.

use benchforge_core::ConvertError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Page footers left behind by text extraction, e.g. "Page 123".
static PAGE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bPage\s+\d+\b").unwrap());

/// Bullets and enumerations that begin a list item.
static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[•●▪◦■\-\*–]\s|o\s|\d{1,2}[.)]\s|[a-z][.)]\s)").unwrap());

/// Shell and PowerShell prompts that start a command line in audit text.
static PROMPT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:#|\$|PS>|PS [A-Z]:\\.*>)\s").unwrap());

/// Strip page markers and surrounding whitespace from one extracted line.
pub fn clean_line(line: &str) -> String {
    PAGE_MARKER_RE.replace_all(line, "").trim().to_string()
}

/// Join the pages from `start_page` (1-based) onward into one text stream.
pub fn join_pages(pages: &[String], start_page: usize) -> Result<String, ConvertError> {
    let start = start_page.max(1);
    if start > pages.len() {
        return Err(ConvertError::StartPageOutOfRange {
            start_page: start,
            page_count: pages.len(),
        });
    }
    Ok(pages[start - 1..].join("\n"))
}

/// True for a line that should keep its own line break inside a field.
fn starts_own_line(line: &str) -> bool {
    LIST_ITEM_RE.is_match(line) || PROMPT_RE.is_match(line)
}

/// Collapse wrapped lines of one field into paragraphs.
///
/// A blank line ends a paragraph; list items and command prompts start a new
/// line; every other line is joined to the previous one with a space.
pub fn normalize_field<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            continue;
        }
        if starts_own_line(line) && !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        out.push(current);
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_page_markers() {
        assert_eq!(clean_line("  Page 42  "), "");
        assert_eq!(clean_line("Run the command Page 7 below"), "Run the command  below");
        assert_eq!(clean_line("Pages are fine"), "Pages are fine");
    }

    #[test]
    fn join_pages_starts_at_one_based_offset() {
        let pages = vec!["toc".to_string(), "body one".to_string(), "body two".to_string()];
        assert_eq!(join_pages(&pages, 2).unwrap(), "body one\nbody two");
        assert_eq!(join_pages(&pages, 0).unwrap(), "toc\nbody one\nbody two");
    }

    #[test]
    fn join_pages_rejects_offset_past_end() {
        let pages = vec!["only".to_string()];
        let err = join_pages(&pages, 5).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::StartPageOutOfRange {
                start_page: 5,
                page_count: 1
            }
        ));
    }

    #[test]
    fn wrapped_lines_collapse_into_one_paragraph() {
        let lines = ["The password history setting", "determines reuse.", "", "Second paragraph."];
        assert_eq!(
            normalize_field(&lines),
            "The password history setting determines reuse.\nSecond paragraph."
        );
    }

    #[test]
    fn list_items_and_prompts_keep_their_lines() {
        let lines = [
            "Run the following:",
            "# grep -E '^PASS_MAX_DAYS' /etc/login.defs",
            "Verify that:",
            "• the value is 365 or less",
            "• the value is not 0,",
            "which disables expiry",
        ];
        assert_eq!(
            normalize_field(&lines),
            "Run the following:\n\
             # grep -E '^PASS_MAX_DAYS' /etc/login.defs Verify that:\n\
             • the value is 365 or less\n\
             • the value is not 0, which disables expiry"
        );
    }

    #[test]
    fn empty_field_normalizes_to_empty() {
        let lines: [&str; 2] = ["", "   "];
        assert_eq!(normalize_field(&lines), "");
    }
}
