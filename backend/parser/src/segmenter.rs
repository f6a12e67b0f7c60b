//! Recommendation segmenter: splits the text stream at numbering anchors.
//!
//! An anchor is a line that starts with a hierarchical number (`1`, `1.1`,
//! `18.9.102.1`, ...), whitespace, and a capitalized title, optionally with a
//! profile level tag such as `(L1)` in between. Everything up to the next
//! anchor is the block body. Text before the first anchor is skipped.
//!
//! Inside a CIS Controls span, mapping-table rows look like anchors
//! (`4.8 Uninstall or Disable ...` followed by `v8`). Those stay in the body
//! unless the line is followed by a field label or by one of its own child
//! anchors. The stream ends at the first `Appendix:` heading.

use benchforge_core::{Field, RawBlock, SectionNumber};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::fields::match_label;
use crate::text::clean_line;

static ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([1-9]\d*(?:\.[1-9]\d*)*)\s+(?:\((L\d+)\)\s*)?(.*)$").unwrap()
});

/// Controls version marker under a mapping-table row (`v7`, `v8 ...`).
static CONTROLS_VERSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^v\d+\b").unwrap());

static APPENDIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^appendix\s*:").unwrap());

/// Non-empty lines inspected after an anchor-shaped line in a controls span.
const LOOKAHEAD_LINES: usize = 10;

/// The parsed parts of an anchor line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub number: SectionNumber,
    pub level: Option<String>,
    pub title: String,
}

/// Parse a cleaned line as an anchor.
///
/// Returns `None` when the number is not followed by capitalized title text
/// (or a level tag), so enumerations and stray numbers stay in the body.
pub fn parse_anchor(line: &str) -> Option<Anchor> {
    let caps = ANCHOR_RE.captures(line)?;
    let number: SectionNumber = caps[1].parse().ok()?;
    let level = caps.get(2).map(|m| m.as_str().to_string());
    let title = caps[3].trim().to_string();

    let capitalized = title.chars().next().is_some_and(char::is_uppercase);
    if !capitalized && level.is_none() {
        return None;
    }
    Some(Anchor {
        number,
        level,
        title,
    })
}

/// Lazy iterator of [`RawBlock`]s in document order.
///
/// The only scan state is the line cursor; [`Segmenter::restart`] rewinds
/// it to the start of the stream.
#[derive(Debug, Clone)]
pub struct Segmenter<'a> {
    lines: Vec<&'a str>,
    cursor: usize,
}

impl<'a> Segmenter<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            cursor: 0,
        }
    }

    pub fn restart(&mut self) {
        self.cursor = 0;
    }

    /// Advance the cursor to the next anchor line and parse it.
    fn seek_anchor(&mut self) -> Option<Anchor> {
        while self.cursor < self.lines.len() {
            let line = clean_line(self.lines[self.cursor]);
            if self.at_appendix(&line) {
                return None;
            }
            if let Some(anchor) = parse_anchor(&line) {
                return Some(anchor);
            }
            self.cursor += 1;
        }
        None
    }

    /// An appendix heading ends the stream; the cursor jumps to the end.
    fn at_appendix(&mut self, line: &str) -> bool {
        if APPENDIX_RE.is_match(line) {
            self.cursor = self.lines.len();
            return true;
        }
        false
    }

    /// Whether the anchor-shaped line at `at` is a row of a controls
    /// mapping table rather than the start of a new block.
    fn is_controls_row(&self, at: usize, anchor: &Anchor) -> bool {
        let following = self.lines[at + 1..]
            .iter()
            .map(|l| clean_line(l))
            .filter(|l| !l.is_empty())
            .take(LOOKAHEAD_LINES);
        for line in following {
            if CONTROLS_VERSION_RE.is_match(&line) {
                return true;
            }
            if match_label(&line).is_some() {
                return false;
            }
            if let Some(next) = parse_anchor(&line) {
                return !next.number.parts().starts_with(anchor.number.parts());
            }
        }
        true
    }
}

impl Iterator for Segmenter<'_> {
    type Item = RawBlock;

    fn next(&mut self) -> Option<RawBlock> {
        let anchor = self.seek_anchor()?;
        let line = self.cursor + 1;
        self.cursor += 1;

        let mut body = Vec::new();
        let mut in_controls = false;
        while self.cursor < self.lines.len() {
            let text = clean_line(self.lines[self.cursor]);
            if APPENDIX_RE.is_match(&text) {
                break;
            }
            if let Some(next) = parse_anchor(&text) {
                let row = in_controls
                    && next.number.depth() >= 2
                    && self.is_controls_row(self.cursor, &next);
                if !row {
                    break;
                }
            } else if let Some((field, _)) = match_label(&text) {
                in_controls = field == Field::CisControls;
            }
            body.push(text);
            self.cursor += 1;
        }

        Some(RawBlock {
            number: anchor.number,
            level: anchor.level,
            title_line: anchor.title,
            body,
            line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
CIS Benchmark preamble that is not a block
1 Account Policies
This section contains account policies.
1.1 Password Policy
1.1.1 (L1) Ensure 'Enforce password history' is set to '24 or more
password(s)' (Automated)
Profile Applicability:
 Level 1
Audit:
Navigate to the UI path and
1 check the value, 2 more steps
Page 17
1.1.2 Ensure 'Maximum password age' is set (Automated)
Remediation:
Set the value.
";

    fn numbers(text: &str) -> Vec<String> {
        Segmenter::new(text).map(|b| b.number.to_string()).collect()
    }

    #[test]
    fn anchors_need_capitalized_title_or_level() {
        assert!(parse_anchor("1.1.2 Ensure something").is_some());
        assert!(parse_anchor("2 LOCAL POLICIES").is_some());
        assert!(parse_anchor("1 check the value").is_none());
        assert!(parse_anchor("1.1.2").is_none());
        assert!(parse_anchor("1. Navigate to").is_none());
        assert!(parse_anchor("see 1.1.2 Ensure").is_none());
        assert!(parse_anchor("1.0 Ensure").is_none());

        let tagged = parse_anchor("5.2.1 (L2) ensure lowercase title").unwrap();
        assert_eq!(tagged.level.as_deref(), Some("L2"));
        assert_eq!(tagged.title, "ensure lowercase title");
    }

    #[test]
    fn blocks_follow_document_order() {
        assert_eq!(numbers(SAMPLE), vec!["1", "1.1", "1.1.1", "1.1.2"]);
    }

    #[test]
    fn non_anchor_numbers_fold_into_body() {
        let blocks: Vec<RawBlock> = Segmenter::new(SAMPLE).collect();
        let block = &blocks[2];
        assert_eq!(block.level.as_deref(), Some("L1"));
        assert_eq!(block.title_line, "Ensure 'Enforce password history' is set to '24 or more");
        assert!(block.body.iter().any(|l| l == "1 check the value, 2 more steps"));
        // Page footer is blanked, not kept as text.
        assert!(block.body.iter().all(|l| !l.contains("Page 17")));
        assert_eq!(block.line, 5);
    }

    #[test]
    fn restart_replays_identical_sequence() {
        let mut segmenter = Segmenter::new(SAMPLE);
        let first: Vec<RawBlock> = segmenter.by_ref().collect();
        segmenter.restart();
        let second: Vec<RawBlock> = segmenter.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn deep_numbering_is_supported() {
        let text = "18.9.102.1.1.3 Ensure deep rule\nAudit:\nx\n";
        assert_eq!(numbers(text), vec!["18.9.102.1.1.3"]);
    }

    const CONTROLS_TABLE: &str = "\
1.1.1 Ensure cramfs is disabled (Automated)
Audit:
Run modprobe -n -v cramfs.
Remediation:
Add install cramfs /bin/true.
CIS Controls:
Controls
Control IG 1 IG 2 IG 3
Version
4.8 Uninstall or Disable Unnecessary Services on Enterprise Assets and Software
v8 ● ●
9.2 Ensure Only Approved Ports, Protocols and Services Are Running
v7 ● ●
1.2 Configure Software Updates
1.2.1 Ensure package manager repositories are configured (Manual)
Profile Applicability:
 Level 1 - Server
Audit:
Run apt-cache policy.
CIS Controls:
Version
4.1 Establish and Maintain a Secure Configuration Process
v8 ● ● ●
Appendix: Summary Table
1 Initial Setup
1.1.1 Ensure cramfs is disabled (Automated)
";

    #[test]
    fn controls_table_rows_stay_in_body() {
        let blocks: Vec<RawBlock> = Segmenter::new(CONTROLS_TABLE).collect();
        let numbers: Vec<String> = blocks.iter().map(|b| b.number.to_string()).collect();
        assert_eq!(numbers, vec!["1.1.1", "1.2", "1.2.1"]);

        let first = &blocks[0];
        assert!(first.body.iter().any(|l| l.starts_with("4.8 Uninstall")));
        assert!(first.body.iter().any(|l| l.starts_with("9.2 Ensure Only Approved")));
        assert_eq!(first.body.last().map(String::as_str), Some("v7 ● ●"));
    }

    #[test]
    fn appendix_ends_the_stream() {
        let blocks: Vec<RawBlock> = Segmenter::new(CONTROLS_TABLE).collect();
        let last = &blocks[2];
        assert_eq!(last.body.last().map(String::as_str), Some("v8 ● ● ●"));
        assert!(last.body.iter().all(|l| !l.contains("Appendix")));
        assert!(numbers("Appendix: Summary Table\n1.1 Ensure x (Automated)\n").is_empty());
    }

    #[test]
    fn anchors_outside_controls_span_always_split() {
        let text = "1.1 Ensure a (Automated)\nAudit:\nx\n1.2 Ensure b (Automated)\nv8\n";
        assert_eq!(numbers(text), vec!["1.1", "1.2"]);
    }

    #[test]
    fn text_without_anchors_yields_nothing() {
        assert!(numbers("just prose\nand more prose\n").is_empty());
        assert!(numbers("").is_empty());
    }
}
