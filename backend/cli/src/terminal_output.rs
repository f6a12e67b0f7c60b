//! Terminal output utilities: table rendering, ANSI formatting, run summaries.

use benchforge_core::{RunReport, SectionMap, Severity};
use benchforge_workbook::ScoreTable;

use crate::convert::ConversionSummary;

// ---------------------------------------------------------------------------
// ANSI Color/Style helpers
// ---------------------------------------------------------------------------

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Formatted notes
// ---------------------------------------------------------------------------

pub fn note_info(msg: &str) {
    if supports_color() {
        println!("{CYAN}{BOLD}ℹ{RESET} {msg}");
    } else {
        println!("INFO: {msg}");
    }
}

pub fn note_warn(msg: &str) {
    if supports_color() {
        println!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        println!("WARN: {msg}");
    }
}

/// Errors go to stderr.
pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

pub enum Align {
    Left,
    Right,
}

pub struct Column {
    pub header: String,
    pub align: Align,
    pub max_width: Option<usize>,
}

impl Column {
    pub fn left(header: impl Into<String>) -> Self {
        Self { header: header.into(), align: Align::Left, max_width: None }
    }
    pub fn right(header: impl Into<String>) -> Self {
        Self { header: header.into(), align: Align::Right, max_width: None }
    }
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Render a table with given columns and rows. Cells wider than a
/// column's `max_width` are cut with an ellipsis.
pub fn render_table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let num_cols = columns.len();
    let mut widths: Vec<usize> = columns.iter().map(|c| visible_len(&c.header)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(num_cols) {
            let w = visible_len(cell);
            let w = columns[i].max_width.map_or(w, |max| w.min(max));
            widths[i] = widths[i].max(w);
        }
    }

    let mut out = String::new();

    let header_cells: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| pad_cell(&col.header, widths[i], &col.align))
        .collect();
    out.push_str(&format!("{BOLD}  {}  {RESET}\n", header_cells.join("  ")));

    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("  {}  \n", sep.join("  ")));

    for row in rows {
        let cells: Vec<String> = (0..num_cols)
            .map(|i| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                pad_cell(&truncate(cell, widths[i]), widths[i], &columns[i].align)
            })
            .collect();
        out.push_str(&format!("  {}  \n", cells.join("  ")));
    }

    out
}

fn visible_len(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

fn truncate(s: &str, width: usize) -> String {
    if visible_len(s) <= width {
        return s.to_string();
    }
    let plain = strip_ansi(s);
    let kept: String = plain.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

fn pad_cell(s: &str, width: usize, align: &Align) -> String {
    let pad = width.saturating_sub(visible_len(s));
    match align {
        Align::Left => format!("{s}{}", " ".repeat(pad)),
        Align::Right => format!("{}{s}", " ".repeat(pad)),
    }
}

// ---------------------------------------------------------------------------
// Run summaries
// ---------------------------------------------------------------------------

pub fn render_scores(scores: &ScoreTable) -> String {
    let columns = [
        Column::left("Section").max_width(40),
        Column::right("Total"),
        Column::right("Compliant"),
        Column::right("Non-Compliant"),
        Column::right("To Review"),
        Column::right("% Compliant"),
    ];
    let rows: Vec<Vec<String>> = scores
        .rows
        .iter()
        .chain(std::iter::once(&scores.totals))
        .map(|row| {
            vec![
                row.section.clone(),
                row.total.to_string(),
                row.compliant.to_string(),
                row.non_compliant.to_string(),
                row.to_review.to_string(),
                format!("{:.2}%", row.compliance_percentage()),
            ]
        })
        .collect();
    render_table(&columns, &rows)
}

pub fn render_section_map(map: &SectionMap) -> String {
    let columns = [Column::right("Prefix"), Column::left("Section")];
    let rows: Vec<Vec<String>> = map
        .entries()
        .iter()
        .map(|e| vec![e.prefix.to_string(), e.name.clone()])
        .collect();
    render_table(&columns, &rows)
}

/// Anomalies by severity, warnings first.
pub fn print_anomalies(report: &RunReport) {
    for anomaly in report.warnings() {
        note_warn(&anomaly.describe());
    }
    let infos: Vec<_> = report
        .anomalies
        .iter()
        .filter(|a| a.severity() == Severity::Info)
        .collect();
    if !infos.is_empty() {
        note_info(&format!(
            "{} record(s) placed in the fallback sheet (no section mapping)",
            infos.len()
        ));
        for anomaly in infos {
            println!("  {DIM}{}{RESET}", anomaly.describe());
        }
    }
}

pub fn print_summary(summary: &ConversionSummary) {
    let report = &summary.report;
    println!();
    println!("{BOLD}{}{RESET}", summary.title);
    if let Some(version) = &summary.version {
        println!("{DIM}{version}{RESET}");
    }
    println!(
        "family {}, {} candidate blocks, {} headers dropped, {} recommendations in {} sheet(s)\n",
        summary.family,
        report.candidates,
        report.headers_dropped,
        report.accepted,
        summary.sheets.len()
    );
    print!("{}", render_scores(&summary.scores));
    println!();
    print_anomalies(report);
    note_success(&format!("Wrote {}", summary.output.display()));
}
