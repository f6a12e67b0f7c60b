//! In-memory workbook model.
//!
//! Builders produce this model; [`crate::xlsx`] serializes it. Keeping the
//! two apart means layout and formulas are testable without touching disk.

use std::fmt;

use serde::Serialize;

/// Zero-based cell coordinates, matching the xlsx writer.
pub type Row = u32;
pub type Col = u16;

/// Spreadsheet column letters for a zero-based index (`0` → `A`, `26` → `AA`).
pub fn column_letter(col: Col) -> String {
    let mut n = u32::from(col) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// `A1`-style reference for a zero-based cell.
pub fn cell_ref(row: Row, col: Col) -> String {
    format!("{}{}", column_letter(col), row + 1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellRange {
    pub first_row: Row,
    pub first_col: Col,
    pub last_row: Row,
    pub last_col: Col,
}

impl CellRange {
    pub fn new(first_row: Row, first_col: Col, last_row: Row, last_col: Col) -> Self {
        Self {
            first_row,
            first_col,
            last_row,
            last_col,
        }
    }

    /// A vertical slice of one column.
    pub fn column(col: Col, first_row: Row, last_row: Row) -> Self {
        Self::new(first_row, col, last_row, col)
    }

    /// Absolute reference (`$C$5:$C$20`) for use inside formulas.
    pub fn absolute(&self) -> String {
        format!(
            "${}${}:${}${}",
            column_letter(self.first_col),
            self.first_row + 1,
            column_letter(self.last_col),
            self.last_row + 1
        )
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            cell_ref(self.first_row, self.first_col),
            cell_ref(self.last_row, self.last_col)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CellValue {
    Blank,
    Text(String),
    Number(f64),
    /// A live formula plus the value a non-recalculating viewer shows.
    Formula { expr: String, cached: f64 },
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn formula(expr: impl Into<String>, cached: f64) -> Self {
        CellValue::Formula {
            expr: expr.into(),
            cached,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Named cell styles; the writer maps each onto a concrete format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStyle {
    /// 14pt bold, centered.
    Banner,
    /// Italic, centered.
    Subtitle,
    /// White bold on dark blue, centered and wrapped.
    Header,
    /// Wrapped, top-aligned body text.
    Body,
    Count,
    Percent,
    TotalLabel,
    TotalCount,
    TotalPercent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub row: Row,
    pub col: Col,
    pub value: CellValue,
    pub style: CellStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedCell {
    pub range: CellRange,
    pub text: String,
    pub style: CellStyle,
}

/// Single-choice list constraint over a range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListValidation {
    pub range: CellRange,
    pub choices: Vec<String>,
}

/// Fill the range with `fill` (RGB) where `formula` is true, evaluated
/// relative to the range's top-left cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightRule {
    pub range: CellRange,
    pub formula: String,
    pub fill: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Worksheet {
    pub name: String,
    pub cells: Vec<Cell>,
    pub merges: Vec<MergedCell>,
    pub column_widths: Vec<(Col, f64)>,
    pub row_heights: Vec<(Row, f64)>,
    /// Rows and columns above/left of this cell stay visible while scrolling.
    pub freeze: Option<(Row, Col)>,
    pub validations: Vec<ListValidation>,
    pub highlights: Vec<HighlightRule>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn put(&mut self, row: Row, col: Col, value: CellValue, style: CellStyle) {
        self.cells.push(Cell {
            row,
            col,
            value,
            style,
        });
    }

    pub fn merge(&mut self, range: CellRange, text: impl Into<String>, style: CellStyle) {
        self.merges.push(MergedCell {
            range,
            text: text.into(),
            style,
        });
    }

    /// Last cell written at `(row, col)`, if any.
    pub fn cell(&self, row: Row, col: Col) -> Option<&Cell> {
        self.cells.iter().rev().find(|c| c.row == row && c.col == col)
    }

    pub fn value(&self, row: Row, col: Col) -> Option<&CellValue> {
        self.cell(row, col).map(|c| &c.value)
    }

    /// Highest row index holding a cell or merge.
    pub fn last_row(&self) -> Option<Row> {
        let cells = self.cells.iter().map(|c| c.row);
        let merges = self.merges.iter().map(|m| m.range.last_row);
        cells.chain(merges).max()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Workbook {
    pub worksheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.worksheets.iter().map(|s| s.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(2), "C");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn range_rendering() {
        let range = CellRange::column(2, 4, 19);
        assert_eq!(range.to_string(), "C5:C20");
        assert_eq!(range.absolute(), "$C$5:$C$20");
        assert_eq!(CellRange::new(0, 1, 0, 7).to_string(), "B1:H1");
    }

    #[test]
    fn later_writes_win() {
        let mut ws = Worksheet::new("s");
        ws.put(0, 0, CellValue::text("a"), CellStyle::Body);
        ws.put(0, 0, CellValue::text("b"), CellStyle::Body);
        assert_eq!(ws.value(0, 0).and_then(CellValue::as_text), Some("b"));
        assert_eq!(ws.last_row(), Some(0));
    }
}
