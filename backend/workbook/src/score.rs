//! Score sheet: one row of live status counts per section sheet.

use benchforge_core::Status;
use serde::Serialize;

use crate::columns::{NUMBER_COL, STATUS_COL};
use crate::model::{cell_ref, CellRange, CellStyle, CellValue, Col, Row, Worksheet};
use crate::naming::quote_sheet_name;

pub const SCORE_SHEET_NAME: &str = "SCORE";

const HEADERS: [&str; 8] = [
    "Section",
    "Compliant",
    "Non-Compliant",
    "To Review",
    "Total",
    "% Compliant",
    "% Non-Compliant",
    "% To Review",
];
const TOTAL_COL: Col = 4;
const FIRST_ROW: Row = 1;

/// Location and current contents of one section sheet's data block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetRef {
    pub section: String,
    pub sheet_name: String,
    /// Zero-based data rows, inclusive.
    pub first_row: Row,
    pub last_row: Row,
    pub rows: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub to_review: usize,
}

impl SheetRef {
    fn range(&self, col: Col) -> String {
        format!(
            "{}!{}",
            quote_sheet_name(&self.sheet_name),
            CellRange::column(col, self.first_row, self.last_row).absolute()
        )
    }

    fn count(&self, status: Status) -> usize {
        match status {
            Status::Compliant => self.compliant,
            Status::NonCompliant => self.non_compliant,
            Status::ToReview => self.to_review,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub section: String,
    pub total: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    pub to_review: usize,
}

impl ScoreRow {
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Compliant => self.compliant,
            Status::NonCompliant => self.non_compliant,
            Status::ToReview => self.to_review,
        }
    }

    /// Share of rows with `status`, in `0.0..=1.0`; zero when the section is empty.
    pub fn ratio(&self, status: Status) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(status) as f64 / self.total as f64
        }
    }

    /// Compliance percentage in `0.0..=100.0`.
    pub fn compliance_percentage(&self) -> f64 {
        self.ratio(Status::Compliant) * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreTable {
    pub rows: Vec<ScoreRow>,
    pub totals: ScoreRow,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreSheetBuilder {
    name: Option<String>,
}

impl ScoreSheetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn build(&self, sections: &[SheetRef]) -> (Worksheet, ScoreTable) {
        let name = self.name.as_deref().unwrap_or(SCORE_SHEET_NAME);
        let mut ws = Worksheet::new(name);

        for (col, header) in HEADERS.iter().enumerate() {
            ws.put(0, col as Col, CellValue::text(*header), CellStyle::Header);
        }

        let mut rows = Vec::with_capacity(sections.len());
        for (i, section) in sections.iter().enumerate() {
            let row = FIRST_ROW + i as Row;
            let score = ScoreRow {
                section: section.section.clone(),
                total: section.rows,
                compliant: section.count(Status::Compliant),
                non_compliant: section.count(Status::NonCompliant),
                to_review: section.count(Status::ToReview),
            };

            ws.put(row, 0, CellValue::text(section.section.as_str()), CellStyle::Body);
            for (offset, status) in Status::ALL.into_iter().enumerate() {
                let expr = format!(
                    "=COUNTIF({},\"{}\")",
                    section.range(STATUS_COL),
                    status.label()
                );
                ws.put(
                    row,
                    1 + offset as Col,
                    CellValue::formula(expr, score.count(status) as f64),
                    CellStyle::Count,
                );
            }
            ws.put(
                row,
                TOTAL_COL,
                CellValue::formula(
                    format!("=COUNTA({})", section.range(NUMBER_COL)),
                    score.total as f64,
                ),
                CellStyle::Count,
            );
            put_percentages(&mut ws, row, &score, CellStyle::Percent);
            rows.push(score);
        }

        let totals = ScoreRow {
            section: "Total".to_string(),
            total: rows.iter().map(|r| r.total).sum(),
            compliant: rows.iter().map(|r| r.compliant).sum(),
            non_compliant: rows.iter().map(|r| r.non_compliant).sum(),
            to_review: rows.iter().map(|r| r.to_review).sum(),
        };
        let totals_row = FIRST_ROW + rows.len() as Row;
        ws.put(totals_row, 0, CellValue::text("Total"), CellStyle::TotalLabel);
        for col in 1..=TOTAL_COL {
            let cached = match col {
                TOTAL_COL => totals.total,
                c => totals.count(Status::ALL[(c - 1) as usize]),
            };
            let value = if rows.is_empty() {
                CellValue::Number(0.0)
            } else {
                let span = CellRange::column(col, FIRST_ROW, totals_row - 1);
                CellValue::formula(format!("=SUM({span})"), cached as f64)
            };
            ws.put(totals_row, col, value, CellStyle::TotalCount);
        }
        put_percentages(&mut ws, totals_row, &totals, CellStyle::TotalPercent);

        ws.column_widths.push((0, 35.0));
        for col in 1..HEADERS.len() as Col {
            ws.column_widths.push((col, 15.0));
        }
        ws.freeze = Some((1, 0));

        (ws, ScoreTable { rows, totals })
    }
}

/// `IF(Total=0,0,count/Total)` for each status, formatted as a percentage.
fn put_percentages(ws: &mut Worksheet, row: Row, score: &ScoreRow, style: CellStyle) {
    let total = cell_ref(row, TOTAL_COL);
    for (offset, status) in Status::ALL.into_iter().enumerate() {
        let count = cell_ref(row, 1 + offset as Col);
        let expr = format!("=IF({total}=0,0,{count}/{total})");
        ws.put(
            row,
            TOTAL_COL + 1 + offset as Col,
            CellValue::formula(expr, score.ratio(status)),
            style,
        );
    }
}
