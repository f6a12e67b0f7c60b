//! Section sheets plus the trailing score sheet.

use benchforge_core::{Sheet, Status};
use tracing::debug;

use crate::columns::{headers, COLUMNS, STATUS_COL};
use crate::model::{
    cell_ref, CellRange, CellStyle, CellValue, Col, HighlightRule, ListValidation, Row, Workbook,
    Worksheet,
};
use crate::naming::SheetNamer;
use crate::score::{ScoreSheetBuilder, ScoreTable, SheetRef, SCORE_SHEET_NAME};

pub const BANNER_ROW: Row = 0;
pub const SUBTITLE_ROW: Row = 1;
pub const HEADER_ROW: Row = 3;
pub const FIRST_DATA_ROW: Row = 4;
pub const ROW_HEIGHT: f64 = 30.0;

const BANNER_FIRST_COL: Col = 1;
const BANNER_LAST_COL: Col = 7;

/// Highlight color per status, shared by every section sheet.
pub const STATUS_FILLS: [(Status, u32); 3] = [
    (Status::Compliant, 0xC6EFCE),
    (Status::NonCompliant, 0xFFC7CE),
    (Status::ToReview, 0xD9D9D9),
];

#[derive(Debug, Clone)]
pub struct BuiltWorkbook {
    pub workbook: Workbook,
    pub scores: ScoreTable,
    pub sheets: Vec<SheetRef>,
}

/// Lays out section sheets for one benchmark document.
#[derive(Debug, Clone)]
pub struct WorkbookBuilder {
    title: String,
    version: Option<String>,
}

impl WorkbookBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: None,
        }
    }

    pub fn version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    /// One worksheet per sheet, in the given order, then the score sheet.
    pub fn build(&self, sheets: &[Sheet]) -> BuiltWorkbook {
        let mut namer = SheetNamer::new();
        let score_name = namer.claim(SCORE_SHEET_NAME);

        let mut worksheets = Vec::with_capacity(sheets.len() + 1);
        let mut refs = Vec::with_capacity(sheets.len());
        for sheet in sheets {
            let name = namer.claim(&sheet.name);
            let (ws, sheet_ref) = self.section_sheet(name, sheet);
            debug!(sheet = %ws.name, rows = sheet_ref.rows, "Laid out section sheet");
            worksheets.push(ws);
            refs.push(sheet_ref);
        }

        let (score, scores) = ScoreSheetBuilder::new().name(score_name).build(&refs);
        worksheets.push(score);

        BuiltWorkbook {
            workbook: Workbook { worksheets },
            scores,
            sheets: refs,
        }
    }

    pub fn section_sheet(&self, name: String, sheet: &Sheet) -> (Worksheet, SheetRef) {
        let mut ws = Worksheet::new(name);

        ws.merge(
            CellRange::new(BANNER_ROW, BANNER_FIRST_COL, BANNER_ROW, BANNER_LAST_COL),
            format!("{} - {}", self.title, sheet.name),
            CellStyle::Banner,
        );
        ws.merge(
            CellRange::new(SUBTITLE_ROW, BANNER_FIRST_COL, SUBTITLE_ROW, BANNER_LAST_COL),
            self.version.clone().unwrap_or_default(),
            CellStyle::Subtitle,
        );

        for (col, header) in headers().enumerate() {
            ws.put(HEADER_ROW, col as Col, CellValue::text(header), CellStyle::Header);
        }

        for (i, rec) in sheet.recommendations.iter().enumerate() {
            let row = FIRST_DATA_ROW + i as Row;
            for (col, column) in COLUMNS.iter().enumerate() {
                ws.put(row, col as Col, column.value(rec), CellStyle::Body);
            }
        }

        // Validation and highlights cover at least one row so an empty
        // sheet still offers the status list.
        let last_row = FIRST_DATA_ROW + sheet.len().max(1) as Row - 1;
        let status_range = CellRange::column(STATUS_COL, FIRST_DATA_ROW, last_row);
        ws.validations.push(ListValidation {
            range: status_range,
            choices: Status::ALL.iter().map(|s| s.label().to_string()).collect(),
        });
        let anchor = format!("${}", cell_ref(FIRST_DATA_ROW, STATUS_COL));
        for (status, fill) in STATUS_FILLS {
            ws.highlights.push(HighlightRule {
                range: status_range,
                formula: format!("={anchor}=\"{}\"", status.label()),
                fill,
            });
        }

        for (col, column) in COLUMNS.iter().enumerate() {
            ws.column_widths.push((col as Col, column.width));
        }
        for row in 0..=last_row.max(HEADER_ROW) {
            ws.row_heights.push((row, ROW_HEIGHT));
        }
        ws.freeze = Some((FIRST_DATA_ROW, 0));

        let sheet_ref = SheetRef {
            section: sheet.name.clone(),
            sheet_name: ws.name.clone(),
            first_row: FIRST_DATA_ROW,
            last_row,
            rows: sheet.len(),
            compliant: sheet.count_status(Status::Compliant),
            non_compliant: sheet.count_status(Status::NonCompliant),
            to_review: sheet.count_status(Status::ToReview),
        };
        (ws, sheet_ref)
    }
}
