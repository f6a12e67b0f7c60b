//! Workbook construction for converted benchmarks.
//!
//! [`WorkbookBuilder`] turns attributed sheets into an in-memory
//! [`Workbook`] (one section sheet each, then the score sheet), and
//! [`write_xlsx`] serializes it.

pub mod builder;
pub mod columns;
pub mod model;
pub mod naming;
pub mod score;
pub mod xlsx;

pub use builder::{BuiltWorkbook, WorkbookBuilder, FIRST_DATA_ROW, HEADER_ROW, STATUS_FILLS};
pub use columns::{Column, Source, COLUMNS};
pub use model::{CellRange, CellStyle, CellValue, Workbook, Worksheet};
pub use naming::{quote_sheet_name, sanitize_sheet_name, SheetNamer};
pub use score::{ScoreRow, ScoreSheetBuilder, ScoreTable, SheetRef, SCORE_SHEET_NAME};
pub use xlsx::{to_xlsx_bytes, write_xlsx, WorkbookError};
