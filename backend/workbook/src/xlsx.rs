//! Serialize the workbook model to `.xlsx`.

use std::collections::HashMap;
use std::path::Path;

use rust_xlsxwriter::{
    Color, ConditionalFormatFormula, DataValidation, Format, FormatAlign, FormatBorder, Formula,
    Workbook as XlsxWorkbook, Worksheet as XlsxWorksheet, XlsxError,
};
use thiserror::Error;
use tracing::info;

use crate::model::{Cell, CellStyle, CellValue, Workbook, Worksheet};

const HEADER_FILL: u32 = 0x366092;

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: XlsxError,
    },
    #[error("failed to save workbook to {path}: {source}")]
    Save {
        path: String,
        #[source]
        source: XlsxError,
    },
    #[error("failed to serialize workbook: {0}")]
    Buffer(#[source] XlsxError),
}

/// Write `model` to `path`, replacing any existing file.
pub fn write_xlsx(model: &Workbook, path: &Path) -> Result<(), WorkbookError> {
    let mut workbook = render(model)?;
    workbook.save(path).map_err(|source| WorkbookError::Save {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), sheets = model.worksheets.len(), "Wrote workbook");
    Ok(())
}

/// Serialize `model` to an in-memory `.xlsx` file.
pub fn to_xlsx_bytes(model: &Workbook) -> Result<Vec<u8>, WorkbookError> {
    let mut workbook = render(model)?;
    workbook.save_to_buffer().map_err(WorkbookError::Buffer)
}

fn render(model: &Workbook) -> Result<XlsxWorkbook, WorkbookError> {
    let styles = Styles::new();
    let mut workbook = XlsxWorkbook::new();
    for sheet in &model.worksheets {
        let target = workbook.add_worksheet();
        render_sheet(target, sheet, &styles).map_err(|source| WorkbookError::Sheet {
            sheet: sheet.name.clone(),
            source,
        })?;
    }
    Ok(workbook)
}

fn render_sheet(
    target: &mut XlsxWorksheet,
    sheet: &Worksheet,
    styles: &Styles,
) -> Result<(), XlsxError> {
    target.set_name(&sheet.name)?;

    for &(col, width) in &sheet.column_widths {
        target.set_column_width(col, width)?;
    }
    for &(row, height) in &sheet.row_heights {
        target.set_row_height(row, height)?;
    }

    for merged in &sheet.merges {
        let r = merged.range;
        target.merge_range(
            r.first_row,
            r.first_col,
            r.last_row,
            r.last_col,
            &merged.text,
            styles.get(merged.style),
        )?;
    }

    for cell in &sheet.cells {
        write_cell(target, cell, styles)?;
    }

    for validation in &sheet.validations {
        let r = validation.range;
        let rule = DataValidation::new().allow_list_strings(validation.choices.as_slice())?;
        target.add_data_validation(r.first_row, r.first_col, r.last_row, r.last_col, &rule)?;
    }

    for highlight in &sheet.highlights {
        let r = highlight.range;
        let fill = Format::new().set_background_color(Color::RGB(highlight.fill));
        let rule = ConditionalFormatFormula::new()
            .set_rule(highlight.formula.as_str())
            .set_format(fill);
        target.add_conditional_format(r.first_row, r.first_col, r.last_row, r.last_col, &rule)?;
    }

    if let Some((row, col)) = sheet.freeze {
        target.set_freeze_panes(row, col)?;
    }
    Ok(())
}

fn write_cell(target: &mut XlsxWorksheet, cell: &Cell, styles: &Styles) -> Result<(), XlsxError> {
    let format = styles.get(cell.style);
    match &cell.value {
        CellValue::Blank => {
            target.write_blank(cell.row, cell.col, format)?;
        }
        CellValue::Text(text) => {
            target.write_string_with_format(cell.row, cell.col, text, format)?;
        }
        CellValue::Number(n) => {
            target.write_number_with_format(cell.row, cell.col, *n, format)?;
        }
        CellValue::Formula { expr, cached } => {
            let formula = Formula::new(expr).set_result(cached.to_string());
            target.write_formula_with_format(cell.row, cell.col, formula, format)?;
        }
    }
    Ok(())
}

/// One concrete format per named style.
struct Styles {
    formats: HashMap<CellStyle, Format>,
    fallback: Format,
}

impl Styles {
    fn new() -> Self {
        let header = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin);
        let body = Format::new().set_text_wrap().set_align(FormatAlign::Top);
        let percent = Format::new().set_num_format("0.00%");

        let formats = HashMap::from([
            (
                CellStyle::Banner,
                Format::new()
                    .set_bold()
                    .set_font_size(14)
                    .set_align(FormatAlign::Center)
                    .set_align(FormatAlign::VerticalCenter),
            ),
            (
                CellStyle::Subtitle,
                Format::new()
                    .set_italic()
                    .set_font_size(12)
                    .set_align(FormatAlign::Center)
                    .set_align(FormatAlign::VerticalCenter),
            ),
            (CellStyle::Header, header),
            (CellStyle::Body, body),
            (CellStyle::Count, Format::new().set_align(FormatAlign::Center)),
            (CellStyle::Percent, percent.clone()),
            (CellStyle::TotalLabel, Format::new().set_bold()),
            (
                CellStyle::TotalCount,
                Format::new().set_bold().set_align(FormatAlign::Center),
            ),
            (CellStyle::TotalPercent, percent.set_bold()),
        ]);

        Self {
            formats,
            fallback: Format::new(),
        }
    }

    fn get(&self, style: CellStyle) -> &Format {
        self.formats.get(&style).unwrap_or(&self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::WorkbookBuilder;
    use benchforge_core::{Fields, Recommendation, Sheet};

    fn sample() -> Workbook {
        let rec = Recommendation {
            number: "2.2.1".parse().unwrap(),
            title: "Ensure 'Access Credential Manager' is set to 'No One' (Automated)".to_string(),
            level: Some("L1".to_string()),
            assessment: None,
            fields: Fields {
                audit: "Navigate to the UI Path".to_string(),
                ..Default::default()
            },
            status: None,
        };
        let sheet = Sheet {
            name: "LOCAL POLICIES".to_string(),
            rank: 0,
            section_key: Some(2),
            recommendations: vec![rec],
        };
        WorkbookBuilder::new("CIS Benchmark").build(&[sheet]).workbook
    }

    #[test]
    fn buffer_is_a_zip_container() {
        let bytes = to_xlsx_bytes(&sample()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn writes_file_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benchmark.xlsx");
        write_xlsx(&sample(), &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn duplicate_sheet_names_are_rejected_by_the_writer() {
        let mut model = sample();
        let copy = model.worksheets[0].clone();
        model.worksheets.push(copy);
        let err = to_xlsx_bytes(&model).unwrap_err();
        assert!(matches!(err, WorkbookError::Sheet { .. } | WorkbookError::Buffer(_)));
    }
}
