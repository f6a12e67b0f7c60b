//! `benchforge convert`: document in, workbook out.

use std::path::{Path, PathBuf};

use benchforge_config::{detect_family, resolve_section_map};
use benchforge_core::{ConvertError, RunReport, SectionMap};
use benchforge_parser::{extract_from_pages, read_front_matter, DocumentInfo};
use benchforge_workbook::{write_xlsx, BuiltWorkbook, ScoreTable, WorkbookBuilder};
use logging::{ConversionEvent, EventLogger};
use serde::Serialize;
use tracing::info;

use crate::source::load_pages;

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub start_page: usize,
    /// Document family; detected from the input name when unset.
    pub family: Option<String>,
    /// Section catalog file overriding env/config-dir lookup.
    pub sections: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub section: String,
    pub rows: usize,
}

/// What a run produced; printed as a table or as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub family: String,
    pub title: String,
    pub version: Option<String>,
    pub start_page: usize,
    pub sheets: Vec<SheetSummary>,
    pub scores: ScoreTable,
    pub report: RunReport,
}

/// `<input stem>.xlsx` in the working directory.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "benchmark".to_string());
    PathBuf::from(format!("{stem}.xlsx"))
}

/// Parse pages and lay out the workbook. No I/O.
pub fn convert_pages(
    pages: &[String],
    start_page: usize,
    map: &SectionMap,
    info: &DocumentInfo,
) -> Result<(BuiltWorkbook, RunReport), ConvertError> {
    let (sheets, report) = extract_from_pages(pages, start_page)?.into_sheets(map);
    let built = WorkbookBuilder::new(info.title.clone())
        .version(info.version.clone())
        .build(&sheets);
    Ok((built, report))
}

pub async fn run(opts: ConvertOptions) -> Result<ConversionSummary, ConvertError> {
    let run_label = opts
        .input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let family = opts
        .family
        .clone()
        .unwrap_or_else(|| detect_family(&opts.input).to_string());
    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&opts.input));

    EventLogger::log_event(
        &run_label,
        ConversionEvent::Started {
            input: opts.input.display().to_string(),
            family: family.clone(),
            start_page: opts.start_page,
        },
    );

    let map = resolve_section_map(opts.sections.as_deref(), &family)
        .await
        .map_err(|err| ConvertError::ConfigError(format!("{err:#}")))?;
    let pages = load_pages(&opts.input).await?;
    let doc = pages
        .first()
        .map(|page| read_front_matter(page))
        .unwrap_or_default();
    info!(title = %doc.title, version = ?doc.version, family = %family, "Converting benchmark");

    let start_page = opts.start_page;
    let target = output.clone();
    let (built, report, map, doc) = tokio::task::spawn_blocking(move || {
        let (built, report) = convert_pages(&pages, start_page, &map, &doc)?;
        write_xlsx(&built.workbook, &target)
            .map_err(|err| ConvertError::WorkbookError(err.to_string()))?;
        Ok::<_, ConvertError>((built, report, map, doc))
    })
    .await
    .map_err(|err| ConvertError::Other(anyhow::anyhow!("conversion task failed: {err}")))??;

    EventLogger::log_report(&run_label, &report);
    EventLogger::log_event(
        &run_label,
        ConversionEvent::finished(&report, built.sheets.len()),
    );

    Ok(ConversionSummary {
        input: opts.input,
        output,
        family: map.family().to_string(),
        title: doc.title,
        version: doc.version,
        start_page,
        sheets: built
            .sheets
            .iter()
            .map(|s| SheetSummary {
                name: s.sheet_name.clone(),
                section: s.section.clone(),
                rows: s.rows,
            })
            .collect(),
        scores: built.scores,
        report,
    })
}
