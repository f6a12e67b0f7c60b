use thiserror::Error;

use crate::types::SectionNumber;

/// Top-level error type for a conversion run.
///
/// Every variant here is fatal: the run stops and nothing is written.
/// Per-record problems are reported through [`crate::Anomaly`] instead.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("text extraction unavailable: {0}")]
    ExtractionUnavailable(String),

    #[error("start page {start_page} is beyond the end of the document ({page_count} pages)")]
    StartPageOutOfRange { start_page: usize, page_count: usize },

    #[error(
        "no numbered recommendations found from page {start_page}; \
         check the start page or the document layout"
    )]
    NoAnchorsFound { start_page: usize },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("workbook error: {0}")]
    WorkbookError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A candidate block whose title could not be derived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("block {number} (line {line}) has no derivable title")]
pub struct FieldExtractionError {
    pub number: SectionNumber,
    pub line: usize,
}
