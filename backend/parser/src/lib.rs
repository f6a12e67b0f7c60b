//! `benchforge-parser`: turns benchmark text into ordered, classified records.
//!
//! Stages, each a plain function or iterator over owned data:
//! - [`segmenter`]: numbering anchors → [`RawBlock`](benchforge_core::RawBlock)s
//! - [`fields`]: labeled sub-sections → [`Recommendation`](benchforge_core::Recommendation)
//! - [`filter`]: drops structural header blocks
//! - [`attribution`]: groups records into per-section sheets
//!
//! [`pipeline`] wires the stages together and collects the run report.

pub mod attribution;
pub mod fields;
pub mod filter;
pub mod front_matter;
pub mod pipeline;
pub mod segmenter;
pub mod text;

pub use attribution::SectionAttributor;
pub use fields::{classify, FieldLabel, FIELD_LABELS};
pub use filter::{evaluate, Verdict};
pub use front_matter::{read_front_matter, DocumentInfo};
pub use pipeline::{build_sheets, extract_from_pages, extract_from_text, Extraction};
pub use segmenter::{parse_anchor, Anchor, Segmenter};
