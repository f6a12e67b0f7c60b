//! Domain types shared by every benchforge crate: section numbers,
//! recommendations, sheets, the section map and run reports.

pub mod error;
pub mod report;
pub mod section_map;
pub mod types;

pub use error::{ConvertError, FieldExtractionError};
pub use report::{Anomaly, RunReport, Severity};
pub use section_map::{SectionEntry, SectionMap, FALLBACK_SECTION};
pub use types::{
    Assessment, Field, Fields, ParseSectionNumberError, RawBlock, Recommendation, SectionNumber,
    Sheet, Status,
};
