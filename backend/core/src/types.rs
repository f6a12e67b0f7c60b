use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Section numbers
// ---------------------------------------------------------------------------

/// Hierarchical recommendation number such as `1.1.2`.
///
/// Components are positive integers and ordering is component-wise numeric,
/// so `1.10` sorts after `1.9` and a parent sorts before its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionNumber(Vec<u32>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid section number '{0}'")]
pub struct ParseSectionNumberError(pub String);

impl SectionNumber {
    /// Build a number from its components. Returns `None` for an empty
    /// sequence or a zero component.
    pub fn new(parts: Vec<u32>) -> Option<Self> {
        if parts.is_empty() || parts.contains(&0) {
            return None;
        }
        Some(Self(parts))
    }

    pub fn parts(&self) -> &[u32] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The top-level component, used to pick the section sheet.
    pub fn section_key(&self) -> u32 {
        self.0[0]
    }
}

impl FromStr for SectionNumber {
    type Err = ParseSectionNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split('.')
            .map(|p| p.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseSectionNumberError(s.to_string()))?;
        Self::new(parts).ok_or_else(|| ParseSectionNumberError(s.to_string()))
    }
}

impl fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

impl Serialize for SectionNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Raw blocks
// ---------------------------------------------------------------------------

/// Text between two numbering anchors, before field classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub number: SectionNumber,
    /// Profile level tag from the anchor line, e.g. `L1`.
    pub level: Option<String>,
    /// Title text that followed the number on the anchor line.
    pub title_line: String,
    /// Lines after the anchor line, page markers already removed.
    pub body: Vec<String>,
    /// 1-based line of the anchor within the scanned text.
    pub line: usize,
}

// ---------------------------------------------------------------------------
// Recommendation fields
// ---------------------------------------------------------------------------

/// A labeled free-text field of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Profile,
    Description,
    Rationale,
    Impact,
    Audit,
    Remediation,
    DefaultValue,
    References,
    CisControls,
    AdditionalInformation,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Profile,
        Field::Description,
        Field::Rationale,
        Field::Impact,
        Field::Audit,
        Field::Remediation,
        Field::DefaultValue,
        Field::References,
        Field::CisControls,
        Field::AdditionalInformation,
    ];
}

/// Free-text content of every recognized field. Missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fields {
    pub profile: String,
    pub description: String,
    pub rationale: String,
    pub impact: String,
    pub audit: String,
    pub remediation: String,
    pub default_value: String,
    pub references: String,
    pub cis_controls: String,
    pub additional_information: String,
}

impl Fields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Profile => &self.profile,
            Field::Description => &self.description,
            Field::Rationale => &self.rationale,
            Field::Impact => &self.impact,
            Field::Audit => &self.audit,
            Field::Remediation => &self.remediation,
            Field::DefaultValue => &self.default_value,
            Field::References => &self.references,
            Field::CisControls => &self.cis_controls,
            Field::AdditionalInformation => &self.additional_information,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Profile => &mut self.profile,
            Field::Description => &mut self.description,
            Field::Rationale => &mut self.rationale,
            Field::Impact => &mut self.impact,
            Field::Audit => &mut self.audit,
            Field::Remediation => &mut self.remediation,
            Field::DefaultValue => &mut self.default_value,
            Field::References => &mut self.references,
            Field::CisControls => &mut self.cis_controls,
            Field::AdditionalInformation => &mut self.additional_information,
        }
    }
}

/// Assessment tag carried at the end of a recommendation title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Automated,
    Manual,
    Scored,
    NotScored,
}

impl Assessment {
    pub fn label(&self) -> &'static str {
        match self {
            Assessment::Automated => "Automated",
            Assessment::Manual => "Manual",
            Assessment::Scored => "Scored",
            Assessment::NotScored => "Not Scored",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "automated" => Some(Assessment::Automated),
            "manual" => Some(Assessment::Manual),
            "scored" => Some(Assessment::Scored),
            "not scored" => Some(Assessment::NotScored),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Human-entered compliance outcome for one recommendation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    Compliant,
    NonCompliant,
    ToReview,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Compliant, Status::NonCompliant, Status::ToReview];

    /// Text stored in the Status cell.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Compliant => "Compliant",
            Status::NonCompliant => "Non-Compliant",
            Status::ToReview => "To Review",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown status '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// One testable recommendation, destined for exactly one worksheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub number: SectionNumber,
    pub title: String,
    pub level: Option<String>,
    pub assessment: Option<Assessment>,
    #[serde(flatten)]
    pub fields: Fields,
    /// Empty at generation time; filled in by the reviewer after export.
    pub status: Option<Status>,
}

impl Recommendation {
    pub fn section_key(&self) -> u32 {
        self.number.section_key()
    }

    pub fn field(&self, field: Field) -> &str {
        self.fields.get(field)
    }

    /// True when the record carries Audit or Remediation text.
    pub fn has_test_content(&self) -> bool {
        !self.fields.audit.trim().is_empty() || !self.fields.remediation.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Sheets
// ---------------------------------------------------------------------------

/// Recommendations sharing a section key, in identifier order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    pub name: String,
    /// Ordering rank inherited from the section map; the fallback sheet
    /// uses `usize::MAX`.
    pub rank: usize,
    /// `None` for the fallback sheet, which collects several keys.
    pub section_key: Option<u32>,
    pub recommendations: Vec<Recommendation>,
}

impl Sheet {
    pub fn is_fallback(&self) -> bool {
        self.section_key.is_none()
    }

    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    /// Number of rows whose Status equals `status`.
    pub fn count_status(&self, status: Status) -> usize {
        self.recommendations
            .iter()
            .filter(|r| r.status == Some(status))
            .count()
    }
}
