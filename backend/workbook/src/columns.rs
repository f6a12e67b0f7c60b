//! Fixed column schema of a section sheet.

use benchforge_core::{Field, Recommendation};

use crate::model::{CellValue, Col};

/// Where a column's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Number,
    Title,
    /// Reviewer-entered status; written blank.
    Status,
    /// Reviewer-entered free text; written blank.
    Manual,
    Field(Field),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub header: &'static str,
    pub width: f64,
    pub source: Source,
}

pub const COLUMNS: [Column; 16] = [
    Column { header: "Number", width: 15.0, source: Source::Number },
    Column { header: "Title", width: 60.0, source: Source::Title },
    Column { header: "Status", width: 15.0, source: Source::Status },
    Column { header: "Comments", width: 20.0, source: Source::Manual },
    Column { header: "Audit Script", width: 15.0, source: Source::Manual },
    Column { header: "Remediation Script", width: 15.0, source: Source::Manual },
    Column { header: "Profile", width: 30.0, source: Source::Field(Field::Profile) },
    Column { header: "Description", width: 30.0, source: Source::Field(Field::Description) },
    Column { header: "Rationale", width: 30.0, source: Source::Field(Field::Rationale) },
    Column { header: "Impact", width: 30.0, source: Source::Field(Field::Impact) },
    Column { header: "Audit", width: 30.0, source: Source::Field(Field::Audit) },
    Column { header: "Remediation", width: 30.0, source: Source::Field(Field::Remediation) },
    Column { header: "Default Value", width: 30.0, source: Source::Field(Field::DefaultValue) },
    Column { header: "References", width: 30.0, source: Source::Field(Field::References) },
    Column { header: "CIS Controls", width: 30.0, source: Source::Field(Field::CisControls) },
    Column {
        header: "Additional Information",
        width: 30.0,
        source: Source::Field(Field::AdditionalInformation),
    },
];

pub const NUMBER_COL: Col = 0;
pub const STATUS_COL: Col = 2;
pub const LAST_COL: Col = (COLUMNS.len() - 1) as Col;

impl Column {
    pub fn value(&self, rec: &Recommendation) -> CellValue {
        match self.source {
            Source::Number => CellValue::text(rec.number.to_string()),
            Source::Title => CellValue::text(rec.title.as_str()),
            Source::Status => match rec.status {
                Some(status) => CellValue::text(status.label()),
                None => CellValue::Blank,
            },
            Source::Manual => CellValue::Blank,
            Source::Field(field) => {
                let text = rec.field(field);
                if text.is_empty() {
                    CellValue::Blank
                } else {
                    CellValue::text(text)
                }
            }
        }
    }
}

pub fn headers() -> impl Iterator<Item = &'static str> {
    COLUMNS.iter().map(|c| c.header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchforge_core::{Fields, Status};

    #[test]
    fn schema_positions() {
        let names: Vec<&str> = headers().collect();
        assert_eq!(names[NUMBER_COL as usize], "Number");
        assert_eq!(names[STATUS_COL as usize], "Status");
        assert_eq!(names[LAST_COL as usize], "Additional Information");
        assert_eq!(names.len(), 16);
        // every recommendation field has exactly one column
        for field in Field::ALL {
            let hits = COLUMNS.iter().filter(|c| c.source == Source::Field(field)).count();
            assert_eq!(hits, 1, "{field:?}");
        }
    }

    #[test]
    fn values_follow_the_record() {
        let mut rec = Recommendation {
            number: "1.1.2".parse().unwrap(),
            title: "Ensure lockout".to_string(),
            level: None,
            assessment: None,
            fields: Fields {
                audit: "check".to_string(),
                ..Default::default()
            },
            status: None,
        };
        assert_eq!(COLUMNS[0].value(&rec), CellValue::text("1.1.2"));
        assert_eq!(COLUMNS[2].value(&rec), CellValue::Blank);
        assert_eq!(COLUMNS[10].value(&rec), CellValue::text("check"));
        assert_eq!(COLUMNS[11].value(&rec), CellValue::Blank);

        rec.status = Some(Status::NonCompliant);
        assert_eq!(COLUMNS[2].value(&rec), CellValue::text("Non-Compliant"));
    }
}
