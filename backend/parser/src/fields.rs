//! Field classifier: splits a block body into its labeled sub-sections.

use benchforge_core::{
    Assessment, Field, FieldExtractionError, Fields, RawBlock, Recommendation,
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::normalize_field;

/// A recognized field label and the field it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLabel {
    pub label: &'static str,
    pub field: Field,
}

/// Labels recognized at the start of a line, matched case-insensitively.
pub const FIELD_LABELS: &[FieldLabel] = &[
    FieldLabel { label: "Profile Applicability", field: Field::Profile },
    FieldLabel { label: "Description", field: Field::Description },
    FieldLabel { label: "Rationale", field: Field::Rationale },
    FieldLabel { label: "Impact", field: Field::Impact },
    FieldLabel { label: "Audit", field: Field::Audit },
    FieldLabel { label: "Remediation", field: Field::Remediation },
    FieldLabel { label: "Default Value", field: Field::DefaultValue },
    FieldLabel { label: "References", field: Field::References },
    FieldLabel { label: "CIS Controls", field: Field::CisControls },
    FieldLabel { label: "Additional Information", field: Field::AdditionalInformation },
    FieldLabel { label: "Notes", field: Field::AdditionalInformation },
];

static ASSESSMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\((automated|manual|scored|not scored)\)\s*$").unwrap());

/// Assessment tag at the end of a title line, if any.
pub fn parse_assessment(line: &str) -> Option<Assessment> {
    ASSESSMENT_RE
        .captures(line)
        .and_then(|caps| Assessment::from_label(&caps[1]))
}

/// Match a label at the start of `line`.
///
/// The label must be the whole line or be followed by a colon; text after
/// the colon is returned as inline content.
pub fn match_label(line: &str) -> Option<(Field, &str)> {
    FIELD_LABELS
        .iter()
        .filter_map(|entry| {
            let head = line.get(..entry.label.len())?;
            if !head.eq_ignore_ascii_case(entry.label) {
                return None;
            }
            let rest = line[entry.label.len()..].trim_start();
            if rest.is_empty() {
                Some((entry.label.len(), entry.field, rest))
            } else {
                rest.strip_prefix(':')
                    .map(|inline| (entry.label.len(), entry.field, inline.trim()))
            }
        })
        .max_by_key(|(len, _, _)| *len)
        .map(|(_, field, inline)| (field, inline))
}

/// Classify one block into a [`Recommendation`].
///
/// Fails only when no title can be derived. Missing fields stay empty.
pub fn classify(block: RawBlock) -> Result<Recommendation, FieldExtractionError> {
    let RawBlock {
        number,
        level,
        title_line,
        body,
        line,
    } = block;

    let mut preamble: Vec<String> = Vec::new();
    let mut spans: Vec<(Field, Vec<String>)> = Vec::new();
    for text in body {
        if let Some((field, inline)) = match_label(&text) {
            let mut lines = Vec::new();
            if !inline.is_empty() {
                lines.push(inline.to_string());
            }
            spans.push((field, lines));
            continue;
        }
        match spans.last_mut() {
            Some((_, lines)) => lines.push(text),
            None => preamble.push(text),
        }
    }

    let mut title = title_line.trim().to_string();
    let mut assessment = parse_assessment(&title);
    let mut preamble_start = 0;
    if assessment.is_none() {
        // Wrapped title: continuation lines run up to the one carrying the tag.
        if let Some(end) = preamble.iter().position(|l| parse_assessment(l).is_some()) {
            if preamble[..=end].iter().all(|l| !l.is_empty()) {
                for part in &preamble[..=end] {
                    if !title.is_empty() {
                        title.push(' ');
                    }
                    title.push_str(part);
                }
                assessment = parse_assessment(&title);
                preamble_start = end + 1;
            }
        }
    }

    if title.is_empty() {
        return Err(FieldExtractionError { number, line });
    }

    let has_description = spans.iter().any(|(f, _)| *f == Field::Description);
    let mut fields = Fields::default();
    for (field, lines) in spans {
        let text = normalize_field(&lines);
        if text.is_empty() {
            continue;
        }
        let slot = fields.get_mut(field);
        if !slot.is_empty() {
            slot.push('\n');
        }
        slot.push_str(&text);
    }
    if !has_description {
        fields.description = normalize_field(&preamble[preamble_start..]);
    }

    Ok(Recommendation {
        number,
        title,
        level,
        assessment,
        fields,
        status: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(number: &str, title: &str, body: &[&str]) -> RawBlock {
        RawBlock {
            number: number.parse().unwrap(),
            level: None,
            title_line: title.to_string(),
            body: body.iter().map(|s| s.to_string()).collect(),
            line: 1,
        }
    }

    #[test]
    fn labels_match_case_insensitively_with_optional_colon() {
        assert_eq!(match_label("AUDIT:"), Some((Field::Audit, "")));
        assert_eq!(match_label("Audit"), Some((Field::Audit, "")));
        assert_eq!(
            match_label("Default Value: Disabled"),
            Some((Field::DefaultValue, "Disabled"))
        );
        assert_eq!(match_label("Notes: see vendor guide"), Some((Field::AdditionalInformation, "see vendor guide")));
        assert_eq!(match_label("Auditing is enabled by default"), None);
        assert_eq!(match_label("Impact of this change"), None);
    }

    #[test]
    fn classifies_fields_in_order() {
        let rec = classify(block(
            "1.1.1",
            "Ensure 'Enforce password history' is set (Automated)",
            &[
                "Profile Applicability:",
                "• Level 1 (L1) - Corporate/Enterprise Environment",
                "Description:",
                "This policy setting determines the number",
                "of renewed passwords.",
                "Rationale:",
                "Reuse weakens passwords.",
                "Audit:",
                "Navigate to the UI Path and confirm.",
                "Remediation:",
                "Set the value to 24.",
                "Default Value:",
                "24 passwords remembered.",
                "References:",
                "1. CCE-35219-5",
                "CIS Controls:",
                "v8 5.2 Use Unique Passwords",
            ],
        ))
        .unwrap();

        assert_eq!(rec.assessment, Some(Assessment::Automated));
        assert_eq!(rec.fields.profile, "• Level 1 (L1) - Corporate/Enterprise Environment");
        assert_eq!(
            rec.fields.description,
            "This policy setting determines the number of renewed passwords."
        );
        assert_eq!(rec.fields.rationale, "Reuse weakens passwords.");
        assert_eq!(rec.fields.audit, "Navigate to the UI Path and confirm.");
        assert_eq!(rec.fields.remediation, "Set the value to 24.");
        assert_eq!(rec.fields.default_value, "24 passwords remembered.");
        assert_eq!(rec.fields.references, "1. CCE-35219-5");
        assert_eq!(rec.fields.cis_controls, "v8 5.2 Use Unique Passwords");
        assert!(rec.fields.impact.is_empty());
        assert!(rec.status.is_none());
    }

    #[test]
    fn wrapped_title_is_joined_before_first_label() {
        let rec = classify(block(
            "1.1.1",
            "Ensure 'Enforce password history' is set to '24 or more",
            &["password(s)' (Automated)", "Audit:", "Check it."],
        ))
        .unwrap();
        assert_eq!(
            rec.title,
            "Ensure 'Enforce password history' is set to '24 or more password(s)' (Automated)"
        );
        assert!(rec.fields.description.is_empty());
    }

    #[test]
    fn preamble_becomes_description_without_description_label() {
        let rec = classify(block(
            "2",
            "Local Policies",
            &["This section contains local policy", "recommendations."],
        ))
        .unwrap();
        assert_eq!(rec.fields.description, "This section contains local policy recommendations.");
        assert!(rec.fields.audit.is_empty());
    }

    #[test]
    fn preamble_is_discarded_when_description_label_exists() {
        let rec = classify(block(
            "3.1",
            "Ensure something (Manual)",
            &["boilerplate line", "Description:", "Real description.", "Audit:", "x"],
        ))
        .unwrap();
        assert_eq!(rec.fields.description, "Real description.");
    }

    #[test]
    fn repeated_label_appends() {
        let rec = classify(block(
            "4.1",
            "Ensure x (Automated)",
            &["Audit:", "first part", "Audit:", "second part"],
        ))
        .unwrap();
        assert_eq!(rec.fields.audit, "first part\nsecond part");
    }

    #[test]
    fn level_only_anchor_without_title_fails() {
        let err = classify(block("5.5", "", &["Audit:", "x"])).unwrap_err();
        assert_eq!(err.number.to_string(), "5.5");
    }

    #[test]
    fn level_only_anchor_takes_title_from_next_line() {
        let rec = classify(block("5.6", "", &["Ensure wrapped (Manual)", "Audit:", "x"])).unwrap();
        assert_eq!(rec.title, "Ensure wrapped (Manual)");
        assert_eq!(rec.assessment, Some(Assessment::Manual));
    }
}
