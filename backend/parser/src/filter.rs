//! Header filter: keeps leaf recommendations, drops structural headers.
//!
//! A record is a real test when it carries Audit or Remediation text.
//! Section and sub-section title blocks ("1 Account Policies") never do.

use benchforge_core::Recommendation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    RejectHeader,
}

pub fn evaluate(candidate: &Recommendation) -> Verdict {
    if candidate.has_test_content() {
        Verdict::Accept
    } else {
        Verdict::RejectHeader
    }
}
