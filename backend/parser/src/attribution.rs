//! Section attributor: routes accepted records to per-section sheets.

use std::collections::HashMap;

use benchforge_core::{Anomaly, Recommendation, RunReport, SectionMap, Sheet, FALLBACK_SECTION};
use tracing::info;

/// Builds sheets lazily, one per section key seen, plus one shared
/// fallback sheet for prefixes the map does not know.
#[derive(Debug)]
pub struct SectionAttributor<'m> {
    map: &'m SectionMap,
    sheets: Vec<Sheet>,
    /// `None` is the fallback sheet.
    index: HashMap<Option<u32>, usize>,
}

impl<'m> SectionAttributor<'m> {
    pub fn new(map: &'m SectionMap) -> Self {
        Self {
            map,
            sheets: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Place `rec` on its sheet and return that sheet. Never fails: an
    /// unmapped prefix is recorded as informational and sent to the
    /// fallback sheet.
    pub fn assign(&mut self, rec: Recommendation, report: &mut RunReport) -> &Sheet {
        let prefix = rec.section_key();
        let key = match self.map.lookup(prefix) {
            Some(_) => Some(prefix),
            None => {
                info!(number = %rec.number, prefix, "No section mapping; using fallback sheet");
                report.record(Anomaly::UnmappedSection {
                    prefix,
                    number: rec.number.clone(),
                });
                None
            }
        };

        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let sheet = match key.and_then(|k| self.map.lookup(k)) {
                    Some(entry) => Sheet {
                        name: entry.name.clone(),
                        rank: entry.rank,
                        section_key: Some(entry.prefix),
                        recommendations: Vec::new(),
                    },
                    None => Sheet {
                        name: FALLBACK_SECTION.to_string(),
                        rank: usize::MAX,
                        section_key: None,
                        recommendations: Vec::new(),
                    },
                };
                self.sheets.push(sheet);
                self.index.insert(key, self.sheets.len() - 1);
                self.sheets.len() - 1
            }
        };

        let sheet = &mut self.sheets[slot];
        sheet.recommendations.push(rec);
        sheet
    }

    /// Sheets in section-map rank order with the fallback last; records
    /// within each sheet in identifier order.
    pub fn finish(mut self) -> Vec<Sheet> {
        self.sheets.sort_by_key(|s| s.rank);
        for sheet in &mut self.sheets {
            sheet.recommendations.sort_by(|a, b| a.number.cmp(&b.number));
        }
        self.sheets
    }
}
