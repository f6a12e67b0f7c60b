//! Immutable prefix → section-name table for one document family.

use serde::Serialize;

/// Name of the sheet collecting recommendations whose prefix is unmapped.
pub const FALLBACK_SECTION: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionEntry {
    pub prefix: u32,
    pub name: String,
    /// Position in the loaded mapping; sheets are emitted in rank order.
    pub rank: usize,
}

/// Ordered section table. Loaded once per run and passed by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionMap {
    family: String,
    entries: Vec<SectionEntry>,
}

impl SectionMap {
    /// Build a map from `(prefix, name)` pairs in rank order. A repeated
    /// prefix keeps its first rank and takes the later name.
    pub fn new(family: impl Into<String>, pairs: impl IntoIterator<Item = (u32, String)>) -> Self {
        let mut entries: Vec<SectionEntry> = Vec::new();
        for (prefix, name) in pairs {
            if let Some(existing) = entries.iter_mut().find(|e| e.prefix == prefix) {
                existing.name = name;
                continue;
            }
            let rank = entries.len();
            entries.push(SectionEntry { prefix, name, rank });
        }
        Self {
            family: family.into(),
            entries,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn lookup(&self, prefix: u32) -> Option<&SectionEntry> {
        self.entries.iter().find(|e| e.prefix == prefix)
    }

    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_insertion_order() {
        let map = SectionMap::new(
            "windows",
            vec![
                (2, "LOCAL POLICIES".to_string()),
                (1, "ACCOUNT POLICIES".to_string()),
            ],
        );
        assert_eq!(map.lookup(2).unwrap().rank, 0);
        assert_eq!(map.lookup(1).unwrap().rank, 1);
        assert!(map.lookup(9).is_none());
        assert_eq!(map.family(), "windows");
    }

    #[test]
    fn repeated_prefix_keeps_rank_takes_name() {
        let map = SectionMap::new(
            "x",
            vec![
                (1, "Old".to_string()),
                (2, "Two".to_string()),
                (1, "New".to_string()),
            ],
        );
        assert_eq!(map.len(), 2);
        let entry = map.lookup(1).unwrap();
        assert_eq!(entry.name, "New");
        assert_eq!(entry.rank, 0);
    }
}
