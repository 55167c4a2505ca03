//! Cumulative language byte counts across repositories.

use std::collections::HashMap;

/// Byte counts per language, accumulated one repository at a time.
///
/// Merging is additive on byte counts, so applying repositories in any order
/// yields the same final map. The insertion order of first appearance is kept
/// beside the counts; it breaks ties when the map is sorted.
#[derive(Debug, Default)]
pub struct LanguageTally {
    counts: HashMap<String, u64>,
    first_seen: Vec<String>,
}

impl LanguageTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one repository's language map into the tally.
    pub fn merge(&mut self, languages: impl IntoIterator<Item = (String, u64)>) {
        for (language, bytes) in languages {
            match self.counts.get_mut(&language) {
                Some(total) => *total += bytes,
                None => {
                    self.counts.insert(language.clone(), bytes);
                    self.first_seen.push(language);
                }
            }
        }
    }

    /// Number of distinct languages seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Consume the tally into entries sorted descending by byte count.
    ///
    /// The sort is stable over first-seen order, so languages with equal
    /// totals keep the relative order in which they were first introduced.
    #[must_use]
    pub fn into_sorted(self) -> Vec<(String, u64)> {
        let Self { counts, first_seen } = self;
        let mut entries: Vec<(String, u64)> = first_seen
            .into_iter()
            .map(|language| {
                let bytes = counts.get(&language).copied().unwrap_or(0);
                (language, bytes)
            })
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}
