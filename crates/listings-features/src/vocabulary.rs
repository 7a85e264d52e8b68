//! Vocabulary selection.
//!
//! The vocabulary is the set of normalized amenity tokens common enough to
//! be used as regression features. It needs a full pass over every listing
//! before any dummy column can be built, since selection depends on global
//! frequency.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::config::{CountingMode, VocabularyConfig};

/// Raw token frequencies across all listings
#[derive(Debug, Clone, Default)]
pub struct TokenCounts {
    counts: HashMap<String, u64>,
}

impl TokenCounts {
    /// Count tokens across every listing's sequence.
    ///
    /// With `Occurrences` a token repeated inside one listing counts once per
    /// repetition; with `Listings` it counts once per listing.
    pub fn tally(sequences: &[Vec<String>], mode: CountingMode) -> Self {
        let mut counts: HashMap<String, u64> = HashMap::new();

        for tokens in sequences {
            match mode {
                CountingMode::Occurrences => {
                    for token in tokens {
                        *counts.entry(token.clone()).or_default() += 1;
                    }
                }
                CountingMode::Listings => {
                    let distinct: HashSet<&String> = tokens.iter().collect();
                    for token in distinct {
                        *counts.entry(token.clone()).or_default() += 1;
                    }
                }
            }
        }

        Self { counts }
    }

    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens seen
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// One retained token with the count that qualified it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub token: String,
    pub count: u64,
}

/// Ordered, duplicate-free set of tokens kept for modeling.
///
/// Entries are sorted by descending count, ties by token, so column order is
/// reproducible across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Select tokens whose count is strictly above `min_count`, minus the
    /// excluded tokens.
    pub fn build(sequences: &[Vec<String>], config: &VocabularyConfig) -> Self {
        let counts = TokenCounts::tally(sequences, config.counting);
        Self::from_counts(&counts, config)
    }

    /// Select from precomputed counts
    pub fn from_counts(counts: &TokenCounts, config: &VocabularyConfig) -> Self {
        let excluded: HashSet<&str> = config.excluded_tokens.iter().map(|s| s.as_str()).collect();

        let mut entries: Vec<VocabularyEntry> = counts
            .counts
            .iter()
            .filter(|&(token, &count)| count > config.min_count && !excluded.contains(token.as_str()))
            .map(|(token, &count)| VocabularyEntry {
                token: token.clone(),
                count,
            })
            .collect();

        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.token.cmp(&b.token)));
        Self::from_entries(entries)
    }

    fn from_entries(entries: Vec<VocabularyEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.token.clone(), i))
            .collect();
        Self { entries, index }
    }

    /// Tokens in column order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.token.as_str())
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Column position of a token
    pub fn position(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
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

    fn listings(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn config(min_count: u64, counting: CountingMode) -> VocabularyConfig {
        VocabularyConfig {
            min_count,
            counting,
            ..VocabularyConfig::default()
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let sequences = listings(&[&["wifi", "tv"], &["wifi", "tv"], &["wifi"]]);
        let vocab = Vocabulary::build(&sequences, &config(2, CountingMode::Occurrences));

        assert!(vocab.contains("wifi"));
        assert!(!vocab.contains("tv"));
    }

    #[test]
    fn test_ordered_by_count_then_token() {
        let sequences = listings(&[
            &["kitchen", "wifi", "tv"],
            &["kitchen", "wifi", "tv"],
            &["wifi"],
        ]);
        let vocab = Vocabulary::build(&sequences, &config(0, CountingMode::Occurrences));

        assert_eq!(vocab.tokens().collect::<Vec<_>>(), vec!["wifi", "kitchen", "tv"]);
        assert_eq!(vocab.position("kitchen"), Some(1));
        assert_eq!(vocab.entries()[0].count, 3);
    }

    #[test]
    fn test_counting_modes_diverge_on_repeats() {
        let sequences = listings(&[&["wifi", "wifi"], &["wifi"], &["tv"]]);

        let by_occurrence = TokenCounts::tally(&sequences, CountingMode::Occurrences);
        let by_listing = TokenCounts::tally(&sequences, CountingMode::Listings);
        assert_eq!(by_occurrence.get("wifi"), 3);
        assert_eq!(by_listing.get("wifi"), 2);

        let cfg = config(2, CountingMode::Occurrences);
        assert!(Vocabulary::build(&sequences, &cfg).contains("wifi"));
        let cfg = config(2, CountingMode::Listings);
        assert!(!Vocabulary::build(&sequences, &cfg).contains("wifi"));
    }

    #[test]
    fn test_empty_input_gives_empty_vocabulary() {
        let vocab = Vocabulary::build(&[], &VocabularyConfig::default());
        assert!(vocab.is_empty());
        assert_eq!(vocab.len(), 0);
    }
}
