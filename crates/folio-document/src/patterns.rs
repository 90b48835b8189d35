//! Heading first-word frequency detection.
//!
//! Counts the first whitespace-delimited token of every heading title, folded to lowercase, and
//! reports the words that recur more often than a threshold. Textbooks converted from PDF tend
//! to repeat a label such as "Chapter" or "Lesson" on every heading; downstream consumers use the
//! resulting matchers to recognize those labels in other text.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use serde::{Serialize, Serializer};

use crate::DocumentError;

/// Default count a word must exceed to be reported as frequent.
pub const DEFAULT_PATTERN_THRESHOLD: usize = 6;

/// Accumulates first-word counts for one run.
#[derive(Debug, Clone, Default)]
pub struct PatternCounter {
    /// Occurrences per lowercase first word.
    counts: HashMap<String, usize>,
}

impl PatternCounter {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the first word of a heading title.
    ///
    /// Titles with no words are ignored.
    pub fn observe(&mut self, title: &str) {
        let Some(word) = title.split_whitespace().next() else {
            return;
        };
        *self.counts.entry(word.to_lowercase()).or_insert(0) += 1;
    }

    /// Returns how many headings started with `word` (already lowercase).
    pub fn count(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Returns the number of distinct words observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no heading has been observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Emits a pattern for every word whose count is strictly greater than `threshold`.
    ///
    /// Patterns are ordered by descending count, then alphabetically.
    pub fn finish(&self, threshold: usize) -> Result<Vec<FrequentPattern>, DocumentError> {
        let mut frequent: Vec<(&String, usize)> = self
            .counts
            .iter()
            .filter(|(_, count)| **count > threshold)
            .map(|(word, count)| (word, *count))
            .collect();
        frequent.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        frequent
            .into_iter()
            .map(|(word, count)| FrequentPattern::new(word, count))
            .collect()
    }
}

/// A heading word that recurs beyond the threshold, with a reusable matcher.
#[derive(Debug, Clone, Serialize)]
pub struct FrequentPattern {
    /// The lowercase word.
    pub word: String,
    /// How many headings started with the word.
    pub count: usize,
    /// Case-insensitive whole-word matcher for `word`.
    #[serde(rename = "pattern", serialize_with = "serialize_matcher")]
    pub matcher: Regex,
}

impl FrequentPattern {
    /// Builds a pattern and its matcher.
    pub fn new(word: &str, count: usize) -> Result<Self, DocumentError> {
        let matcher = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(word)))
            .case_insensitive(true)
            .build()
            .map_err(|source| DocumentError::Matcher {
                word: word.to_string(),
                source,
            })?;
        Ok(Self {
            word: word.to_string(),
            count,
            matcher,
        })
    }

    /// Returns true if `text` contains the word as a whole word, in any letter case.
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}

/// Serializes a matcher as its source pattern.
fn serialize_matcher<S: Serializer>(matcher: &Regex, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(matcher.as_str())
}
