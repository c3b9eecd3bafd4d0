//! Detection output types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lexicon::BiasCategory;

/// A single detected occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiasMatch {
    /// The lexicon term or the matched text.
    pub term: String,
    /// Character offset into the lowercased text.  `0` for whole-text
    /// heuristics.
    pub position: usize,
    /// Length of the match in characters.
    pub length: usize,
}

impl BiasMatch {
    /// Build a match from a byte offset into `haystack`, converting offset and
    /// length to character counts.
    pub(crate) fn at_byte(haystack: &str, byte_offset: usize, term: &str) -> Self {
        Self {
            term: term.to_string(),
            position: haystack[..byte_offset].chars().count(),
            length: term.chars().count(),
        }
    }

    /// A match that covers the whole of `text`.
    pub fn whole_text(term: impl Into<String>, text: &str) -> Self {
        Self {
            term: term.into(),
            position: 0,
            length: text.chars().count(),
        }
    }
}

/// Category → matches, in detection order.
///
/// Every [`BiasCategory`] is always present as a key, possibly with an empty
/// list.  Deserializing a map with missing categories fills them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<BiasCategory, Vec<BiasMatch>>")]
pub struct BiasReport {
    #[serde(flatten)]
    matches: BTreeMap<BiasCategory, Vec<BiasMatch>>,
}

impl BiasReport {
    /// A report with every category present and empty.
    pub fn empty() -> Self {
        Self {
            matches: BiasCategory::ALL
                .into_iter()
                .map(|c| (c, Vec::new()))
                .collect(),
        }
    }

    /// Matches recorded for `category`.
    pub fn get(&self, category: BiasCategory) -> &[BiasMatch] {
        self.matches
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Append a match to `category`.
    pub fn push(&mut self, category: BiasCategory, found: BiasMatch) {
        self.matches.entry(category).or_default().push(found);
    }

    /// Append several matches to `category`, keeping their order.
    pub fn extend(&mut self, category: BiasCategory, found: impl IntoIterator<Item = BiasMatch>) {
        self.matches.entry(category).or_default().extend(found);
    }

    /// Iterate over every category and its matches in category order.
    pub fn iter(&self) -> impl Iterator<Item = (BiasCategory, &[BiasMatch])> {
        self.matches.iter().map(|(c, m)| (*c, m.as_slice()))
    }

    /// Number of matches in `category`.
    pub fn count(&self, category: BiasCategory) -> usize {
        self.get(category).len()
    }

    /// Total number of matches across all categories.
    pub fn total_matches(&self) -> usize {
        self.matches.values().map(Vec::len).sum()
    }

    /// `true` when no category has any match.
    pub fn is_clean(&self) -> bool {
        self.total_matches() == 0
    }

    /// Categories with at least one match.
    pub fn detected_categories(&self) -> Vec<BiasCategory> {
        self.iter()
            .filter(|(_, m)| !m.is_empty())
            .map(|(c, _)| c)
            .collect()
    }

    /// Weighted severity of this report.  See [`crate::score::score`].
    pub fn score(&self) -> u32 {
        crate::score::score(self)
    }
}

impl Default for BiasReport {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<BTreeMap<BiasCategory, Vec<BiasMatch>>> for BiasReport {
    fn from(mut matches: BTreeMap<BiasCategory, Vec<BiasMatch>>) -> Self {
        for category in BiasCategory::ALL {
            matches.entry(category).or_default();
        }
        Self { matches }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_has_every_category() {
        let report = BiasReport::empty();
        assert_eq!(report.iter().count(), BiasCategory::ALL.len());
        assert!(report.is_clean());
        assert!(report.detected_categories().is_empty());
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut report = BiasReport::empty();
        report.push(
            BiasCategory::LoadedTerms,
            BiasMatch { term: "fake".into(), position: 9, length: 4 },
        );
        report.push(
            BiasCategory::LoadedTerms,
            BiasMatch { term: "awful".into(), position: 2, length: 5 },
        );
        let terms: Vec<&str> = report
            .get(BiasCategory::LoadedTerms)
            .iter()
            .map(|m| m.term.as_str())
            .collect();
        assert_eq!(terms, ["fake", "awful"]);
        assert_eq!(report.total_matches(), 2);
        assert_eq!(report.detected_categories(), [BiasCategory::LoadedTerms]);
    }

    #[test]
    fn serializes_as_category_keyed_object() {
        let json = serde_json::to_value(BiasReport::empty()).unwrap();
        let obj = json.as_object().expect("report serializes as an object");
        assert_eq!(obj.len(), 6);
        for category in BiasCategory::ALL {
            assert_eq!(obj[category.as_str()], serde_json::json!([]));
        }
    }

    #[test]
    fn deserializing_partial_map_fills_missing_categories() {
        let json = r#"{"loaded_terms":[{"term":"evil","position":0,"length":4}]}"#;
        let report: BiasReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.iter().count(), 6);
        assert_eq!(report.count(BiasCategory::LoadedTerms), 1);
        assert_eq!(report.count(BiasCategory::LeadingQuestions), 0);
    }

    #[test]
    fn at_byte_counts_characters() {
        let text = "très obviously";
        let m = BiasMatch::at_byte(text, text.find("obviously").unwrap(), "obviously");
        assert_eq!(m.position, 5);
        assert_eq!(m.length, 9);
    }
}
