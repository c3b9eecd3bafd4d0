//! Detector that checks a text against the bias lexicon and returns a
//! [`BiasReport`].

use regex::{Regex, RegexSet};
use tracing::debug;

use crate::lexicon::{
    BiasCategory, ABSOLUTIST_PATTERNS, CONFIRMATION_PHRASES, LEADING_QUESTION_STARTERS,
    LEADING_QUESTION_TERM, LOADED_TERMS, PRESUMPTION_PATTERNS, SUBJECTIVE_PHRASES,
};
use crate::report::{BiasMatch, BiasReport};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while constructing a [`BiasDetector`].
#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    #[error("failed to compile regex pattern: {0}")]
    RegexCompile(#[from] regex::Error),
}

// ---------------------------------------------------------------------------
// Detector
// ---------------------------------------------------------------------------

/// Compiled bias detector.
///
/// Holds no mutable state; one instance can serve any number of concurrent
/// callers.
#[derive(Debug)]
pub struct BiasDetector {
    /// Word tokenizer for the loaded-term pass.
    tokens: Regex,
    /// Parallel to [`ABSOLUTIST_PATTERNS`].
    absolutist: Vec<Regex>,
    /// Used to cheaply determine *which* presumption patterns match.
    presumption_set: RegexSet,
    /// Parallel to [`PRESUMPTION_PATTERNS`].
    presumption: Vec<Regex>,
}

impl BiasDetector {
    /// Compile every pattern in the lexicon and return a ready-to-use
    /// detector.
    pub fn new() -> Result<Self, DetectorError> {
        let tokens = Regex::new(r"\w+")?;

        let absolutist = ABSOLUTIST_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let presumption_set = RegexSet::new(PRESUMPTION_PATTERNS)?;
        let presumption = PRESUMPTION_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            tokens,
            absolutist,
            presumption_set,
            presumption,
        })
    }

    /// Run every pass over `text` and collect the results.
    ///
    /// Matching is case-insensitive: all passes work on the lowercased text,
    /// and reported positions index into it.
    pub fn detect_biases(&self, text: &str) -> BiasReport {
        let lower = text.to_lowercase();

        let mut report = BiasReport::empty();
        report.extend(BiasCategory::SubjectiveLanguage, subjective(&lower));
        report.extend(BiasCategory::LoadedTerms, self.loaded(&lower));
        report.extend(BiasCategory::AbsolutistLanguage, self.absolutist(&lower));
        report.extend(BiasCategory::ConfirmationBias, confirmation(&lower));
        report.extend(BiasCategory::LeadingQuestions, leading_question(text, &lower));
        report.extend(BiasCategory::PresumptiveLanguage, self.presumptive(&lower));

        for (category, matches) in report.iter().filter(|(_, m)| !m.is_empty()) {
            debug!(
                %category,
                count = matches.len(),
                "bias category detected"
            );
        }

        report
    }

    /// Tokens equal to a loaded term.  Every flagged token is recorded; its
    /// position is the first occurrence of that word in the text.
    fn loaded(&self, lower: &str) -> Vec<BiasMatch> {
        self.tokens
            .find_iter(lower)
            .map(|m| m.as_str())
            .filter(|token| LOADED_TERMS.contains(token))
            .filter_map(|token| {
                lower
                    .find(token)
                    .map(|offset| BiasMatch::at_byte(lower, offset, token))
            })
            .collect()
    }

    /// Every absolute quantifier, with its exact span.
    ///
    /// A quantifier that sits inside a subjective stock phrase ("everyone
    /// knows") is left to the subjective pass.
    fn absolutist(&self, lower: &str) -> Vec<BiasMatch> {
        let phrase_spans: Vec<(usize, usize)> = SUBJECTIVE_PHRASES
            .iter()
            .flat_map(|phrase| {
                lower
                    .match_indices(phrase)
                    .map(|(start, p)| (start, start + p.len()))
            })
            .collect();

        let inside_phrase = |start: usize, end: usize| {
            phrase_spans
                .iter()
                .any(|&(p_start, p_end)| p_start <= start && end <= p_end)
        };

        let mut found = Vec::new();
        for re in &self.absolutist {
            for m in re.find_iter(lower) {
                if inside_phrase(m.start(), m.end()) {
                    continue;
                }
                found.push(BiasMatch::at_byte(lower, m.start(), m.as_str()));
            }
        }
        found
    }

    /// Every match of every presumption pattern, pattern by pattern.
    fn presumptive(&self, lower: &str) -> Vec<BiasMatch> {
        let mut found = Vec::new();
        for idx in self.presumption_set.matches(lower).into_iter() {
            // A single pattern may match multiple times in the text.
            for m in self.presumption[idx].find_iter(lower) {
                found.push(BiasMatch::at_byte(lower, m.start(), m.as_str()));
            }
        }
        found
    }
}

impl Default for BiasDetector {
    /// # Panics
    ///
    /// Panics if the built-in lexicon fails to compile, which the lexicon
    /// tests rule out.
    fn default() -> Self {
        Self::new().expect("built-in bias patterns must compile")
    }
}

// ---------------------------------------------------------------------------
// Table passes
// ---------------------------------------------------------------------------

/// First occurrence of each phrase in `phrases` found in `lower`.
fn first_occurrences(lower: &str, phrases: &[&str]) -> Vec<BiasMatch> {
    phrases
        .iter()
        .filter_map(|phrase| {
            lower
                .find(phrase)
                .map(|offset| BiasMatch::at_byte(lower, offset, phrase))
        })
        .collect()
}

fn subjective(lower: &str) -> Vec<BiasMatch> {
    first_occurrences(lower, SUBJECTIVE_PHRASES)
}

fn confirmation(lower: &str) -> Vec<BiasMatch> {
    first_occurrences(lower, CONFIRMATION_PHRASES)
}

/// Whole-text heuristic: fires at most once.
fn leading_question(text: &str, lower: &str) -> Option<BiasMatch> {
    let is_leading = text.contains('?')
        && LEADING_QUESTION_STARTERS
            .iter()
            .any(|starter| lower.contains(starter));

    is_leading.then(|| BiasMatch::whole_text(LEADING_QUESTION_TERM, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> BiasDetector {
        BiasDetector::new().expect("detector should compile")
    }

    fn terms(report: &BiasReport, category: BiasCategory) -> Vec<String> {
        report
            .get(category)
            .iter()
            .map(|m| m.term.clone())
            .collect()
    }

    #[test]
    fn report_always_has_six_categories() {
        let d = detector();
        for text in ["", "   ", "Hello there.", "Obviously everyone is always wrong?"] {
            let report = d.detect_biases(text);
            assert_eq!(report.iter().count(), 6, "for input {text:?}");
        }
    }

    #[test]
    fn empty_text_is_clean() {
        let report = detector().detect_biases("");
        assert!(report.is_clean());
        assert_eq!(report.score(), 0);
    }

    #[test]
    fn neutral_text_is_clean() {
        let report = detector()
            .detect_biases("What are the documented effects of the new tax on small firms?");
        assert!(report.is_clean(), "unexpected findings: {report:?}");
    }

    #[test]
    fn policy_scenario() {
        let report = detector()
            .detect_biases("Obviously, this policy is terrible and everyone knows it always fails.");

        assert_eq!(
            terms(&report, BiasCategory::SubjectiveLanguage),
            ["obviously", "everyone knows"]
        );
        assert_eq!(terms(&report, BiasCategory::LoadedTerms), ["terrible"]);
        assert_eq!(terms(&report, BiasCategory::AbsolutistLanguage), ["always"]);
        assert!(report.get(BiasCategory::ConfirmationBias).is_empty());
        assert!(report.get(BiasCategory::LeadingQuestions).is_empty());
        assert!(report.get(BiasCategory::PresumptiveLanguage).is_empty());
        assert_eq!(report.score(), 47);
    }

    #[test]
    fn subjective_records_first_offset() {
        let report = detector().detect_biases("Clearly, and clearly again.");
        let matches = report.get(BiasCategory::SubjectiveLanguage);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].position, 0);
        assert_eq!(matches[0].length, "clearly".len());
    }

    #[test]
    fn loaded_terms_match_whole_tokens_only() {
        let report = detector().detect_biases("A perfectly fine plan, not a fake one.");
        assert_eq!(terms(&report, BiasCategory::LoadedTerms), ["fake"]);
    }

    #[test]
    fn recurring_loaded_term_reports_first_offset() {
        let report = detector().detect_biases("evil plans and evil deeds");
        let matches = report.get(BiasCategory::LoadedTerms);
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.position == 0));
    }

    #[test]
    fn absolutist_records_every_match_with_span() {
        let report = detector().detect_biases("All cats, all dogs, never birds.");
        let matches = report.get(BiasCategory::AbsolutistLanguage);
        let spans: Vec<(&str, usize, usize)> = matches
            .iter()
            .map(|m| (m.term.as_str(), m.position, m.length))
            .collect();
        assert_eq!(spans, [("all", 0, 3), ("all", 10, 3), ("never", 20, 5)]);
    }

    #[test]
    fn absolutist_respects_word_boundaries() {
        let report = detector().detect_biases("Everything is fine, smallest ballot.");
        assert!(report.get(BiasCategory::AbsolutistLanguage).is_empty());
    }

    #[test]
    fn standalone_everyone_is_absolutist() {
        let report = detector().detect_biases("Everyone agrees with me.");
        assert_eq!(terms(&report, BiasCategory::AbsolutistLanguage), ["everyone"]);
        assert!(report.get(BiasCategory::SubjectiveLanguage).is_empty());
    }

    #[test]
    fn confirmation_phrase_detected() {
        let report = detector().detect_biases("Prove that the moon landing was staged.");
        assert_eq!(terms(&report, BiasCategory::ConfirmationBias), ["prove that"]);
    }

    #[test]
    fn leading_question_requires_question_mark() {
        let d = detector();

        let asked = d.detect_biases("Isn't it true that vaccines are dangerous?");
        let leading = asked.get(BiasCategory::LeadingQuestions);
        assert_eq!(leading.len(), 1);
        assert_eq!(leading[0].term, LEADING_QUESTION_TERM);
        assert_eq!(leading[0].position, 0);
        assert_eq!(
            leading[0].length,
            "Isn't it true that vaccines are dangerous?".len()
        );

        let stated = d.detect_biases("Isn't it true that vaccines are dangerous.");
        assert!(stated.get(BiasCategory::LeadingQuestions).is_empty());
    }

    #[test]
    fn leading_question_fires_at_most_once() {
        let report = detector().detect_biases("Why is it late? Why are they rude? Isn't it odd?");
        assert_eq!(report.count(BiasCategory::LeadingQuestions), 1);
    }

    #[test]
    fn presumption_fires_on_existence_question() {
        let report = detector().detect_biases("Why does telepathy exist?");
        let matches = report.get(BiasCategory::PresumptiveLanguage);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term, "why does telepathy exist");
        assert_eq!(matches[0].position, 0);
        assert_eq!(report.score(), 30);
    }

    #[test]
    fn presumption_also_flags_neutral_how_questions() {
        let d = detector();
        let how = d.detect_biases("How does photosynthesis work?");
        assert_eq!(how.count(BiasCategory::PresumptiveLanguage), 1);

        let when = d.detect_biases("When did the Roman empire happen to fall?");
        assert_eq!(when.count(BiasCategory::PresumptiveLanguage), 1);
    }

    #[test]
    fn detection_is_deterministic() {
        let d = detector();
        let text = "Surely all of this is a disaster? Don't you think so? Show me why ghosts exist.";
        let first = d.detect_biases(text);
        let second = d.detect_biases(text);
        assert_eq!(first, second);
        assert_eq!(first.score(), second.score());
    }

    #[test]
    fn default_compiles() {
        let _ = BiasDetector::default();
    }
}
