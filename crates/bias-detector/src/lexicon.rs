//! Bias lexicon.
//!
//! Static catalogue of the phrases, terms and regex patterns the detector
//! checks for, grouped by [`BiasCategory`].  Plain phrase tables are matched
//! by substring or token comparison; the pattern tables are regex strings
//! compiled when a [`BiasDetector`](crate::detector::BiasDetector) is built.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Kind of rhetorical bias a lexicon entry targets.
///
/// The set is closed: adding a category means adding its table here and its
/// weight in [`BiasCategory::weight`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BiasCategory {
    /// Framing that asserts the speaker's view as self-evident.
    SubjectiveLanguage,
    /// Emotionally charged adjectives and nouns.
    LoadedTerms,
    /// Universal quantifiers that leave no room for exceptions.
    AbsolutistLanguage,
    /// Phrasing that asks for support of a conclusion already reached.
    ConfirmationBias,
    /// Questions that suggest their own answer.
    LeadingQuestions,
    /// Questions that take the existence or occurrence of their subject for
    /// granted.
    PresumptiveLanguage,
}

impl BiasCategory {
    /// Every category, in report order.
    pub const ALL: [BiasCategory; 6] = [
        BiasCategory::SubjectiveLanguage,
        BiasCategory::LoadedTerms,
        BiasCategory::AbsolutistLanguage,
        BiasCategory::ConfirmationBias,
        BiasCategory::LeadingQuestions,
        BiasCategory::PresumptiveLanguage,
    ];

    /// Score contributed by each match of this category.
    pub const fn weight(self) -> u32 {
        match self {
            Self::SubjectiveLanguage => 10,
            Self::LoadedTerms => 15,
            Self::AbsolutistLanguage => 12,
            Self::ConfirmationBias => 20,
            Self::LeadingQuestions => 25,
            Self::PresumptiveLanguage => 30,
        }
    }

    /// The snake_case name used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SubjectiveLanguage => "subjective_language",
            Self::LoadedTerms => "loaded_terms",
            Self::AbsolutistLanguage => "absolutist_language",
            Self::ConfirmationBias => "confirmation_bias",
            Self::LeadingQuestions => "leading_questions",
            Self::PresumptiveLanguage => "presumptive_language",
        }
    }

    /// Look a category up by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for BiasCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Phrase tables
// ---------------------------------------------------------------------------

/// Phrases that present an opinion as self-evident.  Matched as substrings
/// of the lowercased text.
pub static SUBJECTIVE_PHRASES: &[&str] = &[
    "obviously",
    "clearly",
    "everyone knows",
    "it is obvious",
    "undoubtedly",
    "certainly",
    "definitely",
    "surely",
    "of course",
    "naturally",
    "without a doubt",
];

/// Emotionally loaded single words.  Matched against word tokens.
pub static LOADED_TERMS: &[&str] = &[
    "terrible",
    "awful",
    "horrible",
    "amazing",
    "perfect",
    "disgusting",
    "brilliant",
    "stupid",
    "idiotic",
    "genius",
    "catastrophic",
    "disaster",
    "evil",
    "corrupt",
    "fake",
];

/// Phrases asking for confirmation of a predetermined conclusion.
pub static CONFIRMATION_PHRASES: &[&str] = &[
    "prove that",
    "show that",
    "confirm that",
    "verify that",
    "demonstrate that",
    "evidence that",
    "support the idea",
    "back up the claim",
];

/// Openers that mark a question as leading, when the text also contains a
/// question mark.
pub static LEADING_QUESTION_STARTERS: &[&str] = &[
    "why is",
    "why are",
    "isn't it",
    "aren't they",
    "don't you think",
];

/// Term recorded for the whole-text leading-question heuristic.
pub const LEADING_QUESTION_TERM: &str = "Leading question detected";

// ---------------------------------------------------------------------------
// Pattern tables
// ---------------------------------------------------------------------------

/// Absolute quantifiers.  Applied to the lowercased text.
pub static ABSOLUTIST_PATTERNS: &[&str] = &[
    r"\ball\b",
    r"\bevery\b",
    r"\bnone\b",
    r"\bno one\b",
    r"\beveryone\b",
    r"\balways\b",
    r"\bnever\b",
];

/// Questions that presuppose their object.  Applied to the lowercased text.
///
/// `how does X work` and `when did X happen` also catch plain factual
/// questions; they are kept as they are.
pub static PRESUMPTION_PATTERNS: &[&str] = &[
    r"show (?:me )?why (.+?) (?:exist|is real|works|happened)",
    r"explain why (.+?) (?:exist|is real|works|happened)",
    r"tell me why (.+?) (?:exist|is real|works|happened)",
    r"why does (.+?) exist",
    r"how does (.+?) work",
    r"when did (.+?) happen",
    r"prove (.+?) exists",
    r"show (.+?) is real",
];
