//! Rule-driven rewriter that turns a biased prompt into a neutral one and
//! records every change it makes.

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use bias_detector::{BiasCategory, BiasReport};

use crate::rules::{
    ABSOLUTIST_SOFTENERS, LEADING_JUDGEMENT, LEADING_JUDGEMENT_REPLACEMENT, LEADING_OPENER,
    LEADING_OPENER_REPLACEMENT, NEUTRAL_REPLACEMENTS, PRESUMPTION_REWRITES, QUESTION_REWRITES,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while constructing a [`PromptRewriter`].
#[derive(Debug, thiserror::Error)]
pub enum RewriterError {
    #[error("failed to compile rewrite rule: {0}")]
    RegexCompile(#[from] regex::Error),
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// The outcome of a [`PromptRewriter::rewrite`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteResult {
    /// The input, unmodified.
    pub original: String,
    /// The neutral rewrite.
    pub rewritten: String,
    /// Human-readable change log, in the order the steps fired.
    pub changes: Vec<String>,
}

impl RewriteResult {
    /// `true` when at least one rule changed the text.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Compiled rules
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Substitution {
    regex: Regex,
    from: &'static str,
    to: &'static str,
}

impl Substitution {
    /// Case-insensitive literal match of `from`, anywhere in the text.
    fn literal(from: &'static str, to: &'static str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("(?i){}", regex::escape(from)))?;
        Ok(Self { regex, from, to })
    }

    /// Whole-word, case-insensitive literal match of `from`.
    fn word(from: &'static str, to: &'static str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(from)))?;
        Ok(Self { regex, from, to })
    }

    /// `from` is itself a pattern; `to` may reference its capture groups.
    fn pattern(from: &'static str, to: &'static str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(from)?,
            from,
            to,
        })
    }
}

/// Working text plus the change log accumulated so far.
struct Draft {
    text: String,
    changes: Vec<String>,
}

/// One pipeline stage.
type Step = fn(&PromptRewriter, Draft, &BiasReport) -> Draft;

// ---------------------------------------------------------------------------
// PromptRewriter
// ---------------------------------------------------------------------------

/// Main entry point for neutral rewriting.
///
/// # Example
///
/// ```rust
/// use bias_detector::BiasDetector;
/// use prompt_rewriter::PromptRewriter;
///
/// let detector = BiasDetector::new().unwrap();
/// let rewriter = PromptRewriter::new().unwrap();
///
/// let text = "Why does telepathy exist?";
/// let result = rewriter.rewrite(text, &detector.detect_biases(text));
/// assert_eq!(result.rewritten, "What evidence exists for telepathy?");
/// ```
#[derive(Debug)]
pub struct PromptRewriter {
    lexical: Vec<Substitution>,
    presumptions: Vec<Substitution>,
    questions: Vec<Substitution>,
    softeners: Vec<Substitution>,
    leading_opener: Regex,
    leading_judgement: Regex,
    whitespace: Regex,
}

impl PromptRewriter {
    /// Steps run in this order; normalization comes last.
    const PIPELINE: [Step; 6] = [
        Self::neutralize_terms,
        Self::reformulate_presumption,
        Self::reformulate_questions,
        Self::soften_absolutes,
        Self::neutralize_leading_question,
        Self::normalize,
    ];

    /// Compile every rewrite rule.
    pub fn new() -> Result<Self, RewriterError> {
        let lexical = NEUTRAL_REPLACEMENTS
            .iter()
            .map(|(from, to)| Substitution::literal(from, to))
            .collect::<Result<Vec<_>, _>>()?;
        let presumptions = PRESUMPTION_REWRITES
            .iter()
            .map(|(from, to)| Substitution::pattern(from, to))
            .collect::<Result<Vec<_>, _>>()?;
        let questions = QUESTION_REWRITES
            .iter()
            .map(|(from, to)| Substitution::pattern(from, to))
            .collect::<Result<Vec<_>, _>>()?;
        let softeners = ABSOLUTIST_SOFTENERS
            .iter()
            .map(|(from, to)| Substitution::word(from, to))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            lexical,
            presumptions,
            questions,
            softeners,
            leading_opener: Regex::new(LEADING_OPENER)?,
            leading_judgement: Regex::new(LEADING_JUDGEMENT)?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Rewrite `text` into a neutral form.
    ///
    /// `report` is the detector's view of the same text; only the
    /// leading-question step consults it; every other step matches its own
    /// rules.
    pub fn rewrite(&self, text: &str, report: &BiasReport) -> RewriteResult {
        let start = Draft {
            text: text.to_string(),
            changes: Vec::new(),
        };

        let done = Self::PIPELINE
            .iter()
            .fold(start, |draft, step| step(self, draft, report));

        debug!(changes = done.changes.len(), "prompt rewritten");

        RewriteResult {
            original: text.to_string(),
            rewritten: done.text,
            changes: done.changes,
        }
    }

    // -- steps --------------------------------------------------------------

    /// Replace or delete every flagged term, table entry by table entry.
    /// Terms match inside longer words too ("perfectly" → "optimally").
    fn neutralize_terms(&self, mut draft: Draft, _report: &BiasReport) -> Draft {
        for sub in &self.lexical {
            if !sub.regex.is_match(&draft.text) {
                continue;
            }
            draft.text = sub
                .regex
                .replace_all(&draft.text, NoExpand(sub.to))
                .into_owned();
            draft.changes.push(if sub.to.is_empty() {
                format!("Removed '{}'", sub.from)
            } else {
                format!("Replaced '{}' with '{}'", sub.from, sub.to)
            });
        }
        draft
    }

    /// Apply the first presumption rule that matches, and only that one.
    fn reformulate_presumption(&self, mut draft: Draft, _report: &BiasReport) -> Draft {
        if let Some(sub) = self.presumptions.iter().find(|s| s.regex.is_match(&draft.text)) {
            draft.text = sub.regex.replace_all(&draft.text, sub.to).into_owned();
            draft
                .changes
                .push("Removed presumption about unproven facts".to_string());
        }
        draft
    }

    /// Apply every question rule that matches, in table order.
    fn reformulate_questions(&self, mut draft: Draft, _report: &BiasReport) -> Draft {
        for sub in &self.questions {
            if !sub.regex.is_match(&draft.text) {
                continue;
            }
            draft.text = sub.regex.replace_all(&draft.text, sub.to).into_owned();
            draft
                .changes
                .push("Reformulated question structure".to_string());
        }
        draft
    }

    /// Hedge absolute quantifiers whether or not the detector flagged them.
    /// Not recorded in the change log.
    fn soften_absolutes(&self, mut draft: Draft, _report: &BiasReport) -> Draft {
        for sub in &self.softeners {
            draft.text = sub
                .regex
                .replace_all(&draft.text, NoExpand(sub.to))
                .into_owned();
        }
        draft
    }

    /// Only runs when the detector reported a leading question.
    fn neutralize_leading_question(&self, mut draft: Draft, report: &BiasReport) -> Draft {
        if report.get(BiasCategory::LeadingQuestions).is_empty() {
            return draft;
        }

        let neutral = {
            let opened = self
                .leading_opener
                .replace(&draft.text, NoExpand(LEADING_OPENER_REPLACEMENT));
            self.leading_judgement
                .replace_all(&opened, LEADING_JUDGEMENT_REPLACEMENT)
                .into_owned()
        };
        draft.text = neutral;
        draft
            .changes
            .push("Converted leading question to neutral query".to_string());
        draft
    }

    /// Collapse whitespace, trim, and capitalize the first character.
    fn normalize(&self, mut draft: Draft, _report: &BiasReport) -> Draft {
        let normalized = {
            let collapsed = self.whitespace.replace_all(&draft.text, " ");
            let mut chars = collapsed.trim().chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        };
        draft.text = normalized;
        draft
    }
}

impl Default for PromptRewriter {
    /// # Panics
    ///
    /// Panics if the built-in rule tables fail to compile, which the rule
    /// tests rule out.
    fn default() -> Self {
        Self::new().expect("built-in rewrite rules must compile")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
