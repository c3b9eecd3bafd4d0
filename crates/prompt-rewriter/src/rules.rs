//! Rewrite rule tables.
//!
//! Table order is application order.  Pattern replacements use `regex`
//! replacement syntax (`${1}` for the first capture group).

/// Term → neutral replacement.  An empty replacement deletes the term.
///
/// Keyed independently of the detector lexicon: it also covers absolutist
/// adverbs, and later entries see the output of earlier ones.
pub static NEUTRAL_REPLACEMENTS: &[(&str, &str)] = &[
    ("obviously", ""),
    ("clearly", ""),
    ("everyone knows", "it is commonly stated"),
    ("undoubtedly", "it appears"),
    ("certainly", "possibly"),
    ("always", "often"),
    ("never", "rarely"),
    ("definitely", "likely"),
    ("surely", "perhaps"),
    ("of course", ""),
    ("terrible", "poor"),
    ("awful", "inadequate"),
    ("horrible", "problematic"),
    ("amazing", "notable"),
    ("perfect", "optimal"),
    ("disgusting", "concerning"),
    ("brilliant", "effective"),
    ("stupid", "ineffective"),
    ("idiotic", "questionable"),
    ("catastrophic", "significant"),
    ("disaster", "setback"),
    ("evil", "harmful"),
    ("corrupt", "problematic"),
    ("fake", "disputed"),
];

/// Presumption pattern → neutral phrasing.  Only the first matching entry is
/// applied per rewrite.
pub static PRESUMPTION_REWRITES: &[(&str, &str)] = &[
    (
        r"(?i)show (?:me )?why (.+?) (?:exists?|is real|works?|happened)",
        "what evidence exists for ${1}",
    ),
    (
        r"(?i)explain why (.+?) (?:exists?|is real|works?|happened)",
        "what evidence exists for ${1}",
    ),
    (
        r"(?i)tell me why (.+?) (?:exists?|is real|works?|happened)",
        "what evidence exists for ${1}",
    ),
    (r"(?i)why does (.+?) exist", "what evidence exists for ${1}"),
    (r"(?i)prove (.+?) exists?", "what evidence exists for ${1}"),
    (r"(?i)show (.+?) is real", "what evidence exists for ${1}"),
];

/// Question pattern → neutral phrasing.  Every matching entry is applied, in
/// order.
pub static QUESTION_REWRITES: &[(&str, &str)] = &[
    (r"(?i)why is (.+?) (so )?bad", "what are the characteristics of ${1}"),
    (r"(?i)why is (.+?) (so )?good", "what are the characteristics of ${1}"),
    (r"(?i)isn't it true that (.+)", "is it accurate that ${1}"),
    (r"(?i)don't you think (.+)", "what evidence exists regarding ${1}"),
    (r"(?i)prove that (.+)", "what evidence exists regarding ${1}"),
    (r"(?i)show that (.+)", "what data indicates about ${1}"),
];

/// Absolute quantifier → hedged quantifier.  Applied unconditionally.
pub static ABSOLUTIST_SOFTENERS: &[(&str, &str)] = &[
    ("all", "many"),
    ("every", "most"),
    ("none", "few"),
];

/// Openers stripped from a leading question.
pub const LEADING_OPENER: &str = r"(?i)^(isn't it|aren't they|don't you think)\s+(that\s+)?";

/// Replacement for [`LEADING_OPENER`].
pub const LEADING_OPENER_REPLACEMENT: &str = "what information exists about ";

/// "why is/are X (so) good/bad" questions.
pub const LEADING_JUDGEMENT: &str =
    r"(?i)why (is|are) (.+?) (so )?(bad|good|terrible|great)\??";

/// Replacement for [`LEADING_JUDGEMENT`].
pub const LEADING_JUDGEMENT_REPLACEMENT: &str = "what are the characteristics of ${2}?";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_patterns_compile() {
        let patterns = PRESUMPTION_REWRITES
            .iter()
            .chain(QUESTION_REWRITES)
            .map(|(p, _)| *p)
            .chain([LEADING_OPENER, LEADING_JUDGEMENT]);
        for pat in patterns {
            regex::Regex::new(pat)
                .unwrap_or_else(|e| panic!("pattern '{pat}' failed to compile: {e}"));
        }
    }

    #[test]
    fn replacement_terms_are_unique() {
        let mut seen = HashSet::new();
        for (term, _) in NEUTRAL_REPLACEMENTS {
            assert!(seen.insert(term), "duplicate replacement term: {term}");
        }
    }

    #[test]
    fn replacements_do_not_reintroduce_terms() {
        let terms: Vec<&str> = NEUTRAL_REPLACEMENTS.iter().map(|(t, _)| *t).collect();
        for (_, replacement) in NEUTRAL_REPLACEMENTS {
            for word in replacement.split_whitespace() {
                assert!(
                    !terms.contains(&word),
                    "replacement '{replacement}' contains flagged term '{word}'"
                );
            }
        }
    }
}
