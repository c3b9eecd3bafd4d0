//! Domain keyword and pattern tables.
//!
//! Keywords are lowercase and matched as substrings of the lowercased text.
//! Patterns carry their own `(?i)` flag and are matched against the original
//! text.

use crate::domain::Domain;

/// Keywords and patterns for one scored domain.
pub struct DomainLexicon {
    pub domain: Domain,
    /// Each distinct keyword present adds 1.
    pub keywords: &'static [&'static str],
    /// Each match of each pattern adds [`PATTERN_WEIGHT`].
    pub patterns: &'static [&'static str],
}

/// Points per keyword present.
pub const KEYWORD_WEIGHT: u32 = 1;

/// Points per pattern match.
pub const PATTERN_WEIGHT: u32 = 2;

/// The built-in domain tables, in tie-break order.
pub static DOMAIN_LEXICONS: &[DomainLexicon] = &[
    DomainLexicon {
        domain: Domain::Political,
        keywords: &[
            "government", "politics", "politician", "election", "vote", "voting",
            "congress", "senate", "president", "mayor", "governor", "law",
            "legislation", "policy", "democrat", "republican", "liberal", "conservative",
            "party", "campaign", "immigration", "taxes", "regulation", "rights",
            "democracy", "socialism", "capitalism", "freedom", "liberty",
        ],
        patterns: &[
            r"(?i)\b(?:biden|trump|obama|harris|pence)\b",
            r"(?i)\b(?:white house|capitol|supreme court)\b",
            r"(?i)\b(?:left-wing|right-wing)\b",
        ],
    },
    DomainLexicon {
        domain: Domain::Science,
        keywords: &[
            "research", "study", "experiment", "theory", "hypothesis", "data",
            "scientist", "laboratory", "climate", "evolution", "physics", "chemistry",
            "biology", "astronomy", "geology", "scientific", "evidence", "peer-reviewed",
            "quantum", "atom", "molecule", "species", "ecosystem", "energy",
            "gravity", "space", "universe", "planet", "dna", "gene",
        ],
        patterns: &[
            r"(?i)\b(?:climate change|global warming)\b",
            r"(?i)\b(?:big bang|black hole)\b",
            r"(?i)\bpeer.?reviewed\b",
        ],
    },
    DomainLexicon {
        domain: Domain::Medical,
        keywords: &[
            "doctor", "hospital", "patient", "disease", "illness", "diagnosis",
            "treatment", "medicine", "medication", "surgery", "therapy", "vaccine",
            "symptoms", "health", "healthcare", "medical", "clinical", "drug",
            "virus", "bacteria", "infection", "cancer", "diabetes", "heart",
            "blood", "pharmaceutical", "prescription", "dosage", "side effects",
        ],
        patterns: &[
            r"(?i)\b(?:covid|coronavirus|pandemic)\b",
            r"(?i)\b(?:FDA|CDC|WHO)\b",
            r"(?i)\b(?:clinical trial|clinical study)\b",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_patterns_compile() {
        for lexicon in DOMAIN_LEXICONS {
            for pat in lexicon.patterns {
                regex::Regex::new(pat).unwrap_or_else(|e| {
                    panic!("{} pattern '{pat}' failed to compile: {e}", lexicon.domain)
                });
            }
        }
    }

    #[test]
    fn patterns_ignore_case() {
        for lexicon in DOMAIN_LEXICONS {
            for pat in lexicon.patterns {
                assert!(pat.starts_with("(?i)"), "{} pattern '{pat}' is case-sensitive", lexicon.domain);
            }
        }
    }

    #[test]
    fn keywords_are_unique_and_lowercase() {
        for lexicon in DOMAIN_LEXICONS {
            let mut seen = HashSet::new();
            for kw in lexicon.keywords {
                assert!(seen.insert(kw), "duplicate {} keyword: {kw}", lexicon.domain);
                assert_eq!(*kw, kw.to_lowercase(), "keyword must be lowercase: {kw}");
            }
        }
    }

    #[test]
    fn lexicons_follow_tie_break_order() {
        let order: Vec<Domain> = DOMAIN_LEXICONS.iter().map(|l| l.domain).collect();
        assert_eq!(order, Domain::SCORED);
    }
}
