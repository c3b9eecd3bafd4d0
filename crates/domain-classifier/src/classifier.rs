//! Keyword and pattern scoring that picks a prompt's subject domain.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::debug;

use crate::domain::{Confidence, Domain, DomainResult};
use crate::lexicon::{DomainLexicon, DOMAIN_LEXICONS, KEYWORD_WEIGHT, PATTERN_WEIGHT};

/// Errors that can occur while constructing a [`DomainClassifier`].
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("failed to compile {domain} pattern: {source}")]
    RegexCompile {
        domain: Domain,
        #[source]
        source: regex::Error,
    },
}

/// One domain's table with its patterns compiled.
#[derive(Debug)]
struct CompiledLexicon {
    domain: Domain,
    keywords: &'static [&'static str],
    patterns: Vec<Regex>,
}

impl CompiledLexicon {
    fn compile(lexicon: &DomainLexicon) -> Result<Self, ClassifierError> {
        let patterns = lexicon
            .patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| ClassifierError::RegexCompile {
                domain: lexicon.domain,
                source,
            })?;

        Ok(Self {
            domain: lexicon.domain,
            keywords: lexicon.keywords,
            patterns,
        })
    }

    fn score(&self, text: &str, lower: &str) -> u32 {
        let keyword_hits = self.keywords.iter().filter(|kw| lower.contains(*kw)).count();
        let pattern_hits: usize = self.patterns.iter().map(|re| re.find_iter(text).count()).sum();

        to_u32(keyword_hits)
            .saturating_mul(KEYWORD_WEIGHT)
            .saturating_add(to_u32(pattern_hits).saturating_mul(PATTERN_WEIGHT))
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Keyword/pattern domain classifier.
#[derive(Debug)]
pub struct DomainClassifier {
    /// In tie-break order.
    lexicons: Vec<CompiledLexicon>,
}

impl DomainClassifier {
    /// Compile the built-in domain tables.
    pub fn new() -> Result<Self, ClassifierError> {
        let lexicons = DOMAIN_LEXICONS
            .iter()
            .map(CompiledLexicon::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { lexicons })
    }

    /// Score `text` against every domain and pick the best one.
    ///
    /// Ties at the top go to the earliest domain in
    /// [`Domain::SCORED`] order.  When nothing scores the result is
    /// `general` with high confidence.
    pub fn detect_domain(&self, text: &str) -> DomainResult {
        let lower = text.to_lowercase();

        let mut scores: BTreeMap<Domain, u32> =
            Domain::ALL.into_iter().map(|d| (d, 0)).collect();
        for lexicon in &self.lexicons {
            scores.insert(lexicon.domain, lexicon.score(text, &lower));
        }

        let (domain, confidence) = pick(&scores);

        debug!(
            %domain,
            ?confidence,
            ?scores,
            "domain classified"
        );

        DomainResult {
            domain,
            confidence,
            scores,
        }
    }
}

impl Default for DomainClassifier {
    /// # Panics
    ///
    /// Panics if the built-in domain tables fail to compile, which the
    /// lexicon tests rule out.
    fn default() -> Self {
        Self::new().expect("built-in domain patterns must compile")
    }
}

/// Winner and confidence for a complete score map.
fn pick(scores: &BTreeMap<Domain, u32>) -> (Domain, Confidence) {
    let score_of = |d: Domain| scores.get(&d).copied().unwrap_or(0);

    let mut best = Domain::General;
    let mut best_score = 0;
    for domain in Domain::SCORED {
        // Strictly greater keeps the earlier domain on a tie.
        if score_of(domain) > best_score {
            best = domain;
            best_score = score_of(domain);
        }
    }

    if best_score == 0 {
        return (Domain::General, Confidence::High);
    }

    let mut ranked: Vec<u32> = scores.values().copied().collect();
    ranked.sort_unstable_by(|a, b| b.cmp(a));
    let gap = ranked[0] - ranked.get(1).copied().unwrap_or(0);

    (best, Confidence::from_gap(gap))
}
