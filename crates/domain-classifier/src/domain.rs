use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Topical domain of a prompt.
///
/// Declaration order is the tie-break order used by the classifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Political,
    Science,
    Medical,
    /// Fallback when nothing scores.
    General,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::Political,
        Domain::Science,
        Domain::Medical,
        Domain::General,
    ];

    /// Domains that have a lexicon, in tie-break order.
    pub const SCORED: [Domain; 3] = [Domain::Political, Domain::Science, Domain::Medical];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Political => "political",
            Self::Science => "science",
            Self::Medical => "medical",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown domain name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown domain '{0}'; expected one of political, science, medical, general")]
pub struct UnknownDomain(pub String);

impl FromStr for Domain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| UnknownDomain(s.to_string()))
    }
}

/// How clearly the winning domain stood out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Confidence from the gap between the two highest scores.
    pub const fn from_gap(gap: u32) -> Self {
        match gap {
            0 => Self::Low,
            1 | 2 => Self::Medium,
            _ => Self::High,
        }
    }
}

/// Outcome of [`DomainClassifier::detect_domain`](crate::DomainClassifier::detect_domain).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainResult {
    pub domain: Domain,
    pub confidence: Confidence,
    /// Score for every domain, `general` included (always 0).
    pub scores: BTreeMap<Domain, u32>,
}

impl DomainResult {
    /// Score for `domain`.
    pub fn score(&self, domain: Domain) -> u32 {
        self.scores.get(&domain).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Medical".parse::<Domain>(), Ok(Domain::Medical));
        assert_eq!(" science ".parse::<Domain>(), Ok(Domain::Science));
        assert!("sports".parse::<Domain>().is_err());
    }

    #[test]
    fn confidence_thresholds() {
        assert_eq!(Confidence::from_gap(0), Confidence::Low);
        assert_eq!(Confidence::from_gap(1), Confidence::Medium);
        assert_eq!(Confidence::from_gap(2), Confidence::Medium);
        assert_eq!(Confidence::from_gap(3), Confidence::High);
        assert_eq!(Confidence::from_gap(40), Confidence::High);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Domain::Political).unwrap(), "\"political\"");
        assert_eq!(serde_json::to_string(&Confidence::Medium).unwrap(), "\"medium\"");
    }
}
