//! Domain-specific alternative phrasings offered next to a rewrite.

use domain_classifier::Domain;

const POLITICAL: [&str; 3] = [
    "What evidence exists regarding this political position?",
    "What are the documented effects of this policy?",
    "How do different sources characterize this issue?",
];

const SCIENCE: [&str; 3] = [
    "What does peer-reviewed research indicate about this topic?",
    "What is the current scientific consensus on this matter?",
    "What experimental evidence exists regarding this hypothesis?",
];

const MEDICAL: [&str; 3] = [
    "What do clinical studies show about this treatment?",
    "What is the medical evidence regarding this condition?",
    "What do healthcare guidelines recommend for this situation?",
];

const GENERAL: [&str; 3] = [
    "What factual information exists about this topic?",
    "What do reliable sources say about this matter?",
    "What objective data is available on this subject?",
];

/// Three neutral question templates for `domain`.
///
/// Depends on the domain only, never on the analyzed text.
pub fn suggest_alternatives(domain: Domain) -> &'static [&'static str; 3] {
    match domain {
        Domain::Political => &POLITICAL,
        Domain::Science => &SCIENCE,
        Domain::Medical => &MEDICAL,
        Domain::General => &GENERAL,
    }
}
