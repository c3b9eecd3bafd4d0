//! # bias-detector
//!
//! Detects rhetorical bias (subjective framing, loaded language, absolutist
//! claims, confirmation-seeking phrasing, leading questions, presumptions) in
//! prompt text and scores its severity.
//!
//! The crate is organised around four layers:
//!
//! 1. **[`lexicon`]** -- static catalogue of phrases, terms and regex
//!    patterns, grouped by [`BiasCategory`](lexicon::BiasCategory).
//! 2. **[`detector`]** -- compiles the patterns and runs one independent pass
//!    per category, producing a [`BiasReport`](report::BiasReport).
//! 3. **[`report`]** -- the category → matches map every pass writes into.
//! 4. **[`score`]** -- reduces a report to a 0–100 number.
//!
//! ## Quick start
//!
//! ```rust
//! use bias_detector::{BiasCategory, BiasDetector};
//!
//! let detector = BiasDetector::new().unwrap();
//! let report = detector.detect_biases("Obviously this is a terrible idea.");
//! assert_eq!(report.count(BiasCategory::LoadedTerms), 1);
//! assert_eq!(report.score(), 25);
//! ```

pub mod detector;
pub mod lexicon;
pub mod report;
pub mod score;

// Re-export the most commonly used types at the crate root for ergonomic
// imports (`use bias_detector::BiasDetector`).
pub use detector::{BiasDetector, DetectorError};
pub use lexicon::BiasCategory;
pub use report::{BiasMatch, BiasReport};
pub use score::{score, MAX_SCORE};
