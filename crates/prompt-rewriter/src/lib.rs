//! # prompt-rewriter
//!
//! Turns a biased prompt into a neutral one and suggests alternative,
//! domain-appropriate phrasings.
//!
//! The crate is organised around three layers:
//!
//! 1. **[`rules`]** -- static term, presumption, question and softening
//!    tables, in application order.
//! 2. **[`rewriter`]** -- compiles the tables and runs them as a fixed
//!    pipeline, producing a [`RewriteResult`](rewriter::RewriteResult) with a
//!    change log.
//! 3. **[`alternatives`]** -- three neutral question templates per
//!    [`Domain`](domain_classifier::Domain).
//!
//! ## Quick start
//!
//! ```rust
//! use bias_detector::BiasDetector;
//! use prompt_rewriter::PromptRewriter;
//!
//! let detector = BiasDetector::new().unwrap();
//! let rewriter = PromptRewriter::new().unwrap();
//!
//! let text = "Obviously, this policy is terrible.";
//! let result = rewriter.rewrite(text, &detector.detect_biases(text));
//! assert_eq!(result.rewritten, ", this policy is poor.");
//! assert!(result.has_changes());
//! ```

pub mod alternatives;
pub mod rewriter;
pub mod rules;

pub use alternatives::suggest_alternatives;
pub use rewriter::{PromptRewriter, RewriteResult, RewriterError};
