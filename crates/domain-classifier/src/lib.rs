//! # domain-classifier
//!
//! Assigns a prompt to a topical [`Domain`] (political, science, medical, or
//! general) by scoring it against per-domain keyword and regex tables.
//!
//! ```rust
//! use domain_classifier::{Confidence, Domain, DomainClassifier};
//!
//! let classifier = DomainClassifier::new().unwrap();
//! let result = classifier.detect_domain("What did the latest clinical trial find?");
//! assert_eq!(result.domain, Domain::Medical);
//! assert_eq!(result.confidence, Confidence::High);
//! ```

mod classifier;
mod domain;
pub mod lexicon;

pub use classifier::{ClassifierError, DomainClassifier};
pub use domain::{Confidence, Domain, DomainResult, UnknownDomain};
