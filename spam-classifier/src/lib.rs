//! spam-classifier: Naive-Bayes spam/ham text classification
//!
//! Learns per-word spamicities from labeled documents and flags new
//! documents whose most discriminating words combine to a high spam
//! probability.
//!
//! # Features
//!
//! - **Tokenizer**: Unicode-aware, case-insensitive word extraction
//! - **Statistics store**: per-category word and document counts
//! - **Classifier**: weighted summarization and top-15 odds combination
//! - **Filter**: shared, async-friendly wrapper for ingestion pipelines
//! - **Corpus**: training data from directories or MBOX archives
//!
//! # Example
//!
//! ```
//! use spam_classifier::spam::{Category, SpamClassifier};
//!
//! let mut classifier = SpamClassifier::new();
//! for _ in 0..50 {
//!     classifier.train(Category::Spam, "viagra");
//!     classifier.train(Category::Ham, "meeting notes");
//! }
//! classifier.summarize();
//!
//! assert!(classifier.classify("viagra viagra"));
//! assert!(!classifier.classify("notes from the meeting"));
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`corpus`]: Training corpus loading
//! - [`error`]: Error types and handling
//! - [`spam`]: Tokenizer, statistics, classifier and filter

pub mod config;
pub mod corpus;
pub mod error;
pub mod spam;

// Re-export commonly used types
pub use config::Config;
pub use error::{ClassifierError, Result};
pub use spam::{Category, SpamClassifier, SpamFilter};
