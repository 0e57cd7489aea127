//! Spam classification module
//!
//! Tokenization, training statistics, Bayesian summarization and scoring,
//! and a shared filter for ingestion pipelines.

pub mod classifier;
pub mod filter;
pub mod store;
pub mod tokenizer;
pub mod types;

pub use classifier::{combined_probability, interestingness, ProbabilityBounds, SpamClassifier, SpamicityTable};
pub use filter::{FilterStats, SpamFilter};
pub use store::StatisticsStore;
pub use tokenizer::tokenize;
pub use types::*;
