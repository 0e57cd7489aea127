//! Spam types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ClassifierError, Result};

/// Weight applied to ham occurrences during summarization
pub const HAM_WEIGHT: f64 = 5.0;
/// Minimum weighted occurrences before a word's probability is trusted
pub const OCCURRENCE_THRESHOLD: f64 = 30.0;
/// Spamicity of a word with no summarized probability
pub const UNKNOWN_WORD_SPAM_PROBABILITY: f64 = 0.4;
/// Combined probability above which a document is spam
pub const SPAM_PROBABILITY_THRESHOLD: f64 = 0.9;
/// Number of most interesting tokens combined into a verdict
pub const MAX_INTERESTING_TOKENS: usize = 15;

/// Training label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Spam,
    Ham,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Spam => write!(f, "spam"),
            Category::Ham => write!(f, "ham"),
        }
    }
}

/// Classifier tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Multiplier for ham occurrences
    pub ham_weight: f64,
    /// Minimum weighted occurrences (ham * weight + spam)
    pub occurrence_threshold: f64,
    /// Fallback spamicity for unscored words
    pub unknown_word_probability: f64,
    /// Combined probability above which a document is spam
    pub spam_probability_threshold: f64,
    /// How many tokens take part in the combination
    pub max_interesting_tokens: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            ham_weight: HAM_WEIGHT,
            occurrence_threshold: OCCURRENCE_THRESHOLD,
            unknown_word_probability: UNKNOWN_WORD_SPAM_PROBABILITY,
            spam_probability_threshold: SPAM_PROBABILITY_THRESHOLD,
            max_interesting_tokens: MAX_INTERESTING_TOKENS,
        }
    }
}

impl ClassifierConfig {
    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.ham_weight.is_finite() || self.ham_weight < 0.0 {
            return Err(ClassifierError::Config(format!(
                "ham_weight must be a non-negative number, got {}",
                self.ham_weight
            )));
        }

        if !self.occurrence_threshold.is_finite() || self.occurrence_threshold < 0.0 {
            return Err(ClassifierError::Config(format!(
                "occurrence_threshold must be a non-negative number, got {}",
                self.occurrence_threshold
            )));
        }

        for (name, value) in [
            ("unknown_word_probability", self.unknown_word_probability),
            ("spam_probability_threshold", self.spam_probability_threshold),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(ClassifierError::Config(format!(
                    "{} must lie strictly between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        if self.max_interesting_tokens == 0 {
            return Err(ClassifierError::Config(
                "max_interesting_tokens must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// A token selected for the combination step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredToken {
    pub token: String,
    pub spamicity: f64,
    /// Distance of the spamicity from 0.5
    pub interestingness: f64,
}

/// Classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Combined probability above the threshold
    pub is_spam: bool,
    /// None when the document produced no tokens
    pub combined_probability: Option<f64>,
    /// Tokens that took part in the combination, most interesting first
    pub tokens: Vec<ScoredToken>,
    /// Whether a spamicity table had been summarized when scoring
    pub summarized: bool,
}
