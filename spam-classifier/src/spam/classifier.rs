//! Bayesian classification engine
//!
//! Summarization turns the training counts into per-word spamicities;
//! scoring combines the spamicities of a document's most interesting words.

use std::collections::HashMap;
use std::sync::Arc;

use super::store::StatisticsStore;
use super::tokenizer::tokenize;
use super::types::*;
use crate::error::Result;

/// Range summarized probabilities are clamped into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityBounds {
    pub min: f64,
    pub max: f64,
}

impl ProbabilityBounds {
    /// `10^-d` where `d` is the number of decimal digits in `total_documents`
    pub fn for_document_count(total_documents: u64) -> Self {
        let digits = total_documents.to_string().len() as i32;
        let min = 10f64.powi(-digits);
        Self { min, max: 1.0 - min }
    }

    pub fn clamp(&self, probability: f64) -> f64 {
        probability.min(self.max).max(self.min)
    }
}

/// Summarized word probabilities
///
/// Lookups return `None` for words without enough evidence; the caller
/// decides the fallback.
#[derive(Debug, Clone, Default)]
pub struct SpamicityTable {
    probabilities: HashMap<String, f64>,
    bounds: Option<ProbabilityBounds>,
}

impl SpamicityTable {
    pub fn get(&self, token: &str) -> Option<f64> {
        self.probabilities.get(token).copied()
    }

    /// Number of words with a summarized probability
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Clamp range used when the table was built, None before summarization
    pub fn bounds(&self) -> Option<ProbabilityBounds> {
        self.bounds
    }

    /// Highest-spamicity words, ties broken alphabetically
    pub fn most_spammy(&self, limit: usize) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self
            .probabilities
            .iter()
            .map(|(token, &p)| (token.as_str(), p))
            .collect();

        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(limit);
        entries
    }
}

/// Naive-Bayes spam/ham classifier
#[derive(Debug, Clone)]
pub struct SpamClassifier {
    config: ClassifierConfig,
    store: StatisticsStore,
    spamicities: Arc<SpamicityTable>,
    summarized: bool,
}

impl SpamClassifier {
    /// Create a classifier with the default tuning
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
            store: StatisticsStore::new(),
            spamicities: Arc::new(SpamicityTable::default()),
            summarized: false,
        }
    }

    /// Create a classifier with custom tuning
    pub fn with_config(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Training statistics gathered so far
    pub fn store(&self) -> &StatisticsStore {
        &self.store
    }

    pub fn is_summarized(&self) -> bool {
        self.summarized
    }

    /// The currently published spamicity table
    pub fn snapshot(&self) -> Arc<SpamicityTable> {
        Arc::clone(&self.spamicities)
    }

    /// Learn from a labeled document
    pub fn train(&mut self, category: Category, document: &str) {
        self.store.train(category, document);
    }

    /// Recompute the spamicity table from the training counts
    ///
    /// The previous table stays published until the new one is complete.
    pub fn summarize(&mut self) {
        let hams = self.store.document_count(Category::Ham) as f64;
        let spams = self.store.document_count(Category::Spam) as f64;
        let bounds = ProbabilityBounds::for_document_count(self.store.total_documents());

        let mut probabilities = HashMap::new();

        for word in self.store.vocabulary() {
            let h = self.config.ham_weight * self.store.word_count(Category::Ham, word) as f64;
            let s = self.store.word_count(Category::Spam, word) as f64;

            if h + s < self.config.occurrence_threshold {
                continue;
            }

            let p_s = conditional_probability(s, spams);
            let p_h = conditional_probability(h, hams);
            if p_s + p_h == 0.0 {
                continue;
            }

            probabilities.insert(word.to_string(), bounds.clamp(p_s / (p_s + p_h)));
        }

        self.spamicities = Arc::new(SpamicityTable {
            probabilities,
            bounds: Some(bounds),
        });
        self.summarized = true;
    }

    /// Spamicity of a token, falling back to the unknown-word probability
    pub fn spamicity(&self, token: &str) -> f64 {
        self.spamicities
            .get(token)
            .unwrap_or(self.config.unknown_word_probability)
    }

    /// Score a document
    ///
    /// Before the first summarization every token gets the unknown-word
    /// probability, so nothing is reported as spam.
    pub fn score(&self, document: &str) -> Verdict {
        let mut tokens: Vec<ScoredToken> = tokenize(document)
            .into_iter()
            .map(|token| {
                let spamicity = self.spamicity(&token);
                ScoredToken {
                    token,
                    spamicity,
                    interestingness: interestingness(spamicity),
                }
            })
            .collect();

        // Stable, so ties keep document order
        tokens.sort_by(|a, b| b.interestingness.total_cmp(&a.interestingness));
        tokens.truncate(self.config.max_interesting_tokens);

        let probabilities: Vec<f64> = tokens.iter().map(|t| t.spamicity).collect();
        let combined = combined_probability(&probabilities);

        Verdict {
            is_spam: combined.is_some_and(|p| p > self.config.spam_probability_threshold),
            combined_probability: combined,
            tokens,
            summarized: self.summarized,
        }
    }

    /// Whether a document is spam
    pub fn classify(&self, document: &str) -> bool {
        self.score(document).is_spam
    }
}

impl Default for SpamClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// `min(1, count / total)`, or 0 when nothing was trained for the category
fn conditional_probability(count: f64, total: f64) -> f64 {
    if total > 0.0 {
        (count / total).min(1.0)
    } else {
        0.0
    }
}

/// Distance of a spamicity from neutral
pub fn interestingness(spamicity: f64) -> f64 {
    (0.5 - spamicity).abs()
}

/// Combine independent probabilities: `Πp / (Πp + Π(1-p))`
///
/// Returns None for an empty set.
pub fn combined_probability(probabilities: &[f64]) -> Option<f64> {
    if probabilities.is_empty() {
        return None;
    }

    let spam: f64 = probabilities.iter().product();
    let ham: f64 = probabilities.iter().map(|p| 1.0 - p).product();

    if spam + ham > 0.0 {
        return Some(spam / (spam + ham));
    }

    // Both products underflowed; same ratio in log space
    let log_odds: f64 = probabilities
        .iter()
        .map(|p| (1.0 - p).ln() - p.ln())
        .sum();
    Some(1.0 / (1.0 + log_odds.exp()))
}
