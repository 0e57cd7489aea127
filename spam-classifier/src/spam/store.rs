//! Training statistics
//!
//! Append-only word and document counts per category.

use std::collections::{HashMap, HashSet};

use super::tokenizer::tokenize;
use super::types::Category;

/// Counts gathered for one category
#[derive(Debug, Clone, Default)]
struct CategoryCounts {
    documents: u64,
    words: HashMap<String, u64>,
}

/// Accumulates labeled frequency data during training
#[derive(Debug, Clone, Default)]
pub struct StatisticsStore {
    vocabulary: HashSet<String>,
    spam: CategoryCounts,
    ham: CategoryCounts,
}

impl StatisticsStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn from a labeled document
    pub fn train(&mut self, category: Category, document: &str) {
        let tokens = tokenize(document);
        let counts = self.counts_mut(category);

        counts.documents += 1;
        for token in &tokens {
            *counts.words.entry(token.clone()).or_insert(0) += 1;
        }

        self.vocabulary.extend(tokens);
    }

    /// Occurrences of a token in a category
    pub fn word_count(&self, category: Category, token: &str) -> u64 {
        self.counts(category).words.get(token).copied().unwrap_or(0)
    }

    /// Number of documents trained for a category
    pub fn document_count(&self, category: Category) -> u64 {
        self.counts(category).documents
    }

    /// Documents trained across both categories
    pub fn total_documents(&self) -> u64 {
        self.spam.documents + self.ham.documents
    }

    /// Distinct tokens seen in training
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.iter().map(String::as_str)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Distinct tokens seen in one category
    pub fn distinct_tokens(&self, category: Category) -> usize {
        self.counts(category).words.len()
    }

    fn counts(&self, category: Category) -> &CategoryCounts {
        match category {
            Category::Spam => &self.spam,
            Category::Ham => &self.ham,
        }
    }

    fn counts_mut(&mut self, category: Category) -> &mut CategoryCounts {
        match category {
            Category::Spam => &mut self.spam,
            Category::Ham => &mut self.ham,
        }
    }
}
