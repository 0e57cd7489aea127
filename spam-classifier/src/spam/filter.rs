//! Spam filter for ingestion pipelines
//!
//! Shares one classifier between tasks. Training and summarization take the
//! write lock; scoring takes the read lock. A summarization publishes its
//! table in a single swap, so readers never see a partial table.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::classifier::{SpamClassifier, SpamicityTable};
use super::types::*;
use crate::corpus::Document;
use crate::error::Result;

/// Spam filter statistics
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FilterStats {
    /// Documents checked with `is_spam`/`filter`
    pub documents_scanned: u64,
    /// Documents classified as spam
    pub spam_detected: u64,
    /// Documents classified as ham
    pub ham_detected: u64,
    /// Training documents labeled spam
    pub spam_learned: u64,
    /// Training documents labeled ham
    pub ham_learned: u64,
    /// Distinct training tokens
    pub vocabulary_size: usize,
    /// Tokens with a summarized spamicity
    pub scored_tokens: usize,
    /// Whether summarize has run
    pub summarized: bool,
}

#[derive(Debug, Default)]
struct Counters {
    scanned: AtomicU64,
    spam: AtomicU64,
    ham: AtomicU64,
}

/// Spam filter
#[derive(Clone)]
pub struct SpamFilter {
    classifier: Arc<RwLock<SpamClassifier>>,
    counters: Arc<Counters>,
}

impl SpamFilter {
    /// Create a filter with custom tuning
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        Ok(Self::from_classifier(SpamClassifier::with_config(config)?))
    }

    /// Wrap an existing classifier
    pub fn from_classifier(classifier: SpamClassifier) -> Self {
        Self {
            classifier: Arc::new(RwLock::new(classifier)),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Learn from a labeled document
    pub async fn train(&self, category: Category, document: &str) {
        let mut classifier = self.classifier.write().await;
        classifier.train(category, document);
    }

    /// Learn from a batch of labeled documents, returns how many were used
    pub async fn train_all<I>(&self, category: Category, documents: I) -> usize
    where
        I: IntoIterator<Item = Document>,
    {
        let mut classifier = self.classifier.write().await;
        let mut trained = 0;

        for document in documents {
            classifier.train(category, &document.text);
            trained += 1;
        }

        info!("Trained {} {} document(s)", trained, category);
        trained
    }

    /// Rebuild the spamicity table from everything trained so far
    pub async fn summarize(&self) {
        let mut classifier = self.classifier.write().await;
        classifier.summarize();

        let store = classifier.store();
        let table = classifier.snapshot();
        info!(
            "Summarized {} spam / {} ham document(s): {} token(s), {} scored",
            store.document_count(Category::Spam),
            store.document_count(Category::Ham),
            store.vocabulary_size(),
            table.len()
        );
    }

    /// Full verdict for a document
    pub async fn score(&self, document: &str) -> Verdict {
        let classifier = self.classifier.read().await;
        classifier.score(document)
    }

    /// Whether a document is spam; always false before the first summarization
    pub async fn is_spam(&self, document: &str) -> bool {
        let classifier = self.classifier.read().await;
        self.counters.scanned.fetch_add(1, Ordering::Relaxed);

        let is_spam = classifier.is_summarized() && classifier.classify(document);
        if is_spam {
            self.counters.spam.fetch_add(1, Ordering::Relaxed);
        } else {
            self.counters.ham.fetch_add(1, Ordering::Relaxed);
        }
        is_spam
    }

    /// Keep the documents that are not spam
    pub async fn filter(&self, documents: Vec<Document>) -> Vec<Document> {
        let total = documents.len();
        let mut kept = Vec::with_capacity(total);

        for document in documents {
            if self.is_spam(&document.text).await {
                debug!("Dropping spam document {}", document.source);
            } else {
                kept.push(document);
            }
        }

        info!("Kept {} of {} document(s), dropped {} as spam", kept.len(), total, total - kept.len());
        kept
    }

    /// Currently published spamicity table
    pub async fn snapshot(&self) -> Arc<SpamicityTable> {
        self.classifier.read().await.snapshot()
    }

    pub async fn stats(&self) -> FilterStats {
        let classifier = self.classifier.read().await;
        let store = classifier.store();

        FilterStats {
            documents_scanned: self.counters.scanned.load(Ordering::Relaxed),
            spam_detected: self.counters.spam.load(Ordering::Relaxed),
            ham_detected: self.counters.ham.load(Ordering::Relaxed),
            spam_learned: store.document_count(Category::Spam),
            ham_learned: store.document_count(Category::Ham),
            vocabulary_size: store.vocabulary_size(),
            scored_tokens: classifier.snapshot().len(),
            summarized: classifier.is_summarized(),
        }
    }
}

impl Default for SpamFilter {
    fn default() -> Self {
        Self::from_classifier(SpamClassifier::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn trained_filter() -> SpamFilter {
        let filter = SpamFilter::default();
        for _ in 0..40 {
            filter.train(Category::Spam, "cheap pills online").await;
            filter.train(Category::Ham, "project meeting notes").await;
        }
        filter
    }

    #[tokio::test]
    async fn test_not_spam_before_summarize() {
        let filter = trained_filter().await;

        assert!(!filter.is_spam("cheap pills online").await);
        let stats = filter.stats().await;
        assert!(!stats.summarized);
        assert_eq!(stats.documents_scanned, 1);
        assert_eq!(stats.ham_detected, 1);
    }

    #[tokio::test]
    async fn test_is_spam_after_summarize() {
        let filter = trained_filter().await;
        filter.summarize().await;

        assert!(filter.is_spam("cheap pills online").await);
        assert!(!filter.is_spam("meeting notes for the project").await);

        let stats = filter.stats().await;
        assert_eq!(stats.documents_scanned, 2);
        assert_eq!(stats.spam_detected, 1);
        assert_eq!(stats.ham_detected, 1);
        assert_eq!(stats.spam_learned, 40);
        assert_eq!(stats.ham_learned, 40);
        assert_eq!(stats.vocabulary_size, 6);
        assert_eq!(stats.scored_tokens, 6);
    }

    #[tokio::test]
    async fn test_filter_drops_spam() {
        let filter = trained_filter().await;
        filter.summarize().await;

        let documents = vec![
            Document::with_title("topic-1", "Cheap pills", "online now"),
            Document::with_title("topic-2", "Project", "meeting notes attached"),
            Document::new("post-3", ""),
        ];

        let kept = filter.filter(documents).await;
        let sources: Vec<&str> = kept.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(sources, vec!["topic-2", "post-3"]);
    }

    #[tokio::test]
    async fn test_train_all() {
        let filter = SpamFilter::default();
        let documents = vec![Document::new("a", "one"), Document::new("b", "two")];

        assert_eq!(filter.train_all(Category::Ham, documents).await, 2);
        assert_eq!(filter.stats().await.ham_learned, 2);
    }

    #[tokio::test]
    async fn test_snapshot_survives_resummarize() {
        let filter = trained_filter().await;
        filter.summarize().await;
        let before = filter.snapshot().await;

        for _ in 0..20 {
            filter.train(Category::Ham, "pills").await;
        }
        filter.summarize().await;
        let after = filter.snapshot().await;

        // 80 documents before, 100 after
        assert!((before.bounds().unwrap().min - 0.01).abs() < 1e-12);
        assert!((after.bounds().unwrap().min - 0.001).abs() < 1e-12);
        assert!(before.get("pills").unwrap() > after.get("pills").unwrap());
    }
}
