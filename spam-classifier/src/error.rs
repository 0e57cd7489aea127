//! Error types for spam-classifier

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Corpus error: {0}")]
    Corpus(String),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
