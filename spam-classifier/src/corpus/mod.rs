//! Training corpus loading
//!
//! Reads labeled documents from directories of files or MBOX archives.

pub mod loader;
pub mod mbox;
pub mod types;

pub use loader::load_documents;
pub use mbox::MboxReader;
pub use types::Document;
