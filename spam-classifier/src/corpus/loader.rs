//! Corpus loading from the filesystem

use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

use super::mbox::MboxReader;
use super::types::Document;
use crate::error::{ClassifierError, Result};

/// Load every document under `path`
///
/// A directory contributes each regular file in it (sorted by name, not
/// recursive). A file starting with a `From ` line is read as MBOX, one
/// document per message; any other file is a single document.
pub fn load_documents(path: &Path) -> Result<Vec<Document>> {
    let metadata = fs::metadata(path).map_err(|e| {
        ClassifierError::Corpus(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let documents = if metadata.is_dir() {
        let mut files = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();

        let mut documents = Vec::new();
        for file in &files {
            documents.extend(load_file(file)?);
        }
        documents
    } else {
        load_file(path)?
    };

    info!("Loaded {} document(s) from {}", documents.len(), path.display());
    Ok(documents)
}

fn load_file(path: &Path) -> Result<Vec<Document>> {
    let content = fs::read(path)?;
    let source = path.display().to_string();

    if !is_mbox(&content) {
        return Ok(vec![Document::from_message(source, &content)]);
    }

    let mut documents = Vec::new();
    for message in MboxReader::new(Cursor::new(&content)) {
        let message = message?;
        let source = format!("{}#{} ({})", source, documents.len() + 1, message.from);
        documents.push(Document::from_mbox(source, &message));
    }

    debug!("Read {} message(s) from mbox {}", documents.len(), path.display());
    Ok(documents)
}

fn is_mbox(content: &[u8]) -> bool {
    content.starts_with(b"From ")
}
