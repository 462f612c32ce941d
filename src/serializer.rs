//! Serialization module for writing collection documents as JSON.

use crate::collection::CollectionDocument;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes a collection document to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json(doc: &CollectionDocument) -> Result<String> {
    debug!("Serializing collection {} to JSON", doc.info.name);
    serde_json::to_string_pretty(doc).context("Failed to serialize collection to JSON")
}

/// Writes string content to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Serializes `doc` and writes it to `path`.
pub fn write_document(doc: &CollectionDocument, path: &Path) -> Result<()> {
    let content = serialize_json(doc)?;
    write_to_file(&content, path)
}
