use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Reader for candidate source files.
///
/// Extraction works on raw text, so "parsing" at this stage means loading the
/// file and keeping its path next to the content for later log messages and
/// fallback names.
pub struct SourceParser;

/// A source file loaded into memory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path to the source file
    pub path: PathBuf,
    /// Full file content
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// File name without its extension, e.g. `OrderService` for `OrderService.java`.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl SourceParser {
    /// Reads a single source file.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected; the matchers
    /// only care about ASCII structure.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read_file(path: &Path) -> Result<SourceFile> {
        debug!("Reading file: {}", path.display());

        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        Ok(SourceFile {
            path: path.to_path_buf(),
            content,
        })
    }
}
