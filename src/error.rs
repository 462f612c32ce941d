use std::path::PathBuf;
use thiserror::Error;

/// Reasons a candidate file yields no (or only a degraded) structural fact.
///
/// These never abort a run. They travel inside [`crate::extractor::Extraction`]
/// so callers and tests can see why a file was skipped.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {}: {message}", .file.display())]
    Unreadable { file: PathBuf, message: String },

    #[error("no type declaration found in {}", .file.display())]
    NoTypeDeclaration { file: PathBuf },

    #[error("unbalanced parentheses in parameter list of `{method}`")]
    UnbalancedParameters { method: String },
}

impl ExtractError {
    pub fn unreadable(file: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        ExtractError::Unreadable {
            file: file.into(),
            message: format!("{:#}", err),
        }
    }
}
