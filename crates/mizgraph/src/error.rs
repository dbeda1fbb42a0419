//! Error types for mizgraph operations.
//!
//! Errors are categorized into two main types:
//!
//! - **`Error`**: Top-level errors that halt an operation (configuration, output)
//! - **`ArticleError`**: Per-article errors that are collected but don't halt a batch
//!
//! ## Error Philosophy
//!
//! Graph extraction itself never fails. An article without statement headers
//! yields an empty graph and an unresolvable citation is simply dropped. Only
//! the boundary (reading articles, loading configuration, serializing output)
//! can produce errors, and a single unreadable article shouldn't prevent the
//! rest of a batch from being processed.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mizgraph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for mizgraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration file or arguments
    #[error("configuration error: {0}")]
    Config(String),

    /// Graph could not be serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// One or more articles in a batch could not be processed
    #[error("{0} article(s) could not be processed")]
    ArticlesFailed(usize),
}

/// Error encountered while loading a specific article.
///
/// These errors are collected during batch processing. The batch continues
/// with the remaining articles and reports all errors at the end.
#[derive(Debug, Clone)]
pub struct ArticleError {
    /// Path to the article that failed
    pub path: PathBuf,
    /// Category of the error
    pub kind: ArticleErrorKind,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ArticleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.path.display(),
            self.message,
            self.kind
        )
    }
}

impl std::error::Error for ArticleError {}

/// Categorization of article loading errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleErrorKind {
    /// The article file does not exist
    NotFound,

    /// The article exists but could not be read
    Unreadable,
}

impl std::fmt::Display for ArticleErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::Unreadable => write!(f, "unreadable"),
        }
    }
}

impl ArticleError {
    /// Create a new article error.
    #[must_use]
    pub fn new(path: PathBuf, kind: ArticleErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }

    /// Categorize an I/O error raised while reading an article.
    #[must_use]
    pub fn from_io(path: PathBuf, error: &std::io::Error) -> Self {
        let kind = match error.kind() {
            std::io::ErrorKind::NotFound => ArticleErrorKind::NotFound,
            _ => ArticleErrorKind::Unreadable,
        };
        Self::new(path, kind, error.to_string())
    }
}
