//! Parallel batch processing of article files.
//!
//! Each article is read and processed independently, so a batch is a plain
//! `rayon::par_iter()` over the input paths with one shared, read-only
//! builder:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       build_graphs                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  Parallel:    read file + ArticleGraphBuilder::build      │
//! │  Sequential:  split successes from per-article errors     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Results keep the order of the input paths.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::ArticleGraphBuilder;
use crate::error::ArticleError;
use crate::graph::ArticleGraph;

/// Graph built from one article file.
#[derive(Debug, Clone)]
pub struct BuiltArticle {
    /// Path the article was read from
    pub path: PathBuf,
    /// Its citation graph
    pub graph: ArticleGraph,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Articles that were processed, in input order
    pub articles: Vec<BuiltArticle>,
    /// Articles that could not be read, in input order
    pub errors: Vec<ArticleError>,
}

impl BatchReport {
    /// Whether every article was processed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Read an article file, replacing invalid UTF-8 instead of failing.
pub fn read_article(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Build the graphs of many articles in parallel.
///
/// Unreadable articles are collected as errors; the rest of the batch still
/// runs.
pub fn build_graphs(builder: &ArticleGraphBuilder, paths: &[PathBuf]) -> BatchReport {
    let results: Vec<Result<BuiltArticle, ArticleError>> = paths
        .par_iter()
        .map(|path| -> Result<BuiltArticle, ArticleError> {
            let text =
                read_article(path).map_err(|e| ArticleError::from_io(path.clone(), &e))?;
            Ok(BuiltArticle {
                path: path.clone(),
                graph: builder.build(&text),
            })
        })
        .collect();

    let mut report = BatchReport::default();
    for result in results {
        match result {
            Ok(article) => report.articles.push(article),
            Err(error) => {
                warn!(path = %error.path.display(), kind = %error.kind, "Skipping article");
                report.errors.push(error);
            }
        }
    }

    debug!(
        processed = report.articles.len(),
        failed = report.errors.len(),
        "Batch complete"
    );
    report
}
