//! # Mizgraph: Citation Dependency Graphs for Mizar Articles
//!
//! Mizgraph reads the text of a Mizar article, finds every theorem,
//! definition and lemma, gives each a canonical label and records which
//! entries (and which imported articles) each one cites.
//!
//! ## Design Philosophy
//!
//! - **Scanner, not parser** - Only statement headers and `by`/`from` clauses
//!   are understood; proofs and formulas are never checked
//! - **Best effort** - Malformed input yields fewer matches, never an error
//! - **Pure core** - Building a graph is a function of the input text; all
//!   numbering state lives inside one call
//! - **Library first, CLI second**
//!
//! ## Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Preprocess | `preprocess` | comment-free text, imported articles |
//! | Scan | `scanner` | labeled entries with body spans |
//! | Resolve | `resolver` | per-entry reference sets |
//! | Assemble | `graph` | `ArticleGraph` |
//!
//! ## Quick Start
//!
//! ```
//! let text = "environ theorems XBOOLE_0; begin\n\
//!             theorem Th1: X = X by XBOOLE_0:1;\n\
//!             theorem X c= X by Th1;\n";
//!
//! let graph = mizgraph::build_graph(text);
//!
//! assert!(graph.has_edge("XBOOLE_0", "Th1"));
//! // `Th1` is taken, so the unlabeled theorem skips to 2
//! assert!(graph.has_edge("Th1", "Th_auto2"));
//! for node in graph.nodes() {
//!     println!("{} ({})", node.display_text, node.color);
//! }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod parallel;
pub mod preprocess;
pub mod resolver;
pub mod scanner;
pub mod types;

pub use config::{Config, Palette};
pub use error::{ArticleError, ArticleErrorKind, Error, Result};
pub use graph::{ArticleGraph, GraphEdge, GraphNode, GraphStats, ResolvedEntry};
pub use parallel::{BatchReport, BuiltArticle, build_graphs};
pub use types::{Entry, EntryKind, ExternalArticles, NodeKind, Reference, ReferenceKind};

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

/// Everything extracted from one article before graph assembly.
#[derive(Debug, Clone, Default)]
pub struct ArticleAnalysis {
    /// Articles imported in the `environ` section
    pub external_articles: ExternalArticles,
    /// Entries in text order, each with its resolved references
    pub entries: Vec<ResolvedEntry>,
}

impl ArticleAnalysis {
    /// First resolved entry with the given label.
    #[must_use]
    pub fn entry(&self, label: &str) -> Option<&ResolvedEntry> {
        self.entries.iter().find(|e| e.entry.label == label)
    }
}

/// Builds citation graphs from article text.
///
/// The builder only holds the palette; every call to [`build`](Self::build)
/// starts from fresh numbering state, so one builder can serve many articles,
/// including from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct ArticleGraphBuilder {
    palette: Palette,
}

impl ArticleGraphBuilder {
    /// Create a builder with the default palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder that colors nodes with `palette`.
    #[must_use]
    pub fn with_palette(palette: Palette) -> Self {
        Self { palette }
    }

    /// Create a builder from loaded configuration.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self::with_palette(config.palette)
    }

    /// The palette nodes are colored with.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Run preprocessing, scanning and resolution on raw article text.
    #[must_use]
    pub fn analyze(&self, text: &str) -> ArticleAnalysis {
        let text = preprocess::strip_comments(text);
        let external_articles = preprocess::extract_external_articles(&text);
        let entries = scanner::scan_entries(&text);

        let labels: HashSet<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        let resolved = scanner::entry_bodies(&text, &entries)
            .into_iter()
            .map(|(entry, body)| ResolvedEntry {
                entry: entry.clone(),
                references: resolver::resolve_references(
                    body,
                    &entry.label,
                    &labels,
                    &external_articles,
                )
                .into_iter()
                .collect(),
            })
            .collect();

        debug!(
            imports = external_articles.len(),
            entries = entries.len(),
            "Analyzed article"
        );
        ArticleAnalysis {
            external_articles,
            entries: resolved,
        }
    }

    /// Build the citation graph of raw article text.
    #[must_use]
    pub fn build(&self, text: &str) -> ArticleGraph {
        let analysis = self.analyze(text);
        ArticleGraph::assemble(&analysis.entries, &analysis.external_articles, &self.palette)
    }

    /// Read an article file and build its citation graph.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read.
    pub fn build_from_path(&self, path: &Path) -> Result<ArticleGraph> {
        let text = parallel::read_article(path)?;
        Ok(self.build(&text))
    }
}

/// Build the citation graph of raw article text with the default palette.
#[must_use]
pub fn build_graph(text: &str) -> ArticleGraph {
    ArticleGraphBuilder::new().build(text)
}

/// Read an article file and build its citation graph with the default palette.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read.
pub fn build_graph_from_path(path: &Path) -> Result<ArticleGraph> {
    ArticleGraphBuilder::new().build_from_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_reports_references_per_entry() {
        let text = "environ theorems XBOOLE_0; begin\ntheorem Th1: X c= X by XBOOLE_0:7, A1;\n";

        let analysis = ArticleGraphBuilder::new().analyze(text);
        let th1 = analysis.entry("Th1").expect("Th1 entry");

        assert_eq!(th1.references, vec![Reference::external("XBOOLE_0")]);
    }

    #[test]
    fn comments_do_not_produce_entries() {
        let graph = build_graph(":: theorem Th1: this is commented out\ntheorem Th2: X = X;\n");

        assert!(graph.node("Th1").is_none());
        assert!(graph.node("Th2").is_some());
    }

    #[test]
    fn custom_palette_is_applied() {
        let palette = Palette {
            theorem: "red".to_string(),
            ..Palette::default()
        };

        let graph = ArticleGraphBuilder::with_palette(palette).build("theorem Th1: X = X;\n");
        assert_eq!(graph.node("Th1").map(|n| n.color.as_str()), Some("red"));
    }
}
