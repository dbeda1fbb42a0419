//! Domain types for mizgraph.
//!
//! These types represent the core domain model:
//! - **Scanned**: `Entry` (one statement unit found in the article text)
//! - **Resolved**: `Reference` (a classified citation inside an entry body)
//! - **Graph**: `NodeKind` (what a graph node stands for, drives its color)
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Offsets | Byte offsets into stripped text | Regex matches report bytes; slicing stays on char boundaries |
//! | Reference identity | Label only | An external article is cited once no matter how many of its theorems are used |
//! | Node kind | Flat enum | Entry kinds plus the two kinds that only exist in the graph |

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// Entries
// ============================================================================

/// Kinds of statement entries found in an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Theorem with an explicit label (`theorem Th1:`)
    Theorem,
    /// Theorem without a label, numbered as `Th_auto<N>`
    AutoTheorem,
    /// Definition, either labeled inline (`:Def1:`) or numbered as `Def_auto<N>`
    Definition,
    /// Lemma labeled inline (`Lm1:`)
    Lemma,
}

impl EntryKind {
    /// Kind of an inline `Def<N>` / `Lm<N>` label.
    ///
    /// `Lm` prefixes (in any case) are lemmas, everything else is a definition.
    #[must_use]
    pub fn of_inline_label(label: &str) -> Self {
        if label
            .get(..2)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("lm"))
        {
            Self::Lemma
        } else {
            Self::Definition
        }
    }

    /// Convert to display string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Theorem => "theorem",
            Self::AutoTheorem => "auto_theorem",
            Self::Definition => "definition",
            Self::Lemma => "lemma",
        }
    }
}

/// One statement unit extracted from an article.
///
/// `start..end` covers the header or inline label, not the body. The body of
/// an entry runs from its `end` to the `start` of the next entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Byte offset where the header or label match begins
    pub start: usize,
    /// Byte offset just past the header or label match
    pub end: usize,
    /// Canonical label, unique within the article
    pub label: String,
    /// What kind of statement this is
    pub kind: EntryKind,
}

impl Entry {
    /// Create a new entry.
    #[must_use]
    pub fn new(start: usize, end: usize, label: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            start,
            end,
            label: label.into(),
            kind,
        }
    }
}

// ============================================================================
// References
// ============================================================================

/// How a citation token was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// Another entry of the same article
    Internal,
    /// An article imported in the `environ` section
    External,
}

impl ReferenceKind {
    /// Convert to display string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved citation: the label of the cited entity and how it resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Reference {
    /// Internal label (`Th1`, `Def3`) or external article name (`XBOOLE_0`)
    pub label: String,
    /// Whether the label names an entry or an imported article
    pub kind: ReferenceKind,
}

impl Reference {
    /// Reference to another entry of the same article.
    #[must_use]
    pub fn internal(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: ReferenceKind::Internal,
        }
    }

    /// Reference to an imported article.
    #[must_use]
    pub fn external(article: impl Into<String>) -> Self {
        Self {
            label: article.into(),
            kind: ReferenceKind::External,
        }
    }
}

// ============================================================================
// Imports
// ============================================================================

/// Article names declared in the `environ` section.
///
/// Computed once per article and only ever queried afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalArticles(BTreeSet<String>);

impl ExternalArticles {
    /// Whether `name` was declared as an imported article.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Number of distinct imported articles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no article was imported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Imported article names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExternalArticles {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// Graph nodes
// ============================================================================

/// What a graph node stands for.
///
/// Entry kinds map one-to-one; `External` and `Placeholder` only exist for
/// nodes created on demand while adding citation edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Explicitly labeled theorem
    Theorem,
    /// Auto-numbered theorem
    AutoTheorem,
    /// Definition (inline or auto-numbered)
    Definition,
    /// Lemma
    Lemma,
    /// Imported article
    External,
    /// Cited label that has no entry of its own
    Placeholder,
}

impl NodeKind {
    /// Convert to display string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Theorem => "theorem",
            Self::AutoTheorem => "auto_theorem",
            Self::Definition => "definition",
            Self::Lemma => "lemma",
            Self::External => "external",
            Self::Placeholder => "placeholder",
        }
    }
}

impl From<EntryKind> for NodeKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Theorem => Self::Theorem,
            EntryKind::AutoTheorem => Self::AutoTheorem,
            EntryKind::Definition => Self::Definition,
            EntryKind::Lemma => Self::Lemma,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_label_kind_is_case_insensitive() {
        assert_eq!(EntryKind::of_inline_label("Lm3"), EntryKind::Lemma);
        assert_eq!(EntryKind::of_inline_label("LM3"), EntryKind::Lemma);
        assert_eq!(EntryKind::of_inline_label("Def3"), EntryKind::Definition);
        assert_eq!(EntryKind::of_inline_label("DEF3"), EntryKind::Definition);
    }

    #[test]
    fn entry_kinds_map_to_node_kinds() {
        assert_eq!(NodeKind::from(EntryKind::Theorem), NodeKind::Theorem);
        assert_eq!(NodeKind::from(EntryKind::AutoTheorem), NodeKind::AutoTheorem);
        assert_eq!(NodeKind::from(EntryKind::Definition), NodeKind::Definition);
        assert_eq!(NodeKind::from(EntryKind::Lemma), NodeKind::Lemma);
    }

    #[test]
    fn external_articles_collapse_duplicates() {
        let articles: ExternalArticles = ["XBOOLE_0", "TARSKI", "XBOOLE_0"].into_iter().collect();

        assert_eq!(articles.len(), 2);
        assert!(articles.contains("TARSKI"));
        assert_eq!(articles.iter().collect::<Vec<_>>(), vec!["TARSKI", "XBOOLE_0"]);
    }
}
