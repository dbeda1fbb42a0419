//! Citation graph assembly using petgraph.
//!
//! Nodes are keyed by label; edges run from the cited entity to the citing
//! entry. The graph is a `DiGraph` plus a label index, the same pairing the
//! rest of the crate relies on for lookups by label.
//!
//! ## Invariants
//!
//! - Node labels are unique: `ensure_node` returns the existing node for a
//!   known label and never changes its kind or color ("first reference wins").
//! - No self-loops: a citation of the entry's own label is dropped.
//! - At most one edge per (source, target) pair.

use std::collections::{BTreeMap, HashMap};

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use tracing::debug;

use crate::config::Palette;
use crate::types::{Entry, ExternalArticles, NodeKind, Reference, ReferenceKind};

/// A node of the citation graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Unique key of the node
    pub label: String,
    /// Fill color, derived from `kind` through the palette
    pub color: String,
    /// Text shown for the node when rendered
    pub display_text: String,
    /// What the node stands for
    pub kind: NodeKind,
}

impl std::fmt::Display for GraphNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_text)
    }
}

/// A directed citation edge, borrowed from the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphEdge<'a> {
    /// The cited entity
    pub from: &'a str,
    /// The citing entry
    pub to: &'a str,
    /// How the citation resolved
    pub kind: ReferenceKind,
}

/// Summary of a citation graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphStats {
    /// Number of nodes of each kind
    pub nodes_by_kind: BTreeMap<NodeKind, usize>,
    /// Total number of edges
    pub edge_count: usize,
    /// Edges whose source is an entry of the article
    pub internal_edges: usize,
    /// Edges whose source is an imported article
    pub external_edges: usize,
    /// Nodes with the most citing entries, descending, ties by label
    pub most_cited: Vec<(String, usize)>,
}

/// An entry together with the references resolved from its body.
#[derive(Debug, Clone)]
pub struct ResolvedEntry {
    /// The scanned entry
    pub entry: Entry,
    /// Deduplicated references, never including the entry's own label
    pub references: Vec<Reference>,
}

/// Directed graph of an article's entries and the citations between them.
#[derive(Debug, Clone, Default)]
pub struct ArticleGraph {
    graph: DiGraph<GraphNode, ReferenceKind>,
    node_map: HashMap<String, NodeIndex>,
}

impl ArticleGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from resolved entries.
    ///
    /// Every entry gets a node first, in order, so entry kinds win over any
    /// on-demand node. Then each reference adds an edge to its citing entry,
    /// creating an external or placeholder node for references that have none.
    #[must_use]
    pub fn assemble(
        entries: &[ResolvedEntry],
        articles: &ExternalArticles,
        palette: &Palette,
    ) -> Self {
        let mut graph = Self::new();

        for resolved in entries {
            graph.ensure_node(&resolved.entry.label, resolved.entry.kind.into(), palette);
        }

        for resolved in entries {
            let citing = graph.ensure_node(&resolved.entry.label, resolved.entry.kind.into(), palette);
            for reference in &resolved.references {
                let kind = if articles.contains(&reference.label) {
                    NodeKind::External
                } else {
                    NodeKind::Placeholder
                };
                let cited = graph.ensure_node(&reference.label, kind, palette);
                graph.add_citation(cited, citing, reference.kind);
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Assembled citation graph"
        );
        graph
    }

    /// Return the node for `label`, creating it with `kind` if it is new.
    ///
    /// An existing node is returned unchanged.
    pub fn ensure_node(&mut self, label: &str, kind: NodeKind, palette: &Palette) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(GraphNode {
            label: label.to_string(),
            color: palette.color_for(kind).to_string(),
            display_text: label.to_string(),
            kind,
        });
        self.node_map.insert(label.to_string(), idx);
        idx
    }

    /// Add the edge `cited -> citing`. Self-citations are ignored and an
    /// existing edge is left as it is.
    pub fn add_citation(&mut self, cited: NodeIndex, citing: NodeIndex, kind: ReferenceKind) {
        if cited == citing || self.graph.find_edge(cited, citing).is_some() {
            return;
        }
        self.graph.add_edge(cited, citing, kind);
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = GraphEdge<'_>> {
        self.graph.edge_references().map(|edge| GraphEdge {
            from: &self.graph[edge.source()].label,
            to: &self.graph[edge.target()].label,
            kind: *edge.weight(),
        })
    }

    /// Look up a node by label.
    #[must_use]
    pub fn node(&self, label: &str) -> Option<&GraphNode> {
        self.node_map.get(label).map(|&idx| &self.graph[idx])
    }

    /// Whether the edge `from -> to` exists.
    #[must_use]
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_map.get(from), self.node_map.get(to)) {
            (Some(&a), Some(&b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Labels of the entries citing `label`, in edge insertion order.
    #[must_use]
    pub fn citing_entries(&self, label: &str) -> Vec<&str> {
        let Some(&idx) = self.node_map.get(label) else {
            return Vec::new();
        };
        let mut citing: Vec<&str> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| self.graph[n].label.as_str())
            .collect();
        // petgraph walks adjacency lists newest first
        citing.reverse();
        citing
    }

    /// Labels of the entities `label` cites, in edge insertion order.
    #[must_use]
    pub fn cited_by(&self, label: &str) -> Vec<&str> {
        let Some(&idx) = self.node_map.get(label) else {
            return Vec::new();
        };
        let mut cited: Vec<&str> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .map(|n| self.graph[n].label.as_str())
            .collect();
        cited.reverse();
        cited
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Summarize the graph, keeping the `top` most cited nodes.
    ///
    /// Nodes that nothing cites are left out of the ranking.
    #[must_use]
    pub fn stats(&self, top: usize) -> GraphStats {
        let mut stats = GraphStats {
            edge_count: self.edge_count(),
            ..GraphStats::default()
        };

        for node in self.nodes() {
            *stats.nodes_by_kind.entry(node.kind).or_default() += 1;
        }
        for edge in self.edges() {
            match edge.kind {
                ReferenceKind::Internal => stats.internal_edges += 1,
                ReferenceKind::External => stats.external_edges += 1,
            }
        }

        let mut ranked: Vec<(String, usize)> = self
            .graph
            .node_indices()
            .map(|idx| {
                let citations = self
                    .graph
                    .edges_directed(idx, Direction::Outgoing)
                    .count();
                (self.graph[idx].label.clone(), citations)
            })
            .filter(|(_, citations)| *citations > 0)
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(top);
        stats.most_cited = ranked;

        stats
    }

    pub(crate) fn inner(&self) -> &DiGraph<GraphNode, ReferenceKind> {
        &self.graph
    }
}
