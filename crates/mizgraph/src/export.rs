//! Graph serialization for rendering collaborators.
//!
//! | Format | Consumer |
//! |--------|----------|
//! | DOT | Graphviz (`dot -Tsvg`) and other layout engines |
//! | JSON | Browser visualizations and scripts |

use petgraph::dot::{Config, Dot};
use serde::Serialize;

use crate::error::Result;
use crate::graph::{ArticleGraph, GraphEdge, GraphNode};

/// Serializable view of one article graph.
#[derive(Debug, Serialize)]
pub struct GraphDocument<'a> {
    /// Source of the graph, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<&'a str>,
    /// Nodes in insertion order
    pub nodes: Vec<&'a GraphNode>,
    /// Edges in insertion order
    pub edges: Vec<GraphEdge<'a>>,
}

impl<'a> GraphDocument<'a> {
    /// Borrow a graph as a document, optionally naming its source article.
    #[must_use]
    pub fn new(graph: &'a ArticleGraph, article: Option<&'a str>) -> Self {
        Self {
            article,
            nodes: graph.nodes().collect(),
            edges: graph.edges().collect(),
        }
    }
}

/// Render a graph as a Graphviz DOT digraph.
///
/// Every node is filled with its palette color and labeled with its display
/// text. Edges carry no label.
#[must_use]
pub fn to_dot(graph: &ArticleGraph) -> String {
    let inner = graph.inner();
    let dot = Dot::with_attr_getters(
        inner,
        &[Config::EdgeNoLabel],
        &|_, _| String::new(),
        &|_, (_, node)| {
            format!(
                "color=\"{color}\" style=filled fillcolor=\"{color}\" ",
                color = node.color
            )
        },
    );
    format!("{dot}")
}

/// Render a graph as pretty-printed JSON.
///
/// # Errors
///
/// Returns `Error::Serialization` if serde fails.
pub fn to_json(graph: &ArticleGraph) -> Result<String> {
    Ok(serde_json::to_string_pretty(&GraphDocument::new(graph, None))?)
}

/// Render several named graphs as one pretty-printed JSON array.
///
/// # Errors
///
/// Returns `Error::Serialization` if serde fails.
pub fn to_json_many(documents: &[GraphDocument<'_>]) -> Result<String> {
    Ok(serde_json::to_string_pretty(documents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_graph;

    const ARTICLE: &str = "environ theorems XBOOLE_0; begin\n\
                           theorem Th1: X = X by XBOOLE_0:1;\n\
                           theorem Th2: X c= X by Th1;\n";

    #[test]
    fn dot_contains_labels_colors_and_edges() {
        let dot = to_dot(&build_graph(ARTICLE));

        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("label = \"Th1\""));
        assert!(dot.contains("fillcolor=\"#ffc107\""));
        assert!(dot.contains("fillcolor=\"#9e9e9e\""));
        assert_eq!(dot.matches("->").count(), 2);
    }

    #[test]
    fn json_lists_nodes_and_edges() {
        let json = to_json(&build_graph(ARTICLE)).expect("should serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("should be valid JSON");

        let nodes = value["nodes"].as_array().expect("nodes array");
        let edges = value["edges"].as_array().expect("edges array");
        assert_eq!(nodes.len(), 3);
        assert_eq!(edges.len(), 2);
        assert_eq!(nodes[0]["label"], "Th1");
        assert_eq!(nodes[0]["kind"], "theorem");
        assert_eq!(nodes[0]["display_text"], "Th1");
        assert!(value.get("article").is_none());
        assert!(edges.iter().any(|e| e["from"] == "Th1" && e["to"] == "Th2" && e["kind"] == "internal"));
    }

    #[test]
    fn json_many_names_each_article() {
        let graph = build_graph(ARTICLE);
        let documents = vec![GraphDocument::new(&graph, Some("a.miz"))];

        let json = to_json_many(&documents).expect("should serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("should be valid JSON");

        assert_eq!(value[0]["article"], "a.miz");
    }

    #[test]
    fn empty_graph_renders() {
        let graph = ArticleGraph::new();

        assert!(to_dot(&graph).contains("digraph"));
        assert!(to_json(&graph).expect("should serialize").contains("\"nodes\": []"));
    }
}
