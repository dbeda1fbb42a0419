//! Property tests for graph invariants over generated articles.
//!
//! Articles are stitched together from statement fragments with random label
//! numbers, so explicit and auto-numbered labels, forward citations and
//! duplicate declarations all show up.

use std::collections::HashSet;

use mizgraph::{ArticleGraph, NodeKind, build_graph};
use proptest::prelude::*;

fn fragment() -> impl Strategy<Value = String> {
    let n = 1u32..6;
    let m = 1u32..6;
    (0usize..7, n, m).prop_map(|(shape, n, m)| match shape {
        0 => format!("theorem Th{n}:\n  X = X by Th{m}, XBOOLE_0:{m};\n"),
        1 => format!("theorem\n  X c= X by Def{m}, A{n}, Th_auto{m};\n"),
        2 => format!("definition\n  let X be set;\n  :Def{n}: X = X by Lm{m};\nend;\n"),
        3 => format!("Lm{n}: X = X by Th{m}, TARSKI:def {m};\n"),
        4 => "definition\n  let X be set;\nend;\n".to_string(),
        5 => format!("theorem Th{n}: X in {{X}} from Def_auto{m};\n"),
        _ => format!(":: theorem Th{n}: commented out\n"),
    })
}

fn article() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..12).prop_map(|fragments| {
        let mut text = String::from("environ\n theorems XBOOLE_0, TARSKI;\nbegin\n");
        for fragment in fragments {
            text.push_str(&fragment);
        }
        text
    })
}

fn labels(graph: &ArticleGraph) -> Vec<String> {
    graph.nodes().map(|n| n.label.clone()).collect()
}

fn edges(graph: &ArticleGraph) -> Vec<(String, String)> {
    graph
        .edges()
        .map(|e| (e.from.to_string(), e.to.to_string()))
        .collect()
}

proptest! {
    #[test]
    fn node_labels_are_unique(text in article()) {
        let graph = build_graph(&text);

        let labels = labels(&graph);
        let unique: HashSet<&String> = labels.iter().collect();
        prop_assert_eq!(unique.len(), labels.len());
    }

    #[test]
    fn no_self_loops(text in article()) {
        let graph = build_graph(&text);

        for edge in graph.edges() {
            prop_assert_ne!(edge.from, edge.to);
        }
    }

    #[test]
    fn edges_are_not_repeated(text in article()) {
        let graph = build_graph(&text);

        let edges = edges(&graph);
        let unique: HashSet<&(String, String)> = edges.iter().collect();
        prop_assert_eq!(unique.len(), edges.len());
    }

    #[test]
    fn auto_numbers_never_reuse_explicit_numbers(text in article()) {
        let graph = build_graph(&text);

        for node in graph.nodes().filter(|n| n.kind == NodeKind::AutoTheorem) {
            let number = node.label.trim_start_matches("Th_auto");
            let explicit = format!("Th{number}");
            prop_assert!(
                graph.node(&explicit).is_none(),
                "{} collides with {}", node.label, explicit
            );
        }
    }

    #[test]
    fn building_is_deterministic(text in article()) {
        let first = build_graph(&text);
        let second = build_graph(&text);

        prop_assert_eq!(labels(&first), labels(&second));
        prop_assert_eq!(edges(&first), edges(&second));
    }

    #[test]
    fn every_edge_targets_an_entry(text in article()) {
        let graph = build_graph(&text);

        for edge in graph.edges() {
            let target = graph.node(edge.to).map(|n| n.kind);
            prop_assert!(
                !matches!(target, Some(NodeKind::External | NodeKind::Placeholder) | None),
                "edge {} -> {} ends at a non-entry", edge.from, edge.to
            );
        }
    }
}
