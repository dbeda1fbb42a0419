//! `mizgraph stats` command implementation.

use std::path::PathBuf;

use colored::Colorize;
use mizgraph::{ArticleGraphBuilder, BuiltArticle, NodeKind, build_graphs};

use super::display::{print_article_errors, print_labels, swatch};

/// Run the stats command.
pub fn run(
    builder: &ArticleGraphBuilder,
    files: &[PathBuf],
    top: usize,
) -> Result<(), mizgraph::Error> {
    let report = build_graphs(builder, files);
    print_article_errors(&report.errors);

    for (i, article) in report.articles.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_article(builder, article, top);
    }

    if report.is_complete() {
        Ok(())
    } else {
        Err(mizgraph::Error::ArticlesFailed(report.errors.len()))
    }
}

fn print_article(builder: &ArticleGraphBuilder, article: &BuiltArticle, top: usize) {
    let graph = &article.graph;
    let stats = graph.stats(top);

    println!("{}", article.path.display().to_string().cyan().bold());
    println!();

    let entry_count: usize = stats
        .nodes_by_kind
        .iter()
        .filter(|(kind, _)| !matches!(kind, NodeKind::External | NodeKind::Placeholder))
        .map(|(_, count)| count)
        .sum();
    println!(
        "  {}: {} total",
        "Entries".white().bold(),
        entry_count.to_string().green()
    );

    // BTreeMap keeps kinds in declaration order
    for (kind, count) in &stats.nodes_by_kind {
        let color = builder.palette().color_for(*kind);
        println!("    {}: {count}", swatch(kind.as_str(), color));
    }
    println!();

    println!(
        "  {}: {} total ({} internal, {} external)",
        "Citations".white().bold(),
        stats.edge_count.to_string().green(),
        stats.internal_edges,
        stats.external_edges
    );
    println!();

    println!("  {}:", "Most cited".white().bold());
    let ranked: Vec<String> = stats
        .most_cited
        .iter()
        .map(|(label, count)| {
            let color = graph.node(label).map_or("", |node| node.color.as_str());
            format!("{} ({count})", swatch(label, color))
        })
        .collect();
    let ranked: Vec<&str> = ranked.iter().map(String::as_str).collect();
    print_labels(&ranked, "no citations");
}
