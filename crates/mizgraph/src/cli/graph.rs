//! `mizgraph graph` command implementation.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use mizgraph::export::{self, GraphDocument};
use mizgraph::{ArticleGraphBuilder, BuiltArticle, build_graphs};

use super::display::print_article_errors;

/// Serialization format for emitted graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Graphviz DOT, one digraph per article
    Dot,
    /// JSON; an array of named graphs when several articles are given
    Json,
}

/// Run the graph command.
pub fn run(
    builder: &ArticleGraphBuilder,
    files: &[PathBuf],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), mizgraph::Error> {
    let report = build_graphs(builder, files);
    print_article_errors(&report.errors);

    let rendered = match format {
        OutputFormat::Dot => render_dot(&report.articles),
        OutputFormat::Json => render_json(&report.articles)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), "Wrote graph");
        }
        None => print!("{rendered}"),
    }

    if report.is_complete() {
        Ok(())
    } else {
        Err(mizgraph::Error::ArticlesFailed(report.errors.len()))
    }
}

fn render_dot(articles: &[BuiltArticle]) -> String {
    let mut rendered = String::new();
    for article in articles {
        if articles.len() > 1 {
            rendered.push_str(&format!("// {}\n", article.path.display()));
        }
        rendered.push_str(&export::to_dot(&article.graph));
    }
    rendered
}

fn render_json(articles: &[BuiltArticle]) -> Result<String, mizgraph::Error> {
    if let [single] = articles {
        let mut rendered = export::to_json(&single.graph)?;
        rendered.push('\n');
        return Ok(rendered);
    }

    let names: Vec<String> = articles
        .iter()
        .map(|article| article.path.display().to_string())
        .collect();
    let documents: Vec<GraphDocument<'_>> = articles
        .iter()
        .zip(&names)
        .map(|(article, name)| GraphDocument::new(&article.graph, Some(name.as_str())))
        .collect();

    let mut rendered = export::to_json_many(&documents)?;
    rendered.push('\n');
    Ok(rendered)
}
