//! CLI command implementations.

mod display;

pub mod graph;
pub mod stats;

use std::path::Path;

use mizgraph::config::CONFIG_FILE_NAME;
use mizgraph::{ArticleGraphBuilder, Config};

/// Create the graph builder.
///
/// The palette comes from `config` if given, else from `mizgraph.yaml` in the
/// working directory when one exists, else the defaults.
pub fn load_builder(config: Option<&Path>) -> Result<ArticleGraphBuilder, mizgraph::Error> {
    let discovered = Path::new(CONFIG_FILE_NAME);
    let config = config.or_else(|| discovered.is_file().then_some(discovered));

    match config {
        Some(path) => {
            let config = Config::load(path)?;
            tracing::debug!(path = %path.display(), "Loaded configuration");
            Ok(ArticleGraphBuilder::from_config(config))
        }
        None => Ok(ArticleGraphBuilder::new()),
    }
}
