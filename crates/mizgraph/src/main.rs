//! Mizgraph CLI - citation graphs of Mizar articles from the command line.
//!
//! Mizgraph scans `.miz` articles for theorems, definitions and lemmas and
//! emits the graph of which entries justify which.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

/// Mizgraph: citation dependency graphs for Mizar articles.
#[derive(Parser)]
#[command(name = "mizgraph")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Palette configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the citation graph of one or more articles
    Graph {
        /// Article files (.miz)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = cli::graph::OutputFormat::Dot)]
        format: cli::graph::OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize entries and citations of one or more articles
    Stats {
        /// Article files (.miz)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Number of most-cited entries to list
        #[arg(short, long, default_value = "10")]
        top: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let builder = match cli::load_builder(cli.config.as_deref()) {
        Ok(builder) => builder,
        Err(e) => return report_error(&e),
    };

    let result = match cli.command {
        Commands::Graph {
            files,
            format,
            output,
        } => cli::graph::run(&builder, &files, format, output.as_deref()),
        Commands::Stats { files, top } => cli::stats::run(&builder, &files, top),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(&e),
    }
}

fn report_error(e: &mizgraph::Error) -> ExitCode {
    eprintln!("{}: {e}", "error".red().bold());
    // Show cause chain for nested errors
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        eprintln!("  {}: {cause}", "caused by".dimmed());
        source = std::error::Error::source(cause);
    }
    ExitCode::FAILURE
}
