//! roadnet CLI - road network attribute enrichment
//!
//! Joins road-segment attributes from a geometry dataset onto an edge table
//! and turns the result into node-link graph documents.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod constants;
mod output;
mod selection;

use commands::*;
use config::DEFAULT_CONFIG_FILE;
use output::OutputFormat;
use roadnet_core::pipeline::DEFAULT_TEST_ROWS;

/// Road network enrichment and graph export.
///
/// Reads a geometry dataset and an edge table per configured dataset,
/// writes the augmented tables and the graph documents built from them.
#[derive(Parser)]
#[command(name = "roadnet")]
#[command(author, version)]
#[command(about = "Road network enrichment and graph export")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  roadnet list                  Show configured datasets
  roadnet run Delhi             Process one dataset
  roadnet run all               Process every dataset in order
  roadnet run                   Choose a dataset interactively")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE, env = "ROADNET_CONFIG")]
    config: PathBuf,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a configured dataset, or all of them
    Run {
        /// Dataset name or "all" (prompts when omitted on a terminal)
        dataset: Option<String>,

        /// Records in each test table, header included (overrides config)
        #[arg(short = 'n', long)]
        test_rows: Option<usize>,
    },

    /// List configured datasets
    #[command(visible_alias = "ls")]
    List,

    /// Join geometry attributes onto an edge table
    Enrich {
        /// Geometry dataset (.shp or .geojson)
        #[arg(long)]
        geometry: PathBuf,

        /// Edge table
        #[arg(long)]
        edges: PathBuf,

        /// Augmented table to write
        #[arg(short, long)]
        output: PathBuf,

        /// Also write the leading records to this file
        #[arg(long)]
        test_output: Option<PathBuf>,

        /// Records in the test table, header included
        #[arg(short = 'n', long, default_value_t = DEFAULT_TEST_ROWS)]
        test_rows: usize,

        /// Add the NAME column
        #[arg(long)]
        names: bool,
    },

    /// Build a graph document from an augmented edge table
    Graph {
        /// Augmented edge table
        #[arg(short, long)]
        input: PathBuf,

        /// Graph document to write
        #[arg(short, long)]
        output: PathBuf,

        /// Pretty-print the document
        #[arg(long)]
        pretty: bool,
    },
}

/// Set up logging based on verbosity flags
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if !output::is_tty() {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Run { dataset, test_rows } => run::run(
            &cli.config,
            dataset.as_deref(),
            test_rows,
            cli.quiet,
            cli.format,
        ),
        Commands::List => list::run(&cli.config, cli.format),
        Commands::Enrich {
            geometry,
            edges,
            output,
            test_output,
            test_rows,
            names,
        } => enrich::run(
            &enrich::EnrichArgs {
                geometry: &geometry,
                edges: &edges,
                output: &output,
                test_output: test_output.as_deref(),
                test_rows,
                names,
            },
            cli.format,
        ),
        Commands::Graph {
            input,
            output,
            pretty,
        } => graph::run(&input, &output, pretty, cli.format),
    }
}
