//! Dataset pipeline: geometry + edge table in, tables and graphs out.
//!
//! Orchestrates, per dataset:
//! 1. Loading geometry features
//! 2. Building the attribute maps
//! 3. Enriching the edge table and cutting the test prefix
//! 4. Assembling graph documents from the full and test tables
//! 5. Writing all four outputs, only after every earlier step succeeded
//!
//! Every dataset gets freshly built maps and buffers; nothing carries over
//! from one dataset to the next.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::info;

use crate::attributes::{AttributeMaps, ExtractOptions, DEFAULT_PLACEHOLDERS};
use crate::enrich;
use crate::error::{BatchError, Result};
use crate::exporter;
use crate::graph;
use crate::source;
use crate::types::ColumnLayout;

/// Default number of records (header included) in the test table.
pub const DEFAULT_TEST_ROWS: usize = 100;

/// Where a dataset's four outputs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub augmented: PathBuf,
    pub augmented_test: PathBuf,
    pub graph: PathBuf,
    pub graph_test: PathBuf,
}

impl OutputPaths {
    /// Conventional output names for a dataset inside `dir`.
    pub fn for_dataset(dir: &Path, name: &str) -> Self {
        Self {
            augmented: dir.join(format!("{}_Edgelist_Updated.csv", name)),
            augmented_test: dir.join(format!("{}_Edgelist_Test.csv", name)),
            graph: dir.join(format!("{}.json", name)),
            graph_test: dir.join(format!("{}_Test.json", name)),
        }
    }
}

/// Inputs, outputs and schema of one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSpec {
    pub name: String,
    pub geometry: PathBuf,
    pub edges: PathBuf,
    pub outputs: OutputPaths,
    /// Produce the `NAME` column.
    pub include_names: bool,
    pub layout: ColumnLayout,
}

impl DatasetSpec {
    /// A dataset with conventional output names in `output_dir`, names
    /// enabled and the default column layout.
    pub fn new(
        name: impl Into<String>,
        geometry: impl Into<PathBuf>,
        edges: impl Into<PathBuf>,
        output_dir: &Path,
    ) -> Self {
        let name = name.into();
        let outputs = OutputPaths::for_dataset(output_dir, &name);
        Self {
            name,
            geometry: geometry.into(),
            edges: edges.into(),
            outputs,
            include_names: true,
            layout: ColumnLayout::default(),
        }
    }
}

/// Settings shared by every dataset of a run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Records in the test table, header included.
    pub test_rows: usize,
    /// Characters marking a road name as unknown.
    pub placeholders: Vec<char>,
    /// Pretty-print graph documents.
    pub pretty: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            test_rows: DEFAULT_TEST_ROWS,
            placeholders: DEFAULT_PLACEHOLDERS.to_vec(),
            pretty: false,
        }
    }
}

/// Counts gathered while processing one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetReport {
    pub name: String,
    pub features: usize,
    pub classes: usize,
    pub types: usize,
    pub names: Option<usize>,
    /// Records in the augmented table, header included.
    pub rows: usize,
    /// Records in the test table, header included.
    pub test_rows: usize,
    pub nodes: usize,
    pub links: usize,
    pub test_nodes: usize,
    pub test_links: usize,
    pub duration: Duration,
}

/// Run the full pipeline for one dataset.
pub fn run_dataset(spec: &DatasetSpec, options: &PipelineOptions) -> Result<DatasetReport> {
    let start = Instant::now();
    info!("Processing dataset '{}'", spec.name);

    let features = source::load_features(&spec.geometry)?;
    let extract = ExtractOptions {
        include_names: spec.include_names,
        placeholders: options.placeholders.clone(),
    };
    let maps = AttributeMaps::build(&features, &extract)?;

    let table = enrich::enrich_file(&spec.edges, &maps, &spec.layout)?;
    let test_records = table.prefix(options.test_rows);

    // Nothing is written until both graphs are assembled.
    let test_graph = graph::assemble_records(&spec.edges, test_records, &spec.layout)?;
    let full_graph = graph::assemble_records(&spec.edges, table.records(), &spec.layout)?;

    let outputs = &spec.outputs;
    let staged = [
        exporter::csv::stage_records(&outputs.augmented, table.records())?,
        exporter::csv::stage_records(&outputs.augmented_test, test_records)?,
        exporter::json::stage_document(&outputs.graph_test, &test_graph, options.pretty)?,
        exporter::json::stage_document(&outputs.graph, &full_graph, options.pretty)?,
    ];
    for output in staged {
        let path = output.path().to_path_buf();
        output.commit()?;
        info!("Created '{}'", path.display());
    }

    Ok(DatasetReport {
        name: spec.name.clone(),
        features: features.len(),
        classes: maps.class.len(),
        types: maps.kind.len(),
        names: maps.name.as_ref().map(|names| names.len()),
        rows: table.len(),
        test_rows: test_records.len(),
        nodes: full_graph.nodes.len(),
        links: full_graph.links.len(),
        test_nodes: test_graph.nodes.len(),
        test_links: test_graph.links.len(),
        duration: start.elapsed(),
    })
}

/// Run datasets in order, stopping at the first failure.
pub fn run_batch(
    specs: &[DatasetSpec],
    options: &PipelineOptions,
) -> std::result::Result<Vec<DatasetReport>, BatchError> {
    run_batch_with(specs, options, |_| {})
}

/// Like [`run_batch`], calling `on_start` before each dataset.
pub fn run_batch_with<F>(
    specs: &[DatasetSpec],
    options: &PipelineOptions,
    mut on_start: F,
) -> std::result::Result<Vec<DatasetReport>, BatchError>
where
    F: FnMut(&DatasetSpec),
{
    let mut reports = Vec::with_capacity(specs.len());
    for spec in specs {
        on_start(spec);
        let report = run_dataset(spec, options).map_err(|source| BatchError {
            dataset: spec.name.clone(),
            source,
        })?;
        reports.push(report);
    }
    Ok(reports)
}
