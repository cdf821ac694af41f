//! Run command - process one configured dataset or all of them
//!
//! With a dataset argument the selection runs once. Without one, and with a
//! terminal attached, the user is prompted for a dataset and a test size;
//! a failed run is reported and the prompt starts over.

use crate::config::RoadnetConfig;
use crate::output::{is_interactive, Output, OutputFormat, TableDisplay, TableOutput};
use crate::selection::{self, InvalidSelection, Selection};
use anyhow::Result;
use colored::Colorize;
use roadnet_core::pipeline::{run_batch_with, DatasetReport, DatasetSpec, PipelineOptions};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::warn;

use super::{create_spinner, format_ms};

/// Outcome of one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub name: String,
    pub features: usize,
    pub classes: usize,
    pub types: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<usize>,
    pub rows: usize,
    pub test_rows: usize,
    pub nodes: usize,
    pub links: usize,
    pub test_nodes: usize,
    pub test_links: usize,
    pub augmented: String,
    pub augmented_test: String,
    pub graph: String,
    pub graph_test: String,
    pub duration_ms: u128,
}

impl DatasetSummary {
    fn new(spec: &DatasetSpec, report: &DatasetReport) -> Self {
        Self {
            name: report.name.clone(),
            features: report.features,
            classes: report.classes,
            types: report.types,
            names: report.names,
            rows: report.rows,
            test_rows: report.test_rows,
            nodes: report.nodes,
            links: report.links,
            test_nodes: report.test_nodes,
            test_links: report.test_links,
            augmented: spec.outputs.augmented.display().to_string(),
            augmented_test: spec.outputs.augmented_test.display().to_string(),
            graph: spec.outputs.graph.display().to_string(),
            graph_test: spec.outputs.graph_test.display().to_string(),
            duration_ms: report.duration.as_millis(),
        }
    }
}

/// Result of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub datasets: Vec<DatasetSummary>,
    pub test_rows: usize,
    pub duration_ms: u128,
}

impl TableDisplay for RunSummary {
    fn to_table(&self) -> String {
        let headers = [
            "Dataset", "Features", "Rows", "Nodes", "Links", "Test rows", "Test links", "Time",
        ];
        let rows: Vec<Vec<String>> = self
            .datasets
            .iter()
            .map(|d| {
                vec![
                    d.name.clone(),
                    d.features.to_string(),
                    d.rows.to_string(),
                    d.nodes.to_string(),
                    d.links.to_string(),
                    d.test_rows.to_string(),
                    d.test_links.to_string(),
                    format_ms(d.duration_ms),
                ]
            })
            .collect();

        let mut lines = vec![TableOutput::format_rows(&headers, &rows)];
        for d in &self.datasets {
            lines.push(format!("{} {}", d.name.cyan().bold(), "outputs:".dimmed()));
            for path in [&d.augmented, &d.augmented_test, &d.graph, &d.graph_test] {
                lines.push(format!("  {}", path));
            }
        }
        lines.push(format!(
            "{} {} dataset(s) in {}",
            "Done:".green().bold(),
            self.datasets.len(),
            format_ms(self.duration_ms)
        ));
        lines.join("\n")
    }
}

/// Run the pipeline for the selected datasets.
pub fn run(
    config_path: &Path,
    dataset: Option<&str>,
    test_rows: Option<usize>,
    quiet: bool,
    format: OutputFormat,
) -> Result<()> {
    let config = RoadnetConfig::load(config_path)?;

    match dataset {
        Some(name) => {
            let specs = selection::resolve(&config, &Selection::parse(name))?;
            let summary = execute(&specs, &config.pipeline_options(test_rows), quiet)?;
            Output::new(summary, format).render()
        }
        None if is_interactive() => run_interactive(&config, test_rows, quiet, format),
        None => Err(InvalidSelection::NotInteractive.into()),
    }
}

/// Prompt until a selection runs to completion.
fn run_interactive(
    config: &RoadnetConfig,
    test_rows: Option<usize>,
    quiet: bool,
    format: OutputFormat,
) -> Result<()> {
    let default_rows = test_rows.unwrap_or(config.pipeline.test_rows);

    loop {
        let (selected, rows) = selection::prompt(config, default_rows)?;

        let attempt = selection::resolve(config, &selected)
            .map_err(anyhow::Error::from)
            .and_then(|specs| {
                execute(&specs, &config.pipeline_options(Some(rows)), quiet)
                    .map_err(anyhow::Error::from)
            });

        match attempt {
            Ok(summary) => return Output::new(summary, format).render(),
            Err(e) => {
                eprintln!("{} {:#}", "ERROR:".red().bold(), e);
                warn!("Run did not complete, prompting again");
            }
        }
    }
}

/// Run the batch behind a spinner.
fn execute(
    specs: &[DatasetSpec],
    options: &PipelineOptions,
    quiet: bool,
) -> Result<RunSummary, roadnet_core::BatchError> {
    let start = Instant::now();
    let spinner = create_spinner(quiet);
    let total = specs.len();
    let mut position = 0;

    let result = run_batch_with(specs, options, |spec| {
        position += 1;
        spinner.set_message(format!("Processing {} ({}/{})...", spec.name, position, total));
    });
    spinner.finish_and_clear();

    let reports = result?;
    Ok(RunSummary {
        datasets: specs
            .iter()
            .zip(&reports)
            .map(|(spec, report)| DatasetSummary::new(spec, report))
            .collect(),
        test_rows: options.test_rows,
        duration_ms: start.elapsed().as_millis(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadnet_core::pipeline::OutputPaths;
    use roadnet_core::types::ColumnLayout;
    use std::path::PathBuf;
    use std::time::Duration;

    fn summary() -> RunSummary {
        let spec = DatasetSpec {
            name: "Delhi".to_string(),
            geometry: PathBuf::from("Delhi_Links.shp"),
            edges: PathBuf::from("Delhi_Edgelist.csv"),
            outputs: OutputPaths::for_dataset(Path::new("out"), "Delhi"),
            include_names: false,
            layout: ColumnLayout::default(),
        };
        let report = DatasetReport {
            name: "Delhi".to_string(),
            features: 4,
            classes: 3,
            types: 3,
            names: None,
            rows: 5,
            test_rows: 3,
            nodes: 5,
            links: 4,
            test_nodes: 3,
            test_links: 2,
            duration: Duration::from_millis(12),
        };
        RunSummary {
            datasets: vec![DatasetSummary::new(&spec, &report)],
            test_rows: 3,
            duration_ms: 12,
        }
    }

    #[test]
    fn test_summary_table() {
        let table = summary().to_table();
        assert!(table.contains("Delhi"));
        assert!(table.contains("Delhi_Edgelist_Updated.csv"));
        assert!(table.contains("Delhi_Test.json"));
        assert!(table.contains("12ms"));
    }

    #[test]
    fn test_summary_json_omits_absent_names() {
        let value = serde_json::to_value(summary()).unwrap();
        let dataset = &value["datasets"][0];
        assert_eq!(dataset["links"], 4);
        assert_eq!(dataset["duration_ms"], 12);
        assert!(dataset.get("names").is_none());
    }

    #[test]
    fn test_execute_reports_failing_dataset() {
        let dir = tempfile::TempDir::new().unwrap();
        let spec = DatasetSpec::new(
            "Missing",
            dir.path().join("nope.geojson"),
            dir.path().join("nope.csv"),
            dir.path(),
        );
        let err = execute(&[spec], &PipelineOptions::default(), true).unwrap_err();
        assert_eq!(err.dataset, "Missing");
    }
}
