//! Graph command - turn an augmented edge table into a graph document

use crate::output::{Output, OutputFormat, TableDisplay, TableOutput};
use anyhow::Result;
use colored::Colorize;
use roadnet_core::exporter;
use roadnet_core::graph;
use roadnet_core::types::ColumnLayout;
use serde::Serialize;
use std::path::Path;

/// Result of a graph run.
#[derive(Debug, Clone, Serialize)]
pub struct GraphResult {
    pub input: String,
    pub output: String,
    pub nodes: usize,
    pub links: usize,
}

impl TableDisplay for GraphResult {
    fn to_table(&self) -> String {
        let pairs = [
            ("Input", self.input.clone()),
            ("Output", self.output.clone()),
            ("Nodes", self.nodes.to_string()),
            ("Links", self.links.to_string()),
        ];
        format!(
            "{}\n{}",
            "Graph document written".green().bold(),
            TableOutput::format_key_value(&pairs)
        )
    }
}

/// Assemble the graph for `input` and write it to `output`.
pub fn build_graph(input: &Path, output: &Path, pretty: bool) -> Result<GraphResult> {
    let document = graph::assemble_file(input, &ColumnLayout::default())?;
    exporter::json::write_document(output, &document, pretty)?;

    Ok(GraphResult {
        input: input.display().to_string(),
        output: output.display().to_string(),
        nodes: document.nodes.len(),
        links: document.links.len(),
    })
}

/// Run the graph command.
pub fn run(input: &Path, output: &Path, pretty: bool, format: OutputFormat) -> Result<()> {
    let result = build_graph(input, output, pretty)?;
    Output::new(result, format).render()
}
