//! List command - show the datasets defined in the configuration

use crate::config::RoadnetConfig;
use crate::output::{Output, OutputFormat, TableDisplay, TableOutput};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// One configured dataset with its resolved inputs.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetListing {
    pub name: String,
    pub geometry: String,
    pub edges: String,
    pub names: bool,
    pub graph: String,
}

/// All configured datasets, in run order.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetList {
    pub config: String,
    pub datasets: Vec<DatasetListing>,
}

impl DatasetList {
    pub fn from_config(config: &RoadnetConfig, config_path: &Path) -> Self {
        let datasets = config
            .datasets
            .iter()
            .map(|entry| {
                let spec = config.spec(entry);
                DatasetListing {
                    name: spec.name,
                    geometry: spec.geometry.display().to_string(),
                    edges: spec.edges.display().to_string(),
                    names: spec.include_names,
                    graph: spec.outputs.graph.display().to_string(),
                }
            })
            .collect();

        Self {
            config: config_path.display().to_string(),
            datasets,
        }
    }
}

impl TableDisplay for DatasetList {
    fn to_table(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .datasets
            .iter()
            .map(|d| {
                vec![
                    d.name.clone(),
                    d.geometry.clone(),
                    d.edges.clone(),
                    if d.names { "yes" } else { "no" }.to_string(),
                    d.graph.clone(),
                ]
            })
            .collect();
        TableOutput::format_rows(&["Dataset", "Geometry", "Edges", "Names", "Graph"], &rows)
    }
}

/// Print the configured datasets.
pub fn run(config_path: &Path, format: OutputFormat) -> Result<()> {
    let config = RoadnetConfig::load(config_path)?;
    Output::new(DatasetList::from_config(&config, config_path), format).render()
}
