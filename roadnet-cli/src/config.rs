//! roadnet configuration loading from `roadnet.toml`.
//!
//! The configuration maps dataset names to their input and output paths and
//! holds the settings shared by every run. Relative paths are resolved
//! against the directory containing the configuration file.
//!
//! # Example Configuration
//!
//! ```toml
//! [pipeline]
//! test_rows = 100
//! placeholder_chars = ["?"]
//!
//! [output]
//! directory = "out"
//! pretty = false
//!
//! [[datasets]]
//! name = "Delhi"
//! geometry = "data/Delhi_Links.shp"
//! edges = "data/Delhi_Edgelist.csv"
//!
//! [[datasets]]
//! name = "Chicago"
//! geometry = "data/Chicago_Links.geojson"
//! edges = "data/Chicago_Edgelist.csv"
//! names = false
//! graph = "web/chicago.json"
//! ```

use anyhow::{bail, Context, Result};
use roadnet_core::attributes::DEFAULT_PLACEHOLDERS;
use roadnet_core::pipeline::{DatasetSpec, OutputPaths, PipelineOptions, DEFAULT_TEST_ROWS};
use roadnet_core::types::ColumnLayout;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "roadnet.toml";

/// Root configuration structure loaded from `roadnet.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct RoadnetConfig {
    /// Settings shared by all datasets.
    #[serde(default)]
    pub pipeline: PipelineSection,

    /// Output location and formatting.
    #[serde(default)]
    pub output: OutputSection,

    /// Named datasets, in the order they run for `all`.
    #[serde(default)]
    pub datasets: Vec<DatasetEntry>,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// `[pipeline]` section.
#[derive(Debug, Deserialize)]
pub struct PipelineSection {
    /// Records in each test table, header included.
    #[serde(default = "default_test_rows")]
    pub test_rows: usize,

    /// Characters marking a road name as unknown.
    #[serde(default = "default_placeholders")]
    pub placeholder_chars: Vec<char>,
}

fn default_test_rows() -> usize {
    DEFAULT_TEST_ROWS
}

fn default_placeholders() -> Vec<char> {
    DEFAULT_PLACEHOLDERS.to_vec()
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            test_rows: default_test_rows(),
            placeholder_chars: default_placeholders(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSection {
    /// Directory for outputs without an explicit path.
    ///
    /// Default: the configuration file's directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Pretty-print graph documents.
    #[serde(default)]
    pub pretty: bool,
}

/// One `[[datasets]]` entry.
#[derive(Debug, Deserialize, Clone)]
pub struct DatasetEntry {
    pub name: String,
    /// Shapefile (`.shp`) or GeoJSON geometry source.
    pub geometry: PathBuf,
    /// Edge table.
    pub edges: PathBuf,

    /// Produce the `NAME` column. Default: `true`.
    #[serde(default = "default_names")]
    pub names: bool,

    #[serde(default)]
    pub augmented: Option<PathBuf>,
    #[serde(default)]
    pub augmented_test: Option<PathBuf>,
    #[serde(default)]
    pub graph: Option<PathBuf>,
    #[serde(default)]
    pub graph_test: Option<PathBuf>,

    /// Base field positions of the edge table.
    #[serde(default)]
    pub layout: ColumnLayout,
}

fn default_names() -> bool {
    true
}

impl RoadnetConfig {
    /// Load and validate the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Self::from_toml_str(&content, base_dir)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse configuration text, resolving relative paths against `base_dir`.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self> {
        let mut config: RoadnetConfig = toml::from_str(content)?;
        config.base_dir = base_dir.to_path_buf();
        config.validate()?;
        tracing::debug!(
            "Loaded {} datasets (base directory {})",
            config.datasets.len(),
            config.base_dir.display()
        );
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.datasets {
            if entry.name.trim().is_empty() {
                bail!("dataset names must not be empty");
            }
            if entry.name.eq_ignore_ascii_case("all") {
                bail!("'all' is reserved and cannot be used as a dataset name");
            }
            if !seen.insert(entry.name.as_str()) {
                bail!("dataset '{}' is defined more than once", entry.name);
            }
        }
        Ok(())
    }

    /// Dataset names in configuration order.
    pub fn dataset_names(&self) -> Vec<&str> {
        self.datasets.iter().map(|d| d.name.as_str()).collect()
    }

    /// Look up a dataset by name.
    pub fn dataset(&self, name: &str) -> Option<&DatasetEntry> {
        self.datasets.iter().find(|d| d.name == name)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Directory for outputs without an explicit path.
    pub fn output_dir(&self) -> PathBuf {
        match &self.output.directory {
            Some(dir) => self.resolve(dir),
            None => self.base_dir.clone(),
        }
    }

    /// Build the pipeline spec for a dataset entry.
    pub fn spec(&self, entry: &DatasetEntry) -> DatasetSpec {
        let defaults = OutputPaths::for_dataset(&self.output_dir(), &entry.name);
        let pick = |explicit: &Option<PathBuf>, default: PathBuf| match explicit {
            Some(path) => self.resolve(path),
            None => default,
        };

        DatasetSpec {
            name: entry.name.clone(),
            geometry: self.resolve(&entry.geometry),
            edges: self.resolve(&entry.edges),
            outputs: OutputPaths {
                augmented: pick(&entry.augmented, defaults.augmented),
                augmented_test: pick(&entry.augmented_test, defaults.augmented_test),
                graph: pick(&entry.graph, defaults.graph),
                graph_test: pick(&entry.graph_test, defaults.graph_test),
            },
            include_names: entry.names,
            layout: entry.layout,
        }
    }

    /// Pipeline options, with an optional test-row override from the command line.
    pub fn pipeline_options(&self, test_rows: Option<usize>) -> PipelineOptions {
        PipelineOptions {
            test_rows: test_rows.unwrap_or(self.pipeline.test_rows),
            placeholders: self.pipeline.placeholder_chars.clone(),
            pretty: self.output.pretty,
        }
    }
}
