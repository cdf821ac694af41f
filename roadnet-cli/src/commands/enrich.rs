//! Enrich command - join geometry attributes onto an edge table
//!
//! Runs attribute extraction and row enrichment for a single pair of input
//! files, without a configuration file and without building graphs.

use crate::output::{Output, OutputFormat, TableDisplay, TableOutput};
use anyhow::{Context, Result};
use colored::Colorize;
use roadnet_core::attributes::{AttributeMaps, ExtractOptions};
use roadnet_core::enrich;
use roadnet_core::source;
use roadnet_core::types::ColumnLayout;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Result of an enrich run.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichResult {
    pub features: usize,
    pub classes: usize,
    pub types: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<usize>,
    pub rows: usize,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_rows: Option<usize>,
    pub duration_ms: u128,
}

impl TableDisplay for EnrichResult {
    fn to_table(&self) -> String {
        let mut pairs = vec![
            ("Features", self.features.to_string()),
            ("Class entries", self.classes.to_string()),
            ("Type entries", self.types.to_string()),
        ];
        if let Some(names) = self.names {
            pairs.push(("Name entries", names.to_string()));
        }
        pairs.push(("Rows", self.rows.to_string()));
        pairs.push(("Output", self.output.clone()));
        if let (Some(path), Some(rows)) = (&self.test_output, self.test_rows) {
            pairs.push(("Test output", format!("{} ({} rows)", path, rows)));
        }

        format!(
            "{}\n{}",
            "Enriched edge table".green().bold(),
            TableOutput::format_key_value(&pairs)
        )
    }
}

/// Options for [`run`].
pub struct EnrichArgs<'a> {
    pub geometry: &'a Path,
    pub edges: &'a Path,
    pub output: &'a Path,
    pub test_output: Option<&'a Path>,
    pub test_rows: usize,
    pub names: bool,
}

/// Build the attribute maps and write the augmented table.
pub fn enrich_tables(args: &EnrichArgs<'_>) -> Result<EnrichResult> {
    let start = Instant::now();

    let features = source::load_features(args.geometry)?;
    let options = ExtractOptions {
        include_names: args.names,
        ..ExtractOptions::default()
    };
    let maps = AttributeMaps::build(&features, &options)
        .with_context(|| format!("Failed to read attributes from {}", args.geometry.display()))?;

    let table = enrich::enrich_file(args.edges, &maps, &ColumnLayout::default())?;
    table.write(args.output)?;

    let test_rows = match args.test_output {
        Some(path) => Some(table.write_prefix(path, args.test_rows)?),
        None => None,
    };

    Ok(EnrichResult {
        features: features.len(),
        classes: maps.class.len(),
        types: maps.kind.len(),
        names: maps.name.as_ref().map(|names| names.len()),
        rows: table.len(),
        output: args.output.display().to_string(),
        test_output: args.test_output.map(|p| p.display().to_string()),
        test_rows,
        duration_ms: start.elapsed().as_millis(),
    })
}

/// Run the enrich command.
pub fn run(args: &EnrichArgs<'_>, format: OutputFormat) -> Result<()> {
    let result = enrich_tables(args)?;
    Output::new(result, format).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const GEOJSON: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "geometry": null,
         "properties": {"OBJECTID": 5, "type": "arterial", "oneway": 1, "bridge": 0,
                        "tunnel": 0, "name": ""}}
    ]}"#;

    #[test]
    fn test_enrich_tables() {
        let dir = TempDir::new().unwrap();
        let geometry = dir.path().join("links.geojson");
        let edges = dir.path().join("edges.csv");
        fs::write(&geometry, GEOJSON).unwrap();
        fs::write(&edges, "x,y,s,t,eid,w\n10.0,20.0,1,2,5,3.5\n").unwrap();

        let output = dir.path().join("out.csv");
        let test_output = dir.path().join("test.csv");
        let result = enrich_tables(&EnrichArgs {
            geometry: &geometry,
            edges: &edges,
            output: &output,
            test_output: Some(&test_output),
            test_rows: 1,
            names: true,
        })
        .unwrap();

        assert_eq!(result.rows, 2);
        assert_eq!(result.test_rows, Some(1));
        assert_eq!(result.names, Some(1));
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "x,y,s,t,eid,w,CLASS,TYPE,NAME\n10.0,20.0,1,2,5,3.5,arterial,oneway,NULL\n"
        );
        assert_eq!(
            fs::read_to_string(&test_output).unwrap(),
            "x,y,s,t,eid,w,CLASS,TYPE,NAME\n"
        );
    }

    #[test]
    fn test_enrich_without_names() {
        let dir = TempDir::new().unwrap();
        let geometry = dir.path().join("links.geojson");
        let edges = dir.path().join("edges.csv");
        fs::write(&geometry, GEOJSON).unwrap();
        fs::write(&edges, "x,y,s,t,eid,w\n10.0,20.0,1,2,5,3.5\n").unwrap();

        let output = dir.path().join("out.csv");
        let result = enrich_tables(&EnrichArgs {
            geometry: &geometry,
            edges: &edges,
            output: &output,
            test_output: None,
            test_rows: 100,
            names: false,
        })
        .unwrap();

        assert!(result.names.is_none());
        assert!(result.test_output.is_none());
        assert!(fs::read_to_string(&output).unwrap().starts_with("x,y,s,t,eid,w,CLASS,TYPE\n"));
        assert!(result.to_table().contains("Rows"));
    }
}
