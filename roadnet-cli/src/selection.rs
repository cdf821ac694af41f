//! Dataset selection and the interactive prompt.
//!
//! A selection names one configured dataset or `all` of them. Invalid
//! selections are reported as [`InvalidSelection`]; the interactive prompt
//! recovers from them by asking again.

use crate::config::RoadnetConfig;
use dialoguer::{Input, Select};
use roadnet_core::pipeline::DatasetSpec;
use thiserror::Error;

/// Keyword selecting every configured dataset.
pub const ALL_DATASETS: &str = "all";

/// A caller-side selection error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidSelection {
    /// No dataset with this name is configured.
    #[error("Unknown dataset '{name}' (available: {available})")]
    UnknownDataset { name: String, available: String },

    /// The configuration defines no datasets.
    #[error("No datasets are configured")]
    NoDatasets,

    /// The test dataset size is not a non-negative integer.
    #[error("'{0}' is not a valid row count")]
    InvalidSize(String),

    /// No selection was given and there is no terminal to prompt on.
    #[error("No dataset given and not running in a terminal; pass a dataset name or 'all'")]
    NotInteractive,
}

/// Which datasets to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    One(String),
}

impl Selection {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case(ALL_DATASETS) {
            Selection::All
        } else {
            Selection::One(s.to_string())
        }
    }
}

/// Resolve a selection to pipeline specs, in configuration order.
pub fn resolve(
    config: &RoadnetConfig,
    selection: &Selection,
) -> Result<Vec<DatasetSpec>, InvalidSelection> {
    if config.datasets.is_empty() {
        return Err(InvalidSelection::NoDatasets);
    }

    match selection {
        Selection::All => Ok(config.datasets.iter().map(|d| config.spec(d)).collect()),
        Selection::One(name) => config
            .dataset(name)
            .map(|d| vec![config.spec(d)])
            .ok_or_else(|| InvalidSelection::UnknownDataset {
                name: name.clone(),
                available: config.dataset_names().join(", "),
            }),
    }
}

/// Parse a test dataset size.
pub fn parse_size(input: &str) -> Result<usize, InvalidSelection> {
    input
        .trim()
        .parse()
        .map_err(|_| InvalidSelection::InvalidSize(input.trim().to_string()))
}

/// Ask for a dataset and a test dataset size.
///
/// Invalid sizes are rejected in place and asked for again.
pub fn prompt(config: &RoadnetConfig, default_rows: usize) -> anyhow::Result<(Selection, usize)> {
    if config.datasets.is_empty() {
        return Err(InvalidSelection::NoDatasets.into());
    }

    let mut items = config.dataset_names();
    items.push(ALL_DATASETS);

    let choice = Select::new()
        .with_prompt("Dataset to process")
        .items(&items)
        .default(0)
        .interact()?;
    let selection = Selection::parse(items[choice]);

    let size = Input::<String>::new()
        .with_prompt("Test dataset size (rows, header included)")
        .default(default_rows.to_string())
        .validate_with(|input: &String| parse_size(input).map(|_| ()))
        .interact_text()?;

    Ok((selection, parse_size(&size)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config() -> RoadnetConfig {
        RoadnetConfig::from_toml_str(
            r#"
[[datasets]]
name = "Delhi"
geometry = "Delhi_Links.shp"
edges = "Delhi_Edgelist.csv"

[[datasets]]
name = "Chicago"
geometry = "Chicago_Links.shp"
edges = "Chicago_Edgelist.csv"
"#,
            Path::new("/data"),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(Selection::parse("all"), Selection::All);
        assert_eq!(Selection::parse(" ALL "), Selection::All);
        assert_eq!(Selection::parse("Delhi"), Selection::One("Delhi".to_string()));
    }

    #[test]
    fn test_resolve_one_and_all() {
        let config = config();

        let one = resolve(&config, &Selection::One("Chicago".to_string())).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].name, "Chicago");

        let all = resolve(&config, &Selection::All).unwrap();
        let names: Vec<&str> = all.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Delhi", "Chicago"]);
    }

    #[test]
    fn test_resolve_unknown() {
        let err = resolve(&config(), &Selection::One("Paris".to_string())).unwrap_err();
        assert_eq!(
            err,
            InvalidSelection::UnknownDataset {
                name: "Paris".to_string(),
                available: "Delhi, Chicago".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_without_datasets() {
        let config = RoadnetConfig::default();
        assert_eq!(
            resolve(&config, &Selection::All).unwrap_err(),
            InvalidSelection::NoDatasets
        );
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("100"), Ok(100));
        assert_eq!(parse_size(" 0 "), Ok(0));
        assert_eq!(
            parse_size("ten"),
            Err(InvalidSelection::InvalidSize("ten".to_string()))
        );
        assert!(parse_size("-5").is_err());
    }
}
