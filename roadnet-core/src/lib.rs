//! roadnet core - road network join-and-enrichment pipeline.
//!
//! Turns a line-geometry dataset of road segments (shapefile or GeoJSON) and
//! its companion edge list into:
//!
//! - an augmented edge table carrying each segment's classification,
//!   construction type and name, plus a truncated test copy
//! - node-link graph documents for force-directed visualization (D3,
//!   networkx `node_link_graph`)
//!
//! # Stages
//!
//! 1. [`attributes`]: build lookup maps from feature properties
//! 2. [`enrich`]: join edge rows to the maps and append derived columns
//! 3. [`graph`]: read an augmented table back and assemble the graph document
//!
//! [`pipeline`] runs the three stages for one dataset or an ordered batch.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use roadnet_core::pipeline::{run_dataset, DatasetSpec, PipelineOptions};
//!
//! let spec = DatasetSpec::new("Delhi", "Delhi_Links.shp", "Delhi_Edgelist.csv", Path::new("out"));
//! let report = run_dataset(&spec, &PipelineOptions::default())?;
//! println!("{} links, {} nodes", report.links, report.nodes);
//! # Ok::<(), roadnet_core::RoadnetError>(())
//! ```

#![warn(clippy::all)]

pub mod attributes;
pub mod enrich;
mod error;
pub mod exporter;
pub mod graph;
pub mod pipeline;
pub mod source;
pub mod table;
pub mod types;

pub use error::{BatchError, Result, RoadnetError};
