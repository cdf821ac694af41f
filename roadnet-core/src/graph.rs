//! Graph document assembly from augmented edge tables.
//!
//! Reads an augmented table back in and turns every row into a link. Nodes
//! are the distinct source/target ids in order of first appearance, so the
//! same table always yields the same document.
//!
//! The derived columns are located through the header: `CLASS` marks where
//! they begin, and `type`/`name` follow it positionally. A row that missed a
//! lookup during enrichment is shorter, so its trailing attributes are
//! absent from the link rather than empty.

use std::collections::HashSet;
use std::path::Path;

use csv::StringRecord;
use tracing::info;

use crate::enrich::CLASS_COLUMN;
use crate::error::{Result, RoadnetError};
use crate::table;
use crate::types::{ColumnLayout, EdgeRecord, GraphDocument, GraphNode};

/// Read the augmented table at `path` and assemble its graph document.
pub fn assemble_file(path: &Path, layout: &ColumnLayout) -> Result<GraphDocument> {
    let records = table::read_records(path)?;
    assemble_records(path, &records, layout)
}

/// Assemble a graph document from already-read records (header first).
/// `path` is only used in error messages.
pub fn assemble_records(
    path: &Path,
    records: &[StringRecord],
    layout: &ColumnLayout,
) -> Result<GraphDocument> {
    let (header, rows) = table::split_header(path, records)?;
    table::validate_layout(path, header, layout)?;
    let derived_start = derived_offset(path, header)?;

    let links = rows
        .iter()
        .map(|row| parse_edge(path, row, layout, derived_start))
        .collect::<Result<Vec<_>>>()?;
    let nodes = collect_nodes(&links);

    info!("Stored {} nodes and {} links", nodes.len(), links.len());

    Ok(GraphDocument {
        nodes,
        links,
        ..GraphDocument::new()
    })
}

/// Position of the first derived column.
fn derived_offset(path: &Path, header: &StringRecord) -> Result<usize> {
    header
        .iter()
        .position(|column| column.trim() == CLASS_COLUMN)
        .ok_or_else(|| RoadnetError::MissingColumn {
            path: path.to_path_buf(),
            column: CLASS_COLUMN.to_string(),
        })
}

/// Parse one augmented row into a link.
pub fn parse_edge(
    path: &Path,
    row: &StringRecord,
    layout: &ColumnLayout,
    derived_start: usize,
) -> Result<EdgeRecord> {
    let derived = |offset: usize| row.get(derived_start + offset).map(str::to_string);

    Ok(EdgeRecord {
        eid: table::parse_field(path, row, layout.eid, "an integer")?,
        xcoord: table::parse_field(path, row, layout.xcoord, "a number")?,
        ycoord: table::parse_field(path, row, layout.ycoord, "a number")?,
        source: table::parse_field(path, row, layout.source, "an integer")?,
        target: table::parse_field(path, row, layout.target, "an integer")?,
        weight: table::parse_field(path, row, layout.weight, "a number")?,
        class: derived(0),
        kind: derived(1),
        name: derived(2),
    })
}

/// Distinct endpoint ids in order of first appearance, source before target.
pub fn collect_nodes(links: &[EdgeRecord]) -> Vec<GraphNode> {
    let mut seen = HashSet::with_capacity(links.len());
    let mut nodes = Vec::new();
    for link in links {
        for id in [link.source, link.target] {
            if seen.insert(id) {
                nodes.push(GraphNode { id });
            }
        }
    }
    nodes
}
