//! Row enrichment: join edge table rows to the attribute maps.
//!
//! Each data row is extended with its classification, construction type and
//! (optionally) name. A column is appended only when the row's feature id is
//! present in the corresponding map, so rows that miss a lookup come out
//! shorter than rows that hit every map. Downstream readers rely on this
//! positional behavior; an absent attribute is never written as an empty
//! field.

use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info};

use crate::attributes::AttributeMaps;
use crate::error::Result;
use crate::exporter;
use crate::table;
use crate::types::ColumnLayout;

pub const CLASS_COLUMN: &str = "CLASS";
pub const TYPE_COLUMN: &str = "TYPE";
pub const NAME_COLUMN: &str = "NAME";

/// An edge table extended with derived columns, header first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AugmentedTable {
    records: Vec<StringRecord>,
}

impl AugmentedTable {
    /// All records, header first.
    pub fn records(&self) -> &[StringRecord] {
        &self.records
    }

    /// Number of records, header included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `limit` records, header included.
    pub fn prefix(&self, limit: usize) -> &[StringRecord] {
        &self.records[..limit.min(self.records.len())]
    }

    /// Write the whole table to `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        exporter::csv::write_records(path, &self.records)?;
        debug!("Wrote {} rows to '{}'", self.len(), path.display());
        Ok(())
    }

    /// Write the first `limit` records to `path`, returning how many were
    /// written.
    pub fn write_prefix(&self, path: &Path, limit: usize) -> Result<usize> {
        let prefix = self.prefix(limit);
        exporter::csv::write_records(path, prefix)?;
        debug!("Wrote {} rows to '{}'", prefix.len(), path.display());
        Ok(prefix.len())
    }
}

/// Read the edge table at `path` and enrich it.
pub fn enrich_file(
    path: &Path,
    maps: &AttributeMaps,
    layout: &ColumnLayout,
) -> Result<AugmentedTable> {
    let records = table::read_records(path)?;
    enrich_records(path, &records, maps, layout)
}

/// Enrich already-read records. `path` is only used in error messages.
pub fn enrich_records(
    path: &Path,
    records: &[StringRecord],
    maps: &AttributeMaps,
    layout: &ColumnLayout,
) -> Result<AugmentedTable> {
    let (header, rows) = table::split_header(path, records)?;
    table::validate_layout(path, header, layout)?;

    let mut out = Vec::with_capacity(records.len());

    let mut header = header.clone();
    header.push_field(CLASS_COLUMN);
    header.push_field(TYPE_COLUMN);
    if maps.name.is_some() {
        header.push_field(NAME_COLUMN);
    }
    out.push(header);

    for row in rows {
        let feature_id: i64 = table::parse_field(path, row, layout.eid, "an integer")?;

        let mut enriched = row.clone();
        if let Some(class) = maps.class.get(&feature_id) {
            enriched.push_field(class);
        }
        if let Some(kind) = maps.kind.get(&feature_id) {
            enriched.push_field(kind);
        }
        if let Some(name) = maps.name.as_ref().and_then(|names| names.get(&feature_id)) {
            enriched.push_field(name);
        }
        out.push(enriched);
    }

    info!(
        "Read and updated {} rows from '{}'",
        out.len(),
        path.display()
    );
    Ok(AugmentedTable { records: out })
}
