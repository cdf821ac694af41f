//! Delimited edge table access.
//!
//! Tables are read whole, header included, as raw string records. Rows are
//! allowed to differ in width because the enricher appends derived columns
//! only when a lookup succeeds.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{Result, RoadnetError};
use crate::types::ColumnLayout;

/// Read every record of a table, header first.
pub fn read_records(path: &Path) -> Result<Vec<StringRecord>> {
    let file = File::open(path).map_err(|e| RoadnetError::file_access(path, e))?;
    read_records_from(path, BufReader::new(file))
}

/// Read every record from an already-open reader. `path` is only used in
/// error messages.
pub fn read_records_from<R: Read>(path: &Path, reader: R) -> Result<Vec<StringRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| RoadnetError::from_csv(path, e))?;
        if is_blank(&record) {
            continue;
        }
        records.push(record);
    }
    Ok(records)
}

fn is_blank(record: &StringRecord) -> bool {
    record.is_empty() || (record.len() == 1 && record[0].is_empty())
}

/// Split off the header row, failing on a table without one.
pub fn split_header<'a>(
    path: &Path,
    records: &'a [StringRecord],
) -> Result<(&'a StringRecord, &'a [StringRecord])> {
    records.split_first().ok_or_else(|| RoadnetError::MalformedRow {
        path: path.to_path_buf(),
        line: 1,
        column: 0,
        value: String::new(),
        reason: "table has no header row".to_string(),
    })
}

/// Check that every base field of `layout` falls inside the header.
pub fn validate_layout(path: &Path, header: &StringRecord, layout: &ColumnLayout) -> Result<()> {
    for (name, position) in layout.fields() {
        if position >= header.len() {
            return Err(RoadnetError::MissingColumn {
                path: path.to_path_buf(),
                column: format!("{} at position {}", name, position),
            });
        }
    }
    Ok(())
}

/// One-based line number of a record, for error messages.
pub fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// Parse the field at `column`, reporting the row location on failure.
pub fn parse_field<T: FromStr>(
    path: &Path,
    record: &StringRecord,
    column: usize,
    expected: &str,
) -> Result<T> {
    let malformed = |value: &str, reason: String| RoadnetError::MalformedRow {
        path: path.to_path_buf(),
        line: line_of(record),
        column,
        value: value.to_string(),
        reason,
    };

    let raw = record
        .get(column)
        .ok_or_else(|| malformed("", "is missing".to_string()))?;
    raw.trim()
        .parse()
        .map_err(|_| malformed(raw, format!("is not {}", expected)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Vec<StringRecord> {
        read_records_from(Path::new("edges.csv"), text.as_bytes()).unwrap()
    }

    #[test]
    fn test_read_flexible_rows() {
        let records = read("a,b,c\n1,2,3,4\n5\n");
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].len(), 4);
        assert_eq!(records[2].len(), 1);
    }

    #[test]
    fn test_blank_rows_skipped() {
        let records = read("a,b\n\n1,2\n\n3,4\n");
        assert_eq!(records.len(), 3);
        assert_eq!(&records[2][0], "3");
    }

    #[test]
    fn test_split_header_empty() {
        let err = split_header(Path::new("edges.csv"), &[]).unwrap_err();
        assert!(matches!(err, RoadnetError::MalformedRow { line: 1, .. }));
    }

    #[test]
    fn test_validate_layout() {
        let header = StringRecord::from(vec!["x", "y", "s", "t", "id", "len"]);
        let path = Path::new("edges.csv");
        assert!(validate_layout(path, &header, &ColumnLayout::default()).is_ok());

        let short = StringRecord::from(vec!["x", "y", "s", "t", "id"]);
        let err = validate_layout(path, &short, &ColumnLayout::default()).unwrap_err();
        match err {
            RoadnetError::MissingColumn { column, .. } => assert!(column.contains("weight")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_field_errors() {
        let records = read("h\n12,abc\n");
        let path = Path::new("edges.csv");
        let ok: i64 = parse_field(path, &records[1], 0, "an integer").unwrap();
        assert_eq!(ok, 12);

        let err = parse_field::<i64>(path, &records[1], 1, "an integer").unwrap_err();
        match err {
            RoadnetError::MalformedRow {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, 1);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(parse_field::<f64>(path, &records[1], 5, "a number").is_err());
    }
}
