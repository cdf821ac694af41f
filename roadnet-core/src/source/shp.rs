//! Shapefile feature reader.
//!
//! Only the dBase attribute record of each shape is kept. Values are mapped
//! onto JSON so both source formats share one property representation.

use std::path::Path;

use serde_json::{Number, Value};
use shapefile::dbase::{FieldValue, Record};

use crate::attributes::FEATURE_KEYS;
use crate::error::{Result, RoadnetError};
use crate::types::{FeatureRecord, Properties};

pub(super) fn read_features(path: &Path) -> Result<Vec<FeatureRecord>> {
    let mut reader =
        shapefile::Reader::from_path(path).map_err(|e| RoadnetError::file_access(path, e))?;

    let mut features = Vec::new();
    for (index, item) in reader.iter_shapes_and_records().enumerate() {
        let (_shape, record) = item.map_err(|e| RoadnetError::file_access(path, e))?;
        features.push(FeatureRecord::new(index, record_properties(&record)));
    }
    Ok(features)
}

/// Copy the attribute fields the extractor reads out of a dBase record.
/// Absent fields stay absent.
fn record_properties(record: &Record) -> Properties {
    let mut properties = Properties::new();
    for key in FEATURE_KEYS {
        if let Some(value) = record.get(key) {
            properties.insert(key.to_string(), field_to_json(value));
        }
    }
    properties
}

fn field_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Character(Some(s)) => Value::String(s.clone()),
        FieldValue::Memo(s) => Value::String(s.clone()),
        FieldValue::Numeric(Some(n)) => float_to_json(*n),
        FieldValue::Float(Some(n)) => float_to_json(f64::from(*n)),
        FieldValue::Double(n) => float_to_json(*n),
        FieldValue::Integer(n) => Value::from(*n),
        FieldValue::Logical(Some(b)) => Value::Bool(*b),
        FieldValue::Character(None)
        | FieldValue::Numeric(None)
        | FieldValue::Float(None)
        | FieldValue::Logical(None) => Value::Null,
        other => Value::String(format!("{:?}", other)),
    }
}

/// dBase numerics are floating point even for integer columns; keep whole
/// values as JSON integers so identifiers compare exactly.
fn float_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeMaps, ExtractOptions};
    use serde_json::json;
    use shapefile::dbase::{FieldName, TableWriterBuilder};
    use shapefile::{Point, Polyline};
    use tempfile::TempDir;

    fn field(name: &str) -> FieldName {
        FieldName::try_from(name).unwrap()
    }

    /// One polyline with the extractor's fields plus an unrelated `ref` column.
    fn write_links(path: &Path) {
        let table = TableWriterBuilder::new()
            .add_numeric_field(field("OBJECTID"), 10, 0)
            .add_character_field(field("type"), 20)
            .add_numeric_field(field("oneway"), 1, 0)
            .add_numeric_field(field("bridge"), 1, 0)
            .add_numeric_field(field("tunnel"), 1, 0)
            .add_character_field(field("name"), 40)
            .add_character_field(field("ref"), 10);

        let mut record = Record::default();
        record.insert("OBJECTID".to_string(), FieldValue::Numeric(Some(5.0)));
        record.insert(
            "type".to_string(),
            FieldValue::Character(Some("arterial".to_string())),
        );
        record.insert("oneway".to_string(), FieldValue::Numeric(Some(1.0)));
        record.insert("bridge".to_string(), FieldValue::Numeric(Some(0.0)));
        record.insert("tunnel".to_string(), FieldValue::Numeric(Some(0.0)));
        record.insert("name".to_string(), FieldValue::Character(None));
        record.insert("ref".to_string(), FieldValue::Character(Some("NH48".to_string())));

        let line = Polyline::new(vec![Point::new(77.1, 28.6), Point::new(77.2, 28.7)]);
        let mut writer = shapefile::Writer::from_path(path, table).unwrap();
        writer.write_shape_and_record(&line, &record).unwrap();
    }

    #[test]
    fn test_read_polyline_shapefile() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Delhi_Links.shp");
        write_links(&path);

        let features = read_features(&path).unwrap();
        assert_eq!(features.len(), 1);

        let props = &features[0].properties;
        assert_eq!(props["OBJECTID"], json!(5));
        assert_eq!(props["type"], json!("arterial"));
        assert_eq!(props["oneway"], json!(1));
        assert_eq!(props["name"], Value::Null);
        assert!(!props.contains_key("ref"));

        let maps = AttributeMaps::build(&features, &ExtractOptions::default()).unwrap();
        assert_eq!(maps.class[&5], "arterial");
        assert_eq!(maps.kind[&5], "oneway");
        assert_eq!(maps.name.unwrap()[&5], "NULL");
    }

    #[test]
    fn test_field_conversion() {
        assert_eq!(
            field_to_json(&FieldValue::Character(Some("arterial".to_string()))),
            json!("arterial")
        );
        assert_eq!(field_to_json(&FieldValue::Character(None)), Value::Null);
        assert_eq!(field_to_json(&FieldValue::Numeric(Some(5.0))), json!(5));
        assert_eq!(field_to_json(&FieldValue::Numeric(Some(2.5))), json!(2.5));
        assert_eq!(field_to_json(&FieldValue::Integer(1)), json!(1));
        assert_eq!(field_to_json(&FieldValue::Logical(Some(true))), json!(true));
    }

    #[test]
    fn test_float_to_json_nan_is_null() {
        assert_eq!(float_to_json(f64::NAN), Value::Null);
    }

    #[test]
    fn test_missing_shapefile() {
        let err = read_features(Path::new("/nonexistent/links.shp")).unwrap_err();
        assert!(matches!(err, RoadnetError::FileAccess { .. }));
    }
}
