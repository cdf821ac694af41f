//! GeoJSON feature reader.

use std::fs;
use std::path::Path;

use geojson::GeoJson;

use crate::error::{Result, RoadnetError};
use crate::types::FeatureRecord;

pub(super) fn read_features(path: &Path) -> Result<Vec<FeatureRecord>> {
    let text = fs::read_to_string(path).map_err(|e| RoadnetError::file_access(path, e))?;
    parse_features(&text).map_err(|e| RoadnetError::file_access(path, e))
}

/// Parse GeoJSON text into feature records.
///
/// Features without a `properties` member get an empty property bag, so a
/// missing key surfaces later as a missing-property error.
pub fn parse_features(text: &str) -> std::result::Result<Vec<FeatureRecord>, String> {
    let geojson: GeoJson = text.parse().map_err(|e: geojson::Error| e.to_string())?;

    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err("expected a Feature or FeatureCollection, found a bare geometry".to_string())
        }
    };

    Ok(features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| FeatureRecord::new(index, feature.properties.unwrap_or_default()))
        .collect())
}
