//! Geometry feature sources.
//!
//! Reads every feature of a line-geometry dataset into memory as a
//! [`FeatureRecord`]. Geometry is not decoded beyond what the reader needs;
//! only the property bag is kept.
//!
//! Supported formats:
//! - Shapefile bundles (`.shp` with its `.shx`/`.dbf` companions)
//! - GeoJSON `FeatureCollection` or single `Feature` (`.geojson`, `.json`)

use std::path::Path;

use tracing::info;

use crate::error::{Result, RoadnetError};
use crate::types::FeatureRecord;

mod geo_json;
mod shp;

pub use geo_json::parse_features as parse_geojson;

/// On-disk format of a geometry dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    Shapefile,
    GeoJson,
}

impl GeometryFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "shp" => Some(Self::Shapefile),
            "geojson" | "json" => Some(Self::GeoJson),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shapefile => "shapefile",
            Self::GeoJson => "geojson",
        }
    }
}

/// Load all feature records from a geometry dataset.
pub fn load_features(path: &Path) -> Result<Vec<FeatureRecord>> {
    let format = GeometryFormat::from_path(path).ok_or_else(|| {
        RoadnetError::file_access(path, "unsupported geometry format (expected .shp or .geojson)")
    })?;

    let features = match format {
        GeometryFormat::Shapefile => shp::read_features(path)?,
        GeometryFormat::GeoJson => geo_json::read_features(path)?,
    };

    info!(
        "Read {} features from {} '{}'",
        features.len(),
        format.as_str(),
        path.display()
    );
    Ok(features)
}
