//! Attribute extraction from geometry features.
//!
//! Builds the three lookup maps the row enricher joins against, all keyed by
//! the feature identifier (`OBJECTID`):
//!
//! - **class**: the road classification (`type` property), verbatim
//! - **type**: the construction type derived from the `oneway`, `bridge` and
//!   `tunnel` flags, checked in that priority order
//! - **name**: the road name, or `NULL` when empty or unknown
//!
//! For every map the first feature carrying an identifier wins; later
//! features with the same identifier are not looked at again.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, RoadnetError};
use crate::types::FeatureRecord;

/// Identifier property joining features to edge rows.
pub const ID_KEY: &str = "OBJECTID";
pub const CLASS_KEY: &str = "type";
pub const ONEWAY_KEY: &str = "oneway";
pub const BRIDGE_KEY: &str = "bridge";
pub const TUNNEL_KEY: &str = "tunnel";
pub const NAME_KEY: &str = "name";

/// Every property the extractor may read.
pub const FEATURE_KEYS: [&str; 6] = [
    ID_KEY, CLASS_KEY, ONEWAY_KEY, BRIDGE_KEY, TUNNEL_KEY, NAME_KEY,
];

/// Substitute for empty or unknown road names.
pub const NULL_NAME: &str = "NULL";

/// Characters the network export tools write in place of names they could
/// not decode.
pub const DEFAULT_PLACEHOLDERS: &[char] = &['?', '\u{FFFD}'];

/// Construction type of a road segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionType {
    Oneway,
    Bridge,
    Tunnel,
    Standard,
}

impl ConstructionType {
    /// Classify from the three flags. One-way beats bridge beats tunnel.
    pub fn from_flags(oneway: bool, bridge: bool, tunnel: bool) -> Self {
        if oneway {
            Self::Oneway
        } else if bridge {
            Self::Bridge
        } else if tunnel {
            Self::Tunnel
        } else {
            Self::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oneway => "oneway",
            Self::Bridge => "bridge",
            Self::Tunnel => "tunnel",
            Self::Standard => "standard",
        }
    }
}

/// Options controlling extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Build the name map (and require the `name` property).
    pub include_names: bool,
    /// Characters marking a name as unknown.
    pub placeholders: Vec<char>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            include_names: true,
            placeholders: DEFAULT_PLACEHOLDERS.to_vec(),
        }
    }
}

/// Lookup maps from feature id to derived attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMaps {
    pub class: HashMap<i64, String>,
    pub kind: HashMap<i64, String>,
    /// `None` when names are disabled for the dataset.
    pub name: Option<HashMap<i64, String>>,
}

impl AttributeMaps {
    /// Build all maps from the given features.
    pub fn build(features: &[FeatureRecord], options: &ExtractOptions) -> Result<Self> {
        let class = build_class_map(features)?;
        let kind = build_type_map(features)?;
        let name = if options.include_names {
            Some(build_name_map(features, &options.placeholders)?)
        } else {
            None
        };

        debug!(
            "Extracted {} classes, {} types, {} names",
            class.len(),
            kind.len(),
            name.as_ref().map_or(0, HashMap::len)
        );

        Ok(Self { class, kind, name })
    }
}

/// Map each feature id to its `type` property.
pub fn build_class_map(features: &[FeatureRecord]) -> Result<HashMap<i64, String>> {
    first_wins(features, |feature| string_property(feature, CLASS_KEY))
}

/// Map each feature id to its construction type.
pub fn build_type_map(features: &[FeatureRecord]) -> Result<HashMap<i64, String>> {
    first_wins(features, |feature| {
        let kind = ConstructionType::from_flags(
            flag_property(feature, ONEWAY_KEY)?,
            flag_property(feature, BRIDGE_KEY)?,
            flag_property(feature, TUNNEL_KEY)?,
        );
        Ok(kind.as_str().to_string())
    })
}

/// Map each feature id to its name, or [`NULL_NAME`] when the name is empty
/// or contains one of `placeholders`.
pub fn build_name_map(
    features: &[FeatureRecord],
    placeholders: &[char],
) -> Result<HashMap<i64, String>> {
    first_wins(features, |feature| {
        let name = string_property(feature, NAME_KEY)?;
        Ok(clean_name(name, placeholders))
    })
}

/// Apply the unknown-name substitution to a single name.
pub fn clean_name(name: String, placeholders: &[char]) -> String {
    if name.is_empty() || name.contains(placeholders) {
        NULL_NAME.to_string()
    } else {
        name
    }
}

fn first_wins<F>(features: &[FeatureRecord], mut derive: F) -> Result<HashMap<i64, String>>
where
    F: FnMut(&FeatureRecord) -> Result<String>,
{
    let mut map = HashMap::with_capacity(features.len());
    for feature in features {
        if let Entry::Vacant(slot) = map.entry(feature_id(feature)?) {
            slot.insert(derive(feature)?);
        }
    }
    Ok(map)
}

fn property<'a>(feature: &'a FeatureRecord, key: &str) -> Result<&'a Value> {
    feature
        .properties
        .get(key)
        .ok_or_else(|| RoadnetError::MissingProperty {
            feature: feature.index,
            key: key.to_string(),
        })
}

/// Read the integer identifier of a feature.
pub fn feature_id(feature: &FeatureRecord) -> Result<i64> {
    let value = property(feature, ID_KEY)?;
    let id = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    id.ok_or_else(|| RoadnetError::InvalidProperty {
        feature: feature.index,
        key: ID_KEY.to_string(),
        value: value.to_string(),
    })
}

fn string_property(feature: &FeatureRecord, key: &str) -> Result<String> {
    Ok(match property(feature, key)? {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

fn flag_property(feature: &FeatureRecord, key: &str) -> Result<bool> {
    Ok(match property(feature, key)? {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "t" | "y" | "yes"
        ),
        _ => false,
    })
}
