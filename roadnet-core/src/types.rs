//! Data models shared by the pipeline stages.
//!
//! These types describe the two inputs (geometry features and edge table
//! rows) and the node-link graph document produced from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property bag of a geometry feature.
pub type Properties = Map<String, Value>;

/// One line-geometry entity with its key-value properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureRecord {
    /// Zero-based position of the feature in its source.
    pub index: usize,
    pub properties: Properties,
}

impl FeatureRecord {
    pub fn new(index: usize, properties: Properties) -> Self {
        Self { index, properties }
    }
}

/// Column positions of the base fields in an edge table.
///
/// Edge tables are positional: the writer and the reader must agree on where
/// each field lives. The derived `CLASS`/`TYPE`/`NAME` columns are always
/// appended after the last input column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub xcoord: usize,
    pub ycoord: usize,
    pub source: usize,
    pub target: usize,
    pub eid: usize,
    pub weight: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            xcoord: 0,
            ycoord: 1,
            source: 2,
            target: 3,
            eid: 4,
            weight: 5,
        }
    }
}

impl ColumnLayout {
    /// Base field positions paired with their names, in table order.
    pub fn fields(&self) -> [(&'static str, usize); 6] {
        [
            ("xcoord", self.xcoord),
            ("ycoord", self.ycoord),
            ("source", self.source),
            ("target", self.target),
            ("eid", self.eid),
            ("weight", self.weight),
        ]
    }

    /// Smallest row width that holds every base field.
    pub fn min_width(&self) -> usize {
        self.fields().iter().map(|(_, pos)| pos + 1).max().unwrap_or(0)
    }
}

/// One link of the graph document: a parsed augmented edge row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub eid: i64,
    pub xcoord: f64,
    pub ycoord: f64,
    pub source: i64,
    pub target: i64,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub class: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

/// A node of the graph document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: i64,
}

/// Node-link graph document as consumed by D3 force layouts and
/// networkx's `node_link_graph`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub directed: bool,
    pub multigraph: bool,
    pub graph: Map<String, Value>,
    pub nodes: Vec<GraphNode>,
    pub links: Vec<EdgeRecord>,
}

impl GraphDocument {
    /// An empty directed, non-multi graph.
    pub fn new() -> Self {
        Self {
            directed: true,
            multigraph: false,
            graph: Map::new(),
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }
}

impl Default for GraphDocument {
    fn default() -> Self {
        Self::new()
    }
}
