//! JSON graph document exporter.

use std::path::Path;

use super::{stage, StagedOutput};
use crate::error::{Result, RoadnetError};
use crate::types::GraphDocument;

/// Serialize a graph document to a JSON string.
pub fn export(document: &GraphDocument, pretty_print: bool) -> Result<String> {
    let json = if pretty_print {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(json)
}

/// Write a graph document to `path`.
pub fn write_document(path: &Path, document: &GraphDocument, pretty_print: bool) -> Result<()> {
    stage_document(path, document, pretty_print)?.commit()
}

/// Like [`write_document`], leaving the document staged for a later commit.
pub fn stage_document(
    path: &Path,
    document: &GraphDocument,
    pretty_print: bool,
) -> Result<StagedOutput> {
    let json = export(document, pretty_print)?;
    stage(path, |out| {
        out.write_all(json.as_bytes())
            .map_err(|e| RoadnetError::file_access(path, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EdgeRecord, GraphNode};

    fn document() -> GraphDocument {
        GraphDocument {
            nodes: vec![GraphNode { id: 1 }, GraphNode { id: 2 }],
            links: vec![EdgeRecord {
                eid: 5,
                xcoord: 10.0,
                ycoord: 20.0,
                source: 1,
                target: 2,
                weight: 3.5,
                class: Some("arterial".to_string()),
                kind: Some("oneway".to_string()),
                name: Some("NULL".to_string()),
            }],
            ..GraphDocument::new()
        }
    }

    #[test]
    fn test_export_json() {
        let output = export(&document(), false).unwrap();
        assert_eq!(
            output,
            concat!(
                r#"{"directed":true,"multigraph":false,"graph":{},"#,
                r#""nodes":[{"id":1},{"id":2}],"#,
                r#""links":[{"eid":5,"xcoord":10.0,"ycoord":20.0,"source":1,"target":2,"#,
                r#""weight":3.5,"class":"arterial","type":"oneway","name":"NULL"}]}"#
            )
        );
    }

    #[test]
    fn test_export_json_pretty() {
        let output = export(&document(), true).unwrap();
        assert!(output.contains('\n'));
        let parsed: GraphDocument = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, document());
    }
}
