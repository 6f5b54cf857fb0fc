pub mod watch;

use crate::error::{CollectionTreeError, Result};
use crate::model::{CollectionTreeNodes, ContentStatusEntry, RawContentNode};
use serde::Deserialize;
use std::path::Path;

pub use watch::InputWatcher;

#[derive(Deserialize)]
#[serde(untagged)]
enum NodesFile {
    Wrapped(CollectionTreeNodes),
    Bare(RawContentNode),
}

/// Loads the content hierarchy. Accepts `{"data": <root>}` or the bare root record.
pub fn load_nodes(path: &Path) -> Result<CollectionTreeNodes> {
    let raw = std::fs::read_to_string(path).map_err(|e| CollectionTreeError::io(path, e))?;
    parse_nodes(&raw).map_err(|e| CollectionTreeError::json(path.display().to_string(), e))
}

pub fn parse_nodes(raw: &str) -> serde_json::Result<CollectionTreeNodes> {
    let nodes = match serde_json::from_str::<NodesFile>(raw)? {
        NodesFile::Wrapped(nodes) => nodes,
        NodesFile::Bare(data) => CollectionTreeNodes { data },
    };
    Ok(nodes)
}

pub fn load_content_status(path: &Path) -> Result<Vec<ContentStatusEntry>> {
    let raw = std::fs::read_to_string(path).map_err(|e| CollectionTreeError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| CollectionTreeError::json(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_wrapped_and_bare() {
        let wrapped = parse_nodes(r#"{"data":{"identifier":"root","name":"Course","children":[{"identifier":"a"}]}}"#)
            .unwrap();
        let bare = parse_nodes(r#"{"identifier":"root","name":"Course","children":[{"identifier":"a"}]}"#)
            .unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(bare.data.children[0].identifier, "a");
    }

    #[test]
    fn test_load_status_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");
        std::fs::write(&path, r#"[{"contentId":"a","status":2}]"#).unwrap();

        let status = load_content_status(&path).unwrap();
        assert_eq!(status.len(), 1);
        assert_eq!(status[0].status, Some(2));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nodes.json");
        assert!(matches!(load_nodes(&path), Err(CollectionTreeError::Io { .. })));

        std::fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(load_nodes(&path), Err(CollectionTreeError::Json { .. })));
    }
}
