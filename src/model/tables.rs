//! Fixed lookup tables shared by every decoration pass.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const COLLECTION_MIME_TYPE: &str = "application/vnd.ekstep.content-collection";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Collection,
    Pdf,
    Video,
    Youtube,
    Html,
    Ecml,
    Epub,
    H5p,
    Url,
}

impl FileType {
    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        MIME_TYPE_TO_FILE_TYPE.get(mime_type).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Collection => "collection",
            FileType::Pdf => "pdf",
            FileType::Video => "video",
            FileType::Youtube => "youtube",
            FileType::Html => "html",
            FileType::Ecml => "ecml",
            FileType::Epub => "epub",
            FileType::H5p => "h5p",
            FileType::Url => "url",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static MIME_TYPE_TO_FILE_TYPE: Lazy<HashMap<&'static str, FileType>> = Lazy::new(|| {
    HashMap::from([
        (COLLECTION_MIME_TYPE, FileType::Collection),
        ("application/pdf", FileType::Pdf),
        ("video/mp4", FileType::Video),
        ("video/webm", FileType::Video),
        ("video/x-youtube", FileType::Youtube),
        ("video/youtube", FileType::Youtube),
        ("application/vnd.ekstep.html-archive", FileType::Html),
        ("application/vnd.ekstep.ecml-archive", FileType::Ecml),
        ("application/epub", FileType::Epub),
        ("application/vnd.ekstep.h5p-archive", FileType::H5p),
        ("text/x-url", FileType::Url),
    ])
});

/// Progress color applied to leaf icons, keyed by content status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum IconColor {
    #[serde(rename = "fancy-tree-black")]
    Black,
    #[serde(rename = "fancy-tree-blue")]
    Blue,
    #[serde(rename = "fancy-tree-green")]
    Green,
}

impl IconColor {
    /// Status `0` (not started) is the default; codes outside the table
    /// fall back to it as well.
    pub fn for_status(status: Option<u32>) -> Self {
        match status {
            Some(1) => IconColor::Blue,
            Some(2) => IconColor::Green,
            _ => IconColor::Black,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            IconColor::Black => "fancy-tree-black",
            IconColor::Blue => "fancy-tree-blue",
            IconColor::Green => "fancy-tree-green",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_lookup() {
        assert_eq!(
            FileType::from_mime_type(COLLECTION_MIME_TYPE),
            Some(FileType::Collection)
        );
        assert_eq!(FileType::from_mime_type("video/x-youtube"), Some(FileType::Youtube));
        assert_eq!(FileType::from_mime_type("application/zip"), None);
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(IconColor::for_status(None), IconColor::Black);
        assert_eq!(IconColor::for_status(Some(0)), IconColor::Black);
        assert_eq!(IconColor::for_status(Some(1)).class(), "fancy-tree-blue");
        assert_eq!(IconColor::for_status(Some(2)).class(), "fancy-tree-green");
        assert_eq!(IconColor::for_status(Some(7)), IconColor::Black);
    }

    #[test]
    fn test_file_type_serializes_lowercase() {
        let json = serde_json::to_string(&FileType::H5p).unwrap();
        assert_eq!(json, "\"h5p\"");
        let parsed: FileType = serde_json::from_str("\"collection\"").unwrap();
        assert_eq!(parsed, FileType::Collection);
    }
}
