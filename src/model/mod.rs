pub mod tables;

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

pub use tables::{FileType, IconColor};

/// Host-owned input wrapper around the raw content hierarchy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CollectionTreeNodes {
    pub data: RawContentNode,
}

/// A content record as delivered by the content API. Nested content lives in
/// `children`; the record is never mutated by the tree component.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContentNode {
    #[serde(default)]
    pub identifier: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alt_msg: Vec<AltMessage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<RawContentNode>,
}

/// Node-level "coming soon" override.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AltMessage {
    #[serde(default)]
    pub value: Option<String>,
    /// JSON-encoded `{ "<lang>": "<text>" }` map. Anything that is not a
    /// string is kept as `None`, which resolves to the untranslated value.
    #[serde(default, deserialize_with = "lenient_string")]
    pub translations: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionTreeOptions {
    #[serde(default)]
    pub folder_icon: Option<String>,
    pub file_icon: String,
    #[serde(default)]
    pub custom_file_icon: HashMap<FileType, String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStatusEntry {
    pub content_id: String,
    #[serde(default, deserialize_with = "status_code")]
    pub status: Option<u32>,
}

/// Organization-level "coming soon" message, one entry per root org.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComingSoonDetails {
    pub root_org_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub translations: Option<String>,
}

impl ComingSoonDetails {
    /// Parses the settings blob and picks the entry for `root_org_id`.
    ///
    /// Entries for other orgs are never deserialized, so a malformed one
    /// does not hide the match.
    pub fn find_for_org(blob: &str, root_org_id: &str) -> serde_json::Result<Option<Self>> {
        let entries: Vec<serde_json::Value> = serde_json::from_str(blob)?;
        entries
            .into_iter()
            .find(|entry| {
                entry.get("rootOrgId").and_then(serde_json::Value::as_str) == Some(root_org_id)
            })
            .map(serde_json::from_value)
            .transpose()
    }
}

/// Raw system setting payload, `value` holds a JSON string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SystemSetting {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageSelection {
    pub value: String,
}

/// Payload forwarded to the host when a leaf is activated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelectionEvent {
    pub id: String,
    pub title: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn status_code<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let code = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_raw_node_tolerates_nulls() {
        let node: RawContentNode = serde_json::from_str(
            r#"{"identifier":"do_1","name":null,"mimeType":"application/pdf","altMsg":null,"children":null}"#,
        )
        .unwrap();
        assert_eq!(node.name, "");
        assert!(node.alt_msg.is_empty());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_translations_must_be_a_string() {
        let msg: AltMessage =
            serde_json::from_str(r#"{"value":"v","translations":{"en":"E"}}"#).unwrap();
        assert_eq!(msg.translations, None);
        assert_eq!(msg.value.as_deref(), Some("v"));
    }

    #[test]
    fn test_status_accepts_numbers_and_strings() {
        let entries: Vec<ContentStatusEntry> = serde_json::from_str(
            r#"[{"contentId":"a","status":2},{"contentId":"b","status":"1"},{"contentId":"c"},{"contentId":"d","status":"x"},{"contentId":"e","status":4294967297}]"#,
        )
        .unwrap();
        let codes: Vec<_> = entries.iter().map(|e| e.status).collect();
        assert_eq!(codes, vec![Some(2), Some(1), None, None, None]);
    }

    #[test]
    fn test_find_coming_soon_for_org() {
        let blob = r#"[
            {"rootOrgId":"org_a","value":"A soon","translations":"{\"en\":\"A\"}"},
            {"rootOrgId":"org_b","value":"B soon"}
        ]"#;
        let found = ComingSoonDetails::find_for_org(blob, "org_b").unwrap().unwrap();
        assert_eq!(found.value.as_deref(), Some("B soon"));
        assert_eq!(found.translations, None);

        assert!(ComingSoonDetails::find_for_org(blob, "org_c").unwrap().is_none());
        assert!(ComingSoonDetails::find_for_org("not json", "org_a").is_err());
    }

    #[test]
    fn test_find_coming_soon_skips_malformed_entries() {
        let blob = r#"[
            {"rootOrgId":null,"value":"Broken"},
            {"value":"No org"},
            {"rootOrgId":"org_a","value":{"nested":true}},
            {"rootOrgId":"org_b","value":"B soon"}
        ]"#;
        let found = ComingSoonDetails::find_for_org(blob, "org_b").unwrap().unwrap();
        assert_eq!(found.value.as_deref(), Some("B soon"));

        let odd_value = ComingSoonDetails::find_for_org(blob, "org_a").unwrap().unwrap();
        assert_eq!(odd_value.value, None);
    }
}
