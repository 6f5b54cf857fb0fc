//! "Coming soon" message resolution for empty folders.

use crate::model::ComingSoonDetails;
use crate::tree::{ContentTree, NodeId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which record the second resolution step reads once the parent is known
/// to carry an `altMsg`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentMessageFallback {
    /// Reads the node's own first entry again. The node has none at that
    /// point, so the step resolves to no text.
    #[default]
    Observed,
    /// Reads the parent's first entry.
    Parent,
}

#[derive(Debug, Clone, Copy)]
pub struct MessageResolver<'a> {
    pub language: Option<&'a str>,
    pub org_details: Option<&'a ComingSoonDetails>,
    pub default_message: &'a str,
    pub parent_fallback: ParentMessageFallback,
}

impl<'a> MessageResolver<'a> {
    /// Resolution order: the node's own `altMsg`, the parent's `altMsg`, the
    /// organization detail, then the default message.
    pub fn resolve(&self, tree: &ContentTree, id: NodeId) -> Option<String> {
        let node = tree.get(id)?;

        if let Some(own) = node.alt_msg.first() {
            return self.translate(own.translations.as_deref(), own.value.as_deref());
        }

        if let Some(parent) = tree.parent(id).filter(|p| !p.alt_msg.is_empty()) {
            let entry = match self.parent_fallback {
                ParentMessageFallback::Observed => node.alt_msg.first(),
                ParentMessageFallback::Parent => parent.alt_msg.first(),
            };
            return entry.and_then(|e| self.translate(e.translations.as_deref(), e.value.as_deref()));
        }

        if let Some(details) = self.org_details {
            return self.translate(details.translations.as_deref(), details.value.as_deref());
        }

        Some(self.default_message.to_string())
    }

    fn translate(&self, translations: Option<&str>, value: Option<&str>) -> Option<String> {
        message_from_translations(translations, value, self.language)
    }
}

/// Picks the text for `language` out of a JSON-encoded translations map.
///
/// Unparseable (or missing) translations yield `value` untouched. A parsed
/// map yields the selected language when present, otherwise English.
pub fn message_from_translations(
    translations: Option<&str>,
    value: Option<&str>,
    language: Option<&str>,
) -> Option<String> {
    let parsed = translations.and_then(|t| serde_json::from_str::<Value>(t).ok());
    let map = match parsed {
        Some(Value::Object(map)) => map,
        Some(Value::Null) | None => return value.map(str::to_string),
        Some(_) => return None,
    };

    let selected = language
        .and_then(|lang| map.get(lang))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());

    selected
        .or_else(|| map.get("en").and_then(Value::as_str))
        .map(str::to_string)
}
