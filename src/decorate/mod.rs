pub mod message;

use crate::model::{
    CollectionTreeOptions, ContentStatusEntry, FileType, IconColor, SelectionEvent,
};
use crate::tree::{ContentNode, ContentTree, NodeId};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

pub use message::{message_from_translations, MessageResolver, ParentMessageFallback};

pub const UNTITLED_FILE: &str = "Untitled File";
pub const DISABLED_CLASS: &str = "disabled";

/// Presentation fields attached to a content node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecoratedNode {
    pub id: String,
    pub file_type: Option<FileType>,
    pub folder: bool,
    pub icon: String,
    pub icon_color: Option<IconColor>,
    pub title: String,
    pub extra_classes: String,
}

impl DecoratedNode {
    pub fn is_disabled(&self) -> bool {
        self.extra_classes == DISABLED_CLASS
    }
}

/// Everything a decoration pass reads besides the tree itself.
pub struct DecorationContext<'a> {
    pub options: &'a CollectionTreeOptions,
    pub content_status: Option<&'a [ContentStatusEntry]>,
    pub messages: MessageResolver<'a>,
}

/// Decorates every node of `tree`. The result is indexed by `NodeId`.
pub fn decorate(tree: &ContentTree, ctx: &DecorationContext<'_>) -> Vec<DecoratedNode> {
    let statuses = status_index(ctx.content_status);
    let mut decorated = Vec::with_capacity(tree.len());

    tree.walk(|id, node| {
        decorated.push(decorate_node(tree, id, node, ctx, &statuses));
    });

    decorated
}

fn status_index(entries: Option<&[ContentStatusEntry]>) -> HashMap<&str, Option<u32>> {
    let mut index = HashMap::new();
    for entry in entries.unwrap_or_default() {
        // First entry for an id wins
        index.entry(entry.content_id.as_str()).or_insert(entry.status);
    }
    index
}

fn decorate_node(
    tree: &ContentTree,
    id: NodeId,
    node: &ContentNode,
    ctx: &DecorationContext<'_>,
    statuses: &HashMap<&str, Option<u32>>,
) -> DecoratedNode {
    let file_type = node.mime_type.as_deref().and_then(FileType::from_mime_type);
    let options = ctx.options;

    let (folder, icon, icon_color) = if node.has_children() {
        (true, options.folder_icon.clone().unwrap_or_default(), None)
    } else {
        let base_icon = file_type
            .and_then(|ft| options.custom_file_icon.get(&ft))
            .unwrap_or(&options.file_icon);

        if file_type == Some(FileType::Collection) {
            (true, base_icon.clone(), None)
        } else {
            let status = statuses.get(node.identifier.as_str()).copied().flatten();
            let color = IconColor::for_status(status);
            (false, format!("{} {}", base_icon, color.class()), Some(color))
        }
    };

    let (title, extra_classes) = if folder && !node.has_children() {
        let message = ctx.messages.resolve(tree, id).unwrap_or_default();
        (
            format!("{}<span> ({})</span>", node.name, message),
            DISABLED_CLASS.to_string(),
        )
    } else if node.name.is_empty() {
        (UNTITLED_FILE.to_string(), String::new())
    } else {
        (node.name.clone(), String::new())
    };

    DecoratedNode {
        id: node.identifier.clone(),
        file_type,
        folder,
        icon,
        icon_color,
        title,
        extra_classes,
    }
}

/// A parsed tree together with its decorations.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedTree {
    tree: ContentTree,
    nodes: Vec<DecoratedNode>,
}

impl DecoratedTree {
    pub fn build(tree: ContentTree, ctx: &DecorationContext<'_>) -> Self {
        let nodes = decorate(&tree, ctx);
        Self { tree, nodes }
    }

    pub fn tree(&self) -> &ContentTree {
        &self.tree
    }

    pub fn nodes(&self) -> &[DecoratedNode] {
        &self.nodes
    }

    pub fn get(&self, id: NodeId) -> Option<&DecoratedNode> {
        self.nodes.get(id)
    }

    pub fn root_children(&self) -> &[NodeId] {
        self.tree.root_children()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.tree
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Leaves in document order, as shown by the flat list view.
    pub fn leaf_ids(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&id| !self.nodes[id].folder)
            .collect()
    }

    /// Nested JSON rendering of the decorated tree, rooted at the root node.
    pub fn to_json(&self) -> Value {
        if self.nodes.is_empty() {
            return Value::Null;
        }
        self.node_json(ContentTree::ROOT)
    }

    fn node_json(&self, id: NodeId) -> Value {
        let mut value = serde_json::to_value(&self.nodes[id]).unwrap_or(Value::Null);
        let children: Vec<Value> = self
            .children(id)
            .iter()
            .map(|&child| self.node_json(child))
            .collect();
        if let Value::Object(ref mut map) = value {
            map.insert("children".to_string(), json!(children));
        }
        value
    }
}

/// A row of the flat list widget: `data.id` carries the underlying record id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub title: String,
    pub folder: bool,
    pub data: ListItemData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItemData {
    pub id: String,
}

impl ListItem {
    pub fn from_node(tree: &DecoratedTree, id: NodeId) -> Option<Self> {
        let content = tree.tree().get(id)?;
        let decorated = tree.get(id)?;
        Some(Self {
            title: decorated.title.clone(),
            folder: decorated.folder,
            data: ListItemData {
                id: content.identifier.clone(),
            },
        })
    }
}

/// Tree-node activation: emits for non-folders using the decorated id.
pub fn node_selection(node: &DecoratedNode) -> Option<SelectionEvent> {
    (!node.folder).then(|| SelectionEvent {
        id: node.id.clone(),
        title: node.title.clone(),
    })
}

/// List-item activation: emits for non-folders using the item's data id.
pub fn item_selection(item: &ListItem) -> Option<SelectionEvent> {
    (!item.folder).then(|| SelectionEvent {
        id: item.data.id.clone(),
        title: item.title.clone(),
    })
}
