use crate::model::{AltMessage, RawContentNode};

pub type NodeId = usize;

/// A parsed content record without its nested children; structure lives in
/// the arena indices.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentNode {
    pub identifier: String,
    pub name: String,
    pub mime_type: Option<String>,
    pub alt_msg: Vec<AltMessage>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl ContentNode {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Navigable, immutable tree built from a raw content hierarchy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentTree {
    nodes: Vec<ContentNode>,
}

impl ContentTree {
    pub const ROOT: NodeId = 0;

    /// Builds the arena in pre-order, so node ids follow document order.
    pub fn parse(root: &RawContentNode) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        let mut stack: Vec<(&RawContentNode, Option<NodeId>)> = vec![(root, None)];

        while let Some((raw, parent)) = stack.pop() {
            let id = tree.nodes.len();
            tree.nodes.push(ContentNode {
                identifier: raw.identifier.clone(),
                name: raw.name.clone(),
                mime_type: raw.mime_type.clone(),
                alt_msg: raw.alt_msg.clone(),
                parent,
                children: Vec::with_capacity(raw.children.len()),
            });
            if let Some(parent) = parent {
                tree.nodes[parent].children.push(id);
            }
            // Reverse so the first child is popped first
            for child in raw.children.iter().rev() {
                stack.push((child, Some(id)));
            }
        }

        tracing::trace!("Parsed content tree with {} nodes", tree.nodes.len());
        tree
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&ContentNode> {
        self.nodes.first()
    }

    pub fn get(&self, id: NodeId) -> Option<&ContentNode> {
        self.nodes.get(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<&ContentNode> {
        self.get(id)?.parent.and_then(|p| self.get(p))
    }

    pub fn root_children(&self) -> &[NodeId] {
        self.root().map(|r| r.children.as_slice()).unwrap_or(&[])
    }

    /// Visits every node in pre-order.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(NodeId, &ContentNode),
    {
        // Arena order is already pre-order
        for (id, node) in self.nodes.iter().enumerate() {
            visit(id, node);
        }
    }

    /// First node in pre-order whose identifier matches.
    pub fn find(&self, identifier: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.identifier == identifier)
    }
}
