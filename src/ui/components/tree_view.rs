use crate::decorate::DecoratedTree;
use crate::tree::NodeId;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Expandable hierarchy, activations go through the node path.
    Tree,
    /// Flat list of leaves, activations go through the item path.
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    pub node: NodeId,
    pub depth: usize,
}

/// Expansion and cursor state for the collection tree.
///
/// Expansion is keyed by content identifier so it survives rebuilds, which
/// re-parse the tree and may renumber nodes.
pub struct TreeViewComponent {
    expanded: HashSet<String>,
    cursor: usize,
    mode: ViewMode,
}

impl TreeViewComponent {
    pub fn new() -> Self {
        Self {
            expanded: HashSet::new(),
            cursor: 0,
            mode: ViewMode::Tree,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            ViewMode::Tree => ViewMode::List,
            ViewMode::List => ViewMode::Tree,
        };
        self.cursor = 0;
    }

    pub fn is_expanded(&self, identifier: &str) -> bool {
        self.expanded.contains(identifier)
    }

    pub fn toggle_expand(&mut self, identifier: &str) {
        if !self.expanded.remove(identifier) {
            self.expanded.insert(identifier.to_string());
        }
    }

    pub fn collapse(&mut self, identifier: &str) {
        self.expanded.remove(identifier);
    }

    /// Rows currently on screen, starting from the root's children.
    pub fn visible_rows(&self, tree: &DecoratedTree) -> Vec<Row> {
        match self.mode {
            ViewMode::List => tree
                .leaf_ids()
                .into_iter()
                .map(|node| Row { node, depth: 0 })
                .collect(),
            ViewMode::Tree => {
                let mut rows = Vec::new();
                let mut stack: Vec<Row> = tree
                    .root_children()
                    .iter()
                    .rev()
                    .map(|&node| Row { node, depth: 0 })
                    .collect();

                while let Some(row) = stack.pop() {
                    rows.push(row);
                    let expanded = tree
                        .tree()
                        .get(row.node)
                        .map(|n| self.is_expanded(&n.identifier))
                        .unwrap_or(false);
                    if expanded {
                        for &child in tree.children(row.node).iter().rev() {
                            stack.push(Row {
                                node: child,
                                depth: row.depth + 1,
                            });
                        }
                    }
                }
                rows
            }
        }
    }

    pub fn current(&self, tree: &DecoratedTree) -> Option<Row> {
        self.visible_rows(tree).get(self.cursor).copied()
    }

    pub fn move_down(&mut self, row_count: usize) {
        if self.cursor + 1 < row_count {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Keeps the cursor on screen after a rebuild shrank the row list.
    pub fn clamp(&mut self, row_count: usize) {
        self.cursor = self.cursor.min(row_count.saturating_sub(1));
    }
}

impl Default for TreeViewComponent {
    fn default() -> Self {
        Self::new()
    }
}
