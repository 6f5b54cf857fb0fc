// UI components module

pub mod tree_view;

// Re-exports
pub use tree_view::{Row, TreeViewComponent, ViewMode};
