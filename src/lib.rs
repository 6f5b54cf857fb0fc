//! Content collection tree browser.
//!
//! Parses a content hierarchy, decorates every node with presentation data
//! (icon, progress color, localized "coming soon" label, title) and forwards
//! leaf activations as [`model::SelectionEvent`]s.

pub mod component;
pub mod config;
pub mod decorate;
pub mod error;
pub mod input;
pub mod model;
pub mod services;
pub mod tree;
pub mod ui;

pub use component::{CollectionTreeComponent, TreeInputs};
pub use decorate::{DecoratedNode, DecoratedTree};
pub use error::{CollectionTreeError, Result};
