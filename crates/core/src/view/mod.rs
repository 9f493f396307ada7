//! Browsing views of the software center.

pub mod navigation;
pub mod pane;

pub use self::pane::{BrowsePane, PaneEvent};
