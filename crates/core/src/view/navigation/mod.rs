//! Back/forward browsing history for catalog panes.
//!
//! The module is split into:
//! - [`history`]: the [`NavigationController`] state machine and its error
//! - [`item`]: the [`NavigationItem`] capability and the catalog's views
//! - [`availability`]: notifications driving the back/forward controls

pub mod availability;
pub mod history;
pub mod item;

pub use self::availability::{AvailabilityObserver, NavigationButtons, NavigationEvent};
pub use self::history::{Direction, NavigationController, NavigationError};
pub use self::item::{AppId, CatalogItem, CatalogView, NavigationItem, ViewDisplay};
