use anyhow::Error;
use std::fmt;
use std::rc::Rc;

/// A displayable view recorded in the navigation history.
///
/// Items are immutable once created and shared between the stacks, never
/// copied. The controller only ever asks an item to show itself again.
pub trait NavigationItem {
    /// Redisplays the view. Failures are the item's concern; the history is
    /// already updated when this is called.
    fn render(&self);
}

/// Identifies an application in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppId {
    pub pkgname: String,
    pub appname: Option<String>,
}

impl AppId {
    pub fn new(pkgname: impl Into<String>) -> Self {
        AppId {
            pkgname: pkgname.into(),
            appname: None,
        }
    }

    pub fn with_appname(mut self, appname: impl Into<String>) -> Self {
        self.appname = Some(appname.into());
        self
    }

    /// The name shown to the user, falling back to the package name.
    pub fn display_name(&self) -> &str {
        self.appname.as_deref().unwrap_or(&self.pkgname)
    }
}

/// The views a catalog pane can show, with the context each one needs to be
/// displayed again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogView {
    /// Root listing of all categories.
    Lobby,
    Category {
        category: String,
    },
    Subcategory {
        category: String,
        subcategory: String,
    },
    AppList {
        category: String,
        subcategory: Option<String>,
    },
    AppDetails {
        app: AppId,
    },
    Search {
        query: String,
        category: Option<String>,
    },
}

impl CatalogView {
    pub fn title(&self) -> String {
        match self {
            CatalogView::Lobby => "Get Software".to_string(),
            CatalogView::Category { category } => category.clone(),
            CatalogView::Subcategory { subcategory, .. } => subcategory.clone(),
            CatalogView::AppList {
                category,
                subcategory,
            } => format!("{} apps", subcategory.as_deref().unwrap_or(category)),
            CatalogView::AppDetails { app } => app.display_name().to_string(),
            CatalogView::Search { query, .. } => format!("Search results for \"{}\"", query),
        }
    }
}

impl fmt::Display for CatalogView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

/// Presentation side of a catalog pane.
pub trait ViewDisplay {
    /// Shows `view`, possibly kicking off further loading.
    fn show(&self, view: &CatalogView) -> Result<(), Error>;
}

/// A [`CatalogView`] bound to the display that renders it.
pub struct CatalogItem {
    view: CatalogView,
    display: Rc<dyn ViewDisplay>,
}

impl CatalogItem {
    pub fn new(view: CatalogView, display: Rc<dyn ViewDisplay>) -> Self {
        CatalogItem { view, display }
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }
}

impl fmt::Debug for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogItem")
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl NavigationItem for CatalogItem {
    fn render(&self) {
        if let Err(e) = self.display.show(&self.view) {
            tracing::warn!(view = %self.view, error = %e, "Failed to display view");
        }
    }
}
