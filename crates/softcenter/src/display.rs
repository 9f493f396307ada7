use anyhow::{Context, Error};
use softcenter_core::view::navigation::{CatalogView, ViewDisplay};
use std::cell::RefCell;
use std::io::Write;

/// Prints views as text.
pub struct TerminalDisplay<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        TerminalDisplay {
            out: RefCell::new(out),
        }
    }
}

impl<W: Write> ViewDisplay for TerminalDisplay<W> {
    fn show(&self, view: &CatalogView) -> Result<(), Error> {
        let mut out = self.out.borrow_mut();
        writeln!(out, "== {} ==", view.title()).context("can't write view")?;
        match view {
            CatalogView::Lobby => writeln!(out, "Browse categories or search for an app.")?,
            CatalogView::Category { category } => writeln!(out, "Category: {}", category)?,
            CatalogView::Subcategory {
                category,
                subcategory,
            } => writeln!(out, "Category: {} > {}", category, subcategory)?,
            CatalogView::AppList {
                category,
                subcategory: Some(subcategory),
            } => writeln!(out, "Apps in {} > {}", category, subcategory)?,
            CatalogView::AppList { category, .. } => writeln!(out, "Apps in {}", category)?,
            CatalogView::AppDetails { app } => writeln!(out, "Package: {}", app.pkgname)?,
            CatalogView::Search {
                query,
                category: Some(category),
            } => writeln!(out, "Searching {} for {:?}", category, query)?,
            CatalogView::Search { query, .. } => writeln!(out, "Searching for {:?}", query)?,
        }
        out.flush().context("can't flush output")
    }
}
