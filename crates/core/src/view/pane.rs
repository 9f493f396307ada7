use crate::settings::Settings;
use crate::view::navigation::{
    CatalogItem, CatalogView, NavigationButtons, NavigationController, NavigationError,
    NavigationEvent, NavigationItem, ViewDisplay,
};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};

/// User requests a browsing pane reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneEvent {
    Open(CatalogView),
    Back,
    Forward,
}

/// A catalog pane: one navigation history, the display it renders into and
/// the state of its back/forward buttons.
///
/// # Event Flow
///
/// 1. The caller hands a [`PaneEvent`] to `handle_event()`
/// 2. `Open` records the new view, then renders it
/// 3. `Back`/`Forward` move through the history, which renders the target
/// 4. Availability notifications queued by the history are applied to the buttons
pub struct BrowsePane {
    display: Rc<dyn ViewDisplay>,
    history: NavigationController<CatalogItem>,
    buttons: NavigationButtons,
    hub: Receiver<NavigationEvent>,
}

impl BrowsePane {
    /// Creates a pane showing the lobby and renders it.
    pub fn new(display: Rc<dyn ViewDisplay>, settings: &Settings) -> BrowsePane {
        let (tx, rx) = mpsc::channel();
        let root = Rc::new(CatalogItem::new(CatalogView::Lobby, Rc::clone(&display)));
        let history = NavigationController::new(root)
            .max_back(settings.history.max_entries)
            .observer(Box::new(tx));

        history.current().render();

        BrowsePane {
            display,
            history,
            buttons: NavigationButtons::default(),
            hub: rx,
        }
    }

    /// Applies `evt` to the history.
    ///
    /// # Errors
    ///
    /// `Back` and `Forward` fail with [`NavigationError::EmptyHistory`] when
    /// the matching button should have been insensitive.
    pub fn handle_event(&mut self, evt: PaneEvent) -> Result<(), NavigationError> {
        let result = match evt {
            PaneEvent::Open(view) => {
                tracing::debug!(view = %view, "Opening view");
                let item = Rc::new(CatalogItem::new(view, Rc::clone(&self.display)));
                self.history.navigate(item);
                self.history.current().render();
                Ok(())
            }
            PaneEvent::Back => self.history.back(),
            PaneEvent::Forward => self.history.forward(),
        };

        if let Err(e) = &result {
            tracing::warn!(
                error = %e,
                buttons = ?self.buttons,
                "Navigation requested while unavailable"
            );
        }

        self.sync_buttons();
        result
    }

    fn sync_buttons(&mut self) {
        for event in self.hub.try_iter() {
            self.buttons.apply(event);
        }
    }

    pub fn buttons(&self) -> NavigationButtons {
        self.buttons
    }

    pub fn current_view(&self) -> &CatalogView {
        self.history.current().view()
    }

    /// Titles from the oldest reachable view to the current one.
    pub fn breadcrumbs(&self) -> Vec<String> {
        self.history
            .back_items()
            .iter()
            .chain(std::iter::once(self.history.current()))
            .map(|item| item.view().title())
            .collect()
    }

    pub fn back_tooltip(&self) -> Option<String> {
        self.history
            .peek_back()
            .map(|item| format!("Back to {}", item.view().title()))
    }

    pub fn forward_tooltip(&self) -> Option<String> {
        self.history
            .peek_forward()
            .map(|item| format!("Forward to {}", item.view().title()))
    }
}
