use super::availability::AvailabilityObserver;
use super::item::NavigationItem;
use std::fmt;
use std::rc::Rc;

/// Which way a history traversal goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Back,
    Forward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Back => write!(f, "back"),
            Direction::Forward => write!(f, "forward"),
        }
    }
}

/// Errors raised by [`NavigationController`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    /// `back()` or `forward()` was called while the matching stack was empty.
    ///
    /// The pane is expected to disable its controls from the availability
    /// notifications, so hitting this means the UI and the history disagree.
    #[error("no history to go {0}")]
    EmptyHistory(Direction),
}

/// Browser-style back/forward history over a browsing pane's views.
///
/// The controller owns two stacks and the item currently shown:
///
/// ```text
/// back: [A, B]   current: C   forward: [E, D]
///           └─ popped by back()          └─ popped by forward()
/// ```
///
/// Both stacks are most-recent-last. `navigate` pushes `current` on the back
/// stack and drops the forward stack; `back` and `forward` move one item
/// between the stacks.
///
/// `navigate` never renders the destination: the caller shows it after the
/// history is updated. `back` and `forward` render the item they land on,
/// since the caller does not know which one that is.
///
/// # Example
///
/// ```
/// use softcenter_core::view::navigation::{NavigationController, NavigationItem};
/// use std::rc::Rc;
///
/// struct Page(&'static str);
///
/// impl NavigationItem for Page {
///     fn render(&self) {}
/// }
///
/// let mut history = NavigationController::new(Rc::new(Page("lobby")));
/// history.navigate(Rc::new(Page("games")));
/// assert!(history.can_go_back());
///
/// history.back()?;
/// assert_eq!(history.current().0, "lobby");
/// assert!(history.can_go_forward());
/// # Ok::<(), softcenter_core::view::navigation::NavigationError>(())
/// ```
pub struct NavigationController<I: NavigationItem> {
    current: Rc<I>,
    back: Vec<Rc<I>>,
    forward: Vec<Rc<I>>,
    max_back: usize,
    observer: Option<Box<dyn AvailabilityObserver>>,
}

impl<I: NavigationItem> NavigationController<I> {
    /// Creates a controller showing `root` with both stacks empty.
    pub fn new(root: Rc<I>) -> Self {
        NavigationController {
            current: root,
            back: Vec::new(),
            forward: Vec::new(),
            max_back: 0,
            observer: None,
        }
    }

    /// Caps the back stack at `max_back` entries, dropping the oldest ones
    /// on `navigate`. Zero keeps everything.
    pub fn max_back(mut self, max_back: usize) -> Self {
        self.max_back = max_back;
        self
    }

    /// Sets the receiver of back/forward availability notifications.
    pub fn observer(mut self, observer: Box<dyn AvailabilityObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn current(&self) -> &Rc<I> {
        &self.current
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// Items reachable with `back`, oldest first.
    pub fn back_items(&self) -> &[Rc<I>] {
        &self.back
    }

    /// Items reachable with `forward`, the next one last.
    pub fn forward_items(&self) -> &[Rc<I>] {
        &self.forward
    }

    /// The item the next `back` would show.
    pub fn peek_back(&self) -> Option<&Rc<I>> {
        self.back.last()
    }

    /// The item the next `forward` would show.
    pub fn peek_forward(&self) -> Option<&Rc<I>> {
        self.forward.last()
    }

    /// Number of items held, the current one included.
    pub fn len(&self) -> usize {
        self.back.len() + self.forward.len() + 1
    }

    /// Always false: a controller holds at least its current item.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Moves to `dest`, making the current item reachable with `back` and
    /// discarding anything reachable with `forward`.
    ///
    /// Navigating to the item already shown is still recorded.
    pub fn navigate(&mut self, dest: Rc<I>) {
        let previous = std::mem::replace(&mut self.current, dest);
        self.back.push(previous);
        self.forward.clear();

        if self.max_back > 0 && self.back.len() > self.max_back {
            let excess = self.back.len() - self.max_back;
            self.back.drain(..excess);
            tracing::debug!(dropped = excess, "Trimmed navigation history");
        }

        tracing::debug!(
            back = self.back.len(),
            forward = self.forward.len(),
            "Navigated"
        );

        self.notify_back(true);
        self.notify_forward(false);
    }

    /// Returns to the previously shown item and renders it.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::EmptyHistory`] when there is nothing to go
    /// back to; the history is left untouched.
    pub fn back(&mut self) -> Result<(), NavigationError> {
        let dest = self
            .back
            .pop()
            .ok_or(NavigationError::EmptyHistory(Direction::Back))?;
        let previous = std::mem::replace(&mut self.current, dest);
        self.forward.push(previous);

        tracing::debug!(
            back = self.back.len(),
            forward = self.forward.len(),
            "Went back"
        );

        self.current.render();

        if self.back.is_empty() {
            self.notify_back(false);
        }
        self.notify_forward(true);

        Ok(())
    }

    /// Redoes the last `back` and renders the item it lands on.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::EmptyHistory`] when there is nothing to go
    /// forward to; the history is left untouched.
    pub fn forward(&mut self) -> Result<(), NavigationError> {
        let dest = self
            .forward
            .pop()
            .ok_or(NavigationError::EmptyHistory(Direction::Forward))?;
        let previous = std::mem::replace(&mut self.current, dest);
        self.back.push(previous);

        tracing::debug!(
            back = self.back.len(),
            forward = self.forward.len(),
            "Went forward"
        );

        self.current.render();

        if self.forward.is_empty() {
            self.notify_forward(false);
        }
        self.notify_back(true);

        Ok(())
    }

    fn notify_back(&self, available: bool) {
        if let Some(observer) = &self.observer {
            observer.back_availability_changed(available);
        }
    }

    fn notify_forward(&self, available: bool) {
        if let Some(observer) = &self.observer {
            observer.forward_availability_changed(available);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::navigation::availability::NavigationEvent;
    use std::cell::Cell;
    use std::sync::mpsc;

    struct Page {
        name: &'static str,
        renders: Cell<usize>,
    }

    impl NavigationItem for Page {
        fn render(&self) {
            self.renders.set(self.renders.get() + 1);
        }
    }

    fn page(name: &'static str) -> Rc<Page> {
        Rc::new(Page {
            name,
            renders: Cell::new(0),
        })
    }

    fn controller() -> NavigationController<Page> {
        NavigationController::new(page("root"))
    }

    fn names(items: &[Rc<Page>]) -> Vec<&'static str> {
        items.iter().map(|item| item.name).collect()
    }

    #[test]
    fn initial_state_has_no_history() {
        let history = controller();

        assert_eq!(history.current().name, "root");
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn navigate_always_enables_back_and_disables_forward() {
        let mut history = controller();

        for name in ["a", "b", "c", "d"] {
            history.navigate(page(name));
            assert!(history.can_go_back());
            assert!(!history.can_go_forward());
            assert_eq!(history.current().name, name);
        }
    }

    #[test]
    fn back_then_forward_returns_to_the_same_item() {
        let mut history = controller();
        history.navigate(page("a"));
        history.navigate(page("b"));

        history.back().unwrap();
        assert_eq!(history.current().name, "a");
        assert!(history.can_go_forward());

        history.forward().unwrap();
        assert_eq!(history.current().name, "b");
        assert!(!history.can_go_forward());
    }

    #[test]
    fn back_twice_after_three_navigations_lands_on_first() {
        let mut history = controller();
        history.navigate(page("a"));
        history.navigate(page("b"));
        history.navigate(page("c"));

        history.back().unwrap();
        history.back().unwrap();

        // The root was pushed by the first navigate, so back stays available.
        assert_eq!(history.current().name, "a");
        assert!(history.can_go_back());
        assert_eq!(history.peek_back().map(|p| p.name), Some("root"));
        assert_eq!(names(history.back_items()), vec!["root"]);
        assert_eq!(names(history.forward_items()), vec!["c", "b"]);
    }

    #[test]
    fn back_to_root_disables_back() {
        let mut history = controller();
        history.navigate(page("a"));
        history.navigate(page("b"));
        history.navigate(page("c"));

        history.back().unwrap();
        history.back().unwrap();
        history.back().unwrap();

        assert_eq!(history.current().name, "root");
        assert!(!history.can_go_back());
    }

    #[test]
    fn back_from_initial_state_is_an_error() {
        let mut history = controller();

        assert_eq!(
            history.back(),
            Err(NavigationError::EmptyHistory(Direction::Back))
        );
        assert_eq!(history.current().name, "root");
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn forward_without_back_is_an_error() {
        let mut history = controller();
        history.navigate(page("a"));

        assert_eq!(
            history.forward(),
            Err(NavigationError::EmptyHistory(Direction::Forward))
        );
        assert_eq!(history.current().name, "a");
        assert_eq!(names(history.back_items()), vec!["root"]);
    }

    #[test]
    fn navigate_after_back_discards_forward_history() {
        let mut history = controller();
        history.navigate(page("a"));
        history.navigate(page("b"));
        history.back().unwrap();
        assert!(history.can_go_forward());

        history.navigate(page("c"));

        assert!(!history.can_go_forward());
        assert_eq!(names(history.back_items()), vec!["root", "a"]);
        assert!(history.forward().is_err());
    }

    #[test]
    fn round_trip_restores_stack_shapes() {
        let mut history = controller();
        history.navigate(page("a"));
        let back_before = names(history.back_items());
        let forward_before = names(history.forward_items());

        history.back().unwrap();
        history.forward().unwrap();

        assert_eq!(history.current().name, "a");
        assert_eq!(names(history.back_items()), back_before);
        assert_eq!(names(history.forward_items()), forward_before);
    }

    #[test]
    fn navigating_to_current_item_is_still_recorded() {
        let root = page("root");
        let mut history = NavigationController::new(Rc::clone(&root));

        history.navigate(Rc::clone(&root));

        assert!(history.can_go_back());
        assert!(Rc::ptr_eq(history.current(), &root));
        assert!(Rc::ptr_eq(&history.back_items()[0], &root));
    }

    #[test]
    fn only_traversals_render() {
        let a = page("a");
        let b = page("b");
        let mut history = controller();

        history.navigate(Rc::clone(&a));
        history.navigate(Rc::clone(&b));
        assert_eq!(a.renders.get(), 0);
        assert_eq!(b.renders.get(), 0);

        history.back().unwrap();
        assert_eq!(a.renders.get(), 1);

        history.forward().unwrap();
        assert_eq!(b.renders.get(), 1);
        assert_eq!(a.renders.get(), 1);
    }

    #[test]
    fn items_are_shared_not_copied() {
        let a = page("a");
        let mut history = controller();

        history.navigate(Rc::clone(&a));
        history.navigate(page("b"));
        history.back().unwrap();

        assert!(Rc::ptr_eq(history.current(), &a));
    }

    #[test]
    fn peek_reports_traversal_targets() {
        let mut history = controller();
        assert!(history.peek_back().is_none());

        history.navigate(page("a"));
        history.navigate(page("b"));
        assert_eq!(history.peek_back().map(|p| p.name), Some("a"));

        history.back().unwrap();
        assert_eq!(history.peek_back().map(|p| p.name), Some("root"));
        assert_eq!(history.peek_forward().map(|p| p.name), Some("b"));
    }

    #[test]
    fn max_back_drops_oldest_entries() {
        let mut history = controller().max_back(2);

        history.navigate(page("a"));
        history.navigate(page("b"));
        history.navigate(page("c"));
        history.navigate(page("d"));

        assert_eq!(names(history.back_items()), vec!["b", "c"]);
        assert_eq!(history.current().name, "d");

        history.back().unwrap();
        history.back().unwrap();
        assert_eq!(history.current().name, "b");
        assert!(!history.can_go_back());
    }

    #[test]
    fn zero_max_back_keeps_everything() {
        let mut history = controller().max_back(0);

        for name in ["a", "b", "c", "d", "e"] {
            history.navigate(page(name));
        }

        assert_eq!(history.back_items().len(), 5);
    }

    #[test]
    fn notifications_follow_each_operation() {
        let (tx, rx) = mpsc::channel();
        let mut history = controller().observer(Box::new(tx));

        history.navigate(page("a"));
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![
                NavigationEvent::BackAvailable(true),
                NavigationEvent::ForwardAvailable(false)
            ]
        );

        history.navigate(page("b"));
        rx.try_iter().for_each(drop);

        history.back().unwrap();
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![NavigationEvent::ForwardAvailable(true)]
        );

        history.back().unwrap();
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![
                NavigationEvent::BackAvailable(false),
                NavigationEvent::ForwardAvailable(true)
            ]
        );

        history.forward().unwrap();
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![NavigationEvent::BackAvailable(true)]
        );

        history.forward().unwrap();
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![
                NavigationEvent::ForwardAvailable(false),
                NavigationEvent::BackAvailable(true)
            ]
        );
    }

    #[test]
    fn failed_traversal_sends_no_notification() {
        let (tx, rx) = mpsc::channel();
        let mut history = controller().observer(Box::new(tx));

        assert!(history.back().is_err());
        assert!(history.forward().is_err());

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn error_message_names_direction() {
        assert_eq!(
            NavigationError::EmptyHistory(Direction::Back).to_string(),
            "no history to go back"
        );
        assert_eq!(
            NavigationError::EmptyHistory(Direction::Forward).to_string(),
            "no history to go forward"
        );
    }
}
