use std::sync::mpsc::Sender;

/// Back/forward availability changes emitted by a
/// [`NavigationController`](super::NavigationController).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    BackAvailable(bool),
    ForwardAvailable(bool),
}

/// Receives availability notifications so the pane can enable or disable
/// its back and forward controls.
pub trait AvailabilityObserver {
    fn back_availability_changed(&self, available: bool);

    fn forward_availability_changed(&self, available: bool);
}

/// Forwards notifications onto a channel, the way views post events to the hub.
impl AvailabilityObserver for Sender<NavigationEvent> {
    fn back_availability_changed(&self, available: bool) {
        self.send(NavigationEvent::BackAvailable(available)).ok();
    }

    fn forward_availability_changed(&self, available: bool) {
        self.send(NavigationEvent::ForwardAvailable(available)).ok();
    }
}

/// Sensitivity of a pane's back and forward buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationButtons {
    pub back: bool,
    pub forward: bool,
}

impl NavigationButtons {
    pub fn apply(&mut self, event: NavigationEvent) {
        match event {
            NavigationEvent::BackAvailable(available) => self.back = available,
            NavigationEvent::ForwardAvailable(available) => self.forward = available,
        }
    }
}
