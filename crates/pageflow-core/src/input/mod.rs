//! Input normalization layer.
//!
//! Four independent handlers (wheel, keys, swipe, mutation observer) each own
//! a small piece of transient state and expose the same contract:
//! `start_listen` / `stop_listen` (idempotent), `on` / `off` over a fixed set
//! of event kinds, and `get_axis(direction)` returning a normalized signal in
//! {-1, 0, 1}. The navigation engine consumes handlers uniformly through
//! [`InputSignal`], never through host event types.

pub mod keys;
pub mod observer;
pub mod swipe;
pub mod wheel;

pub use keys::KeyHandler;
pub use observer::MutationWatcher;
pub use swipe::SwipeHandler;
pub use wheel::WheelHandler;

use crate::config::MouseButton;
use crate::document::ElementId;

/// Normalized directional signal: -1, 0 or 1. 0 means "no signal".
pub type Axis = i8;

/// Which input produced a qualifying navigation event. The engine resolves
/// the axis by asking the matching handler, nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSignal {
    Wheel,
    Key {
        key: String,
        /// Element the key event targeted, when the host knows it.
        target: Option<ElementId>,
    },
    Swipe,
}

/// Raw physical events delivered by the host environment.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Wheel { delta_x: f64, delta_y: f64 },
    KeyDown { key: String, target: Option<ElementId> },
    KeyUp { key: String },
    PointerDown { x: f64, y: f64, button: MouseButton },
    PointerMove { x: f64, y: f64, button: MouseButton },
    PointerUp { x: f64, y: f64, button: MouseButton },
    TouchStart { x: f64, y: f64 },
    TouchMove { x: f64, y: f64 },
    TouchEnd { x: f64, y: f64 },
}

/// What the host environment can physically deliver. Handlers that are not
/// available are never started.
#[derive(Debug, Clone, Copy, Default)]
pub struct Capabilities {
    pub wheel: bool,
    pub keyboard: bool,
    pub pointer: bool,
    pub touch: bool,
}

impl Capabilities {
    /// A mouse-and-keyboard terminal host: wheel, keys and pointer, no touch.
    pub fn terminal() -> Self {
        Self {
            wheel: true,
            keyboard: true,
            pointer: true,
            touch: false,
        }
    }
}

/// The three axis-producing handlers, grouped so the engine can resolve any
/// [`InputSignal`] against the one that produced it.
#[derive(Default)]
pub struct InputHandlers {
    pub wheel: WheelHandler,
    pub keys: KeyHandler,
    pub swipe: SwipeHandler,
}

impl InputHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start every handler the host supports and the settings allow.
    pub fn start_available(&mut self, caps: &Capabilities, settings: &crate::config::Settings) {
        if WheelHandler::is_available(caps, settings) {
            self.wheel.start_listen();
        }
        if KeyHandler::is_available(caps, settings) {
            self.keys.start_listen();
        }
        if SwipeHandler::is_available(caps, settings) {
            self.swipe.start_listen();
        }
    }

    pub fn stop_all(&mut self) {
        self.wheel.stop_listen();
        self.keys.stop_listen();
        self.swipe.stop_listen();
    }
}

/// Handle for unsubscribing a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Ordered listener registry. Notification runs front-to-back in
/// registration order, synchronously; ordering is deterministic.
pub struct Listeners<E> {
    entries: Vec<(ListenerId, Box<dyn FnMut(&E)>)>,
    next_id: u64,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E> Listeners<E> {
    pub fn on(&mut self, callback: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    pub fn off(&mut self, id: ListenerId) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    pub fn notify(&mut self, event: &E) {
        for (_, callback) in self.entries.iter_mut() {
            callback(event);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_listeners_notify_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners: Listeners<u32> = Listeners::default();

        let first = Rc::clone(&seen);
        listeners.on(move |v| first.borrow_mut().push(("first", *v)));
        let second = Rc::clone(&seen);
        listeners.on(move |v| second.borrow_mut().push(("second", *v)));

        listeners.notify(&7);
        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_listeners_off_removes_only_target() {
        let seen = Rc::new(RefCell::new(0u32));
        let mut listeners: Listeners<()> = Listeners::default();

        let counted = Rc::clone(&seen);
        let keep = listeners.on(move |_| *counted.borrow_mut() += 1);
        let dropped = listeners.on(|_| {});

        listeners.off(dropped);
        assert_eq!(listeners.len(), 1);
        listeners.notify(&());
        assert_eq!(*seen.borrow(), 1);

        listeners.off(keep);
        assert!(listeners.is_empty());
    }
}
