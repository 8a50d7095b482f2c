//! Keyboard input handler.

use tracing::debug;

use crate::config::{Direction, KeybindingsConfig, ScrollConfig, Settings};
use crate::document::{Document, ElementId};

use super::{Axis, Capabilities, ListenerId, Listeners};

/// Payload delivered to key subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyData {
    pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    KeyDown,
    KeyUp,
}

/// Tracks the key currently considered "active" for axis purposes. The axis
/// key is cleared only when that same key is released, so a stale keystroke
/// cannot leak into a later unrelated query.
#[derive(Default)]
pub struct KeyHandler {
    listening: bool,
    last_key: String,
    // Held separately from last_key: only axis resolution reads it
    axis_key: String,
    keydown_listeners: Listeners<KeyData>,
    keyup_listeners: Listeners<KeyData>,
}

impl KeyHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_available(caps: &Capabilities, settings: &Settings) -> bool {
        caps.keyboard && settings.scroll.keyboard_scroll
    }

    pub fn start_listen(&mut self) {
        if self.listening {
            return;
        }
        self.listening = true;
        debug!("KeyHandler: key event listeners [started]");
    }

    pub fn stop_listen(&mut self) {
        if !self.listening {
            return;
        }
        self.keydown_listeners.clear();
        self.keyup_listeners.clear();
        self.last_key.clear();
        self.axis_key.clear();
        self.listening = false;
        debug!("KeyHandler: key event listeners [stopped]");
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn on(&mut self, kind: KeyEventKind, callback: impl FnMut(&KeyData) + 'static) -> ListenerId {
        debug!("KeyHandler: event listener '{kind:?}' [added]");
        match kind {
            KeyEventKind::KeyDown => self.keydown_listeners.on(callback),
            KeyEventKind::KeyUp => self.keyup_listeners.on(callback),
        }
    }

    pub fn off(&mut self, kind: KeyEventKind, id: ListenerId) {
        match kind {
            KeyEventKind::KeyDown => self.keydown_listeners.off(id),
            KeyEventKind::KeyUp => self.keyup_listeners.off(id),
        }
        debug!("KeyHandler: event listener '{kind:?}' [removed]");
    }

    /// Capture a key press. Returns whether the event was taken.
    pub fn record_keydown(&mut self, key: &str) -> bool {
        if !self.listening {
            return false;
        }

        self.last_key = key.to_string();
        self.axis_key = key.to_string();
        self.keydown_listeners.notify(&KeyData { key: key.to_string() });
        true
    }

    /// Capture a key release. Clears the axis key only on a match.
    pub fn record_keyup(&mut self, key: &str) -> bool {
        if !self.listening {
            return false;
        }

        if key == self.axis_key {
            self.axis_key.clear();
        }
        self.keyup_listeners.notify(&KeyData { key: key.to_string() });
        true
    }

    pub fn get_axis(&self, direction: Direction, bindings: &KeybindingsConfig) -> Axis {
        let key = self.axis_key.as_str();
        match direction {
            Direction::Vertical => {
                if bindings.up.iter().any(|k| k == key) {
                    return -1;
                }
                if bindings.down.iter().any(|k| k == key) {
                    return 1;
                }
            }
            Direction::Horizontal => {
                if bindings.right.iter().any(|k| k == key) {
                    return 1;
                }
                if bindings.left.iter().any(|k| k == key) {
                    return -1;
                }
            }
        }

        0
    }

    /// Incrementally scroll an element by the configured pixel speed in the
    /// currently-resolved axis direction. No-op when the element has zero
    /// scroll extent in both dimensions.
    pub fn scroll_with_keys(
        &self,
        doc: &mut Document,
        element: ElementId,
        direction: Direction,
        scroll: &ScrollConfig,
        bindings: &KeybindingsConfig,
    ) {
        let geometry = doc.geometry(element);
        if geometry.scroll_height == 0 && geometry.scroll_width == 0 {
            return;
        }

        let axis = self.get_axis(direction, bindings);
        let delta = i64::from(axis) * i64::from(scroll.speed);
        doc.scroll_element_by(element, direction, delta, scroll.behavior);

        debug!(speed = scroll.speed, ?direction, "KeyHandler: scroll with keys");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Geometry;

    fn bindings() -> KeybindingsConfig {
        KeybindingsConfig::default()
    }

    #[test]
    fn test_arrow_up_resolves_to_negative_axis() {
        let mut handler = KeyHandler::new();
        handler.start_listen();

        handler.record_keydown("ArrowUp");
        assert_eq!(handler.get_axis(Direction::Vertical, &bindings()), -1);

        handler.record_keyup("ArrowUp");
        assert_eq!(handler.get_axis(Direction::Vertical, &bindings()), 0);
    }

    #[test]
    fn test_unrelated_keyup_keeps_axis_key() {
        let mut handler = KeyHandler::new();
        handler.start_listen();

        handler.record_keydown("j");
        handler.record_keyup("ArrowDown");
        assert_eq!(handler.get_axis(Direction::Vertical, &bindings()), 1);
    }

    #[test]
    fn test_horizontal_bindings() {
        let mut handler = KeyHandler::new();
        handler.start_listen();

        handler.record_keydown("l");
        assert_eq!(handler.get_axis(Direction::Horizontal, &bindings()), 1);
        assert_eq!(handler.get_axis(Direction::Vertical, &bindings()), 0);

        handler.record_keydown("ArrowLeft");
        assert_eq!(handler.get_axis(Direction::Horizontal, &bindings()), -1);
    }

    #[test]
    fn test_scroll_with_keys_moves_overflow_element() {
        let mut handler = KeyHandler::new();
        handler.start_listen();
        handler.record_keydown("ArrowDown");

        let mut doc = Document::new();
        let body = doc.body();
        let elem = doc.create_element("div");
        doc.append_child(body, elem);
        *doc.geometry_mut(elem) = Geometry {
            scroll_height: 1000,
            client_height: 100,
            scroll_width: 100,
            client_width: 100,
            ..Default::default()
        };

        let scroll = ScrollConfig::default();
        handler.scroll_with_keys(&mut doc, elem, Direction::Vertical, &scroll, &bindings());
        assert_eq!(doc.geometry(elem).scroll_top, scroll.speed);
    }

    #[test]
    fn test_scroll_with_keys_noop_without_extent() {
        let handler = KeyHandler::new();
        let mut doc = Document::new();
        let body = doc.body();
        let elem = doc.create_element("div");
        doc.append_child(body, elem);

        handler.scroll_with_keys(
            &mut doc,
            elem,
            Direction::Vertical,
            &ScrollConfig::default(),
            &bindings(),
        );
        assert!(doc.take_scroll_commands().is_empty());
    }
}
