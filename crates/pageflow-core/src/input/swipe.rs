//! Swipe input handler (touch and pointer-drag gestures).

use tracing::debug;

use crate::config::{Direction, MouseButton, Settings, SwipeConfig};

use super::{Axis, Capabilities, ListenerId, Listeners};

/// Payload delivered to swipe subscribers: the position the phase ended at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeData {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeEventKind {
    SwipeStart,
    SwipeEnd,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Vector2 {
    x: f64,
    y: f64,
}

/// Tracks a gesture's start and end positions. The computed axis is
/// read-once: positions reset to zero after a successful `get_axis` so a
/// stale gesture can never be read twice.
#[derive(Default)]
pub struct SwipeHandler {
    listening: bool,
    start_pos: Vector2,
    end_pos: Vector2,
    start_listeners: Listeners<SwipeData>,
    end_listeners: Listeners<SwipeData>,
}

impl SwipeHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_available(caps: &Capabilities, settings: &Settings) -> bool {
        caps.touch || (caps.pointer && settings.scroll.swipe_scroll)
    }

    pub fn start_listen(&mut self) {
        if self.listening {
            return;
        }
        self.listening = true;
        debug!("SwipeHandler: swipe event listeners [started]");
    }

    pub fn stop_listen(&mut self) {
        if !self.listening {
            return;
        }
        self.start_listeners.clear();
        self.end_listeners.clear();
        self.listening = false;
        debug!("SwipeHandler: swipe event listeners [stopped]");
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn on(&mut self, kind: SwipeEventKind, callback: impl FnMut(&SwipeData) + 'static) -> ListenerId {
        debug!("SwipeHandler: event listener '{kind:?}' [added]");
        match kind {
            SwipeEventKind::SwipeStart => self.start_listeners.on(callback),
            SwipeEventKind::SwipeEnd => self.end_listeners.on(callback),
        }
    }

    pub fn off(&mut self, kind: SwipeEventKind, id: ListenerId) {
        match kind {
            SwipeEventKind::SwipeStart => self.start_listeners.off(id),
            SwipeEventKind::SwipeEnd => self.end_listeners.off(id),
        }
        debug!("SwipeHandler: event listener '{kind:?}' [removed]");
    }

    fn is_discarded(button: MouseButton, config: &SwipeConfig) -> bool {
        config.discarded_buttons.contains(&button)
    }

    /* -------- touch phases -------- */

    pub fn record_touch_start(&mut self, x: f64, y: f64) -> bool {
        if !self.listening {
            return false;
        }
        self.start_pos = Vector2 { x, y };
        self.start_listeners.notify(&SwipeData { x, y });
        true
    }

    pub fn record_touch_move(&mut self, x: f64, y: f64) -> bool {
        if !self.listening {
            return false;
        }
        self.end_pos = Vector2 { x, y };
        true
    }

    pub fn record_touch_end(&mut self, x: f64, y: f64) -> bool {
        if !self.listening {
            return false;
        }
        self.end_pos = Vector2 { x, y };
        self.end_listeners.notify(&SwipeData { x, y });
        true
    }

    /* -------- pointer phases -------- */

    pub fn record_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        button: MouseButton,
        config: &SwipeConfig,
    ) -> bool {
        if !self.listening {
            return false;
        }
        if !Self::is_discarded(button, config) {
            self.start_pos = Vector2 { x, y };
        }
        debug!(?button, "SwipeHandler: pressed mouse button on 'swipeStart'");
        self.start_listeners.notify(&SwipeData { x, y });
        true
    }

    pub fn record_pointer_move(
        &mut self,
        x: f64,
        y: f64,
        button: MouseButton,
        config: &SwipeConfig,
    ) -> bool {
        if !self.listening {
            return false;
        }
        self.end_pos = Vector2::default();
        if !Self::is_discarded(button, config) {
            self.end_pos = Vector2 { x, y };
        }
        true
    }

    pub fn record_pointer_up(
        &mut self,
        x: f64,
        y: f64,
        button: MouseButton,
        config: &SwipeConfig,
    ) -> bool {
        if !self.listening {
            return false;
        }
        if !Self::is_discarded(button, config) && (x != 0.0 || y != 0.0) {
            self.end_pos = Vector2 { x, y };
        }
        debug!(?button, "SwipeHandler: pressed mouse button on 'swipeEnd'");
        self.end_listeners.notify(&SwipeData { x, y });
        true
    }

    /// Resolve the gesture to a unit step. A displacement below the
    /// configured threshold, or on the non-dominant axis, yields 0. Reading
    /// a nontrivial gesture resets the stored positions.
    pub fn get_axis(&mut self, direction: Direction, config: &SwipeConfig) -> Axis {
        let diff_x = self.end_pos.x - self.start_pos.x;
        let diff_y = self.end_pos.y - self.start_pos.y;

        if diff_x == 0.0 && diff_y == 0.0 {
            return 0;
        }

        self.start_pos = Vector2::default();
        self.end_pos = Vector2::default();

        if diff_x.abs() > diff_y.abs() {
            if diff_x.abs() >= config.touch_threshold && direction == Direction::Horizontal {
                return if diff_x >= 0.0 { -1 } else { 1 };
            }
        } else if diff_y.abs() >= config.touch_threshold && direction == Direction::Vertical {
            return if diff_y >= 0.0 { -1 } else { 1 };
        }

        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SwipeConfig {
        SwipeConfig::default()
    }

    fn started() -> SwipeHandler {
        let mut handler = SwipeHandler::new();
        handler.start_listen();
        handler
    }

    #[test]
    fn test_vertical_swipe_over_threshold() {
        let mut handler = started();
        handler.record_touch_start(100.0, 100.0);
        handler.record_touch_end(100.0, 200.0);

        // Downward drag navigates to the previous section
        assert_eq!(handler.get_axis(Direction::Vertical, &config()), -1);
    }

    #[test]
    fn test_swipe_below_threshold_is_ignored() {
        let mut handler = started();
        handler.record_touch_start(100.0, 100.0);
        handler.record_touch_end(100.0, 105.0);

        assert_eq!(handler.get_axis(Direction::Vertical, &config()), 0);
    }

    #[test]
    fn test_axis_resets_after_read() {
        let mut handler = started();
        handler.record_touch_start(100.0, 100.0);
        handler.record_touch_end(100.0, 20.0);

        assert_eq!(handler.get_axis(Direction::Vertical, &config()), 1);
        // Positions were consumed; the same gesture cannot be read twice
        assert_eq!(handler.get_axis(Direction::Vertical, &config()), 0);
    }

    #[test]
    fn test_dominant_axis_wins() {
        let mut handler = started();
        handler.record_touch_start(0.0, 0.0);
        handler.record_touch_end(120.0, 40.0);

        // Horizontal displacement dominates; the vertical query sees nothing
        assert_eq!(handler.get_axis(Direction::Vertical, &config()), 0);

        handler.record_touch_start(0.0, 0.0);
        handler.record_touch_end(120.0, 40.0);
        assert_eq!(handler.get_axis(Direction::Horizontal, &config()), -1);
    }

    #[test]
    fn test_discarded_button_never_starts_a_swipe() {
        let mut handler = started();
        handler.record_pointer_down(50.0, 50.0, MouseButton::Right, &config());
        handler.record_pointer_up(50.0, 300.0, MouseButton::Right, &config());

        assert_eq!(handler.get_axis(Direction::Vertical, &config()), 0);
    }

    #[test]
    fn test_pointer_drag_swipe() {
        let mut handler = started();
        handler.record_pointer_down(50.0, 300.0, MouseButton::Left, &config());
        handler.record_pointer_move(50.0, 150.0, MouseButton::Left, &config());
        handler.record_pointer_up(50.0, 100.0, MouseButton::Left, &config());

        // Upward drag navigates to the next section
        assert_eq!(handler.get_axis(Direction::Vertical, &config()), 1);
    }
}
