//! Wheel input handler.

use tracing::debug;

use crate::config::{Direction, Settings};

use super::{Axis, Capabilities, ListenerId, Listeners};

/// Payload delivered to wheel subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelData {
    pub delta_x: f64,
    pub delta_y: f64,
}

/// The handler's single event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelEventKind {
    Wheel,
}

/// Records the sign of the most recent wheel deltas. Once a wheel event has
/// fired, the per-direction sign is always ±1, never 0.
#[derive(Default)]
pub struct WheelHandler {
    listening: bool,
    direction_x: Axis,
    direction_y: Axis,
    wheel_listeners: Listeners<WheelData>,
}

impl WheelHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_available(caps: &Capabilities, _settings: &Settings) -> bool {
        caps.wheel
    }

    pub fn start_listen(&mut self) {
        if self.listening {
            return;
        }
        self.listening = true;
        debug!("WheelHandler: wheel event listeners [started]");
    }

    pub fn stop_listen(&mut self) {
        if !self.listening {
            return;
        }
        self.listening = false;
        debug!("WheelHandler: wheel event listeners [stopped]");
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn on(&mut self, kind: WheelEventKind, callback: impl FnMut(&WheelData) + 'static) -> ListenerId {
        let WheelEventKind::Wheel = kind;
        debug!("WheelHandler: event listener 'wheel' [added]");
        self.wheel_listeners.on(callback)
    }

    pub fn off(&mut self, kind: WheelEventKind, id: ListenerId) {
        let WheelEventKind::Wheel = kind;
        self.wheel_listeners.off(id);
        debug!("WheelHandler: event listener 'wheel' [removed]");
    }

    /// Capture a physical wheel event. Returns whether the event was taken
    /// (the handler ignores events while stopped).
    pub fn record(&mut self, delta_x: f64, delta_y: f64) -> bool {
        if !self.listening {
            return false;
        }

        self.direction_y = if delta_y > 0.0 { 1 } else { -1 };
        self.direction_x = if delta_x > 0.0 { 1 } else { -1 };

        self.wheel_listeners.notify(&WheelData { delta_x, delta_y });
        true
    }

    pub fn get_axis(&self, direction: Direction) -> Axis {
        if self.direction_x == 0 && self.direction_y == 0 {
            return 0;
        }

        match direction {
            Direction::Vertical => self.direction_y,
            Direction::Horizontal => self.direction_x,
        }
    }
}
