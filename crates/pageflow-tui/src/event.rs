//! Terminal event translation.
//!
//! Polls crossterm and maps its events onto the host events the core
//! consumes. Key names follow the browser convention ("ArrowUp", "PageDown",
//! plain characters) so the configured keybindings read the same in every
//! host.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton as CtMouseButton,
    MouseEvent, MouseEventKind,
};
use pageflow_core::config::MouseButton;
use pageflow_core::HostEvent;

/// One scroll tick of a terminal mouse wheel, in notional pixels.
const WHEEL_STEP: f64 = 3.0;

#[derive(Debug)]
pub enum AppEvent {
    /// An event the navigation core consumes.
    Host(HostEvent),
    Resize(u16, u16),
    Quit,
    /// Poll timeout elapsed with no input; used to advance animations.
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event.
    pub fn next(&self) -> Result<Option<AppEvent>> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Only key presses; crossterm delivers release events on
                // some terminals and the core synthesizes its own releases
                Event::Key(key) if key.kind == KeyEventKind::Press => Ok(translate_key(key)),
                Event::Mouse(mouse) => Ok(translate_mouse(mouse)),
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

fn translate_key(key: KeyEvent) -> Option<AppEvent> {
    let ctrl_c =
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl_c || key.code == KeyCode::Char('q') || key.code == KeyCode::Esc {
        return Some(AppEvent::Quit);
    }

    key_name(key.code).map(|key| AppEvent::Host(HostEvent::KeyDown { key, target: None }))
}

/// Browser-convention name for a terminal key, when one exists.
pub fn key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Up => Some("ArrowUp".to_string()),
        KeyCode::Down => Some("ArrowDown".to_string()),
        KeyCode::Left => Some("ArrowLeft".to_string()),
        KeyCode::Right => Some("ArrowRight".to_string()),
        KeyCode::PageUp => Some("PageUp".to_string()),
        KeyCode::PageDown => Some("PageDown".to_string()),
        KeyCode::Home => Some("Home".to_string()),
        KeyCode::End => Some("End".to_string()),
        KeyCode::Char(c) => Some(c.to_string()),
        _ => None,
    }
}

fn translate_mouse(mouse: MouseEvent) -> Option<AppEvent> {
    let x = f64::from(mouse.column);
    let y = f64::from(mouse.row);

    let host = match mouse.kind {
        MouseEventKind::ScrollDown => HostEvent::Wheel { delta_x: 0.0, delta_y: WHEEL_STEP },
        MouseEventKind::ScrollUp => HostEvent::Wheel { delta_x: 0.0, delta_y: -WHEEL_STEP },
        MouseEventKind::ScrollRight => HostEvent::Wheel { delta_x: WHEEL_STEP, delta_y: 0.0 },
        MouseEventKind::ScrollLeft => HostEvent::Wheel { delta_x: -WHEEL_STEP, delta_y: 0.0 },
        MouseEventKind::Down(b) => HostEvent::PointerDown { x, y, button: button_of(b) },
        MouseEventKind::Drag(b) => HostEvent::PointerMove { x, y, button: button_of(b) },
        MouseEventKind::Up(b) => HostEvent::PointerUp { x, y, button: button_of(b) },
        MouseEventKind::Moved => return None,
    };
    Some(AppEvent::Host(host))
}

fn button_of(button: CtMouseButton) -> MouseButton {
    match button {
        CtMouseButton::Left => MouseButton::Left,
        CtMouseButton::Middle => MouseButton::Middle,
        CtMouseButton::Right => MouseButton::Right,
    }
}
