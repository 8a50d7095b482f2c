//! Navigation engine: turns normalized input signals into page transitions.
//!
//! All qualifying events funnel through one debounce lock. The lock is
//! acquired before the overflow check runs, so an event whose navigation
//! ends up suppressed by an inner scrollable region still consumes the
//! lock window (source behavior, kept as-is). The keyboard
//! overflow-delegation path never reaches the lock at all.

use std::time::Instant;

use tracing::{debug, trace};

use crate::config::{Direction, Settings};
use crate::document::{Document, ElementId};
use crate::input::{Axis, InputHandlers, InputSignal};
use crate::page::SectionList;

#[derive(Default)]
pub struct NavigationEngine {
    lock_deadline: Option<Instant>,
}

impl NavigationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self, now: Instant) -> bool {
        self.lock_deadline.is_some_and(|deadline| now < deadline)
    }

    /// Acquire the debounce lock. A pending deadline is replaced, never
    /// extended alongside.
    fn lock(&mut self, now: Instant, settings: &Settings) {
        self.lock_deadline = Some(now + settings.scroll.unlock_timeout());
    }

    /// Entry point for one normalized signal.
    ///
    /// Key signals take a pre-route: presses targeting a text entry element
    /// are ignored outright, and when the current section's overflow region
    /// can still absorb the movement the keys scroll that region
    /// incrementally instead of navigating.
    pub fn handle_signal(
        &mut self,
        doc: &mut Document,
        sections: &mut SectionList,
        handlers: &mut InputHandlers,
        signal: &InputSignal,
        settings: &Settings,
        now: Instant,
    ) {
        if let InputSignal::Key { target, .. } = signal {
            if target.is_some_and(|t| is_text_entry(doc.tag(t))) {
                return;
            }

            let axis = handlers.keys.get_axis(Direction::Vertical, &settings.keybindings);
            if let Some(scrollable) = self.overflow_scroll_target(doc, sections, axis, settings) {
                handlers.keys.scroll_with_keys(
                    doc,
                    scrollable,
                    Direction::Vertical,
                    &settings.scroll,
                    &settings.keybindings,
                );
                return;
            }
        }

        self.handle_scroll(doc, sections, handlers, signal, settings, now);
    }

    fn handle_scroll(
        &mut self,
        doc: &mut Document,
        sections: &mut SectionList,
        handlers: &mut InputHandlers,
        signal: &InputSignal,
        settings: &Settings,
        now: Instant,
    ) {
        if self.locked(now) {
            trace!("NavigationEngine: event dropped, lock held");
            return;
        }
        self.lock(now, settings);

        let Some(current) = sections.current_section() else {
            return;
        };
        if !current.sliders().is_empty() {
            Self::handle_slider(doc, sections, handlers, signal, settings);
        }

        let axis = Self::event_axis(handlers, signal, Direction::Vertical, settings);
        if axis > 0 {
            if self.overflow_scroll_target(doc, sections, 1, settings).is_none() {
                sections.scroll_next(doc, settings);
            } else {
                debug!("NavigationEngine: section navigation suppressed by overflow region");
            }
        } else if axis < 0 {
            if self.overflow_scroll_target(doc, sections, -1, settings).is_none() {
                sections.scroll_prev(doc, settings);
            } else {
                debug!("NavigationEngine: section navigation suppressed by overflow region");
            }
        }
    }

    /// Page the current section's first slider. Wheel signals never page a
    /// slider; only keys and swipes do.
    fn handle_slider(
        doc: &mut Document,
        sections: &mut SectionList,
        handlers: &mut InputHandlers,
        signal: &InputSignal,
        settings: &Settings,
    ) {
        if matches!(signal, InputSignal::Wheel) {
            return;
        }

        let axis = Self::event_axis(handlers, signal, Direction::Horizontal, settings);
        let Some(slider) = sections
            .current_section_mut()
            .and_then(|s| s.sliders_mut().first_mut())
        else {
            return;
        };

        if axis > 0 {
            slider.next(doc, settings);
        } else if axis < 0 {
            slider.prev(doc, settings);
        }
    }

    /// Resolve the signal to an axis by asking the handler that produced it.
    /// Swipe reads consume the stored gesture.
    fn event_axis(
        handlers: &mut InputHandlers,
        signal: &InputSignal,
        direction: Direction,
        settings: &Settings,
    ) -> Axis {
        match signal {
            InputSignal::Wheel => handlers.wheel.get_axis(direction),
            InputSignal::Key { .. } => handlers.keys.get_axis(direction, &settings.keybindings),
            InputSignal::Swipe => handlers.swipe.get_axis(direction, &settings.swipe),
        }
    }

    /// The current section's overflow region, when overflow scrolling is
    /// enabled and the region can still move in the given axis direction.
    fn overflow_scroll_target(
        &self,
        doc: &Document,
        sections: &SectionList,
        axis: Axis,
        settings: &Settings,
    ) -> Option<ElementId> {
        if !settings.scroll.overflow_scroll {
            return None;
        }

        let scrollable = sections
            .current_section()
            .and_then(|s| s.overflow_region(doc, settings))?;
        if !doc.is_scrollable(scrollable) {
            return None;
        }

        let absorbs = match axis {
            -1 => !doc.reached_scroll_start(scrollable, Direction::Vertical),
            1 => !doc.reached_scroll_end(scrollable, Direction::Vertical),
            _ => false,
        };
        absorbs.then_some(scrollable)
    }
}

fn is_text_entry(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea")
}
