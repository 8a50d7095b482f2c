//! Scroll geometry probes and element-level scrolling.

use crate::config::{Direction, ScrollBehavior};

use super::{Document, ElementId};

/// Host-owned layout state for one element. Units are pixels (or rows, for
/// a terminal host — the core never interprets them).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    pub scroll_top: u32,
    pub scroll_left: u32,
    pub scroll_height: u32,
    pub scroll_width: u32,
    pub client_height: u32,
    pub client_width: u32,
}

/// Visual scroll work for the host to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollCommand {
    /// Bring `target` into view, block-start aligned.
    IntoView {
        target: ElementId,
        behavior: ScrollBehavior,
    },
    /// Scroll `target`'s own content to the given offsets.
    ScrollTo {
        target: ElementId,
        top: Option<u32>,
        left: Option<u32>,
        behavior: ScrollBehavior,
    },
}

impl Document {
    /// An element is scrollable when its content exceeds its client box in
    /// either dimension.
    pub fn is_scrollable(&self, id: ElementId) -> bool {
        let g = self.geometry(id);
        g.scroll_height > g.client_height || g.scroll_width > g.client_width
    }

    pub fn reached_scroll_start(&self, id: ElementId, direction: Direction) -> bool {
        let g = self.geometry(id);
        match direction {
            Direction::Vertical => g.scroll_top == 0,
            Direction::Horizontal => g.scroll_left == 0,
        }
    }

    pub fn reached_scroll_end(&self, id: ElementId, direction: Direction) -> bool {
        let g = self.geometry(id);
        match direction {
            Direction::Vertical => g.scroll_top + g.client_height >= g.scroll_height,
            Direction::Horizontal => g.scroll_left + g.client_width >= g.scroll_width,
        }
    }

    /// Scroll an element's own content by a signed delta, clamped to its
    /// extent. Updates the geometry immediately (so boundary probes observe
    /// the new offset) and queues the visual work for the host.
    pub fn scroll_element_by(
        &mut self,
        id: ElementId,
        direction: Direction,
        delta: i64,
        behavior: ScrollBehavior,
    ) {
        let g = *self.geometry(id);
        match direction {
            Direction::Vertical => {
                let max = g.scroll_height.saturating_sub(g.client_height);
                let top = clamp_offset(g.scroll_top, delta, max);
                self.geometry_mut(id).scroll_top = top;
                self.push_scroll_command(ScrollCommand::ScrollTo {
                    target: id,
                    top: Some(top),
                    left: None,
                    behavior,
                });
            }
            Direction::Horizontal => {
                let max = g.scroll_width.saturating_sub(g.client_width);
                let left = clamp_offset(g.scroll_left, delta, max);
                self.geometry_mut(id).scroll_left = left;
                self.push_scroll_command(ScrollCommand::ScrollTo {
                    target: id,
                    top: None,
                    left: Some(left),
                    behavior,
                });
            }
        }
    }
}

fn clamp_offset(current: u32, delta: i64, max: u32) -> u32 {
    (current as i64 + delta).clamp(0, max as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrollable_doc() -> (Document, ElementId) {
        let mut doc = Document::new();
        let body = doc.body();
        let elem = doc.create_element("div");
        doc.append_child(body, elem);
        *doc.geometry_mut(elem) = Geometry {
            scroll_top: 0,
            scroll_left: 0,
            scroll_height: 500,
            scroll_width: 100,
            client_height: 100,
            client_width: 100,
        };
        (doc, elem)
    }

    #[test]
    fn test_scrollable_probes() {
        let (doc, elem) = scrollable_doc();
        assert!(doc.is_scrollable(elem));
        assert!(doc.reached_scroll_start(elem, Direction::Vertical));
        assert!(!doc.reached_scroll_end(elem, Direction::Vertical));
    }

    #[test]
    fn test_scroll_by_clamps_to_extent() {
        let (mut doc, elem) = scrollable_doc();
        doc.scroll_element_by(elem, Direction::Vertical, 1000, ScrollBehavior::Instant);
        assert_eq!(doc.geometry(elem).scroll_top, 400);
        assert!(doc.reached_scroll_end(elem, Direction::Vertical));

        doc.scroll_element_by(elem, Direction::Vertical, -5000, ScrollBehavior::Instant);
        assert_eq!(doc.geometry(elem).scroll_top, 0);

        let commands = doc.take_scroll_commands();
        assert_eq!(commands.len(), 2);
        assert!(matches!(
            commands[0],
            ScrollCommand::ScrollTo { top: Some(400), .. }
        ));
    }
}
