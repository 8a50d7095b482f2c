//! A single horizontal sequence of slides within one section.

use crate::config::Settings;
use crate::document::{Document, ElementId};
use crate::error::{invariant, Result};

pub struct Slider {
    elem: ElementId,
    slides: Vec<ElementId>,
    current_index: usize,
}

impl Slider {
    /// Build a slider from its slides, resolving or synthesizing the
    /// wrapping container. Not constructible with zero slides: container
    /// resolution needs at least one slide present.
    pub fn from_slides(
        doc: &mut Document,
        slides: Vec<ElementId>,
        settings: &Settings,
    ) -> Result<Self> {
        let first = slides
            .first()
            .copied()
            .ok_or_else(|| invariant("Slider requires at least one slide"))?;

        let elem = match doc.parent(first) {
            Some(parent) if doc.has_class(parent, &settings.classes.slider) => parent,
            old_parent => {
                let wrapper = doc.wrap_elements(&slides, "div");
                if let Some(parent) = old_parent {
                    doc.append_child(parent, wrapper);
                }
                wrapper
            }
        };

        let slider = Self {
            elem,
            slides,
            current_index: 0,
        };
        slider.apply_classes(doc, settings);
        Ok(slider)
    }

    fn apply_classes(&self, doc: &mut Document, settings: &Settings) {
        doc.add_class(self.elem, &settings.classes.slider);
        for slide in &self.slides {
            doc.add_class(*slide, &settings.classes.slide);
        }
    }

    /// The owned container element.
    pub fn element(&self) -> ElementId {
        self.elem
    }

    pub fn slides(&self) -> &[ElementId] {
        &self.slides
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn next(&mut self, doc: &mut Document, settings: &Settings) {
        // A slider can be emptied through `remove` after construction
        if self.slides.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.slides.len();
        self.scroll_into_view(doc, self.current_index, settings);
    }

    pub fn prev(&mut self, doc: &mut Document, settings: &Settings) {
        let len = self.slides.len();
        if len == 0 {
            return;
        }
        self.current_index = (self.current_index + len - 1) % len;
        self.scroll_into_view(doc, self.current_index, settings);
    }

    /// Out-of-range indices are a silent no-op. Scrolls based on the
    /// pre-update index before assigning the new one (source behavior,
    /// kept as-is).
    pub fn go_to_slide(&mut self, doc: &mut Document, index: usize, settings: &Settings) {
        if index >= self.slides.len() {
            return;
        }

        self.scroll_into_view(doc, self.current_index, settings);
        self.current_index = index;
    }

    /// Structural insertion only; container resolution does not re-run.
    pub fn insert(&mut self, pos: usize, slide: ElementId) {
        let pos = pos.min(self.slides.len());
        self.slides.insert(pos, slide);
    }

    /// Structural removal by element identity.
    pub fn remove(&mut self, slide: ElementId) {
        if self.slides.is_empty() {
            return;
        }
        if let Some(idx) = self.slides.iter().position(|s| *s == slide) {
            self.slides.remove(idx);
        }
    }

    fn scroll_into_view(&self, doc: &mut Document, index: usize, settings: &Settings) {
        if index >= self.slides.len() {
            return;
        }
        doc.scroll_into_view(self.slides[index], settings.scroll.behavior);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ScrollCommand;

    fn setup(n: usize) -> (Document, Settings, Vec<ElementId>, ElementId) {
        let mut doc = Document::new();
        let settings = Settings::default();
        let body = doc.body();
        let section = doc.create_element("div");
        doc.append_child(body, section);

        let slides: Vec<ElementId> = (0..n)
            .map(|_| {
                let slide = doc.create_element("div");
                doc.append_child(section, slide);
                slide
            })
            .collect();
        (doc, settings, slides, section)
    }

    #[test]
    fn test_zero_slides_not_constructible() {
        let mut doc = Document::new();
        let settings = Settings::default();
        assert!(Slider::from_slides(&mut doc, Vec::new(), &settings).is_err());
    }

    #[test]
    fn test_construction_synthesizes_wrapper() {
        let (mut doc, settings, slides, section) = setup(3);
        let slider = Slider::from_slides(&mut doc, slides.clone(), &settings).unwrap();

        let wrapper = slider.element();
        assert_ne!(wrapper, section);
        assert_eq!(doc.parent(wrapper), Some(section));
        assert_eq!(doc.children(wrapper), slides.as_slice());
        assert!(doc.has_class(wrapper, &settings.classes.slider));
        assert!(slides.iter().all(|s| doc.has_class(*s, &settings.classes.slide)));
    }

    #[test]
    fn test_construction_reuses_marked_parent() {
        let (mut doc, settings, slides, section) = setup(2);
        doc.add_class(section, &settings.classes.slider);

        let slider = Slider::from_slides(&mut doc, slides, &settings).unwrap();
        assert_eq!(slider.element(), section);
    }

    #[test]
    fn test_next_wraps_around() {
        let (mut doc, settings, slides, _) = setup(3);
        let n = slides.len();
        let mut slider = Slider::from_slides(&mut doc, slides, &settings).unwrap();

        let start = slider.current_index();
        for _ in 0..n {
            slider.next(&mut doc, &settings);
        }
        assert_eq!(slider.current_index(), start);
    }

    #[test]
    fn test_prev_from_zero_wraps_to_last() {
        let (mut doc, settings, slides, _) = setup(3);
        let mut slider = Slider::from_slides(&mut doc, slides, &settings).unwrap();

        slider.prev(&mut doc, &settings);
        assert_eq!(slider.current_index(), 2);
    }

    #[test]
    fn test_go_to_slide_out_of_range_is_noop() {
        let (mut doc, settings, slides, _) = setup(2);
        let mut slider = Slider::from_slides(&mut doc, slides, &settings).unwrap();
        doc.take_scroll_commands();

        slider.go_to_slide(&mut doc, 5, &settings);
        assert_eq!(slider.current_index(), 0);
        assert!(doc.take_scroll_commands().is_empty());
    }

    #[test]
    fn test_go_to_slide_scrolls_pre_update_index() {
        let (mut doc, settings, slides, _) = setup(3);
        let old_first = slides[0];
        let mut slider = Slider::from_slides(&mut doc, slides, &settings).unwrap();
        doc.take_scroll_commands();

        slider.go_to_slide(&mut doc, 2, &settings);
        assert_eq!(slider.current_index(), 2);

        let commands = doc.take_scroll_commands();
        assert_eq!(commands.len(), 1);
        // The visual scroll targets the slide that was current before the
        // index moved.
        assert!(matches!(
            commands[0],
            ScrollCommand::IntoView { target, .. } if target == old_first
        ));
    }

    #[test]
    fn test_next_and_prev_on_emptied_slider_are_noops() {
        let (mut doc, settings, slides, _) = setup(1);
        let mut slider = Slider::from_slides(&mut doc, slides.clone(), &settings).unwrap();
        slider.remove(slides[0]);
        doc.take_scroll_commands();

        slider.next(&mut doc, &settings);
        slider.prev(&mut doc, &settings);
        assert_eq!(slider.current_index(), 0);
        assert!(doc.take_scroll_commands().is_empty());
    }

    #[test]
    fn test_insert_and_remove_are_structural_only() {
        let (mut doc, settings, slides, _) = setup(2);
        let extra = doc.create_element("div");
        let mut slider = Slider::from_slides(&mut doc, slides.clone(), &settings).unwrap();

        slider.insert(1, extra);
        assert_eq!(slider.slides(), &[slides[0], extra, slides[1]]);

        slider.remove(extra);
        assert_eq!(slider.slides(), slides.as_slice());

        slider.remove(extra); // absent element: no-op
        assert_eq!(slider.slides().len(), 2);
    }
}
