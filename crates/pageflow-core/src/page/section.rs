//! One full-viewport panel and the sliders it owns.

use crate::config::Settings;
use crate::document::{Document, ElementId};
use crate::error::Result;

use super::SliderList;

pub struct Section {
    elem: ElementId,
    sliders: SliderList,
}

impl Section {
    /// Adopt an existing element as a section: discover its sliders, apply
    /// the section marker class and, when overflow scrolling is enabled,
    /// wrap the section's children in an overflow region.
    pub fn new(doc: &mut Document, elem: ElementId, settings: &Settings) -> Result<Self> {
        let sliders = SliderList::discover(doc, elem, settings)?;

        doc.add_class(elem, &settings.classes.section);
        if settings.scroll.overflow_scroll {
            let wrapper = doc.wrap_children(elem, "div");
            doc.add_class(wrapper, &settings.classes.overflow);
        }

        Ok(Self { elem, sliders })
    }

    pub fn element(&self) -> ElementId {
        self.elem
    }

    pub fn sliders(&self) -> &SliderList {
        &self.sliders
    }

    pub fn sliders_mut(&mut self) -> &mut SliderList {
        &mut self.sliders
    }

    /// The overflow region wrapped around this section's content, if one
    /// was created.
    pub fn overflow_region(&self, doc: &Document, settings: &Settings) -> Option<ElementId> {
        doc.descendants_with_class(self.elem, &settings.classes.overflow)
            .into_iter()
            .next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_marks_element_and_discovers_sliders() {
        let mut doc = Document::new();
        let settings = Settings::default();
        let body = doc.body();
        let elem = doc.create_element("div");
        doc.append_child(body, elem);

        let slide = doc.create_element("div");
        doc.add_class(slide, &settings.classes.slide);
        doc.append_child(elem, slide);

        let section = Section::new(&mut doc, elem, &settings).unwrap();
        assert!(doc.has_class(elem, &settings.classes.section));
        assert_eq!(section.sliders().len(), 1);
        assert!(section.overflow_region(&doc, &settings).is_none());
    }

    #[test]
    fn test_overflow_wrapper_created_when_enabled() {
        let mut doc = Document::new();
        let mut settings = Settings::default();
        settings.scroll.overflow_scroll = true;

        let body = doc.body();
        let elem = doc.create_element("div");
        doc.append_child(body, elem);
        let content = doc.create_element("p");
        doc.append_child(elem, content);

        let section = Section::new(&mut doc, elem, &settings).unwrap();
        let region = section.overflow_region(&doc, &settings).unwrap();
        assert_eq!(doc.parent(region), Some(elem));
        assert_eq!(doc.children(region), &[content]);
    }
}
