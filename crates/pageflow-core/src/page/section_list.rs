//! The page-wide ordered sequence of sections.
//!
//! Owns the single current index and keeps the "active" marker class on
//! exactly one section element at all times.

use tracing::debug;

use crate::config::{Settings, ACTIVE_CLASS};
use crate::document::{Document, ElementId};
use crate::error::Result;

use super::Section;

pub struct SectionList {
    sections: Vec<Section>,
    current_index: usize,
}

impl SectionList {
    /// Build one section per discovered element, in document order. A
    /// pre-existing "active" marker on one of them is adopted as the
    /// initial position; otherwise the first section starts active. The
    /// resolved section is then marked and scrolled into view.
    pub fn new(
        doc: &mut Document,
        section_elems: Vec<ElementId>,
        settings: &Settings,
    ) -> Result<Self> {
        let mut current_index = 0;
        let mut sections = Vec::with_capacity(section_elems.len());

        for (idx, elem) in section_elems.into_iter().enumerate() {
            if doc.has_class(elem, ACTIVE_CLASS) {
                current_index = idx;
            }
            sections.push(Section::new(doc, elem, settings)?);
        }

        let mut list = Self {
            sections,
            current_index,
        };
        if let Some(current) = list.sections.get(list.current_index) {
            doc.add_class(current.element(), ACTIVE_CLASS);
            list.scroll_to_section(doc, list.current_index, settings);
        }
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn current_section(&self) -> Option<&Section> {
        self.sections.get(self.current_index)
    }

    pub fn current_section_mut(&mut self) -> Option<&mut Section> {
        self.sections.get_mut(self.current_index)
    }

    /// Find the section owning a given element.
    pub fn section_for_element_mut(&mut self, elem: ElementId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.element() == elem)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Section> {
        self.sections.iter_mut()
    }

    pub fn scroll_next(&mut self, doc: &mut Document, settings: &Settings) {
        if self.sections.is_empty() {
            return;
        }
        let next = (self.current_index + 1) % self.sections.len();
        self.scroll_into_view(doc, next, settings);
        self.current_index = next;
        debug!(index = next, "SectionList: scrolled to next section");
    }

    pub fn scroll_prev(&mut self, doc: &mut Document, settings: &Settings) {
        if self.sections.is_empty() {
            return;
        }
        let len = self.sections.len();
        let prev = (self.current_index + len - 1) % len;
        self.scroll_into_view(doc, prev, settings);
        self.current_index = prev;
        debug!(index = prev, "SectionList: scrolled to previous section");
    }

    /// Jump directly to an index. Out-of-range indices are a silent no-op.
    pub fn scroll_to_section(&mut self, doc: &mut Document, index: usize, settings: &Settings) {
        if index >= self.sections.len() {
            return;
        }
        self.scroll_into_view(doc, index, settings);
        self.current_index = index;
    }

    /// Structural insertion; the current index is not adjusted.
    pub fn insert(
        &mut self,
        doc: &mut Document,
        pos: usize,
        elem: ElementId,
        settings: &Settings,
    ) -> Result<()> {
        let section = Section::new(doc, elem, settings)?;
        let pos = pos.min(self.sections.len());
        self.sections.insert(pos, section);
        Ok(())
    }

    /// Structural removal by element identity; the current index is not
    /// adjusted.
    pub fn remove(&mut self, elem: ElementId) {
        if self.sections.is_empty() {
            return;
        }
        if let Some(idx) = self.sections.iter().position(|s| s.element() == elem) {
            self.sections.remove(idx);
        }
    }

    fn scroll_into_view(&mut self, doc: &mut Document, index: usize, settings: &Settings) {
        if index >= self.sections.len() {
            return;
        }

        doc.scroll_into_view(self.sections[index].element(), settings.scroll.behavior);

        if let Some(current) = self.sections.get(self.current_index) {
            doc.remove_class(current.element(), ACTIVE_CLASS);
        }
        doc.add_class(self.sections[index].element(), ACTIVE_CLASS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(n: usize) -> (Document, Settings, Vec<ElementId>) {
        let mut doc = Document::new();
        let settings = Settings::default();
        let body = doc.body();
        let elems: Vec<ElementId> = (0..n)
            .map(|_| {
                let elem = doc.create_element("div");
                doc.append_child(body, elem);
                elem
            })
            .collect();
        (doc, settings, elems)
    }

    fn active_count(doc: &Document, elems: &[ElementId]) -> usize {
        elems.iter().filter(|e| doc.has_class(**e, ACTIVE_CLASS)).count()
    }

    #[test]
    fn test_construction_defaults_to_first_section() {
        let (mut doc, settings, elems) = setup(3);
        let list = SectionList::new(&mut doc, elems.clone(), &settings).unwrap();

        assert_eq!(list.current_index(), 0);
        assert!(doc.has_class(elems[0], ACTIVE_CLASS));
        assert_eq!(active_count(&doc, &elems), 1);
    }

    #[test]
    fn test_construction_adopts_premarked_section() {
        let (mut doc, settings, elems) = setup(3);
        doc.add_class(elems[1], ACTIVE_CLASS);

        let list = SectionList::new(&mut doc, elems.clone(), &settings).unwrap();
        assert_eq!(list.current_index(), 1);
        assert_eq!(
            list.current_section().map(Section::element),
            Some(elems[1])
        );
        assert_eq!(active_count(&doc, &elems), 1);
    }

    #[test]
    fn test_next_then_prev_round_trips() {
        for n in 1..=4 {
            let (mut doc, settings, elems) = setup(n);
            let mut list = SectionList::new(&mut doc, elems.clone(), &settings).unwrap();

            let start = list.current_index();
            list.scroll_next(&mut doc, &settings);
            assert_eq!(active_count(&doc, &elems), 1);
            list.scroll_prev(&mut doc, &settings);

            assert_eq!(list.current_index(), start);
            assert_eq!(active_count(&doc, &elems), 1);
            assert!(doc.has_class(elems[start], ACTIVE_CLASS));
        }
    }

    #[test]
    fn test_next_wraps_from_last_to_first() {
        let (mut doc, settings, elems) = setup(2);
        let mut list = SectionList::new(&mut doc, elems.clone(), &settings).unwrap();

        list.scroll_next(&mut doc, &settings);
        assert_eq!(list.current_index(), 1);
        list.scroll_next(&mut doc, &settings);
        assert_eq!(list.current_index(), 0);
        assert!(doc.has_class(elems[0], ACTIVE_CLASS));
    }

    #[test]
    fn test_scroll_to_section_out_of_range_is_noop() {
        let (mut doc, settings, elems) = setup(2);
        let mut list = SectionList::new(&mut doc, elems.clone(), &settings).unwrap();

        list.scroll_to_section(&mut doc, 9, &settings);
        assert_eq!(list.current_index(), 0);
        assert!(doc.has_class(elems[0], ACTIVE_CLASS));
    }

    #[test]
    fn test_single_section_navigation_is_stable() {
        let (mut doc, settings, elems) = setup(1);
        let mut list = SectionList::new(&mut doc, elems.clone(), &settings).unwrap();

        list.scroll_next(&mut doc, &settings);
        list.scroll_prev(&mut doc, &settings);
        assert_eq!(list.current_index(), 0);
        assert_eq!(active_count(&doc, &elems), 1);
    }

    #[test]
    fn test_insert_and_remove_are_structural() {
        let (mut doc, settings, elems) = setup(2);
        let mut list = SectionList::new(&mut doc, elems.clone(), &settings).unwrap();

        let body = doc.body();
        let fresh = doc.create_element("div");
        doc.append_child(body, fresh);
        list.insert(&mut doc, 1, fresh, &settings).unwrap();

        assert_eq!(list.len(), 3);
        assert_eq!(list.get(1).map(Section::element), Some(fresh));

        list.remove(fresh);
        assert_eq!(list.len(), 2);
    }
}
