//! Ordered collection of sliders scoped to one section.

use crate::config::Settings;
use crate::document::{Document, ElementId};
use crate::error::Result;

use super::Slider;

#[derive(Default)]
pub struct SliderList {
    sliders: Vec<Slider>,
}

impl SliderList {
    /// Discover the sliders already present under a section element.
    ///
    /// Bare slides (marked with the slide class but not yet wrapped in a
    /// slider container) are gathered into one synthesized slider; the check
    /// inspects only the first slide's parent, so a section is expected to
    /// hold either wrapped or bare slides, not a mix.
    pub fn discover(doc: &mut Document, section: ElementId, settings: &Settings) -> Result<Self> {
        let mut sliders = Vec::new();

        let containers = doc.descendants_with_class(section, &settings.classes.slider);
        let alone_slides = doc.descendants_with_class(section, &settings.classes.slide);

        if !alone_slides.is_empty() {
            let should_add = match alone_slides
                .iter()
                .find_map(|slide| doc.parent(*slide))
            {
                Some(parent) => !doc.has_class(parent, &settings.classes.slider),
                None => true,
            };

            if should_add {
                sliders.push(Slider::from_slides(doc, alone_slides, settings)?);
            }
        }

        for container in containers {
            let slides = doc.descendants_with_class(container, &settings.classes.slide);
            sliders.push(Slider::from_slides(doc, slides, settings)?);
        }

        Ok(Self { sliders })
    }

    pub fn len(&self) -> usize {
        self.sliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sliders.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slider> {
        self.sliders.get(index)
    }

    /// The first slider, the one page-step navigation drives.
    pub fn first_mut(&mut self) -> Option<&mut Slider> {
        self.sliders.first_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slider> {
        self.sliders.iter()
    }

    /// Build a slider from the given container element and place it at
    /// `pos` (clamped to the list length).
    pub fn insert(
        &mut self,
        doc: &mut Document,
        pos: usize,
        container: ElementId,
        settings: &Settings,
    ) -> Result<()> {
        let slides = doc.descendants_with_class(container, &settings.classes.slide);
        let slider = Slider::from_slides(doc, slides, settings)?;

        let pos = pos.min(self.sliders.len());
        self.sliders.insert(pos, slider);
        Ok(())
    }

    /// Remove the slider owning `container`. Unknown elements are a no-op.
    pub fn remove(&mut self, container: ElementId) {
        if self.sliders.is_empty() {
            return;
        }
        if let Some(idx) = self.sliders.iter().position(|s| s.element() == container) {
            self.sliders.remove(idx);
        }
    }
}
