//! Document mutation watcher.
//!
//! Drains the document's mutation journal and republishes the records that
//! concern one of the three marker classes (section, slider wrapper, slide)
//! as classified added/removed/changed events.

use tracing::debug;

use crate::config::Settings;
use crate::document::{Document, ElementId, MutationRecord};
use crate::error::{Error, Result};

use super::{ListenerId, Listeners};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    Section,
    Slider,
    Slide,
    Other,
}

/// Classified mutation delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverEvent {
    pub kind: ObserverEventKind,
    pub target_type: TargetType,
    pub element: ElementId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverEventKind {
    Added,
    Removed,
    Changed,
}

#[derive(Default)]
pub struct MutationWatcher {
    active: bool,
    added_listeners: Listeners<ObserverEvent>,
    removed_listeners: Listeners<ObserverEvent>,
    changed_listeners: Listeners<ObserverEvent>,
}

impl MutationWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing. Requires the root container to exist; a missing root
    /// is a fatal configuration error. Only mutations recorded after this
    /// call are observed.
    pub fn start_listen(&mut self, doc: &mut Document, settings: &Settings) -> Result<()> {
        if self.active {
            return Ok(());
        }

        let root_id = &settings.classes.root_id;
        if doc.element_by_id_attr(root_id).is_none() {
            tracing::error!("MutationWatcher: root element '#{root_id}' not found");
            return Err(Error::RootNotFound(root_id.clone()));
        }

        // Observation starts now; discard anything recorded earlier.
        doc.take_mutations();
        self.active = true;
        debug!("MutationWatcher: listeners [started]");
        Ok(())
    }

    pub fn stop_listen(&mut self) {
        if !self.active {
            return;
        }
        self.added_listeners.clear();
        self.removed_listeners.clear();
        self.changed_listeners.clear();
        self.active = false;
        debug!("MutationWatcher: listeners [stopped]");
    }

    pub fn is_listening(&self) -> bool {
        self.active
    }

    pub fn on(
        &mut self,
        kind: ObserverEventKind,
        callback: impl FnMut(&ObserverEvent) + 'static,
    ) -> ListenerId {
        debug!("MutationWatcher: event listener '{kind:?}' [added]");
        match kind {
            ObserverEventKind::Added => self.added_listeners.on(callback),
            ObserverEventKind::Removed => self.removed_listeners.on(callback),
            ObserverEventKind::Changed => self.changed_listeners.on(callback),
        }
    }

    pub fn off(&mut self, kind: ObserverEventKind, id: ListenerId) {
        match kind {
            ObserverEventKind::Added => self.added_listeners.off(id),
            ObserverEventKind::Removed => self.removed_listeners.off(id),
            ObserverEventKind::Changed => self.changed_listeners.off(id),
        }
        debug!("MutationWatcher: event listener '{kind:?}' [removed]");
    }

    /// Drain the journal, notify subscribers in order, and return the
    /// classified events for the caller's own wiring.
    pub fn drain(&mut self, doc: &mut Document, settings: &Settings) -> Vec<ObserverEvent> {
        if !self.active {
            return Vec::new();
        }

        let mut events = Vec::new();
        for record in doc.take_mutations() {
            let element = record.target();
            if !is_observable(doc, element, settings) {
                continue;
            }

            let kind = match record {
                MutationRecord::ChildAdded { .. } => ObserverEventKind::Added,
                MutationRecord::ChildRemoved { .. } => ObserverEventKind::Removed,
                MutationRecord::ClassChanged { .. } => ObserverEventKind::Changed,
            };
            let event = ObserverEvent {
                kind,
                target_type: classify(doc, element, settings),
                element,
            };

            match kind {
                ObserverEventKind::Added => self.added_listeners.notify(&event),
                ObserverEventKind::Removed => self.removed_listeners.notify(&event),
                ObserverEventKind::Changed => self.changed_listeners.notify(&event),
            }
            events.push(event);
        }

        events
    }
}

fn is_observable(doc: &Document, element: ElementId, settings: &Settings) -> bool {
    let classes = &settings.classes;
    [&classes.section, &classes.slider, &classes.slide]
        .iter()
        .any(|class| doc.has_class(element, class))
}

fn classify(doc: &Document, element: ElementId, settings: &Settings) -> TargetType {
    let classes = &settings.classes;
    if doc.has_class(element, &classes.section) {
        TargetType::Section
    } else if doc.has_class(element, &classes.slider) {
        TargetType::Slider
    } else if doc.has_class(element, &classes.slide) {
        TargetType::Slide
    } else {
        TargetType::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_root(settings: &Settings) -> (Document, ElementId) {
        let mut doc = Document::new();
        let body = doc.body();
        let root = doc.create_element("div");
        doc.set_id_attr(root, &settings.classes.root_id);
        doc.append_child(body, root);
        (doc, root)
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let settings = Settings::default();
        let mut doc = Document::new();
        let mut watcher = MutationWatcher::new();

        assert!(matches!(
            watcher.start_listen(&mut doc, &settings),
            Err(Error::RootNotFound(_))
        ));
    }

    #[test]
    fn test_only_marked_elements_are_republished() {
        let settings = Settings::default();
        let (mut doc, root) = doc_with_root(&settings);
        let mut watcher = MutationWatcher::new();
        watcher.start_listen(&mut doc, &settings).unwrap();

        let slider = doc.create_element("div");
        doc.add_class(slider, &settings.classes.slider);
        doc.append_child(root, slider);

        let plain = doc.create_element("div");
        doc.append_child(root, plain);

        let events = watcher.drain(&mut doc, &settings);
        // The class change and the insertion of the slider; the plain div
        // never surfaces.
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.element == slider));
        assert!(events
            .iter()
            .any(|e| e.kind == ObserverEventKind::Added && e.target_type == TargetType::Slider));
    }

    #[test]
    fn test_mutations_before_start_are_discarded() {
        let settings = Settings::default();
        let (mut doc, root) = doc_with_root(&settings);

        let slide = doc.create_element("div");
        doc.add_class(slide, &settings.classes.slide);
        doc.append_child(root, slide);

        let mut watcher = MutationWatcher::new();
        watcher.start_listen(&mut doc, &settings).unwrap();
        assert!(watcher.drain(&mut doc, &settings).is_empty());
    }

    #[test]
    fn test_removal_classified_after_detach() {
        let settings = Settings::default();
        let (mut doc, root) = doc_with_root(&settings);
        let section = doc.create_element("div");
        doc.add_class(section, &settings.classes.section);
        doc.append_child(root, section);

        let mut watcher = MutationWatcher::new();
        watcher.start_listen(&mut doc, &settings).unwrap();

        doc.remove_element(section);
        let events = watcher.drain(&mut doc, &settings);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ObserverEventKind::Removed);
        assert_eq!(events[0].target_type, TargetType::Section);
    }
}
