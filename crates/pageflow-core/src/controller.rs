//! Page controller facade.
//!
//! Owns the document, the settings, the input handlers, the mutation
//! watcher and the navigation engine, and wires them together: `start`
//! runs the page bring-up sequence, `dispatch` feeds one host event
//! through, `pump_mutations` re-syncs slider lists after document edits.

use std::time::Instant;

use tracing::{debug, info};

use crate::config::{Settings, SettingsPatch};
use crate::document::{DocPosition, Document, ElementId};
use crate::engine::NavigationEngine;
use crate::error::{Error, Result};
use crate::input::observer::{ObserverEventKind, TargetType};
use crate::input::{
    Capabilities, HostEvent, InputHandlers, InputSignal, ListenerId, Listeners, MutationWatcher,
};
use crate::page::SectionList;
use crate::style::{direction_class, prefixed, Stylesheet, DOCUMENT_CLASS};

/// Lifecycle events the controller publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEventKind {
    /// Fired once, after `start` has finished the bring-up sequence.
    Ready,
}

pub struct PageController {
    settings: Settings,
    caps: Capabilities,
    doc: Document,
    handlers: InputHandlers,
    watcher: MutationWatcher,
    engine: NavigationEngine,
    sections: Option<SectionList>,
    ready_listeners: Listeners<PageEventKind>,
    started: bool,
}

impl PageController {
    pub fn new(doc: Document, settings: Settings, caps: Capabilities) -> Self {
        Self {
            settings,
            caps,
            doc,
            handlers: InputHandlers::new(),
            watcher: MutationWatcher::new(),
            engine: NavigationEngine::new(),
            sections: None,
            ready_listeners: Listeners::default(),
            started: false,
        }
    }

    pub fn on(&mut self, kind: PageEventKind, callback: impl FnMut(&PageEventKind) + 'static) -> ListenerId {
        let PageEventKind::Ready = kind;
        debug!("PageController: event listener 'Ready' [added]");
        self.ready_listeners.on(callback)
    }

    pub fn off(&mut self, kind: PageEventKind, id: ListenerId) {
        let PageEventKind::Ready = kind;
        self.ready_listeners.off(id);
        debug!("PageController: event listener 'Ready' [removed]");
    }

    /// Bring the page up: inject the stylesheet, discover the sections
    /// under the root container, start the input handlers and, when
    /// enabled, the mutation watcher. Idempotent once started.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }

        self.inject_head_styles();

        let root = self.root_element()?;
        let body = self.doc.body();
        self.doc
            .add_class(body, &prefixed(&self.settings.classes.prefix, DOCUMENT_CLASS));
        let layout = direction_class(self.settings.scroll.direction);
        self.doc
            .add_class(root, &prefixed(&self.settings.classes.prefix, layout));

        let section_elems = self
            .doc
            .descendants_with_class(root, &self.settings.classes.section);
        self.sections = Some(SectionList::new(&mut self.doc, section_elems, &self.settings)?);

        self.handlers.start_available(&self.caps, &self.settings);

        // Watching begins only after construction, so the wrapping and
        // marking done during discovery never re-enters the slider lists.
        if self.settings.observer.enabled {
            self.watcher.start_listen(&mut self.doc, &self.settings)?;
        }

        self.started = true;
        self.ready_listeners.notify(&PageEventKind::Ready);
        info!("PageController: has been initialized correctly");
        Ok(())
    }

    pub fn stop(&mut self) {
        if !self.started {
            return;
        }
        self.handlers.stop_all();
        self.watcher.stop_listen();
        self.started = false;
        info!("PageController: stopped");
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Feed one raw host event through the handlers and, when it
    /// qualifies, the navigation engine; then re-sync slider lists.
    pub fn dispatch(&mut self, event: HostEvent) -> Result<()> {
        self.dispatch_at(event, Instant::now())
    }

    pub fn dispatch_at(&mut self, event: HostEvent, now: Instant) -> Result<()> {
        let signal = self.record(event);

        if let Some(signal) = signal {
            if let Some(sections) = self.sections.as_mut() {
                self.engine.handle_signal(
                    &mut self.doc,
                    sections,
                    &mut self.handlers,
                    &signal,
                    &self.settings,
                    now,
                );
            }
        }

        self.pump_mutations()
    }

    /// Route a host event to its handler. Returns the normalized signal
    /// when the event qualifies for navigation.
    fn record(&mut self, event: HostEvent) -> Option<InputSignal> {
        let swipe_config = &self.settings.swipe;
        match event {
            HostEvent::Wheel { delta_x, delta_y } => self
                .handlers
                .wheel
                .record(delta_x, delta_y)
                .then_some(InputSignal::Wheel),
            HostEvent::KeyDown { key, target } => self
                .handlers
                .keys
                .record_keydown(&key)
                .then(|| InputSignal::Key { key, target }),
            HostEvent::KeyUp { key } => {
                self.handlers.keys.record_keyup(&key);
                None
            }
            HostEvent::PointerDown { x, y, button } => {
                self.handlers.swipe.record_pointer_down(x, y, button, swipe_config);
                None
            }
            HostEvent::PointerMove { x, y, button } => {
                self.handlers.swipe.record_pointer_move(x, y, button, swipe_config);
                None
            }
            HostEvent::PointerUp { x, y, button } => self
                .handlers
                .swipe
                .record_pointer_up(x, y, button, swipe_config)
                .then_some(InputSignal::Swipe),
            HostEvent::TouchStart { x, y } => {
                self.handlers.swipe.record_touch_start(x, y);
                None
            }
            HostEvent::TouchMove { x, y } => {
                self.handlers.swipe.record_touch_move(x, y);
                None
            }
            HostEvent::TouchEnd { x, y } => self
                .handlers
                .swipe
                .record_touch_end(x, y)
                .then_some(InputSignal::Swipe),
        }
    }

    /// Drain the mutation watcher and apply slider additions and removals
    /// to the owning sections.
    pub fn pump_mutations(&mut self) -> Result<()> {
        if !self.watcher.is_listening() {
            return Ok(());
        }

        let events = self.watcher.drain(&mut self.doc, &self.settings);
        let Some(sections) = self.sections.as_mut() else {
            return Ok(());
        };

        for event in events {
            if event.target_type != TargetType::Slider {
                continue;
            }

            match event.kind {
                ObserverEventKind::Removed => {
                    for section in sections.iter_mut() {
                        section.sliders_mut().remove(event.element);
                    }
                }
                ObserverEventKind::Added => {
                    Self::sync_added_slider(&mut self.doc, sections, event.element, &self.settings)?;
                }
                ObserverEventKind::Changed => {}
            }
        }

        Ok(())
    }

    /// Insert a newly-observed slider container into its owning section's
    /// list, positioned before the first existing slider that follows it
    /// in document order. With existing sliders but none following, the
    /// new container is not registered at all (source behavior, kept
    /// as-is).
    ///
    /// The owning section is the nearest section-classed ancestor, so a
    /// container sitting under an intermediate wrapper inside a section
    /// still registers.
    fn sync_added_slider(
        doc: &mut Document,
        sections: &mut SectionList,
        container: ElementId,
        settings: &Settings,
    ) -> Result<()> {
        let Some(owner) = doc.ancestor_with_class(container, &settings.classes.section) else {
            return Ok(());
        };
        let Some(section) = sections.section_for_element_mut(owner) else {
            return Ok(());
        };

        let insert_pos = if section.sliders().is_empty() {
            Some(0)
        } else {
            (0..section.sliders().len()).find(|idx| {
                section
                    .sliders()
                    .get(*idx)
                    .is_some_and(|s| doc.position(container, s.element()) == DocPosition::Before)
            })
        };

        if let Some(pos) = insert_pos {
            section.sliders_mut().insert(doc, pos, container, settings)?;
            doc.add_class(container, &settings.classes.slider);
            debug!(pos, "PageController: registered added slider");
        }
        Ok(())
    }

    /// Validating merge of a settings patch: nothing is applied unless the
    /// whole patched result is valid.
    pub fn set_options(&mut self, patch: SettingsPatch) -> Result<()> {
        self.settings.set_options(patch)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sections(&self) -> Option<&SectionList> {
        self.sections.as_ref()
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    fn root_element(&self) -> Result<ElementId> {
        let root_id = &self.settings.classes.root_id;
        self.doc.element_by_id_attr(root_id).ok_or_else(|| {
            tracing::error!("PageController: root element '#{root_id}' not found");
            Error::RootNotFound(root_id.clone())
        })
    }

    fn inject_head_styles(&mut self) {
        let sheet = Stylesheet::base(&self.settings.classes);
        let text = sheet.render(&self.settings.classes.prefix);
        self.doc.inject_styles(&text);
    }
}
