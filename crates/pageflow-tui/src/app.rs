//! Application state for the terminal host.
//!
//! The app owns the [`PageController`] plus the two viewport animators
//! (vertical for sections, horizontal for slides). Each frame it refreshes
//! element geometry from the terminal size, feeds events through the
//! controller, and turns the controller's scroll commands into animator
//! targets.

use std::time::Instant;

use anyhow::Result;
use pageflow_core::document::ScrollCommand;
use pageflow_core::{Document, ElementId, HostEvent, PageController};
use ratatui::Frame;
use tracing::debug;

use crate::event::AppEvent;
use crate::render;
use crate::scroll::ViewportAnimator;

pub struct App {
    controller: PageController,
    vertical: ViewportAnimator,
    horizontal: ViewportAnimator,
    width: u16,
    height: u16,
    should_quit: bool,
}

impl App {
    pub fn new(controller: PageController) -> Self {
        Self {
            controller,
            vertical: ViewportAnimator::new(),
            horizontal: ViewportAnimator::new(),
            width: 0,
            height: 0,
            should_quit: false,
        }
    }

    /// Bring the page up against the given terminal size.
    pub fn start(&mut self, width: u16, height: u16) -> Result<()> {
        self.width = width;
        self.height = height;
        self.controller.start()?;
        self.refresh_layout();
        self.apply_scroll_commands(Instant::now());
        Ok(())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn controller(&self) -> &PageController {
        &self.controller
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        let now = Instant::now();
        match event {
            AppEvent::Quit => {
                debug!("App: quit requested");
                self.should_quit = true;
            }
            AppEvent::Resize(width, height) => {
                self.width = width;
                self.height = height;
                self.refresh_layout();
            }
            AppEvent::Tick => {}
            AppEvent::Host(host) => {
                // Terminals deliver no key release events; a synthetic
                // release right after the press keeps the axis key from
                // going stale.
                let pressed = match &host {
                    HostEvent::KeyDown { key, .. } => Some(key.clone()),
                    _ => None,
                };

                self.controller.dispatch(host)?;
                if let Some(key) = pressed {
                    self.controller.dispatch(HostEvent::KeyUp { key })?;
                }

                self.refresh_layout();
                self.apply_scroll_commands(now);
            }
        }
        Ok(())
    }

    /// Advance the animators. Called once per frame.
    pub fn tick(&mut self, now: Instant) {
        self.vertical.update(now);
        self.horizontal.update(now);
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        render::draw(
            frame,
            &self.controller,
            self.vertical.current(),
            self.horizontal.current(),
        );
    }

    /// Refresh element geometry from the terminal size: every section is a
    /// full-screen panel, sliders extend one screen width per slide, and
    /// overflow regions get their content extent in rows.
    fn refresh_layout(&mut self) {
        let (width, height) = (u32::from(self.width), u32::from(self.height));

        let mut panels: Vec<(ElementId, u32, u32)> = Vec::new();
        let Some(sections) = self.controller.sections() else {
            return;
        };

        let settings = self.controller.settings();
        let doc = self.controller.doc();
        for section in sections.iter() {
            panels.push((section.element(), width, height));
            if let Some(region) = section.overflow_region(doc, settings) {
                let rows = content_rows(doc, region);
                panels.push((region, width, rows.max(height)));
            }
            for slider in section.sliders().iter() {
                let slides = slider.slides().len() as u32;
                panels.push((slider.element(), width * slides.max(1), height));
                for slide in slider.slides() {
                    panels.push((*slide, width, height));
                }
            }
        }
        let section_count = sections.len() as u32;

        let doc = self.controller.doc_mut();
        let body = doc.body();
        let geometry = doc.geometry_mut(body);
        geometry.client_width = width;
        geometry.client_height = height;
        geometry.scroll_width = width;
        geometry.scroll_height = height * section_count.max(1);

        for (elem, scroll_w, scroll_h) in panels {
            let geometry = doc.geometry_mut(elem);
            geometry.client_width = width;
            geometry.client_height = height;
            geometry.scroll_width = scroll_w;
            geometry.scroll_height = scroll_h;
        }
    }

    /// Turn queued scroll commands into animator targets.
    fn apply_scroll_commands(&mut self, now: Instant) {
        let Some(sections) = self.controller.sections() else {
            return;
        };

        let section_order: Vec<ElementId> = sections.iter().map(|s| s.element()).collect();
        let mut slide_columns: Vec<(ElementId, u16)> = Vec::new();
        for section in sections.iter() {
            for slider in section.sliders().iter() {
                for (idx, slide) in slider.slides().iter().enumerate() {
                    slide_columns.push((*slide, idx as u16));
                }
            }
        }

        for command in self.controller.doc_mut().take_scroll_commands() {
            match command {
                ScrollCommand::IntoView { target, behavior } => {
                    if let Some(idx) = section_order.iter().position(|e| *e == target) {
                        self.vertical
                            .animate_to(idx as u16 * self.height, behavior, now);
                    } else if let Some((_, column)) =
                        slide_columns.iter().find(|(slide, _)| *slide == target)
                    {
                        self.horizontal
                            .animate_to(column * self.width, behavior, now);
                    }
                }
                // Overflow offsets are stored in the element geometry the
                // moment the core applies them; the renderer reads them
                // directly.
                ScrollCommand::ScrollTo { .. } => {}
            }
        }
    }
}

/// Rows the subtree's text content occupies.
fn content_rows(doc: &Document, elem: ElementId) -> u32 {
    let mut rows = doc
        .text(elem)
        .map(|t| t.lines().count() as u32)
        .unwrap_or(0);
    for child in doc.children(elem) {
        rows += content_rows(doc, *child);
    }
    rows
}
