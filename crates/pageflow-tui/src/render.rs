//! Frame rendering.
//!
//! Draws the section the viewport has settled nearest to, its current
//! slide when it owns a slider, and a one-line status bar. Overflow
//! regions render from their scroll offset so keyboard scrolling inside a
//! section is visible.

use pageflow_core::page::{Section, Slider};
use pageflow_core::{Document, ElementId, PageController};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

pub fn draw(frame: &mut Frame, controller: &PageController, v_offset: u16, h_offset: u16) {
    let area = frame.area();
    let [main, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    let Some(sections) = controller.sections() else {
        return;
    };
    if sections.is_empty() {
        return;
    }

    let height = main.height.max(1);
    let visible = usize::from((v_offset + height / 2) / height).min(sections.len() - 1);
    let Some(section) = sections.get(visible) else {
        return;
    };

    draw_section(frame, main, controller, section, h_offset);
    draw_status_bar(frame, status, sections.len(), visible, section, h_offset);
}

fn draw_section(
    frame: &mut Frame,
    area: Rect,
    controller: &PageController,
    section: &Section,
    h_offset: u16,
) {
    let doc = controller.doc();
    let settings = controller.settings();

    let title = heading_text(doc, section.element()).unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(truncated(&title, area.width.saturating_sub(2)))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Slide panel takes precedence over plain section body
    if let Some(slider) = displayed_slider(section) {
        let column = usize::from(h_offset / area.width.max(1));
        if let Some(slide) = slider.slides().get(column.min(slider.slides().len() - 1)) {
            draw_content(frame, inner, doc, *slide, 0);
        }
        return;
    }

    let scroll = section
        .overflow_region(doc, settings)
        .map(|region| doc.geometry(region).scroll_top as u16)
        .unwrap_or(0);
    draw_content(frame, inner, doc, section.element(), scroll);
}

fn draw_content(frame: &mut Frame, area: Rect, doc: &Document, elem: ElementId, scroll: u16) {
    let mut lines: Vec<Line> = Vec::new();
    collect_lines(doc, elem, &mut lines);

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn collect_lines(doc: &Document, elem: ElementId, lines: &mut Vec<Line>) {
    if let Some(text) = doc.text(elem) {
        let style = if doc.tag(elem).starts_with('h') {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        for raw in text.lines() {
            lines.push(Line::from(Span::styled(raw.to_string(), style)));
        }
        lines.push(Line::default());
    }
    for child in doc.children(elem) {
        collect_lines(doc, *child, lines);
    }
}

fn draw_status_bar(
    frame: &mut Frame,
    area: Rect,
    total: usize,
    visible: usize,
    section: &Section,
    h_offset: u16,
) {
    let mut status = format!(" {}/{} ", visible + 1, total);

    if let Some(slider) = displayed_slider(section) {
        let width = frame.area().width.max(1);
        let column = usize::from(h_offset / width).min(slider.slides().len() - 1);
        let dots: String = (0..slider.slides().len())
            .map(|idx| if idx == column { '●' } else { '○' })
            .collect();
        status.push_str(&dots);
        status.push(' ');
    }

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(status, Style::default().fg(Color::Cyan)),
        Span::styled("q quit · arrows/hjkl navigate", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(bar, area);
}

/// The section's first slider, if it still has slides to show. Sliders can
/// be emptied after construction; those render as a plain section body.
fn displayed_slider(section: &Section) -> Option<&Slider> {
    section.sliders().get(0).filter(|s| !s.slides().is_empty())
}

fn heading_text(doc: &Document, elem: ElementId) -> Option<String> {
    if doc.tag(elem).starts_with('h') {
        if let Some(text) = doc.text(elem) {
            return Some(text.to_string());
        }
    }
    doc.children(elem)
        .iter()
        .find_map(|child| heading_text(doc, *child))
}

fn truncated(text: &str, max_width: u16) -> String {
    let max = usize::from(max_width);
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        if out.width() + 1 > max.saturating_sub(1) {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageflow_core::{Capabilities, Deck, Settings};

    fn controller() -> PageController {
        let settings = Settings::default();
        let doc = Deck::parse(
            "[[sections]]\ntitle = \"Hello\"\nbody = \"World\"\n[[sections]]\ntitle = \"Next\"",
        )
        .unwrap()
        .build_document(&settings)
        .unwrap();
        let mut controller = PageController::new(doc, settings, Capabilities::terminal());
        controller.start().unwrap();
        controller
    }

    #[test]
    fn test_heading_text_finds_nested_title() {
        let controller = controller();
        let sections = controller.sections().unwrap();
        let first = sections.get(0).unwrap();
        assert_eq!(
            heading_text(controller.doc(), first.element()).as_deref(),
            Some("Hello")
        );
    }

    #[test]
    fn test_truncated_respects_width() {
        assert_eq!(truncated("short", 20), "short");
        let cut = truncated("a much longer heading", 8);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 8);
    }

    #[test]
    fn test_emptied_slider_falls_back_to_section_body() {
        let settings = Settings::default();
        let mut doc = Document::new();
        let body = doc.body();
        let elem = doc.create_element("div");
        doc.append_child(body, elem);
        let slide = doc.create_element("div");
        doc.add_class(slide, &settings.classes.slide);
        doc.append_child(elem, slide);

        let mut section = Section::new(&mut doc, elem, &settings).unwrap();
        assert!(displayed_slider(&section).is_some());

        section.sliders_mut().first_mut().unwrap().remove(slide);
        assert!(displayed_slider(&section).is_none());
    }

    #[test]
    fn test_draw_renders_without_panicking() {
        let controller = controller();
        let backend = ratatui::backend::TestBackend::new(40, 12);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw(frame, &controller, 0, 0))
            .unwrap();
    }
}
