//! Stylesheet accumulation.
//!
//! Rules are collected per class name and rendered into one style text with
//! every class name carrying the configured prefix. The controller injects
//! the rendered text into the document head exactly once, before navigation
//! starts.

use crate::config::{ClassesConfig, Direction};

/// Class names for the page chrome that are not marker classes.
pub const DOCUMENT_CLASS: &str = "document";
pub const VERTICAL_CLASS: &str = "vertical";
pub const HORIZONTAL_CLASS: &str = "horizontal";

/// `{prefix}-{class}`.
pub fn prefixed(prefix: &str, class: &str) -> String {
    format!("{prefix}-{class}")
}

/// The layout class the root container takes for a scroll direction.
pub fn direction_class(direction: Direction) -> &'static str {
    match direction {
        Direction::Vertical => VERTICAL_CLASS,
        Direction::Horizontal => HORIZONTAL_CLASS,
    }
}

pub struct Stylesheet {
    rules: Vec<(String, String)>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The built-in rules every page carries, keyed by the configured
    /// marker class names.
    pub fn base(classes: &ClassesConfig) -> Self {
        let mut sheet = Self::new();
        sheet.rule(DOCUMENT_CLASS, "overflow: hidden; margin: 0; padding: 0;");
        sheet.rule(VERTICAL_CLASS, "display: flex; flex-direction: column;");
        sheet.rule(HORIZONTAL_CLASS, "display: flex; flex-direction: row;");
        sheet.rule(
            &classes.section,
            "display: flex; align-items: center; justify-content: center; \
             max-height: 100vh; min-height: 100vh; max-width: 100vw; min-width: 100vw; \
             box-sizing: border-box;",
        );
        sheet.rule(
            &classes.overflow,
            "overflow: auto; max-height: 100vh; scrollbar-width: none;",
        );
        sheet.rule(
            &classes.slider,
            "z-index: 1; overflow: hidden; position: relative; display: flex; \
             flex-direction: row; transition: all 0.3s ease-out; \
             max-height: 100vh; max-width: 100vw;",
        );
        sheet.rule(
            &classes.slide,
            "display: flex; justify-content: center; align-items: center; \
             min-height: 100vh; min-width: 100vw;",
        );
        sheet
    }

    /// Append a rule. A repeated class name appends a second rule rather
    /// than replacing the first, matching plain stylesheet semantics.
    pub fn rule(&mut self, class: &str, body: &str) {
        self.rules.push((class.to_string(), body.to_string()));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render the accumulated rules with prefixed class selectors.
    pub fn render(&self, prefix: &str) -> String {
        let mut out = String::new();
        for (class, body) in &self.rules {
            out.push('.');
            out.push_str(&prefixed(prefix, class));
            out.push_str(" { ");
            out.push_str(body);
            out.push_str(" }\n");
        }
        out
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new()
    }
}
