//! Deck files: a TOML page description built into a [`Document`].
//!
//! A deck is the authoring format for a page. Each `[[sections]]` entry
//! becomes one full-viewport section under the root container; optional
//! `[[sections.slides]]` entries become slides inside it.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::config::{Settings, ACTIVE_CLASS};
use crate::document::Document;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Deck {
    pub title: Option<String>,
    #[serde(default)]
    pub sections: Vec<DeckSection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckSection {
    pub title: Option<String>,
    pub body: Option<String>,
    /// Marks this section as the initial position.
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub slides: Vec<DeckSlide>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckSlide {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl Deck {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let deck: Deck = toml::from_str(&text)?;
        deck.validate()?;
        debug!(sections = deck.sections.len(), "Deck: loaded");
        Ok(deck)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let deck: Deck = toml::from_str(text)?;
        deck.validate()?;
        Ok(deck)
    }

    fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(Error::Deck("deck has no sections".to_string()));
        }
        if self.sections.iter().filter(|s| s.active).count() > 1 {
            return Err(Error::Deck(
                "deck marks more than one section active".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the document this deck describes, using the configured root
    /// id and marker classes.
    pub fn build_document(&self, settings: &Settings) -> Result<Document> {
        let mut doc = Document::new();
        let body = doc.body();

        let root = doc.create_element("div");
        doc.set_id_attr(root, &settings.classes.root_id);
        doc.append_child(body, root);

        for section in &self.sections {
            let elem = doc.create_element("div");
            doc.add_class(elem, &settings.classes.section);
            if section.active {
                doc.add_class(elem, ACTIVE_CLASS);
            }
            doc.append_child(root, elem);

            if let Some(title) = &section.title {
                let heading = doc.create_element("h1");
                doc.set_text(heading, title);
                doc.append_child(elem, heading);
            }
            if let Some(text) = &section.body {
                let paragraph = doc.create_element("p");
                doc.set_text(paragraph, text);
                doc.append_child(elem, paragraph);
            }

            for slide in &section.slides {
                let slide_elem = doc.create_element("div");
                doc.add_class(slide_elem, &settings.classes.slide);
                doc.append_child(elem, slide_elem);

                if let Some(title) = &slide.title {
                    let heading = doc.create_element("h2");
                    doc.set_text(heading, title);
                    doc.append_child(slide_elem, heading);
                }
                if let Some(text) = &slide.body {
                    let paragraph = doc.create_element("p");
                    doc.set_text(paragraph, text);
                    doc.append_child(slide_elem, paragraph);
                }
            }
        }

        Ok(doc)
    }
}
