use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use pageflow_core::{Deck, Settings};

/// Validate the configuration and a deck file, and print what a run would
/// present.
pub fn run(deck_path: &Path, settings: &Settings) -> Result<()> {
    settings.validate().context("configuration is invalid")?;
    debug!("configuration validated");

    let deck = Deck::load(deck_path)
        .with_context(|| format!("failed to load deck {}", deck_path.display()))?;
    let doc = deck.build_document(settings)?;

    let root = doc
        .element_by_id_attr(&settings.classes.root_id)
        .context("built document has no root container")?;
    let sections = doc.descendants_with_class(root, &settings.classes.section);
    let slides = doc.descendants_with_class(root, &settings.classes.slide);

    println!("Deck OK: {}", deck_path.display());
    if let Some(title) = &deck.title {
        println!("  Title:    {title}");
    }
    println!("  Sections: {}", sections.len());
    if !slides.is_empty() {
        println!("  Slides:   {}", slides.len());
    }

    Ok(())
}
