use std::io;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use pageflow_core::{Capabilities, Deck, PageController, Settings};
use pageflow_tui::{App, EventHandler};

/// Frame budget for the poll loop; also drives scroll animations.
const TICK_RATE_MS: u64 = 16;

pub fn run(deck_path: &Path, settings: Settings) -> Result<()> {
    let deck = Deck::load(deck_path)?;
    debug!(deck = %deck_path.display(), sections = deck.sections.len(), "presenting deck");
    let doc = deck.build_document(&settings)?;
    let controller = PageController::new(doc, settings, Capabilities::terminal());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let title = deck.title.clone().unwrap_or_else(|| "Pageflow".to_string());
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle(title))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(controller);
    let size = terminal.size()?;
    let start_result = app.start(size.width, size.height);

    let result = start_result.and_then(|_| event_loop(&mut terminal, &mut app));

    // Restore terminal before surfacing any error
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    debug!("terminal restored");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let events = EventHandler::new(TICK_RATE_MS);

    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| app.draw(frame))?;

        if let Some(event) = events.next()? {
            app.handle_event(event)?;
        }
        if app.should_quit() {
            return Ok(());
        }
    }
}
