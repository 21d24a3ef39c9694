//! Terminal UI for Strictly Sodas.

mod app;
mod input;
mod ui;

pub use app::App;
pub use input::{Cursor, Direction, Focus, HitMap, KeyAction, key_action};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::Path;
use std::time::Duration;
use strictly_sodas::{Catalog, Clock, Game, KeyValueStore, MemoryStore, Modal, SystemClock};
use tracing::{error, info, instrument, warn};

use crate::config::GameConfig;
use crate::db::SqliteStore;

/// Redraw interval; the clock display only needs whole seconds.
const TICK: Duration = Duration::from_millis(250);

/// A game backed by whichever store could be opened.
pub type SessionGame = Game<Box<dyn KeyValueStore>, SystemClock, StdRng>;

/// Opens the configured SQLite store, or an in-memory one if that fails.
///
/// Progress is then kept for this session only; the game still starts.
#[instrument(skip(db_path), fields(db_path = %db_path.display()))]
pub fn open_store(db_path: &Path) -> Box<dyn KeyValueStore> {
    match SqliteStore::open(db_path.to_string_lossy()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "Database unavailable, progress will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

/// Deals the first game from the configuration.
#[instrument(skip(config))]
pub fn new_game(config: &GameConfig) -> SessionGame {
    let rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::starting_at(
        Catalog::standard(),
        open_store(config.db_path()),
        SystemClock,
        rng,
        *config.starting_level(),
    );
    if *config.show_instructions() {
        game.show_modal(Modal::Instructions);
    }
    game
}

/// Deals the first game and runs the UI until the user quits.
#[instrument(skip(config), fields(db_path = %config.db_path().display()))]
pub fn run(config: &GameConfig) -> Result<()> {
    let mut app = App::new(new_game(config));

    info!("Starting Strictly Sodas TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!(records = app.game().records().len(), "Session ended");
    res
}

/// Draw, wait for input, dispatch; repeat.
fn run_loop<S, C, R>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S, C, R>,
) -> Result<()>
where
    S: KeyValueStore,
    C: Clock,
    R: Rng,
{
    loop {
        let mut hits = HitMap::default();
        terminal.draw(|frame| hits = ui::draw(frame, app))?;
        app.set_hits(hits);

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit() {
            info!("User quit");
            return Ok(());
        }
    }
}
