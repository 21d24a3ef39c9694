//! Application state and event handling.

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use rand::Rng;
use strictly_sodas::{
    Clock, Confirmation, FeedbackEvent, Game, GameView, KeyValueStore, Modal,
    MoveTarget, PointerAdapter, PointerInput,
};
use tracing::{debug, instrument};

use super::input::{Cursor, Direction, HitMap, KeyAction, key_action};

/// Main application state.
///
/// Owns the game and translates terminal events into engine calls through a
/// single [`PointerAdapter`], whether they come from the mouse or the
/// keyboard cursor.
pub struct App<S, C, R> {
    game: Game<S, C, R>,
    pointer: PointerAdapter,
    cursor: Cursor,
    hits: HitMap,
    level_cursor: usize,
    show_records: bool,
    status_message: String,
    last_cue: Option<FeedbackEvent>,
    should_quit: bool,
}

impl<S, C, R> App<S, C, R>
where
    S: KeyValueStore,
    C: Clock,
    R: Rng,
{
    /// Creates the application around a game.
    pub fn new(game: Game<S, C, R>) -> Self {
        let level_cursor = game.difficulty();
        Self {
            game,
            pointer: PointerAdapter::new(),
            cursor: Cursor::default(),
            hits: HitMap::default(),
            level_cursor,
            show_records: false,
            status_message: "Line up the sodas in the hidden order.".to_string(),
            last_cue: None,
            should_quit: false,
        }
    }

    /// The game being played.
    pub fn game(&self) -> &Game<S, C, R> {
        &self.game
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> GameView {
        self.game.view()
    }

    /// Keyboard cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether a brand is currently picked up.
    pub fn is_holding(&self) -> bool {
        self.pointer.held().is_some()
    }

    /// Highlighted level in the picker.
    pub fn level_cursor(&self) -> usize {
        self.level_cursor
    }

    /// Whether the records table is shown.
    pub fn show_records(&self) -> bool {
        self.show_records
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// The most recent feedback cue.
    pub fn last_cue(&self) -> Option<FeedbackEvent> {
        self.last_cue
    }

    /// Checks if the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Stores the regions of the last drawn frame.
    pub fn set_hits(&mut self, hits: HitMap) {
        self.hits = hits;
    }

    /// Handles a key press.
    #[instrument(skip(self, key), fields(code = ?key.code))]
    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = key_action(key.code);
        if action == KeyAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.game.modal() {
            Some(Modal::Instructions) => self.game.dismiss_modal(),
            Some(Modal::LevelSelect) => self.handle_level_picker(action),
            None if self.show_records => {
                if matches!(action, KeyAction::Records | KeyAction::Cancel) {
                    self.show_records = false;
                }
            }
            None => self.handle_board(action),
        }
        self.drain_feedback();
    }

    /// Handles a mouse event.
    #[instrument(skip(self, mouse), fields(kind = ?mouse.kind, column = mouse.column, row = mouse.row))]
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.game.modal() == Some(Modal::Instructions) {
            if let MouseEventKind::Down(_) = mouse.kind {
                self.game.dismiss_modal();
            }
            return;
        }
        if self.game.modal().is_some() || self.show_records {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let board = self.game.round().board();
                if let Some(source) = self.hits.source_at(mouse.column, mouse.row, board) {
                    self.pointer
                        .handle(&mut self.game, PointerInput::Down(source));
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let zone = self.hits.zone_at(mouse.column, mouse.row);
                self.pointer.handle(&mut self.game, PointerInput::Up(zone));
            }
            _ => {}
        }
        self.clamp_cursor();
        self.drain_feedback();
    }

    fn handle_board(&mut self, action: KeyAction) {
        let slots = self.game.round().board().len();
        let inventory = self.game.inventory();

        match action {
            KeyAction::Move(direction) => self.cursor.shift(direction, slots, inventory.len()),
            KeyAction::Toggle => self.cursor.toggle(slots, inventory.len()),
            KeyAction::Grab => {
                let input = if self.pointer.held().is_some() {
                    PointerInput::Up(Some(self.cursor.target()))
                } else {
                    match self.cursor.source(self.game.round().board(), &inventory) {
                        Some(source) => PointerInput::Down(source),
                        None => return,
                    }
                };
                self.pointer.handle(&mut self.game, input);
            }
            KeyAction::Remove => {
                if let Some(source) = self.cursor.source(self.game.round().board(), &inventory) {
                    self.pointer
                        .handle(&mut self.game, PointerInput::Down(source));
                    self.pointer
                        .handle(&mut self.game, PointerInput::Up(Some(MoveTarget::Inventory)));
                }
            }
            KeyAction::Cancel => {
                self.pointer.handle(&mut self.game, PointerInput::Cancel);
            }
            KeyAction::Confirm => self.confirm(),
            KeyAction::Retry => {
                self.status_message = if self.game.retry() {
                    "New order dealt.".to_string()
                } else {
                    "Solve this one first.".to_string()
                };
            }
            KeyAction::Advance => {
                self.status_message = if self.game.advance() {
                    format!("Level {}.", self.game.difficulty())
                } else {
                    "The next level is not open yet.".to_string()
                };
            }
            KeyAction::LevelSelect => {
                self.pointer.handle(&mut self.game, PointerInput::Cancel);
                self.level_cursor = self.game.difficulty();
                self.game.show_modal(Modal::LevelSelect);
            }
            KeyAction::Instructions => {
                self.pointer.handle(&mut self.game, PointerInput::Cancel);
                self.game.show_modal(Modal::Instructions);
            }
            KeyAction::Records => self.show_records = true,
            KeyAction::Digit(_) | KeyAction::Quit | KeyAction::Ignore => {}
        }
        self.clamp_cursor();
    }

    fn handle_level_picker(&mut self, action: KeyAction) {
        let min = self.game.progression().min_level();
        let max = self.game.catalog().len();
        match action {
            KeyAction::Move(Direction::Left) => {
                self.level_cursor = self.level_cursor.saturating_sub(1).max(min)
            }
            KeyAction::Move(Direction::Right) => {
                self.level_cursor = (self.level_cursor + 1).min(max)
            }
            KeyAction::Grab => self.select_level(self.level_cursor),
            KeyAction::Digit(d) => {
                // 0 stands for the last level.
                let level = if d == 0 { max } else { usize::from(d) };
                self.level_cursor = level.clamp(min, max);
                self.select_level(level);
            }
            KeyAction::Cancel | KeyAction::LevelSelect => self.game.dismiss_modal(),
            _ => {}
        }
    }

    fn select_level(&mut self, level: usize) {
        if self.game.select_level(level) {
            self.cursor = Cursor::default();
            self.status_message = format!("Level {}.", level);
        } else {
            self.status_message = format!("Level {} is locked.", level);
        }
    }

    fn confirm(&mut self) {
        if !self.game.can_confirm() {
            self.status_message = "Fill every slot before confirming.".to_string();
            return;
        }
        self.status_message = match self.game.confirm() {
            Some(Confirmation::Attempt(entry)) => format!(
                "Attempt {}: {} of {} in place.",
                entry.id(),
                entry.matches(),
                self.game.difficulty()
            ),
            Some(Confirmation::Solved {
                record, unlocked, ..
            }) => {
                let mut message = format!(
                    "Solved in {} attempts, {}s!",
                    record.attempts(),
                    record.duration_secs()
                );
                if let Some(level) = unlocked {
                    message.push_str(&format!(" Level {} unlocked.", level));
                }
                message.push_str(" [r] retry  [n] next  [l] levels");
                message
            }
            None => return,
        };
    }

    fn clamp_cursor(&mut self) {
        let slots = self.game.round().board().len();
        let inventory = self.game.inventory().len();
        self.cursor.clamp(slots, inventory);
    }

    fn drain_feedback(&mut self) {
        for cue in self.game.drain_feedback() {
            debug!(%cue, "Feedback");
            self.last_cue = Some(cue);
        }
    }
}
