//! Keyboard cursor and mouse hit-testing.
//!
//! Both reduce terminal events to the engine's pointer inputs; nothing here
//! touches the board directly.

use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use strictly_sodas::{Brand, MoveSource, MoveTarget, SlotBoard, slot_source};

/// Which row the keyboard cursor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The slot board.
    #[default]
    Slots,
    /// The unplaced brands.
    Inventory,
}

/// Arrow direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left.
    Left,
    /// Right.
    Right,
    /// Up, towards the board.
    Up,
    /// Down, towards the inventory.
    Down,
}

/// Keyboard selection over the board and inventory rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    focus: Focus,
    index: usize,
}

impl Cursor {
    /// Row under the cursor.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Column under the cursor.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves the cursor, keeping it inside the rows' current lengths.
    pub fn shift(&mut self, direction: Direction, slots: usize, inventory: usize) {
        match direction {
            Direction::Left => self.index = self.index.saturating_sub(1),
            Direction::Right => self.index += 1,
            Direction::Up => self.focus = Focus::Slots,
            Direction::Down => self.focus = Focus::Inventory,
        }
        self.clamp(slots, inventory);
    }

    /// Switches rows.
    pub fn toggle(&mut self, slots: usize, inventory: usize) {
        self.focus = match self.focus {
            Focus::Slots => Focus::Inventory,
            Focus::Inventory => Focus::Slots,
        };
        self.clamp(slots, inventory);
    }

    /// Pulls the cursor back inside its row.
    pub fn clamp(&mut self, slots: usize, inventory: usize) {
        let len = match self.focus {
            Focus::Slots => slots,
            Focus::Inventory => inventory,
        };
        self.index = self.index.min(len.saturating_sub(1));
    }

    /// What would be picked up here.
    pub fn source(&self, board: &SlotBoard, inventory: &[Brand]) -> Option<MoveSource> {
        match self.focus {
            Focus::Slots => slot_source(board, self.index),
            Focus::Inventory => inventory.get(self.index).copied().map(MoveSource::Inventory),
        }
    }

    /// Where a held brand would be dropped here.
    pub fn target(&self) -> MoveTarget {
        match self.focus {
            Focus::Slots => MoveTarget::Slot(self.index),
            Focus::Inventory => MoveTarget::Inventory,
        }
    }
}

/// A key press, named by what it asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Move the cursor.
    Move(Direction),
    /// Switch between board and inventory.
    Toggle,
    /// Pick up, or drop what is held.
    Grab,
    /// Send the brand under the cursor back to inventory.
    Remove,
    /// Drop nothing / close an overlay.
    Cancel,
    /// Confirm the board.
    Confirm,
    /// Play the same level again.
    Retry,
    /// Play the next level.
    Advance,
    /// Open the level picker.
    LevelSelect,
    /// Open the instructions.
    Instructions,
    /// Show or hide the records table.
    Records,
    /// A digit, for picking a level directly.
    Digit(u8),
    /// Leave the game.
    Quit,
    /// Unbound key.
    Ignore,
}

/// Maps a key to its action.
pub fn key_action(code: KeyCode) -> KeyAction {
    match code {
        KeyCode::Left => KeyAction::Move(Direction::Left),
        KeyCode::Right => KeyAction::Move(Direction::Right),
        KeyCode::Up => KeyAction::Move(Direction::Up),
        KeyCode::Down => KeyAction::Move(Direction::Down),
        KeyCode::Tab => KeyAction::Toggle,
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Grab,
        KeyCode::Backspace | KeyCode::Delete => KeyAction::Remove,
        KeyCode::Esc => KeyAction::Cancel,
        KeyCode::Char('c') => KeyAction::Confirm,
        KeyCode::Char('r') => KeyAction::Retry,
        KeyCode::Char('n') => KeyAction::Advance,
        KeyCode::Char('l') => KeyAction::LevelSelect,
        KeyCode::Char('i') | KeyCode::Char('?') => KeyAction::Instructions,
        KeyCode::Char('h') => KeyAction::Records,
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char(c) => c
            .to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .map_or(KeyAction::Ignore, KeyAction::Digit),
        _ => KeyAction::Ignore,
    }
}

/// Screen regions from the last frame, for mouse hit-testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    slots: Vec<Rect>,
    inventory: Vec<(Rect, Brand)>,
    inventory_area: Rect,
}

impl HitMap {
    /// Creates a hit map from rendered regions.
    pub fn new(slots: Vec<Rect>, inventory: Vec<(Rect, Brand)>, inventory_area: Rect) -> Self {
        Self {
            slots,
            inventory,
            inventory_area,
        }
    }

    /// The draggable brand at a screen cell.
    pub fn source_at(&self, column: u16, row: u16, board: &SlotBoard) -> Option<MoveSource> {
        if let Some(index) = self.slots.iter().position(|r| contains(*r, column, row)) {
            return slot_source(board, index);
        }
        self.inventory
            .iter()
            .find(|(r, _)| contains(*r, column, row))
            .map(|(_, brand)| MoveSource::Inventory(*brand))
    }

    /// The drop zone at a screen cell.
    pub fn zone_at(&self, column: u16, row: u16) -> Option<MoveTarget> {
        if let Some(index) = self.slots.iter().position(|r| contains(*r, column, row)) {
            return Some(MoveTarget::Slot(index));
        }
        contains(self.inventory_area, column, row).then_some(MoveTarget::Inventory)
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
