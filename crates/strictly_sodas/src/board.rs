//! The slot board and the complete guesses it produces.

use crate::catalog::Brand;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A single slot on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Slot {
    /// Nothing placed.
    #[default]
    Empty,
    /// Slot holds a brand.
    Filled(Brand),
}

impl Slot {
    /// Returns the brand in this slot, if any.
    pub fn brand(self) -> Option<Brand> {
        match self {
            Slot::Empty => None,
            Slot::Filled(brand) => Some(brand),
        }
    }

    /// Checks if the slot is empty.
    pub fn is_empty(self) -> bool {
        matches!(self, Slot::Empty)
    }
}

impl From<Option<Brand>> for Slot {
    fn from(brand: Option<Brand>) -> Self {
        brand.map_or(Slot::Empty, Slot::Filled)
    }
}

/// The player's current placement, one slot per active brand.
///
/// Only the move executor mutates a board; everything else sees it through
/// shared references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBoard {
    slots: Vec<Slot>,
}

impl SlotBoard {
    /// Creates an all-empty board with `len` slots.
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![Slot::Empty; len],
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Checks if the board has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Gets the slot at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<Slot> {
        self.slots.get(index).copied()
    }

    /// Returns all slots in order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Index of the slot holding `brand`, if it is placed.
    pub fn position_of(&self, brand: Brand) -> Option<usize> {
        self.slots.iter().position(|s| *s == Slot::Filled(brand))
    }

    /// Checks if `brand` is placed anywhere on the board.
    pub fn contains(&self, brand: Brand) -> bool {
        self.position_of(brand).is_some()
    }

    /// Number of empty slots.
    pub fn empty_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_empty()).count()
    }

    /// Checks if every slot is filled.
    pub fn is_complete(&self) -> bool {
        self.empty_count() == 0
    }

    /// Brands currently placed, in slot order.
    pub fn placed(&self) -> impl Iterator<Item = Brand> + '_ {
        self.slots.iter().filter_map(|s| s.brand())
    }

    /// Active brands not on the board, in catalog order.
    ///
    /// The inventory is always derived from the board so a brand can never be
    /// both placed and available, or neither.
    #[instrument(skip(self, active))]
    pub fn inventory(&self, active: &[Brand]) -> Vec<Brand> {
        active
            .iter()
            .copied()
            .filter(|brand| !self.contains(*brand))
            .collect()
    }

    /// Snapshot of a complete board, or `None` while any slot is empty.
    pub fn guess(&self) -> Option<Guess> {
        self.slots
            .iter()
            .map(|s| s.brand())
            .collect::<Option<Vec<_>>>()
            .map(Guess)
    }

    pub(crate) fn set(&mut self, index: usize, slot: Slot) {
        self.slots[index] = slot;
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    /// Formats the board as a compact string, `_` for empty slots.
    pub fn display(&self) -> String {
        self.slots
            .iter()
            .map(|s| s.brand().map_or('_', Brand::glyph))
            .collect()
    }
}

/// A fully filled board, the only thing the scorer accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guess(Vec<Brand>);

impl Guess {
    /// Creates a guess from a brand sequence.
    pub fn new(brands: Vec<Brand>) -> Self {
        Self(brands)
    }

    /// Brands in slot order.
    pub fn brands(&self) -> &[Brand] {
        &self.0
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks if the guess has no positions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
