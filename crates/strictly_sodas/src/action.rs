//! First-class move descriptors.
//!
//! Every input modality reduces to a [`Move`] before it touches the board.
//! Moves describe intent; the executor decides whether they apply.

use crate::catalog::Brand;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Where a dragged brand was picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveSource {
    /// Picked from the unplaced inventory.
    Inventory(Brand),
    /// Picked from a slot on the board.
    Slot {
        /// Slot the brand was taken from.
        index: usize,
        /// Brand the slot held when the drag began.
        brand: Brand,
    },
}

impl MoveSource {
    /// The brand being moved.
    pub fn brand(self) -> Brand {
        match self {
            MoveSource::Inventory(brand) => brand,
            MoveSource::Slot { brand, .. } => brand,
        }
    }
}

/// Where a dragged brand was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveTarget {
    /// Back to the inventory.
    Inventory,
    /// Onto a slot.
    Slot(usize),
}

/// A complete move request: one pickup and one drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Pickup point.
    pub source: MoveSource,
    /// Drop point.
    pub target: MoveTarget,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(source: MoveSource, target: MoveTarget) -> Self {
        Self { source, target }
    }

    /// Inventory brand onto a slot.
    pub fn place(brand: Brand, index: usize) -> Self {
        Self::new(MoveSource::Inventory(brand), MoveTarget::Slot(index))
    }

    /// Slot contents onto another slot.
    pub fn shift(from: usize, brand: Brand, to: usize) -> Self {
        Self::new(MoveSource::Slot { index: from, brand }, MoveTarget::Slot(to))
    }

    /// Slot contents back to inventory.
    pub fn remove(index: usize, brand: Brand) -> Self {
        Self::new(MoveSource::Slot { index, brand }, MoveTarget::Inventory)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.source, self.target) {
            (MoveSource::Inventory(brand), MoveTarget::Slot(to)) => {
                write!(f, "{brand} -> slot {to}")
            }
            (MoveSource::Inventory(brand), MoveTarget::Inventory) => {
                write!(f, "{brand} -> inventory")
            }
            (MoveSource::Slot { index, brand }, MoveTarget::Slot(to)) => {
                write!(f, "{brand} slot {index} -> slot {to}")
            }
            (MoveSource::Slot { index, brand }, MoveTarget::Inventory) => {
                write!(f, "{brand} slot {index} -> inventory")
            }
        }
    }
}

/// What a move did to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// An inventory brand was placed, possibly displacing another.
    Placed {
        /// Slot that received the brand.
        index: usize,
        /// Previous occupant, now back in inventory.
        displaced: Option<Brand>,
    },
    /// Two slots exchanged contents.
    Swapped {
        /// Slot the drag started from.
        from: usize,
        /// Slot the drag ended on.
        to: usize,
    },
    /// A brand went back to inventory.
    Removed {
        /// Slot that was cleared.
        index: usize,
        /// Brand returned to inventory.
        brand: Brand,
    },
    /// The move was not applied; the board is unchanged.
    Ignored(MoveRejection),
}

impl MoveOutcome {
    /// Checks if the board changed.
    pub fn is_applied(&self) -> bool {
        !matches!(self, MoveOutcome::Ignored(_))
    }
}

/// Why a move was ignored.
///
/// Rejections are routine (stray drops, stale drags) and never surface as
/// errors at the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveRejection {
    /// The game is not being played.
    #[display("Game is not in progress")]
    NotPlaying,

    /// Slot index past the end of the board.
    #[display("Slot {} is out of range", _0)]
    SlotOutOfRange(usize),

    /// Brand outside the active subset.
    #[display("{} is not in play", _0)]
    InactiveBrand(Brand),

    /// Inventory pickup of a brand that is already on the board.
    #[display("{} is already placed", _0)]
    AlreadyPlaced(Brand),

    /// The source slot no longer holds the dragged brand.
    #[display("Slot {} no longer holds {}", index, brand)]
    StaleSource {
        /// Source slot.
        index: usize,
        /// Brand the drag claimed to carry.
        brand: Brand,
    },

    /// Dropped back on the slot it came from.
    #[display("Slot {} dropped onto itself", _0)]
    SameSlot(usize),

    /// Inventory to inventory has no meaning.
    #[display("Inventory to inventory")]
    InventoryToInventory,

    /// A postcondition failed and the move was rolled back.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveRejection {}
