//! Strictly Sodas - a sequence-deduction puzzle engine.
//!
//! A hidden order of soda brands is dealt; the player arranges brands into
//! slots and, for each confirmed attempt, learns only how many positions
//! match.
//!
//! # Architecture
//!
//! - **Catalog**: the fixed, ordered list of brands
//! - **Round**: target, slot board and attempt history for one game
//! - **Executor**: the single function that mutates a board, guarded by a
//!   move contract and board invariants
//! - **Game**: lifecycle, unlocks, records, timer and feedback
//! - **Input**: pointer and touch adapters that reduce gestures to moves
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use strictly_sodas::{Brand, Catalog, Game, MemoryStore, Move, SystemClock};
//!
//! let mut game = Game::new(
//!     Catalog::standard(),
//!     MemoryStore::new(),
//!     SystemClock,
//!     StdRng::seed_from_u64(3),
//! );
//! game.execute_move(Move::place(Brand::Cola, 0));
//! assert_eq!(game.inventory().len(), 4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod catalog;
mod clock;
mod contracts;
mod executor;
mod feedback;
mod game;
mod generator;
mod history;
mod input;
mod invariants;
mod persistence;
mod progression;
mod records;
mod round;
mod scorer;
mod status;
mod view;

// Crate-level exports - Catalog and board
pub use board::{Guess, Slot, SlotBoard};
pub use catalog::{Brand, Catalog, DEFAULT_GAME_SIZE};

// Crate-level exports - Rules
pub use action::{Move, MoveOutcome, MoveRejection, MoveSource, MoveTarget};
pub use generator::{TargetSequence, generate_sequence};
pub use history::{HistoryEntry, HistoryLog};
pub use progression::{Progression, on_win};
pub use records::{GameRecord, RecordBook};
pub use round::Round;
pub use scorer::{is_solved, score};

// Crate-level exports - Contracts and invariants
pub use contracts::{
    Contract, LegalMove, MeaningfulDrop, MoveContract, SlotsInRange, SourceIsCurrent,
};
pub use invariants::{
    ActiveSubsetInvariant, BoardInvariants, HistoryScoresInvariant, Invariant, InvariantSet,
    InvariantViolation, RoundInvariants, TargetPermutationInvariant, UniquePlacementInvariant,
};

// Crate-level exports - Session
pub use clock::{Clock, GameTimer, ManualClock, SystemClock};
pub use feedback::FeedbackEvent;
pub use game::Game;
pub use status::{Confirmation, GameStatus, Modal};
pub use view::GameView;

// Crate-level exports - Persistence
pub use persistence::{
    KeyValueStore, MAX_UNLOCKED_KEY, MemoryStore, RECORDS_KEY, StoreError, load_max_unlocked,
    load_records, save_max_unlocked, save_records,
};

// Crate-level exports - Input
pub use input::{MoveSink, PointerAdapter, PointerInput, TouchAdapter, TouchInput, slot_source};
