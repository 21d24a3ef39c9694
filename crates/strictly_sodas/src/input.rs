//! Input adapters.
//!
//! Pointer drags and touch gestures are reduced to the same [`Move`] and
//! handed to a [`MoveSink`]. A gesture that ends anywhere other than a drop
//! zone commits nothing.

use crate::action::{Move, MoveOutcome, MoveSource, MoveTarget};
use crate::board::{Slot, SlotBoard};
use tracing::{debug, instrument};

/// Receiver of completed gestures.
pub trait MoveSink {
    /// A drag began. Returns false if the sink is not accepting moves.
    fn pickup(&mut self, source: MoveSource) -> bool;

    /// A drag ended on a drop zone.
    fn execute_move(&mut self, mv: Move) -> MoveOutcome;
}

/// The drag source for slot `index`, if it holds a brand.
pub fn slot_source(board: &SlotBoard, index: usize) -> Option<MoveSource> {
    match board.get(index)? {
        Slot::Filled(brand) => Some(MoveSource::Slot { index, brand }),
        Slot::Empty => None,
    }
}

/// Raw pointer (mouse or pen) input, already hit-tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerInput {
    /// Button pressed over a draggable brand.
    Down(MoveSource),
    /// Button released, over a drop zone or not.
    Up(Option<MoveTarget>),
    /// The drag was aborted, e.g. the pointer left the window.
    Cancel,
}

/// Single-pointer drag state.
#[derive(Debug, Clone, Default)]
pub struct PointerAdapter {
    held: Option<MoveSource>,
}

impl PointerAdapter {
    /// Creates an idle adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// The brand currently being dragged.
    pub fn held(&self) -> Option<MoveSource> {
        self.held
    }

    /// Feeds one input. Returns the outcome when a move was submitted.
    #[instrument(skip(self, sink))]
    pub fn handle<S>(&mut self, sink: &mut S, input: PointerInput) -> Option<MoveOutcome>
    where
        S: MoveSink + ?Sized,
    {
        match input {
            PointerInput::Down(source) => {
                self.held = sink.pickup(source).then_some(source);
                None
            }
            PointerInput::Up(zone) => {
                let source = self.held.take()?;
                match zone {
                    Some(target) => Some(sink.execute_move(Move::new(source, target))),
                    None => {
                        debug!(?source, "Drag released outside a drop zone");
                        None
                    }
                }
            }
            PointerInput::Cancel => {
                self.held = None;
                None
            }
        }
    }
}

/// Raw touch input, already hit-tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchInput {
    /// A finger landed on a draggable brand.
    Start {
        /// Platform touch identifier.
        id: u64,
        /// What was touched.
        source: MoveSource,
    },
    /// A finger moved.
    Move {
        /// Platform touch identifier.
        id: u64,
        /// Drop zone under the finger, if any.
        over: Option<MoveTarget>,
    },
    /// A finger lifted.
    End {
        /// Platform touch identifier.
        id: u64,
    },
    /// The platform cancelled the touch.
    Cancel {
        /// Platform touch identifier.
        id: u64,
    },
}

#[derive(Debug, Clone, Copy)]
struct ActiveTouch {
    id: u64,
    source: MoveSource,
    over: Option<MoveTarget>,
}

/// Touch drag state. Only the first finger down is tracked; others are
/// ignored until it lifts.
#[derive(Debug, Clone, Default)]
pub struct TouchAdapter {
    active: Option<ActiveTouch>,
}

impl TouchAdapter {
    /// Creates an idle adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// The brand currently being dragged.
    pub fn held(&self) -> Option<MoveSource> {
        self.active.map(|touch| touch.source)
    }

    /// Feeds one input. Returns the outcome when a move was submitted.
    #[instrument(skip(self, sink))]
    pub fn handle<S>(&mut self, sink: &mut S, input: TouchInput) -> Option<MoveOutcome>
    where
        S: MoveSink + ?Sized,
    {
        match input {
            TouchInput::Start { id, source } => {
                if self.active.is_some() {
                    debug!(id, "Second touch ignored");
                    return None;
                }
                if sink.pickup(source) {
                    self.active = Some(ActiveTouch {
                        id,
                        source,
                        over: None,
                    });
                }
                None
            }
            TouchInput::Move { id, over } => {
                if let Some(touch) = self.active.as_mut()
                    && touch.id == id
                {
                    touch.over = over;
                }
                None
            }
            TouchInput::End { id } => {
                let touch = self.take(id)?;
                match touch.over {
                    Some(target) => Some(sink.execute_move(Move::new(touch.source, target))),
                    None => {
                        debug!(id, "Touch lifted outside a drop zone");
                        None
                    }
                }
            }
            TouchInput::Cancel { id } => {
                self.take(id);
                None
            }
        }
    }

    fn take(&mut self, id: u64) -> Option<ActiveTouch> {
        match self.active {
            Some(touch) if touch.id == id => self.active.take(),
            _ => None,
        }
    }
}
