//! Feedback signals for the presentation layer.

use serde::{Deserialize, Serialize};

/// A named sensory cue. The engine queues these; presentation decides how
/// (or whether) to play them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FeedbackEvent {
    /// A brand was picked up.
    Pickup,
    /// A brand was dropped onto a slot.
    Drop,
    /// A brand went back to inventory.
    Remove,
    /// An attempt was confirmed without solving.
    Confirm,
    /// The game was solved.
    Win,
    /// A lifecycle control was accepted.
    Click,
    /// A request was refused, such as a locked level.
    Denied,
}
