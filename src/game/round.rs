//! Per-round state.
//!
//! A `RoundState` is created whole by `start_game` and thrown away by the
//! next one; nothing carries over between rounds.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// How a round stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Still playing (including the setup delay).
    InProgress,
    /// Every pair found before time ran out.
    Victory,
    /// The countdown reached zero.
    TimedOut,
}

impl Outcome {
    /// Has the round ended?
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Mutable state of the live round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Countdown ticks left.
    pub time_remaining: u32,

    /// Pairs found so far.
    pub matched_count: u32,

    /// First card of a pair, waiting for its partner.
    pub pending_card: Option<CardId>,

    /// Input lock: set during the setup delay and while a mismatched pair
    /// is still face-up.
    pub busy: bool,

    /// Current outcome.
    pub outcome: Outcome,
}

impl RoundState {
    /// Fresh round, locked until setup completes.
    #[must_use]
    pub fn new(total_time: u32) -> Self {
        Self {
            time_remaining: total_time,
            matched_count: 0,
            pending_card: None,
            busy: true,
            outcome: Outcome::InProgress,
        }
    }

    /// Is the round still accepting play?
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.outcome == Outcome::InProgress
    }
}
