//! Read-only views for presentation.
//!
//! A `GameSnapshot` is everything a renderer needs for one frame: the
//! counters, the outcome overlay, and each grid slot in layout order.
//! Face values of face-down cards are withheld.

use serde::{Deserialize, Serialize};

use super::round::Outcome;
use crate::cards::{CardId, FaceValue, VisualState};

/// One grid slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    /// Which card sits here.
    pub id: CardId,
    /// How it looks.
    pub state: VisualState,
    /// Its face, only when face-up.
    pub face: Option<FaceValue>,
}

/// Presentation view of the whole game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Round counter (0 before the first `start_game`).
    pub round: u32,
    /// Countdown ticks left.
    pub time_remaining: u32,
    /// Pairs found.
    pub matched_count: u32,
    /// `None` before the first round.
    pub outcome: Option<Outcome>,
    /// Input locked?
    pub busy: bool,
    /// Ambient muted?
    pub muted: bool,
    /// Grid slots in layout order.
    pub cards: Vec<CardView>,
}

impl GameSnapshot {
    /// Slots currently face-up.
    pub fn face_up(&self) -> impl Iterator<Item = &CardView> {
        self.cards.iter().filter(|c| c.state.is_face_up())
    }
}
