//! Input events from presentation and what the game made of them.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Discrete input from the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// The player clicked a card.
    CardClicked(CardId),
    /// The player dismissed a start/victory/game-over overlay.
    OverlayClicked,
    /// The player clicked the mute button.
    MuteClicked,
}

/// Why a flip was ignored. Ignoring is never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// No round has been started.
    NotStarted,
    /// The round already ended.
    RoundOver,
    /// Setup or a mismatch is still resolving.
    Busy,
    /// No such card in the deck.
    UnknownCard,
    /// The card is already paired.
    AlreadyMatched,
    /// The card is the face-up half of the current attempt.
    AlreadyPending,
}

/// Result of `flip_card`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipResult {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First card of a pair is now face-up.
    Pending(CardId),
    /// The pair matched; the round goes on.
    Matched { first: CardId, second: CardId },
    /// The pair matched and it was the last one.
    Won { first: CardId, second: CardId },
    /// The pair did not match; both flip back after the mismatch delay.
    Mismatched { first: CardId, second: CardId },
}

impl FlipResult {
    /// Did the flip change anything?
    #[must_use]
    pub fn accepted(&self) -> bool {
        !matches!(self, FlipResult::Ignored(_))
    }

    /// Did the flip complete a pair?
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, FlipResult::Matched { .. } | FlipResult::Won { .. })
    }
}
