//! # mix-or-match
//!
//! A memory-matching card game engine: a grid of face-down cards is
//! shuffled, the player flips pairs, and matches race a countdown.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: The engine never touches a screen or a
//!    speaker. It calls a `FeedbackPort` and exposes read-only state.
//!
//! 2. **Injected Time**: Every delay goes through a `Scheduler`. Tests use
//!    `ManualClock` and advance virtual time deterministically.
//!
//! 3. **Configuration Over Duplication**: One controller serves every
//!    theme; a `Theme` only supplies face assets and an ambient track.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `cards`: Cards, decks, themes
//! - `timing`: Scheduler trait, timer queue, manual and wall clocks
//! - `feedback`: Feedback port, recorder, sound board
//! - `game`: The controller and its round state

pub mod cards;
pub mod core;
pub mod feedback;
pub mod game;
pub mod timing;

// Re-export commonly used types
pub use crate::core::{ConfigError, DeckError, GameConfig, GameError, GameRng, GameRngState};

pub use crate::cards::{Card, CardId, Deck, FaceValue, Theme, VisualState};

pub use crate::timing::{
    FiredTimer, ManualClock, Millis, Scheduler, TimerEvent, TimerHandle, TimerQueue, WallClock,
};

pub use crate::feedback::{FeedbackEvent, FeedbackPort, RecordingFeedback, SoundBoard};

pub use crate::game::{
    CardView, FlipResult, GameController, GameSnapshot, IgnoreReason, InputEvent, Outcome,
    RoundState,
};
