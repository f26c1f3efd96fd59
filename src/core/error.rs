//! Error types for invalid game configuration.
//!
//! Gameplay itself never fails: flips that are not allowed are ignored.
//! Errors only surface when building a deck or a config that cannot
//! produce a playable round.

use thiserror::Error;

/// A deck that violates the pairing invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("deck has no cards")]
    Empty,
    #[error("deck has an odd number of cards ({0})")]
    OddCardCount(usize),
    #[error("face value {face} appears {count} times, expected exactly 2")]
    FaceCount { face: u32, count: usize },
    #[error("deck has {0} cards, more than a card id can address")]
    TooManyCards(usize),
    #[error("card at index {index} carries id {id}")]
    CardIdMismatch { index: u32, id: u32 },
    #[error("layout is not a permutation of the deck's cards")]
    InvalidLayout,
}

/// A `GameConfig` that cannot drive a round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("total time must be at least one second")]
    ZeroTotalTime,
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
    #[error("invalid config json: {0}")]
    InvalidJson(String),
}

/// Any failure while constructing a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
