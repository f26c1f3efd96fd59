//! Core engine types: RNG, configuration, errors.
//!
//! Nothing in here knows about cards or timers; the `cards`, `timing` and
//! `game` modules build on top of it.

pub mod config;
pub mod error;
pub mod rng;

pub use config::GameConfig;
pub use error::{ConfigError, DeckError, GameError};
pub use rng::{GameRng, GameRngState};
