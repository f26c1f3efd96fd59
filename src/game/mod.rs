//! The memory-game state machine.
//!
//! - `GameController`: owns deck and round, consumes input, drives timers
//! - `RoundState` / `Outcome`: per-round counters and result
//! - `InputEvent` / `FlipResult`: what comes in and what it did
//! - `GameSnapshot`: read-only view for presentation

pub mod controller;
pub mod input;
pub mod round;
pub mod snapshot;

pub use controller::GameController;
pub use input::{FlipResult, IgnoreReason, InputEvent};
pub use round::{Outcome, RoundState};
pub use snapshot::{CardView, GameSnapshot};
