//! Cards, decks and themes.
//!
//! - `Card`: stable id, face value, visual state
//! - `Deck`: validated pairs with a shufflable layout
//! - `Theme`: what the faces look like, which track plays

pub mod card;
pub mod deck;
pub mod theme;

pub use card::{Card, CardId, FaceValue, VisualState};
pub use deck::Deck;
pub use theme::Theme;
