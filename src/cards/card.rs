//! Card identity and per-card visual state.

use serde::{Deserialize, Serialize};

/// Stable index of a card within its deck.
///
/// Shuffling changes where a card is laid out, never its id, so
/// presentation can keep a `CardId` per grid element for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Opaque token naming the pair a card belongs to.
///
/// The engine only compares face values for equality. A `Theme` maps them
/// to asset names for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceValue(pub u32);

impl FaceValue {
    /// Create a new face value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for FaceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Face({})", self.0)
    }
}

/// What the player currently sees of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualState {
    /// Face-down.
    #[default]
    Hidden,
    /// Face-up, not yet paired.
    Revealed,
    /// Face-up and paired; stays that way until the next round.
    Matched,
}

impl VisualState {
    /// Is the face showing?
    #[must_use]
    pub fn is_face_up(self) -> bool {
        !matches!(self, VisualState::Hidden)
    }
}

/// A card in the deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Stable identity.
    pub id: CardId,

    /// Which pair this card belongs to.
    pub face: FaceValue,

    /// Current visual state. Only the controller changes it.
    pub state: VisualState,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(id: CardId, face: FaceValue) -> Self {
        Self {
            id,
            face,
            state: VisualState::Hidden,
        }
    }

    /// Does this card pair with `other`?
    ///
    /// Compares face values only; a card never pairs with itself.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.face == other.face
    }
}
