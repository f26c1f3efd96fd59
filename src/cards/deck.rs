//! The deck: 2×N cards, exactly two per face value.
//!
//! A deck keeps two orderings:
//! - **Identity order**: `CardId(i)` is always the i-th card built.
//! - **Layout order**: where each card sits in the grid. Shuffling only
//!   permutes the layout.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, FaceValue, VisualState};
use super::theme::Theme;
use crate::core::{DeckError, GameRng};

/// A validated deck of paired cards.
///
/// Deserializing goes through the same checks as `from_faces`, plus a
/// check that the stored layout is a permutation of the card ids.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "DeckRepr", into = "DeckRepr")]
pub struct Deck {
    cards: Vec<Card>,
    layout: Vec<CardId>,
}

/// Wire form of a `Deck`, unchecked until converted.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct DeckRepr {
    cards: Vec<Card>,
    layout: Vec<CardId>,
}

impl From<Deck> for DeckRepr {
    fn from(deck: Deck) -> Self {
        Self {
            cards: deck.cards,
            layout: deck.layout,
        }
    }
}

impl TryFrom<DeckRepr> for Deck {
    type Error = DeckError;

    fn try_from(repr: DeckRepr) -> Result<Self, Self::Error> {
        let mut deck = Deck::from_faces(repr.cards.iter().map(|c| c.face))?;

        for (card, stored) in deck.cards.iter_mut().zip(&repr.cards) {
            if stored.id != card.id {
                return Err(DeckError::CardIdMismatch {
                    index: card.id.raw(),
                    id: stored.id.raw(),
                });
            }
            card.state = stored.state;
        }

        let mut sorted = repr.layout.clone();
        sorted.sort();
        if sorted != deck.layout {
            return Err(DeckError::InvalidLayout);
        }
        deck.layout = repr.layout;

        Ok(deck)
    }
}

impl Deck {
    /// Build a deck from an explicit face sequence.
    ///
    /// Card ids follow the sequence order. Fails unless every face value
    /// appears exactly twice.
    pub fn from_faces(faces: impl IntoIterator<Item = FaceValue>) -> Result<Self, DeckError> {
        let faces: Vec<FaceValue> = faces.into_iter().collect();

        if faces.is_empty() {
            return Err(DeckError::Empty);
        }
        if faces.len() % 2 != 0 {
            return Err(DeckError::OddCardCount(faces.len()));
        }

        let mut counts: FxHashMap<FaceValue, usize> = FxHashMap::default();
        for face in &faces {
            *counts.entry(*face).or_insert(0) += 1;
        }
        // Report the smallest offending face so the error is deterministic
        if let Some((face, count)) = counts
            .iter()
            .filter(|(_, count)| **count != 2)
            .min_by_key(|(face, _)| **face)
        {
            return Err(DeckError::FaceCount {
                face: face.raw(),
                count: *count,
            });
        }

        if u32::try_from(faces.len()).is_err() {
            return Err(DeckError::TooManyCards(faces.len()));
        }

        let cards: Vec<Card> = (0u32..)
            .zip(faces)
            .map(|(i, face)| Card::new(CardId::new(i), face))
            .collect();
        let layout = cards.iter().map(|c| c.id).collect();

        Ok(Self { cards, layout })
    }

    /// Build a deck of `pairs` face values `0..pairs`, laid out as
    /// `[0, 0, 1, 1, ...]` before any shuffle.
    pub fn from_pairs(pairs: u32) -> Result<Self, DeckError> {
        Self::from_faces((0..pairs).flat_map(|v| [FaceValue::new(v), FaceValue::new(v)]))
    }

    /// Build a deck with one pair per theme face.
    pub fn from_theme(theme: &Theme) -> Result<Self, DeckError> {
        let pairs = u32::try_from(theme.pair_count())
            .map_err(|_| DeckError::TooManyCards(theme.pair_count().saturating_mul(2)))?;
        Self::from_pairs(pairs)
    }

    /// Total number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false for a validated deck.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of distinct face values.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Get a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index())
    }

    /// Cards in identity order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Card ids in grid order.
    #[must_use]
    pub fn layout(&self) -> &[CardId] {
        &self.layout
    }

    /// Grid position of a card.
    #[must_use]
    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.layout.iter().position(|&c| c == id)
    }

    /// Permute the layout. Identities and visual states are untouched.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.layout);
    }

    /// Turn every card face-down.
    pub fn hide_all(&mut self) {
        for card in &mut self.cards {
            card.state = VisualState::Hidden;
        }
    }

    /// Number of cards currently in `state`.
    #[must_use]
    pub fn count_in_state(&self, state: VisualState) -> usize {
        self.cards.iter().filter(|c| c.state == state).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faces(values: &[u32]) -> Vec<FaceValue> {
        values.iter().copied().map(FaceValue::new).collect()
    }

    #[test]
    fn test_from_pairs() {
        let deck = Deck::from_pairs(3).unwrap();
        assert_eq!(deck.len(), 6);
        assert_eq!(deck.pair_count(), 3);

        let values: Vec<u32> = deck.cards().map(|c| c.face.raw()).collect();
        assert_eq!(values, vec![0, 0, 1, 1, 2, 2]);
        assert!(deck.cards().all(|c| c.state == VisualState::Hidden));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(Deck::from_pairs(0).unwrap_err(), DeckError::Empty);
    }

    #[test]
    fn test_rejects_odd_count() {
        let err = Deck::from_faces(faces(&[1, 1, 2])).unwrap_err();
        assert_eq!(err, DeckError::OddCardCount(3));
    }

    #[test]
    fn test_rejects_wrong_multiplicity() {
        let err = Deck::from_faces(faces(&[1, 1, 1, 1])).unwrap_err();
        assert_eq!(err, DeckError::FaceCount { face: 1, count: 4 });

        let err = Deck::from_faces(faces(&[5, 4, 4, 6])).unwrap_err();
        assert_eq!(err, DeckError::FaceCount { face: 5, count: 1 });
    }

    #[test]
    fn test_accepts_interleaved_faces() {
        let deck = Deck::from_faces(faces(&[9, 3, 3, 9])).unwrap();
        assert_eq!(deck.card(CardId::new(0)).unwrap().face, FaceValue::new(9));
        assert_eq!(deck.card(CardId::new(3)).unwrap().face, FaceValue::new(9));
        assert!(deck.card(CardId::new(4)).is_none());
    }

    #[test]
    fn test_shuffle_permutes_layout_only() {
        let mut deck = Deck::from_pairs(8).unwrap();
        let mut rng = GameRng::new(42);
        let before: Vec<Card> = deck.cards().cloned().collect();

        deck.shuffle(&mut rng);

        let after: Vec<Card> = deck.cards().cloned().collect();
        assert_eq!(before, after);

        let identity: Vec<CardId> = (0..16).map(CardId::new).collect();
        assert_ne!(deck.layout(), identity.as_slice());

        let mut sorted = deck.layout().to_vec();
        sorted.sort();
        assert_eq!(sorted, identity);
    }

    #[test]
    fn test_position_of() {
        let mut deck = Deck::from_pairs(4).unwrap();
        deck.shuffle(&mut GameRng::new(1));
        for (pos, &id) in deck.layout().iter().enumerate() {
            assert_eq!(deck.position_of(id), Some(pos));
        }
        assert_eq!(deck.position_of(CardId::new(99)), None);
    }

    #[test]
    fn test_hide_all() {
        let mut deck = Deck::from_pairs(2).unwrap();
        deck.card_mut(CardId::new(0)).unwrap().state = VisualState::Matched;
        deck.card_mut(CardId::new(2)).unwrap().state = VisualState::Revealed;
        assert_eq!(deck.count_in_state(VisualState::Hidden), 2);

        deck.hide_all();

        assert_eq!(deck.count_in_state(VisualState::Hidden), 4);
    }

    #[test]
    fn test_serde_keeps_state_and_layout() {
        let mut deck = Deck::from_pairs(3).unwrap();
        deck.shuffle(&mut GameRng::new(5));
        deck.card_mut(CardId::new(4)).unwrap().state = VisualState::Matched;

        let json = serde_json::to_string(&deck).unwrap();
        let restored: Deck = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.layout(), deck.layout());
        assert_eq!(
            restored.card(CardId::new(4)).unwrap().state,
            VisualState::Matched
        );
        assert_eq!(restored.len(), 6);
    }

    #[test]
    fn test_deserialize_rejects_unpaired_cards() {
        let triple = r#"{
            "cards": [
                { "id": 0, "face": 0, "state": "Hidden" },
                { "id": 1, "face": 0, "state": "Hidden" },
                { "id": 2, "face": 0, "state": "Hidden" }
            ],
            "layout": [0, 1, 2]
        }"#;
        assert!(serde_json::from_str::<Deck>(triple).is_err());

        let quad = r#"{
            "cards": [
                { "id": 0, "face": 0, "state": "Hidden" },
                { "id": 1, "face": 0, "state": "Hidden" },
                { "id": 2, "face": 0, "state": "Hidden" },
                { "id": 3, "face": 0, "state": "Hidden" }
            ],
            "layout": [0, 1, 2, 3]
        }"#;
        assert!(serde_json::from_str::<Deck>(quad).is_err());
    }

    #[test]
    fn test_deserialize_rejects_bad_ids_and_layout() {
        let dangling = r#"{
            "cards": [
                { "id": 0, "face": 0, "state": "Hidden" },
                { "id": 1, "face": 0, "state": "Hidden" }
            ],
            "layout": [0, 7]
        }"#;
        assert!(serde_json::from_str::<Deck>(dangling).is_err());

        let swapped_ids = r#"{
            "cards": [
                { "id": 1, "face": 0, "state": "Hidden" },
                { "id": 0, "face": 0, "state": "Hidden" }
            ],
            "layout": [0, 1]
        }"#;
        assert!(serde_json::from_str::<Deck>(swapped_ids).is_err());

        let short_layout = r#"{
            "cards": [
                { "id": 0, "face": 0, "state": "Hidden" },
                { "id": 1, "face": 0, "state": "Hidden" }
            ],
            "layout": [0]
        }"#;
        assert!(serde_json::from_str::<Deck>(short_layout).is_err());
    }

    #[test]
    fn test_from_theme() {
        let deck = Deck::from_theme(&Theme::cars()).unwrap();
        assert_eq!(deck.len(), 24);
    }
}
