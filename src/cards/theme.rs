//! Visual themes: the face images and ambient track for a deck.
//!
//! The engine never reads asset names; a theme only tells presentation
//! what `FaceValue(i)` looks like and which track to loop.

use serde::{Deserialize, Serialize};

use super::card::FaceValue;

/// A face-value set plus ambient track.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name (matches the page's category).
    pub name: String,

    /// Asset name per face value, indexed by `FaceValue::raw()`.
    pub faces: Vec<String>,

    /// Looping background track.
    pub ambient_track: String,
}

impl Theme {
    /// Create a new theme.
    pub fn new(
        name: impl Into<String>,
        faces: impl IntoIterator<Item = impl Into<String>>,
        ambient_track: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            faces: faces.into_iter().map(Into::into).collect(),
            ambient_track: ambient_track.into(),
        }
    }

    /// Car logos.
    pub fn cars() -> Self {
        Self::new(
            "cars",
            [
                "toyota.png",
                "mercedes.png",
                "renault.jpg",
                "audi.png",
                "skoda.png",
                "honda.jpg",
                "ferrari.jpg",
                "ford.png",
                "citroen.png",
                "fiat.jpg",
                "bmw.jpg",
                "chevrolet.png",
            ],
            "Music/blue_ice.mp3",
        )
    }

    /// Video game covers.
    pub fn games() -> Self {
        Self::new(
            "games",
            [
                "hogwarts.jpg",
                "repo.jpg",
                "planet_coaster.jpg",
                "warframe.png",
                "fortnite.jpg",
                "stray.jpg",
                "silksong.jpg",
                "jedi.jpg",
                "warcraft.png",
                "bronze.jpg",
                "copycat.jpg",
                "sims.jpg",
            ],
            "Music/Raingame.mp3",
        )
    }

    /// Look up a built-in theme by name.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "cars" => Some(Self::cars()),
            "games" => Some(Self::games()),
            _ => None,
        }
    }

    /// Number of pairs a deck built from this theme holds.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.faces.len()
    }

    /// Asset name for a face value.
    #[must_use]
    pub fn face_asset(&self, face: FaceValue) -> Option<&str> {
        self.faces.get(face.raw() as usize).map(String::as_str)
    }
}
