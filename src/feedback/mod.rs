//! Audio/visual feedback emitted by the game.
//!
//! The game calls into a `FeedbackPort` and never looks at the result.
//! Hosts implement it to play sounds or animate; tests use
//! `RecordingFeedback` to assert on the exact call sequence.
//!
//! ## Sharing a port
//!
//! The controller owns its port by value. To keep a handle on the same
//! port from outside, pass `Rc<RefCell<T>>` (or `&mut T`); both are
//! ports whenever `T` is.

pub mod recording;
pub mod sound_board;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub use recording::RecordingFeedback;
pub use sound_board::{AmbientTrack, Cue, CueSet, SoundBoard};

/// Output commands from the game. All are fire-and-forget.
pub trait FeedbackPort {
    /// A card was turned face-up.
    fn on_flip(&mut self);

    /// Two cards were paired.
    fn on_match(&mut self);

    /// Every pair was found. Implementations stop ambient sound themselves.
    fn on_victory(&mut self);

    /// The countdown ran out. Implementations stop ambient sound themselves.
    fn on_game_over(&mut self);

    /// The round is live; start the background track.
    fn on_start_ambient(&mut self);

    /// Stop the background track.
    fn on_stop_ambient(&mut self);

    /// Mute state of the background track changed.
    fn on_mute_toggled(&mut self, is_muted: bool);
}

/// One recorded `FeedbackPort` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackEvent {
    Flip,
    Match,
    Victory,
    GameOver,
    StartAmbient,
    StopAmbient,
    MuteToggled(bool),
}

/// Headless play: discard everything.
impl FeedbackPort for () {
    fn on_flip(&mut self) {}
    fn on_match(&mut self) {}
    fn on_victory(&mut self) {}
    fn on_game_over(&mut self) {}
    fn on_start_ambient(&mut self) {}
    fn on_stop_ambient(&mut self) {}
    fn on_mute_toggled(&mut self, _is_muted: bool) {}
}

impl<T: FeedbackPort + ?Sized> FeedbackPort for &mut T {
    fn on_flip(&mut self) {
        (**self).on_flip();
    }

    fn on_match(&mut self) {
        (**self).on_match();
    }

    fn on_victory(&mut self) {
        (**self).on_victory();
    }

    fn on_game_over(&mut self) {
        (**self).on_game_over();
    }

    fn on_start_ambient(&mut self) {
        (**self).on_start_ambient();
    }

    fn on_stop_ambient(&mut self) {
        (**self).on_stop_ambient();
    }

    fn on_mute_toggled(&mut self, is_muted: bool) {
        (**self).on_mute_toggled(is_muted);
    }
}

impl<T: FeedbackPort + ?Sized> FeedbackPort for Rc<RefCell<T>> {
    fn on_flip(&mut self) {
        self.borrow_mut().on_flip();
    }

    fn on_match(&mut self) {
        self.borrow_mut().on_match();
    }

    fn on_victory(&mut self) {
        self.borrow_mut().on_victory();
    }

    fn on_game_over(&mut self) {
        self.borrow_mut().on_game_over();
    }

    fn on_start_ambient(&mut self) {
        self.borrow_mut().on_start_ambient();
    }

    fn on_stop_ambient(&mut self) {
        self.borrow_mut().on_stop_ambient();
    }

    fn on_mute_toggled(&mut self, is_muted: bool) {
        self.borrow_mut().on_mute_toggled(is_muted);
    }
}
