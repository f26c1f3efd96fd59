//! A stateful audio model behind the feedback port.
//!
//! `SoundBoard` tracks what a browser audio layer would be doing: one
//! looping ambient track and four one-shot cues. Hosts mirror its state
//! onto their real audio objects; tests assert on it directly.
//!
//! ## Behavior
//!
//! - Ambient loops at volume 0.2 by default.
//! - Stopping ambient pauses it and rewinds to the start.
//! - Victory and game-over stop ambient, then play their cue.
//! - Mute only affects ambient; cues still play.

use serde::{Deserialize, Serialize};

use super::FeedbackPort;
use crate::cards::Theme;

/// One-shot sound cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Flip,
    Match,
    Victory,
    GameOver,
}

/// Asset paths for the one-shot cues.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueSet {
    pub flip: String,
    pub matched: String,
    pub victory: String,
    pub game_over: String,
}

impl Default for CueSet {
    fn default() -> Self {
        Self {
            flip: "Music/flip.wav".to_string(),
            matched: "Music/match.wav".to_string(),
            victory: "Music/victory.mp3".to_string(),
            game_over: "Music/gameOver.wav".to_string(),
        }
    }
}

impl CueSet {
    /// Asset path for a cue.
    #[must_use]
    pub fn path(&self, cue: Cue) -> &str {
        match cue {
            Cue::Flip => &self.flip,
            Cue::Match => &self.matched,
            Cue::Victory => &self.victory,
            Cue::GameOver => &self.game_over,
        }
    }
}

/// The looping background track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmbientTrack {
    /// Asset path.
    pub path: String,
    /// Playback volume, 0.0..=1.0.
    pub volume: f32,
    /// Restart from the beginning when the track ends.
    pub looping: bool,
    /// Currently playing?
    pub playing: bool,
    /// Muted? Muting does not pause playback.
    pub muted: bool,
    /// Times the track was started from the beginning.
    pub starts: u32,
}

impl AmbientTrack {
    /// Stopped, unmuted, looping at volume 0.2.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            volume: 0.2,
            looping: true,
            playing: false,
            muted: false,
            starts: 0,
        }
    }

    /// Is sound actually coming out?
    #[must_use]
    pub fn is_audible(&self) -> bool {
        self.playing && !self.muted
    }
}

/// Audio state driven through `FeedbackPort`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundBoard {
    ambient: AmbientTrack,
    cues: CueSet,
    played: Vec<Cue>,
    /// Playback position is at the start of the track.
    rewound: bool,
}

impl SoundBoard {
    /// Create a board for an ambient track with the default cues.
    pub fn new(ambient_path: impl Into<String>) -> Self {
        Self::with_cues(ambient_path, CueSet::default())
    }

    /// Create a board with custom cue assets.
    pub fn with_cues(ambient_path: impl Into<String>, cues: CueSet) -> Self {
        Self {
            ambient: AmbientTrack::new(ambient_path),
            cues,
            played: Vec::new(),
            rewound: true,
        }
    }

    /// Create a board playing a theme's ambient track.
    pub fn for_theme(theme: &Theme) -> Self {
        Self::new(theme.ambient_track.clone())
    }

    /// Set the ambient volume (clamped to 0.0..=1.0).
    #[must_use]
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.ambient.volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Ambient track state.
    #[must_use]
    pub fn ambient(&self) -> &AmbientTrack {
        &self.ambient
    }

    /// Cue assets.
    #[must_use]
    pub fn cues(&self) -> &CueSet {
        &self.cues
    }

    /// One-shot cues played so far, oldest first.
    #[must_use]
    pub fn played(&self) -> &[Cue] {
        &self.played
    }

    /// Asset paths of the cues played so far.
    pub fn played_paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.played.iter().map(|&cue| self.cues.path(cue))
    }

    /// Drain the cues played since the last call, oldest first.
    pub fn take_played(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.played)
    }

    /// Is the ambient position at the beginning?
    #[must_use]
    pub fn is_rewound(&self) -> bool {
        self.rewound
    }

    fn play(&mut self, cue: Cue) {
        tracing::trace!(cue = ?cue, path = self.cues.path(cue), "play cue");
        self.played.push(cue);
    }

    fn stop_ambient(&mut self) {
        self.ambient.playing = false;
        self.rewound = true;
    }
}

impl FeedbackPort for SoundBoard {
    fn on_flip(&mut self) {
        self.play(Cue::Flip);
    }

    fn on_match(&mut self) {
        self.play(Cue::Match);
    }

    fn on_victory(&mut self) {
        self.stop_ambient();
        self.play(Cue::Victory);
    }

    fn on_game_over(&mut self) {
        self.stop_ambient();
        self.play(Cue::GameOver);
    }

    fn on_start_ambient(&mut self) {
        if self.rewound {
            self.ambient.starts += 1;
        }
        self.ambient.playing = true;
        self.rewound = false;
    }

    fn on_stop_ambient(&mut self) {
        self.stop_ambient();
    }

    fn on_mute_toggled(&mut self, is_muted: bool) {
        self.ambient.muted = is_muted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let board = SoundBoard::for_theme(&Theme::cars());
        assert_eq!(board.ambient().path, "Music/blue_ice.mp3");
        assert_eq!(board.ambient().volume, 0.2);
        assert!(board.ambient().looping);
        assert!(!board.ambient().playing);
        assert!(board.played().is_empty());
    }

    #[test]
    fn test_victory_stops_ambient_then_plays_cue() {
        let mut board = SoundBoard::new("bg.mp3");
        board.on_start_ambient();
        assert!(board.ambient().is_audible());

        board.on_flip();
        board.on_flip();
        board.on_match();
        board.on_victory();

        assert!(!board.ambient().playing);
        assert!(board.is_rewound());
        assert_eq!(board.played(), &[Cue::Flip, Cue::Flip, Cue::Match, Cue::Victory]);
        let paths: Vec<&str> = board.played_paths().collect();
        assert_eq!(paths.last(), Some(&"Music/victory.mp3"));
    }

    #[test]
    fn test_game_over_stops_ambient() {
        let mut board = SoundBoard::new("bg.mp3");
        board.on_start_ambient();
        board.on_game_over();

        assert!(!board.ambient().playing);
        assert_eq!(board.played(), &[Cue::GameOver]);
    }

    #[test]
    fn test_mute_keeps_playing_silently() {
        let mut board = SoundBoard::new("bg.mp3");
        board.on_start_ambient();
        board.on_mute_toggled(true);

        assert!(board.ambient().playing);
        assert!(!board.ambient().is_audible());

        board.on_flip();
        assert_eq!(board.played(), &[Cue::Flip]);

        board.on_mute_toggled(false);
        assert!(board.ambient().is_audible());
    }

    #[test]
    fn test_restart_counts_only_from_rewound() {
        let mut board = SoundBoard::new("bg.mp3");
        board.on_start_ambient();
        board.on_start_ambient();
        assert_eq!(board.ambient().starts, 1);

        board.on_stop_ambient();
        board.on_start_ambient();
        assert_eq!(board.ambient().starts, 2);
    }

    #[test]
    fn test_take_played_drains() {
        let mut board = SoundBoard::new("bg.mp3");
        board.on_flip();
        board.on_match();

        assert_eq!(board.take_played(), vec![Cue::Flip, Cue::Match]);
        assert!(board.played().is_empty());

        board.on_game_over();
        assert_eq!(board.take_played(), vec![Cue::GameOver]);
        assert!(board.take_played().is_empty());
    }

    #[test]
    fn test_volume_clamped() {
        let board = SoundBoard::new("bg.mp3").with_volume(3.0);
        assert_eq!(board.ambient().volume, 1.0);
    }
}
