//! A feedback port that remembers every call.

use super::{FeedbackEvent, FeedbackPort};

/// Records the ordered sequence of feedback calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingFeedback {
    events: Vec<FeedbackEvent>,
}

impl RecordingFeedback {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[FeedbackEvent] {
        &self.events
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Nothing recorded?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// How many times `event` was recorded.
    #[must_use]
    pub fn count(&self, event: FeedbackEvent) -> usize {
        self.events.iter().filter(|&&e| e == event).count()
    }

    /// Most recent call.
    #[must_use]
    pub fn last(&self) -> Option<FeedbackEvent> {
        self.events.last().copied()
    }

    /// Drain the recording.
    pub fn take(&mut self) -> Vec<FeedbackEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forget everything recorded.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl FeedbackPort for RecordingFeedback {
    fn on_flip(&mut self) {
        self.events.push(FeedbackEvent::Flip);
    }

    fn on_match(&mut self) {
        self.events.push(FeedbackEvent::Match);
    }

    fn on_victory(&mut self) {
        self.events.push(FeedbackEvent::Victory);
    }

    fn on_game_over(&mut self) {
        self.events.push(FeedbackEvent::GameOver);
    }

    fn on_start_ambient(&mut self) {
        self.events.push(FeedbackEvent::StartAmbient);
    }

    fn on_stop_ambient(&mut self) {
        self.events.push(FeedbackEvent::StopAmbient);
    }

    fn on_mute_toggled(&mut self, is_muted: bool) {
        self.events.push(FeedbackEvent::MuteToggled(is_muted));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut rec = RecordingFeedback::new();
        assert!(rec.is_empty());

        rec.on_flip();
        rec.on_flip();
        rec.on_match();
        rec.on_victory();

        assert_eq!(
            rec.events(),
            &[
                FeedbackEvent::Flip,
                FeedbackEvent::Flip,
                FeedbackEvent::Match,
                FeedbackEvent::Victory,
            ]
        );
        assert_eq!(rec.count(FeedbackEvent::Flip), 2);
        assert_eq!(rec.last(), Some(FeedbackEvent::Victory));
    }

    #[test]
    fn test_take_drains() {
        let mut rec = RecordingFeedback::new();
        rec.on_game_over();
        rec.on_stop_ambient();

        let taken = rec.take();
        assert_eq!(taken, vec![FeedbackEvent::GameOver, FeedbackEvent::StopAmbient]);
        assert!(rec.is_empty());

        rec.on_mute_toggled(false);
        rec.clear();
        assert_eq!(rec.len(), 0);
    }
}
