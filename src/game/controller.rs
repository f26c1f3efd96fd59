//! The game controller: round lifecycle, matching and the countdown.
//!
//! ## Round lifecycle
//!
//! ```text
//! start_game ──► setup (busy) ──setup delay──► playing ──all pairs──► Victory
//!                                                  │
//!                                                  └──time runs out──► TimedOut
//! ```
//!
//! `start_game` may be called from any state; it cancels every timer of
//! the previous round before creating a new one, so at most one countdown
//! is ever scheduled.
//!
//! ## Example
//!
//! ```
//! use mix_or_match::cards::{CardId, Deck};
//! use mix_or_match::core::GameConfig;
//! use mix_or_match::feedback::RecordingFeedback;
//! use mix_or_match::game::{GameController, Outcome};
//! use mix_or_match::timing::ManualClock;
//!
//! let deck = Deck::from_pairs(1).unwrap();
//! let mut game = GameController::new(
//!     GameConfig::default(),
//!     deck,
//!     RecordingFeedback::new(),
//!     ManualClock::new(),
//! )
//! .unwrap();
//!
//! game.start_game();
//! game.advance(500); // setup delay
//!
//! game.flip_card(CardId::new(0));
//! game.flip_card(CardId::new(1));
//! assert_eq!(game.outcome(), Some(Outcome::Victory));
//! ```

use tracing::{debug, info, trace};

use super::input::{FlipResult, IgnoreReason, InputEvent};
use super::round::{Outcome, RoundState};
use super::snapshot::{CardView, GameSnapshot};
use crate::cards::{CardId, Deck, Theme, VisualState};
use crate::core::{GameConfig, GameError, GameRng, GameRngState};
use crate::feedback::FeedbackPort;
use crate::timing::{FiredTimer, ManualClock, Millis, Scheduler, TimerEvent, TimerHandle};

/// Timers owned by the current round.
#[derive(Clone, Copy, Debug, Default)]
struct RoundTimers {
    setup: Option<TimerHandle>,
    countdown: Option<TimerHandle>,
    mismatch: Option<TimerHandle>,
}

/// Memory-game state machine.
///
/// Owns the deck and the live round; the feedback port and scheduler are
/// injected so several games can run side by side and tests can drive
/// time by hand.
#[derive(Debug)]
pub struct GameController<F, S> {
    config: GameConfig,
    deck: Deck,
    rng: GameRng,
    feedback: F,
    scheduler: S,
    round: Option<RoundState>,
    round_number: u32,
    timers: RoundTimers,
    muted: bool,
    ambient_on: bool,
}

impl<F: FeedbackPort, S: Scheduler> GameController<F, S> {
    /// Create a controller. No round runs until `start_game`.
    pub fn new(config: GameConfig, deck: Deck, feedback: F, scheduler: S) -> Result<Self, GameError> {
        config.validate()?;
        let rng = GameRng::new(config.seed);

        Ok(Self {
            config,
            deck,
            rng,
            feedback,
            scheduler,
            round: None,
            round_number: 0,
            timers: RoundTimers::default(),
            muted: false,
            ambient_on: false,
        })
    }

    /// Create a controller with one pair per theme face.
    pub fn with_theme(
        config: GameConfig,
        theme: &Theme,
        feedback: F,
        scheduler: S,
    ) -> Result<Self, GameError> {
        let deck = Deck::from_theme(theme)?;
        Self::new(config, deck, feedback, scheduler)
    }

    // === Inputs ===

    /// Begin (or restart) a round.
    ///
    /// Cancels the previous round's timers, shuffles, hides every card and
    /// locks input until the setup delay elapses.
    pub fn start_game(&mut self) {
        self.cancel_timers();
        if self.ambient_on {
            self.feedback.on_stop_ambient();
            self.ambient_on = false;
        }

        self.round_number += 1;
        let round = self.round_number;
        self.round = Some(RoundState::new(self.config.total_time));

        self.deck.shuffle(&mut self.rng);
        self.deck.hide_all();

        let setup = self
            .scheduler
            .schedule_once(self.config.setup_delay_ms, TimerEvent::SetupComplete { round });
        self.timers.setup = Some(setup);

        info!(
            round,
            total_time = self.config.total_time,
            cards = self.deck.len(),
            "round started"
        );
    }

    /// The player selected a card.
    ///
    /// Flips that are not allowed are ignored silently; the returned
    /// `FlipResult` says what happened.
    pub fn flip_card(&mut self, card: CardId) -> FlipResult {
        if let Some(reason) = self.flip_blocker(card) {
            trace!(card = %card, reason = ?reason, "flip ignored");
            return FlipResult::Ignored(reason);
        }
        let Some(round) = self.round.as_mut() else {
            return FlipResult::Ignored(IgnoreReason::NotStarted);
        };

        self.feedback.on_flip();
        if let Some(c) = self.deck.card_mut(card) {
            c.state = VisualState::Revealed;
        }

        let Some(first) = round.pending_card.take() else {
            round.pending_card = Some(card);
            trace!(round = self.round_number, card = %card, "first card up");
            return FlipResult::Pending(card);
        };

        let paired = match (self.deck.card(first), self.deck.card(card)) {
            (Some(a), Some(b)) => a.pairs_with(b),
            _ => false,
        };

        if !paired {
            // Pending is already cleared; busy holds off the next pick
            round.busy = true;
            let revert = self.scheduler.schedule_once(
                self.config.mismatch_delay_ms,
                TimerEvent::MismatchRevert {
                    round: self.round_number,
                    first,
                    second: card,
                },
            );
            self.timers.mismatch = Some(revert);
            debug!(round = self.round_number, first = %first, second = %card, "mismatch");
            return FlipResult::Mismatched { first, second: card };
        }

        round.matched_count += 1;
        let matched = round.matched_count;
        for id in [first, card] {
            if let Some(c) = self.deck.card_mut(id) {
                c.state = VisualState::Matched;
            }
        }
        self.feedback.on_match();
        debug!(round = self.round_number, first = %first, second = %card, matched, "match");

        if matched as usize * 2 == self.deck.len() {
            self.finish(Outcome::Victory);
            return FlipResult::Won { first, second: card };
        }
        FlipResult::Matched { first, second: card }
    }

    /// Toggle the ambient mute and return the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.feedback.on_mute_toggled(self.muted);
        debug!(muted = self.muted, "mute toggled");
        self.muted
    }

    /// Dispatch a presentation event. Card clicks return their flip result.
    pub fn handle_input(&mut self, input: InputEvent) -> Option<FlipResult> {
        match input {
            InputEvent::CardClicked(card) => Some(self.flip_card(card)),
            InputEvent::OverlayClicked => {
                self.start_game();
                None
            }
            InputEvent::MuteClicked => {
                self.toggle_mute();
                None
            }
        }
    }

    /// Fire every timer the scheduler reports due. Returns how many fired.
    pub fn poll(&mut self) -> usize {
        let now = self.scheduler.now();
        self.run_until(now)
    }

    // === Queries ===

    /// Would `flip_card(card)` be accepted right now?
    #[must_use]
    pub fn can_flip(&self, card: CardId) -> bool {
        self.flip_blocker(card).is_none()
    }

    /// Countdown ticks left (the full time before the first round).
    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.round
            .as_ref()
            .map_or(self.config.total_time, |r| r.time_remaining)
    }

    /// Pairs found this round.
    #[must_use]
    pub fn matched_count(&self) -> u32 {
        self.round.as_ref().map_or(0, |r| r.matched_count)
    }

    /// Outcome of the live round; `None` before the first `start_game`.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.round.as_ref().map(|r| r.outcome)
    }

    /// Is input locked?
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.round.as_ref().is_some_and(|r| r.busy)
    }

    /// First card of the current attempt, if any.
    #[must_use]
    pub fn pending_card(&self) -> Option<CardId> {
        self.round.as_ref().and_then(|r| r.pending_card)
    }

    /// Visual state of a card.
    #[must_use]
    pub fn visual_state(&self, card: CardId) -> Option<VisualState> {
        self.deck.card(card).map(|c| c.state)
    }

    /// Is the ambient track muted?
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Is a countdown scheduled?
    #[must_use]
    pub fn is_countdown_running(&self) -> bool {
        self.timers
            .countdown
            .is_some_and(|h| self.scheduler.is_active(h))
    }

    /// Rounds started so far.
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// The live round.
    #[must_use]
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// Card ids in grid order.
    #[must_use]
    pub fn layout(&self) -> &[CardId] {
        self.deck.layout()
    }

    /// The deck.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The config this game was built with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Shuffle RNG position, for reproducing a session.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Rewind or fast-forward the shuffle RNG to a saved position. The
    /// next `start_game` then deals the same layouts the saved session did.
    pub fn restore_rng(&mut self, state: &GameRngState) {
        self.rng = GameRng::from_state(state);
        debug!(seed = state.seed, word_pos = state.word_pos, "rng restored");
    }

    /// The feedback port.
    #[must_use]
    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    /// The feedback port, mutably.
    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }

    /// The scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The scheduler, mutably. Hosts driving a clock they own (moving a
    /// `ManualClock` with `advance_to`, say) follow up with `poll`.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Everything presentation needs for one frame.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let cards = self
            .deck
            .layout()
            .iter()
            .filter_map(|&id| self.deck.card(id))
            .map(|c| CardView {
                id: c.id,
                state: c.state,
                face: c.state.is_face_up().then_some(c.face),
            })
            .collect();

        GameSnapshot {
            round: self.round_number,
            time_remaining: self.time_remaining(),
            matched_count: self.matched_count(),
            outcome: self.outcome(),
            busy: self.is_busy(),
            muted: self.muted,
            cards,
        }
    }

    // === Internals ===

    fn flip_blocker(&self, card: CardId) -> Option<IgnoreReason> {
        let Some(round) = self.round.as_ref() else {
            return Some(IgnoreReason::NotStarted);
        };
        if !round.is_live() {
            return Some(IgnoreReason::RoundOver);
        }
        if round.busy {
            return Some(IgnoreReason::Busy);
        }
        let Some(state) = self.visual_state(card) else {
            return Some(IgnoreReason::UnknownCard);
        };
        if state == VisualState::Matched {
            return Some(IgnoreReason::AlreadyMatched);
        }
        if round.pending_card == Some(card) {
            return Some(IgnoreReason::AlreadyPending);
        }
        None
    }

    fn run_until(&mut self, until: Millis) -> usize {
        let mut fired = 0;
        while let Some(timer) = self.scheduler.pop_due(until) {
            self.handle_timer(timer);
            fired += 1;
        }
        fired
    }

    fn handle_timer(&mut self, timer: FiredTimer) {
        let round = timer.event.round();
        if round != self.round_number {
            debug!(timer = %timer.handle, round, current = self.round_number, "dropping stale timer");
            return;
        }

        match timer.event {
            TimerEvent::SetupComplete { .. } => {
                self.timers.setup = None;
                self.feedback.on_start_ambient();
                self.ambient_on = true;
                self.deck.shuffle(&mut self.rng);

                if let Some(old) = self.timers.countdown.take() {
                    self.scheduler.cancel(old);
                }
                let countdown = self.scheduler.schedule_repeating(
                    self.config.tick_interval_ms,
                    TimerEvent::CountdownTick { round },
                );
                self.timers.countdown = Some(countdown);

                if let Some(r) = self.round.as_mut() {
                    r.busy = false;
                }
                debug!(round, "setup complete");
            }
            TimerEvent::MismatchRevert { first, second, .. } => {
                self.timers.mismatch = None;
                for id in [first, second] {
                    if let Some(c) = self.deck.card_mut(id) {
                        if c.state == VisualState::Revealed {
                            c.state = VisualState::Hidden;
                        }
                    }
                }
                if let Some(r) = self.round.as_mut() {
                    r.busy = false;
                }
                trace!(round, first = %first, second = %second, "mismatch reverted");
            }
            TimerEvent::CountdownTick { .. } => {
                let Some(r) = self.round.as_mut() else {
                    return;
                };
                if !r.is_live() {
                    return;
                }
                r.time_remaining = r.time_remaining.saturating_sub(1);
                let remaining = r.time_remaining;
                trace!(round, time_remaining = remaining, "tick");
                if remaining == 0 {
                    self.finish(Outcome::TimedOut);
                }
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        if let Some(countdown) = self.timers.countdown.take() {
            self.scheduler.cancel(countdown);
        }
        let Some(round) = self.round.as_mut() else {
            return;
        };
        round.outcome = outcome;
        round.pending_card = None;
        let (time_remaining, matched) = (round.time_remaining, round.matched_count);

        match outcome {
            Outcome::Victory => self.feedback.on_victory(),
            Outcome::TimedOut => self.feedback.on_game_over(),
            Outcome::InProgress => return,
        }
        self.ambient_on = false;

        info!(
            round = self.round_number,
            outcome = ?outcome,
            time_remaining,
            matched,
            "round finished"
        );
    }

    fn cancel_timers(&mut self) {
        let timers = std::mem::take(&mut self.timers);
        for handle in [timers.setup, timers.countdown, timers.mismatch]
            .into_iter()
            .flatten()
        {
            self.scheduler.cancel(handle);
        }
    }
}

impl<F: FeedbackPort> GameController<F, ManualClock> {
    /// Move virtual time forward by `ms`, firing everything due on the
    /// way in deadline order. Returns how many timers fired.
    pub fn advance(&mut self, ms: Millis) -> usize {
        let target = self.scheduler.now().saturating_add(ms);
        let fired = self.run_until(target);
        self.scheduler.advance_to(target);
        fired
    }

    /// Virtual time now.
    #[must_use]
    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{FeedbackEvent, RecordingFeedback};

    fn game(pairs: u32) -> GameController<RecordingFeedback, ManualClock> {
        GameController::new(
            GameConfig::default().with_total_time(10),
            Deck::from_pairs(pairs).unwrap(),
            RecordingFeedback::new(),
            ManualClock::new(),
        )
        .unwrap()
    }

    fn started(pairs: u32) -> GameController<RecordingFeedback, ManualClock> {
        let mut g = game(pairs);
        g.start_game();
        g.advance(500);
        g.feedback_mut().clear();
        g
    }

    #[test]
    fn test_advance_to_end_of_time() {
        let mut g = started(2);
        g.advance(u64::MAX);

        assert_eq!(g.outcome(), Some(Outcome::TimedOut));
        assert_eq!(g.time_remaining(), 0);
        assert_eq!(g.now(), u64::MAX);
        assert_eq!(g.scheduler().active_count(), 0);

        assert_eq!(g.advance(u64::MAX), 0);
    }

    #[test]
    fn test_restore_rng_replays_layout() {
        let mut original = game(6);
        original.start_game();
        original.advance(500);
        let saved = original.rng_state();
        original.start_game();
        original.advance(500);

        // Replay the second round from a game built with another seed
        let mut replay: GameController<RecordingFeedback, ManualClock> = GameController::new(
            GameConfig::default().with_total_time(10).with_seed(7),
            original.deck().clone(),
            RecordingFeedback::new(),
            ManualClock::new(),
        )
        .unwrap();
        replay.restore_rng(&saved);
        assert_eq!(replay.rng_state(), saved);
        assert_ne!(replay.rng_state(), original.rng_state());

        original.start_game();
        original.advance(500);
        replay.start_game();
        replay.advance(500);

        assert_eq!(replay.layout(), original.layout());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let err = GameController::new(
            GameConfig::default().with_total_time(0),
            Deck::from_pairs(2).unwrap(),
            RecordingFeedback::new(),
            ManualClock::new(),
        )
        .unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
    }

    #[test]
    fn test_flip_before_start_is_ignored() {
        let mut g = game(2);
        assert_eq!(
            g.flip_card(CardId::new(0)),
            FlipResult::Ignored(IgnoreReason::NotStarted)
        );
        assert!(g.feedback().is_empty());
        assert_eq!(g.outcome(), None);
        assert_eq!(g.time_remaining(), 10);
    }

    #[test]
    fn test_setup_locks_then_releases() {
        let mut g = game(2);
        g.start_game();

        assert!(g.is_busy());
        assert!(!g.is_countdown_running());
        assert_eq!(
            g.flip_card(CardId::new(0)),
            FlipResult::Ignored(IgnoreReason::Busy)
        );

        g.advance(499);
        assert!(g.is_busy());

        g.advance(1);
        assert!(!g.is_busy());
        assert!(g.is_countdown_running());
        assert_eq!(g.feedback().events(), &[FeedbackEvent::StartAmbient]);
    }

    #[test]
    fn test_unknown_card_ignored() {
        let mut g = started(2);
        assert_eq!(
            g.flip_card(CardId::new(4)),
            FlipResult::Ignored(IgnoreReason::UnknownCard)
        );
    }

    #[test]
    fn test_restart_mid_round_stops_ambient() {
        let mut g = started(2);
        g.flip_card(CardId::new(0));
        g.feedback_mut().clear();

        g.start_game();

        assert_eq!(g.feedback().events(), &[FeedbackEvent::StopAmbient]);
        assert_eq!(g.round_number(), 2);
        assert_eq!(g.pending_card(), None);
        assert_eq!(g.deck().count_in_state(VisualState::Hidden), 4);
    }

    #[test]
    fn test_restart_after_victory_does_not_stop_twice() {
        let mut g = started(1);
        g.flip_card(CardId::new(0));
        g.flip_card(CardId::new(1));
        g.feedback_mut().clear();

        g.start_game();

        assert!(g.feedback().is_empty());
        assert_eq!(g.outcome(), Some(Outcome::InProgress));
    }

    #[test]
    fn test_stale_mismatch_revert_dropped() {
        let mut g = started(2);
        g.flip_card(CardId::new(0));
        g.flip_card(CardId::new(2));
        assert!(g.is_busy());

        // Restart cancels the revert; the new round stays locked by setup only
        g.start_game();
        assert_eq!(g.scheduler().active_count(), 1);
        g.advance(500);
        assert!(!g.is_busy());
        g.flip_card(CardId::new(1));
        g.advance(600);
        assert_eq!(g.visual_state(CardId::new(1)), Some(VisualState::Revealed));
        assert_eq!(g.pending_card(), Some(CardId::new(1)));
    }

    #[test]
    fn test_mute_round_trip() {
        let mut g = game(1);
        assert!(!g.is_muted());
        assert!(g.toggle_mute());
        assert!(!g.toggle_mute());
        assert_eq!(
            g.feedback().events(),
            &[FeedbackEvent::MuteToggled(true), FeedbackEvent::MuteToggled(false)]
        );
    }

    #[test]
    fn test_snapshot_hides_face_down_values() {
        let mut g = started(2);
        g.flip_card(CardId::new(3));

        let snap = g.snapshot();
        assert_eq!(snap.cards.len(), 4);
        assert_eq!(snap.round, 1);
        assert_eq!(snap.outcome, Some(Outcome::InProgress));

        let up: Vec<&CardView> = snap.face_up().collect();
        assert_eq!(up.len(), 1);
        assert_eq!(up[0].id, CardId::new(3));
        assert!(up[0].face.is_some());
        assert!(snap
            .cards
            .iter()
            .filter(|c| c.id != CardId::new(3))
            .all(|c| c.face.is_none()));

        let order: Vec<CardId> = snap.cards.iter().map(|c| c.id).collect();
        assert_eq!(order, g.layout());
    }

    #[test]
    fn test_setup_reshuffles_layout() {
        let mut g = game(12);
        g.start_game();
        let during_setup = g.layout().to_vec();
        g.advance(500);
        assert_ne!(g.layout(), during_setup.as_slice());
    }
}
