//! Game configuration.
//!
//! All durations are in milliseconds of scheduler time except
//! `total_time`, which is counted in countdown ticks (seconds with the
//! default tick interval).

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Round timing and shuffling parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Countdown length in ticks (default: 200).
    pub total_time: u32,

    /// Delay between `start_game` and the round accepting input.
    /// Masks the grid while it is being re-laid out.
    pub setup_delay_ms: u64,

    /// How long two mismatched cards stay face-up before flipping back.
    pub mismatch_delay_ms: u64,

    /// Interval between countdown ticks.
    pub tick_interval_ms: u64,

    /// Seed for the shuffle RNG.
    /// Same seed produces the same layouts.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_time: 200,
            setup_delay_ms: 500,
            mismatch_delay_ms: 1000,
            tick_interval_ms: 1000,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Set the countdown length.
    #[must_use]
    pub fn with_total_time(mut self, ticks: u32) -> Self {
        self.total_time = ticks;
        self
    }

    /// Set the setup delay.
    #[must_use]
    pub fn with_setup_delay(mut self, ms: u64) -> Self {
        self.setup_delay_ms = ms;
        self
    }

    /// Set the mismatch delay.
    #[must_use]
    pub fn with_mismatch_delay(mut self, ms: u64) -> Self {
        self.mismatch_delay_ms = ms;
        self
    }

    /// Set the tick interval.
    #[must_use]
    pub fn with_tick_interval(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check that the config can drive a round.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_time == 0 {
            return Err(ConfigError::ZeroTotalTime);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    /// Parse and validate a config from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidJson(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
