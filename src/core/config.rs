//! Game configuration types.
//!
//! - `GameConfig`: deal sizes, table capacity, seed, agent switch
//! - `AgentConfig`: opponent timing constants
//! - `DelayRange`: uniform random delay bounds
//!
//! All fields have defaults matching the classic table rules; games tweak
//! them with the `with_*` builders and `Session::new` validates them.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;
use crate::cards::DECK_SIZE;

/// Half-open delay interval `[min, max)`, sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl DelayRange {
    /// Create a range from whole durations.
    #[must_use]
    pub const fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    /// Create a range from seconds.
    ///
    /// Negative, NaN and overflowing bounds are rejected.
    pub fn from_secs(min: f64, max: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            min: secs_to_duration("min", min)?,
            max: secs_to_duration("max", max)?,
        })
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedDelay {
                name,
                min_secs: self.min.as_secs_f64(),
                max_secs: self.max.as_secs_f64(),
            });
        }
        Ok(())
    }
}

fn secs_to_duration(name: &'static str, secs: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::NegativeDelay { name, secs })
}

/// Opponent timing constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Fixed delay after entering Angry, Initial, MadeMatch or NoMatchFound.
    pub reaction_delay: Duration,

    /// Delay after entering Thinking.
    pub thinking_delay: DelayRange,

    /// Delay after entering AboutToAct.
    pub about_to_act_delay: DelayRange,

    /// Multiplier applied to every delay while the agent trails the user.
    pub hurry_factor: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            reaction_delay: Duration::from_secs(3),
            thinking_delay: DelayRange::new(Duration::from_secs(4), Duration::from_secs(8)),
            about_to_act_delay: DelayRange::new(Duration::from_secs(2), Duration::from_secs(4)),
            hurry_factor: 0.7,
        }
    }
}

impl AgentConfig {
    /// Set the fixed reaction delay.
    #[must_use]
    pub fn with_reaction_delay(mut self, delay: Duration) -> Self {
        self.reaction_delay = delay;
        self
    }

    /// Set the Thinking delay range.
    #[must_use]
    pub fn with_thinking_delay(mut self, range: DelayRange) -> Self {
        self.thinking_delay = range;
        self
    }

    /// Set the AboutToAct delay range.
    #[must_use]
    pub fn with_about_to_act_delay(mut self, range: DelayRange) -> Self {
        self.about_to_act_delay = range;
        self
    }

    /// Set the catch-up multiplier.
    #[must_use]
    pub fn with_hurry_factor(mut self, factor: f64) -> Self {
        self.hurry_factor = factor;
        self
    }

    /// Check timing constants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thinking_delay.validate("thinking")?;
        self.about_to_act_delay.validate("about-to-act")?;
        if !(self.hurry_factor > 0.0 && self.hurry_factor <= 1.0) {
            return Err(ConfigError::HurryFactor(self.hurry_factor));
        }
        Ok(())
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cards dealt face up when a game starts.
    pub initial_deal: usize,

    /// Cards dealt to replace a claimed triple.
    pub replacement_deal: usize,

    /// Table capacity.
    pub max_in_play: usize,

    /// Whether the opponent agent plays.
    pub agent_enabled: bool,

    /// Seed for deck shuffles, triple ordering and agent delays.
    pub seed: u64,

    /// Opponent timing.
    pub agent: AgentConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_deal: 12,
            replacement_deal: 3,
            max_in_play: DECK_SIZE,
            agent_enabled: true,
            seed: 42,
            agent: AgentConfig::default(),
        }
    }
}

impl GameConfig {
    /// Set the initial deal size.
    #[must_use]
    pub fn with_initial_deal(mut self, count: usize) -> Self {
        self.initial_deal = count;
        self
    }

    /// Set the replacement deal size.
    #[must_use]
    pub fn with_replacement_deal(mut self, count: usize) -> Self {
        self.replacement_deal = count;
        self
    }

    /// Set the table capacity.
    #[must_use]
    pub fn with_max_in_play(mut self, max: usize) -> Self {
        self.max_in_play = max;
        self
    }

    /// Enable or disable the opponent.
    #[must_use]
    pub fn with_agent(mut self, enabled: bool) -> Self {
        self.agent_enabled = enabled;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Draw a fresh seed from the OS-backed thread RNG.
    #[must_use]
    pub fn with_random_seed(mut self) -> Self {
        self.seed = rand::random();
        self
    }

    /// Set opponent timing.
    #[must_use]
    pub fn with_agent_config(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(3..=DECK_SIZE).contains(&self.max_in_play) {
            return Err(ConfigError::MaxInPlay {
                value: self.max_in_play,
                limit: DECK_SIZE,
            });
        }
        if self.initial_deal > self.max_in_play {
            return Err(ConfigError::InitialDeal {
                deal: self.initial_deal,
                max: self.max_in_play,
            });
        }
        if self.replacement_deal == 0 {
            return Err(ConfigError::ReplacementDeal);
        }
        self.agent.validate()
    }
}
