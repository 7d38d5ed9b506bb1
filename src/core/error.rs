//! Configuration errors.
//!
//! Gameplay itself never fails: invalid moves are silent no-ops. Only a
//! malformed configuration is rejected, before any game is started.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("max cards in play must be between 3 and {limit}, got {value}")]
    MaxInPlay { value: usize, limit: usize },

    #[error("initial deal of {deal} exceeds max cards in play ({max})")]
    InitialDeal { deal: usize, max: usize },

    #[error("replacement deal must be at least 1")]
    ReplacementDeal,

    #[error("{name} delay range is inverted: {min_secs}s > {max_secs}s")]
    InvertedDelay {
        name: &'static str,
        min_secs: f64,
        max_secs: f64,
    },

    #[error("{name} delay bound must be a finite non-negative number of seconds, got {secs}")]
    NegativeDelay { name: &'static str, secs: f64 },

    #[error("hurry factor must be in (0, 1], got {0}")]
    HurryFactor(f64),
}
