//! Core engine types: RNG, configuration, errors.
//!
//! These are the building blocks every other module leans on. Nothing here
//! knows about cards beyond the deck size.

pub mod rng;
pub mod config;
pub mod error;

pub use rng::GameRng;
pub use config::{AgentConfig, DelayRange, GameConfig};
pub use error::ConfigError;
