//! # triples
//!
//! Rules engine for a three-card attribute matching game played against a
//! timed opponent.
//!
//! ## Design Principles
//!
//! 1. **One predicate**: every score, hint and opponent decision goes through
//!    `cards::is_match`, written once over attribute ordinals.
//!
//! 2. **No wall clock in the rules**: the game and the opponent run on a
//!    virtual clock advanced by the caller, so every scenario is
//!    reproducible from a seed.
//!
//! 3. **Single owner**: `Session` holds the game, the opponent and its timer.
//!    All mutation goes through `&mut Session`, which serializes user input
//!    and opponent moves without further locking.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `cards`: attributes, cards, identity-keyed sets
//! - `game`: game state, scoring, triple search
//! - `agent`: opponent state machine and timers
//! - `session`: control loop, observers, snapshots, real-time driver

pub mod core;
pub mod cards;
pub mod game;
pub mod agent;
pub mod session;

// Re-export commonly used types
pub use crate::core::{AgentConfig, ConfigError, DelayRange, GameConfig, GameRng};

pub use crate::cards::{
    full_deck, is_match, Card, CardId, CardSet, Color, Count, Shading, Shape, Triple, DECK_SIZE,
};

pub use crate::game::{AgentClaim, GameOutcome, GameState, Resolution};

pub use crate::agent::{AgentState, OpponentAgent, Scheduler, TimerHandle, TimerQueue};

pub use crate::session::{
    CardView, GameSnapshot, RealtimeDriver, Session, SessionEvent, SharedSession,
};
