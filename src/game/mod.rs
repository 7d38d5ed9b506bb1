//! Game rules: state, scoring, and match search.
//!
//! `GameState` is the single owner of every card location and both scores.
//! The user-facing operations (`select_card`, `deal`, `compute_hint`, ...)
//! are synchronous and never fail; invalid input is a silent no-op.

pub mod finder;
pub mod scoring;
pub mod state;

pub use state::{AgentClaim, GameOutcome, GameState, Resolution};
