//! The autonomous opponent.
//!
//! - `AgentState`: the mood cycle and which states are inert
//! - `TimerQueue`: virtual-time one-shot timers behind the `Scheduler` trait
//! - `OpponentAgent`: turns timer firings into transitions and claims
//!
//! The agent never owns the game. Each call borrows the `GameState` and the
//! scheduler, which keeps every mutation on the caller's control loop.

pub mod state;
pub mod timer;
pub mod opponent;

pub use state::AgentState;
pub use timer::{Scheduler, TimerHandle, TimerQueue};
pub use opponent::{AgentTick, OpponentAgent, Transition};
