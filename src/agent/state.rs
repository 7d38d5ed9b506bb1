//! Opponent mood cycle.
//!
//! ```text
//! Initial ──► Thinking ──► AboutToAct ──► MadeMatch ──► Thinking ...
//!                ▲                           │
//!                └──────── NoMatchFound ◄────┘ (nothing to claim)
//! Angry ──► Thinking          (entered when the user scores)
//! Idle, Won, Lost, Disabled   (inert: never scheduled)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the opponent is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentState {
    /// Parked by a pause; resumes through Initial.
    Idle,
    /// The user just scored.
    Angry,
    /// Looking for a match.
    Thinking,
    /// About to claim.
    AboutToAct,
    /// Just claimed a triple.
    MadeMatch,
    /// Looked, found nothing, dealt more cards.
    NoMatchFound,
    /// Fresh game, first move pending.
    Initial,
    /// Game over, the user won.
    Lost,
    /// Game over, the opponent won.
    Won,
    /// Opponent switched off for this game.
    Disabled,
}

impl AgentState {
    /// The state the next timer firing moves to. Self-loops where no
    /// transition exists.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            AgentState::Angry => AgentState::Thinking,
            AgentState::Thinking => AgentState::AboutToAct,
            AgentState::AboutToAct => AgentState::MadeMatch,
            AgentState::MadeMatch => AgentState::Thinking,
            AgentState::NoMatchFound => AgentState::Thinking,
            AgentState::Initial => AgentState::Thinking,
            other => other,
        }
    }

    /// True for states that never schedule a transition.
    #[must_use]
    pub fn is_inert(self) -> bool {
        matches!(
            self,
            AgentState::Idle | AgentState::Won | AgentState::Lost | AgentState::Disabled
        )
    }

    /// True once the game has been decided.
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(self, AgentState::Won | AgentState::Lost)
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AgentState::Idle => "idle",
            AgentState::Angry => "angry",
            AgentState::Thinking => "thinking",
            AgentState::AboutToAct => "about to act",
            AgentState::MadeMatch => "made a match",
            AgentState::NoMatchFound => "no match found",
            AgentState::Initial => "ready",
            AgentState::Lost => "lost",
            AgentState::Won => "won",
            AgentState::Disabled => "off",
        };
        f.write_str(label)
    }
}
