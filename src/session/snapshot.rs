//! Read-only view for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::agent::AgentState;
use crate::cards::{Card, CardSet};
use crate::game::{GameOutcome, GameState};

/// One face-up card and its highlight flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub card: Card,
    pub selected: bool,
    pub hinted: bool,
    /// Part of a full selection that matches.
    pub matched: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub cards: Vec<CardView>,
    pub deck_remaining: usize,
    pub matched_count: usize,
    pub user_score: i64,
    pub agent_score: i64,
    pub agent_state: AgentState,
    pub selection_is_match: bool,
    pub can_deal: bool,
    pub hint_available: bool,
    pub outcome: Option<GameOutcome>,
}

impl GameSnapshot {
    /// Capture the current state.
    #[must_use]
    pub fn capture(game: &GameState, agent_state: AgentState) -> Self {
        let selected: CardSet = game.selected().iter().collect();
        let hinted: CardSet = game.hint().iter().flatten().collect();
        let selection_is_match = game.selection_is_match();

        let cards = game
            .in_play()
            .iter()
            .map(|&card| CardView {
                card,
                selected: selected.contains(card),
                hinted: hinted.contains(card),
                matched: selection_is_match && selected.contains(card),
            })
            .collect();

        Self {
            cards,
            deck_remaining: game.deck().len(),
            matched_count: game.matched().len(),
            user_score: game.user_score(),
            agent_score: game.agent_score(),
            agent_state,
            selection_is_match,
            can_deal: game.can_deal(),
            hint_available: game.has_valid_triple(),
            outcome: game.outcome(),
        }
    }
}
