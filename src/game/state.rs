//! Game state and player operations.
//!
//! ## Card locations
//!
//! Every card is in exactly one of three places:
//! - `deck`: face down, dealt from the front
//! - `in_play`: face up on the table, in a stable display order
//! - `matched`: claimed by the user or the opponent, never returned
//!
//! `selected` is an ordered subset of `in_play` holding at most three cards.
//! Membership in the table is tracked by a `CardSet` alongside the ordered
//! `im::Vector`, so lookups do not scan.
//!
//! ## Time
//!
//! The state never reads a wall clock. Whoever drives it calls `set_time`
//! before an operation; the time-decay penalty on matches is measured
//! against that value.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::time::Duration;
use tracing::{debug, info};

use super::finder;
use super::scoring;
use crate::cards::{is_match, shuffled_deck, Card, CardSet, Triple, DECK_SIZE};
use crate::core::{GameConfig, GameRng};

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The user finished ahead of (or level with) the opponent.
    UserWon,
    /// The opponent finished strictly ahead.
    AgentWon,
}

/// What resolving a full selection did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing was resolved.
    None,
    /// The selection matched and left the table.
    Matched {
        triple: Triple,
        award: i64,
        time_penalty: i64,
    },
    /// The selection did not match and was cleared.
    Mismatched { penalty: i64 },
}

impl Resolution {
    /// True for `Matched`.
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Matched { .. })
    }
}

/// A triple taken by the opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentClaim {
    pub triple: Triple,
    pub award: i64,
}

/// Complete single-session game state.
#[derive(Clone, Debug)]
pub struct GameState {
    config: GameConfig,

    deck: Vector<Card>,
    in_play: Vector<Card>,
    on_table: CardSet,
    selected: SmallVec<[Card; 3]>,
    matched: Vector<Card>,
    hint: Option<Triple>,

    user_score: i64,
    agent_score: i64,

    now: Duration,
    last_action_time: Duration,
    outcome: Option<GameOutcome>,

    rng: GameRng,
}

impl GameState {
    /// Build and shuffle a full deck, then deal the initial table.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let mut rng = GameRng::new(config.seed).for_context("deck");
        let deck = shuffled_deck(&mut rng);
        Self::dealt(config, deck, rng)
    }

    /// Build a game from an explicit deck order instead of shuffling.
    ///
    /// The first `initial_deal` cards go to the table.
    ///
    /// # Panics
    ///
    /// Panics if `deck` is not a permutation of the full deck.
    #[must_use]
    pub fn with_deck(config: &GameConfig, deck: Vec<Card>) -> Self {
        let as_set: CardSet = deck.iter().collect();
        assert!(
            deck.len() == DECK_SIZE && as_set == CardSet::full(),
            "deck must contain every card exactly once"
        );

        let rng = GameRng::new(config.seed).for_context("deck");
        Self::dealt(config, deck, rng)
    }

    fn dealt(config: &GameConfig, deck: Vec<Card>, rng: GameRng) -> Self {
        let mut state = Self {
            config: config.clone(),
            deck: deck.into_iter().collect(),
            in_play: Vector::new(),
            on_table: CardSet::new(),
            selected: SmallVec::new(),
            matched: Vector::new(),
            hint: None,
            user_score: 0,
            agent_score: 0,
            now: Duration::ZERO,
            last_action_time: Duration::ZERO,
            outcome: None,
            rng,
        };
        state.deal_from_deck(config.initial_deal);
        debug!(in_play = state.in_play.len(), seed = config.seed, "game initialized");
        state
    }

    // === Read access ===

    /// Configuration this game was built from.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Undealt cards, next card first.
    #[must_use]
    pub fn deck(&self) -> &Vector<Card> {
        &self.deck
    }

    /// Face-up cards in display order.
    #[must_use]
    pub fn in_play(&self) -> &Vector<Card> {
        &self.in_play
    }

    /// Current selection in tap order.
    #[must_use]
    pub fn selected(&self) -> &[Card] {
        &self.selected
    }

    /// Claimed cards in claim order.
    #[must_use]
    pub fn matched(&self) -> &Vector<Card> {
        &self.matched
    }

    /// Current hint, if any.
    #[must_use]
    pub fn hint(&self) -> Option<Triple> {
        self.hint
    }

    #[must_use]
    pub fn user_score(&self) -> i64 {
        self.user_score
    }

    #[must_use]
    pub fn agent_score(&self) -> i64 {
        self.agent_score
    }

    /// Result, once the game has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// True if `card` is face up.
    #[must_use]
    pub fn is_in_play(&self, card: Card) -> bool {
        self.on_table.contains(card)
    }

    /// True if three cards are selected and they match.
    #[must_use]
    pub fn selection_is_match(&self) -> bool {
        match self.selected.as_slice() {
            [a, b, c] => is_match(*a, *b, *c),
            _ => false,
        }
    }

    /// True if dealing would do anything: either replace a matched selection
    /// or put a new card on the table.
    #[must_use]
    pub fn can_deal(&self) -> bool {
        !self.deck.is_empty()
            && (self.selection_is_match() || self.in_play.len() < self.config.max_in_play)
    }

    /// True if at least one matching triple is on the table.
    #[must_use]
    pub fn has_valid_triple(&self) -> bool {
        finder::has_triple(&self.table())
    }

    /// Current game time.
    #[must_use]
    pub fn time(&self) -> Duration {
        self.now
    }

    /// Advance the game clock. Time never moves backwards.
    pub fn set_time(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Start timing from `now`, as if the game had just begun.
    pub fn reset_clock(&mut self, now: Duration) {
        self.now = now;
        self.last_action_time = now;
    }

    fn table(&self) -> Vec<Card> {
        self.in_play.iter().copied().collect()
    }

    // === Player operations ===

    /// Tap a card.
    ///
    /// Cards not on the table are ignored. With three cards already selected
    /// the selection is resolved first, then the tapped card starts a new
    /// selection if it is still on the table. Otherwise the tap toggles the
    /// card; deselecting costs points.
    pub fn select_card(&mut self, card: Card) -> Resolution {
        if !self.on_table.contains(card) {
            return Resolution::None;
        }

        if self.selected.len() == 3 {
            let resolution = self.resolve_selection();
            if self.on_table.contains(card) {
                self.selected.push(card);
            }
            return resolution;
        }

        if let Some(pos) = self.selected.iter().position(|&c| c == card) {
            self.selected.remove(pos);
            let penalty = scoring::deselect_penalty(self.in_play.len());
            self.user_score -= penalty;
            debug!(%card, penalty, "card deselected");
        } else {
            self.selected.push(card);
            debug!(%card, selected = self.selected.len(), "card selected");
        }

        Resolution::None
    }

    /// Deal up to `count` more cards.
    ///
    /// A matching selection is resolved instead of dealing. With
    /// `penalize_if_available`, asking for cards while a match is already on
    /// the table costs points.
    pub fn deal(&mut self, count: usize, penalize_if_available: bool) -> Resolution {
        if self.selection_is_match() {
            return self.resolve_selection();
        }

        if penalize_if_available && self.has_valid_triple() {
            let penalty = scoring::deal_penalty(self.in_play.len());
            self.user_score -= penalty;
            debug!(penalty, "dealt with a match on the table");
        }

        self.deal_from_deck(count);
        self.check_game_over();
        Resolution::None
    }

    /// Resolve a full selection as a match or a mismatch.
    ///
    /// Anything other than three selected cards is left alone.
    pub fn resolve_selection(&mut self) -> Resolution {
        let [a, b, c] = match self.selected.as_slice() {
            [a, b, c] => [*a, *b, *c],
            _ => return Resolution::None,
        };

        if !is_match(a, b, c) {
            let penalty = scoring::mismatch_penalty(self.in_play.len());
            self.user_score -= penalty;
            self.selected.clear();
            info!(penalty, user_score = self.user_score, "mismatch");
            return Resolution::Mismatched { penalty };
        }

        let elapsed = self.now.saturating_sub(self.last_action_time);
        let time_penalty = scoring::time_penalty(elapsed);
        self.user_score -= time_penalty;
        self.last_action_time = self.now;

        let award = scoring::user_match_award(self.in_play.len());
        self.user_score += award;

        let triple = [a, b, c];
        self.claim(&triple);
        self.deal_from_deck(self.config.replacement_deal);
        info!(award, time_penalty, user_score = self.user_score, "user match");

        self.check_game_over();

        Resolution::Matched {
            triple,
            award,
            time_penalty,
        }
    }

    /// Fill in the selection with a valid triple, for a price.
    ///
    /// - three mismatched: the mismatch is resolved (and charged), then a
    ///   valid triple becomes the selection
    /// - three matched: resolved as a normal match, no extra charge
    /// - one or two: a triple containing them is selected, or any triple if
    ///   none contains them
    /// - none: any triple is selected
    ///
    /// Does nothing when the table has no match.
    pub fn complete_selection_to_match(&mut self) -> Resolution {
        let triples = self.all_valid_triples();
        let Some(&first) = triples.first() else {
            return Resolution::None;
        };

        match self.selected.len() {
            3 => {
                let resolution = self.resolve_selection();
                if !resolution.is_match() {
                    self.selected = SmallVec::from_slice(&first);
                }
                resolution
            }
            0..=2 => {
                let triple = if self.selected.is_empty() {
                    first
                } else {
                    finder::triple_containing(&triples, &self.selected).unwrap_or(first)
                };
                self.selected = SmallVec::from_slice(&triple);
                let penalty = scoring::mismatch_penalty(self.in_play.len());
                self.user_score -= penalty;
                debug!(penalty, "selection completed");
                Resolution::None
            }
            _ => Resolution::None,
        }
    }

    /// Pick a hint, for a price. Clears the hint when there is no match.
    ///
    /// With one or two cards selected the hint extends the selection when
    /// possible.
    pub fn compute_hint(&mut self) {
        let triples = self.all_valid_triples();
        let Some(&first) = triples.first() else {
            self.hint = None;
            return;
        };

        let hint = match self.selected.len() {
            1 | 2 => finder::triple_containing(&triples, &self.selected).unwrap_or(first),
            _ => first,
        };
        self.hint = Some(hint);

        let penalty = scoring::hint_penalty(self.in_play.len());
        self.user_score -= penalty;
        debug!(penalty, "hint given");
    }

    /// Every matching triple on the table, shuffled.
    pub fn all_valid_triples(&mut self) -> Vec<Triple> {
        let table = self.table();
        finder::valid_triples(&table, &mut self.rng)
    }

    /// Shuffle the display order of the table.
    pub fn shuffle_in_play(&mut self) {
        let mut table = self.table();
        self.rng.shuffle(&mut table);
        self.in_play = table.into_iter().collect();
    }

    // === Opponent operations ===

    /// Let the opponent take a triple.
    ///
    /// Takes the last triple of the shuffled list, scores it, and deals
    /// replacements. With nothing to take, cards are dealt anyway so the
    /// opponent has something new to look at. Returns `None` in that case.
    pub fn agent_claim(&mut self) -> Option<AgentClaim> {
        let claimed = self.all_valid_triples().last().copied();

        let claim = claimed.map(|triple| {
            let award = scoring::agent_match_award(self.in_play.len());
            self.agent_score += award;
            self.claim(&triple);
            info!(award, agent_score = self.agent_score, "opponent match");
            AgentClaim { triple, award }
        });

        self.deal_from_deck(self.config.replacement_deal);
        self.check_game_over();
        claim
    }

    // === Internals ===

    /// Move up to `count` cards from the deck to the table.
    fn deal_from_deck(&mut self, count: usize) -> usize {
        let mut dealt = 0;
        while dealt < count && self.in_play.len() < self.config.max_in_play {
            let Some(card) = self.deck.pop_front() else {
                break;
            };
            self.in_play.push_back(card);
            self.on_table.insert(card);
            dealt += 1;
        }
        if dealt > 0 {
            debug!(dealt, deck = self.deck.len(), in_play = self.in_play.len(), "dealt");
        }
        dealt
    }

    /// Move a triple from the table (and selection) to `matched`.
    fn claim(&mut self, triple: &Triple) {
        let leaving: CardSet = triple.iter().collect();

        self.in_play.retain(|c| !leaving.contains(*c));
        for &card in triple {
            self.on_table.remove(card);
        }
        self.selected.retain(|c| !leaving.contains(*c));
        self.matched.extend(triple.iter().copied());

        if let Some(hint) = self.hint {
            if hint.iter().any(|c| !self.on_table.contains(*c)) {
                self.hint = None;
            }
        }
    }

    fn check_game_over(&mut self) {
        if self.outcome.is_some() || !self.deck.is_empty() || self.has_valid_triple() {
            return;
        }

        let outcome = if self.agent_score > self.user_score {
            GameOutcome::AgentWon
        } else {
            GameOutcome::UserWon
        };
        self.outcome = Some(outcome);
        info!(
            ?outcome,
            user_score = self.user_score,
            agent_score = self.agent_score,
            "game over"
        );
    }

    /// Assert the card-location invariants.
    ///
    /// # Panics
    ///
    /// Panics if a card is missing, duplicated, or selected off the table.
    pub fn check_invariants(&self) {
        let mut seen = FxHashSet::default();
        for card in self.deck.iter().chain(&self.in_play).chain(&self.matched) {
            assert!(seen.insert(*card), "card {card} appears twice");
        }
        assert_eq!(seen.len(), DECK_SIZE, "cards went missing");

        let table: CardSet = self.in_play.iter().collect();
        assert_eq!(table, self.on_table, "table index out of sync");
        assert!(self.in_play.len() <= self.config.max_in_play);

        assert!(self.selected.len() <= 3);
        for card in &self.selected {
            assert!(self.on_table.contains(*card), "selected card {card} is not in play");
        }
    }

    /// Replace the table and deck directly.
    #[cfg(test)]
    pub(crate) fn arrange(&mut self, in_play: Vec<Card>) {
        let table: CardSet = in_play.iter().collect();
        let rest: Vec<Card> = crate::cards::full_deck()
            .into_iter()
            .filter(|c| !table.contains(*c))
            .collect();
        self.deck = rest.into_iter().collect();
        self.in_play = in_play.into_iter().collect();
        self.on_table = table;
        self.matched = Vector::new();
        self.selected.clear();
        self.hint = None;
    }
}
