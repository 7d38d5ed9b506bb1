//! The timed opponent.
//!
//! `OpponentAgent` owns exactly one pending timer handle. Every transition
//! cancels that handle before scheduling the next one, so at most one
//! firing is ever outstanding and a stale handle is simply ignored.

use std::time::Duration;
use tracing::{debug, trace};

use super::state::AgentState;
use super::timer::{Scheduler, TimerHandle};
use crate::core::{AgentConfig, DelayRange, GameRng};
use crate::game::{AgentClaim, GameOutcome, GameState};

/// Timer payload for an opponent wake-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentTick;

/// One step of the opponent's cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: AgentState,
    pub to: AgentState,
    /// Triple claimed while entering MadeMatch.
    pub claim: Option<AgentClaim>,
}

/// Autonomous opponent driven by one-shot timers.
#[derive(Clone, Debug)]
pub struct OpponentAgent {
    state: AgentState,
    pending: Option<TimerHandle>,
    config: AgentConfig,
    rng: GameRng,
}

impl OpponentAgent {
    /// Create an agent in Initial, or Disabled when `enabled` is false.
    ///
    /// Nothing is scheduled until `start`.
    #[must_use]
    pub fn new(enabled: bool, config: AgentConfig, rng: GameRng) -> Self {
        Self {
            state: if enabled {
                AgentState::Initial
            } else {
                AgentState::Disabled
            },
            pending: None,
            config,
            rng,
        }
    }

    #[must_use]
    pub fn state(&self) -> AgentState {
        self.state
    }

    /// Handle of the pending wake-up, if any.
    #[must_use]
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Schedule the first wake-up of a fresh game.
    pub fn start<S: Scheduler<AgentTick>>(&mut self, game: &GameState, scheduler: &mut S) {
        if self.state == AgentState::Initial {
            self.reschedule(game, scheduler);
        }
    }

    /// Handle a timer firing.
    ///
    /// Returns `None` for stale handles and inert states.
    pub fn on_timer<S: Scheduler<AgentTick>>(
        &mut self,
        handle: TimerHandle,
        game: &mut GameState,
        scheduler: &mut S,
    ) -> Option<Transition> {
        if self.pending != Some(handle) {
            trace!(?handle, "stale opponent timer ignored");
            return None;
        }
        self.pending = None;

        if self.state.is_inert() {
            return None;
        }

        let from = self.state;
        let mut to = from.next();
        let mut claim = None;

        if to == AgentState::MadeMatch {
            claim = game.agent_claim();
            if claim.is_none() {
                to = AgentState::NoMatchFound;
            }
        }

        self.state = to;
        match game.outcome() {
            Some(outcome) => self.finish(outcome, scheduler),
            None => self.reschedule(game, scheduler),
        }

        debug!(%from, to = %self.state, agent_score = game.agent_score(), "opponent transition");
        Some(Transition {
            from,
            to: self.state,
            claim,
        })
    }

    /// React to the user scoring. Returns true if the agent changed state.
    pub fn provoke<S: Scheduler<AgentTick>>(&mut self, game: &GameState, scheduler: &mut S) -> bool {
        if self.state.is_inert() {
            return false;
        }
        self.state = AgentState::Angry;
        self.reschedule(game, scheduler);
        true
    }

    /// Settle into Won or Lost. A disabled agent stays disabled and a
    /// decided agent keeps its first result.
    pub fn finish<S: Scheduler<AgentTick>>(&mut self, outcome: GameOutcome, scheduler: &mut S) {
        self.cancel(scheduler);
        if self.state == AgentState::Disabled || self.state.is_final() {
            return;
        }
        self.state = match outcome {
            GameOutcome::AgentWon => AgentState::Won,
            GameOutcome::UserWon => AgentState::Lost,
        };
    }

    /// Park in Idle. Returns true if the agent was active.
    pub fn pause<S: Scheduler<AgentTick>>(&mut self, scheduler: &mut S) -> bool {
        if self.state.is_inert() {
            return false;
        }
        self.cancel(scheduler);
        self.state = AgentState::Idle;
        true
    }

    /// Leave Idle through Initial. Returns true if the agent was paused.
    pub fn resume<S: Scheduler<AgentTick>>(&mut self, game: &GameState, scheduler: &mut S) -> bool {
        if self.state != AgentState::Idle {
            return false;
        }
        self.state = AgentState::Initial;
        self.reschedule(game, scheduler);
        true
    }

    /// Cancel the pending wake-up, if any.
    pub fn cancel<S: Scheduler<AgentTick>>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }
    }

    fn reschedule<S: Scheduler<AgentTick>>(&mut self, game: &GameState, scheduler: &mut S) {
        self.cancel(scheduler);

        let Some(mut delay) = self.delay_for(self.state) else {
            return;
        };
        if game.agent_score() < game.user_score() {
            delay = delay.mul_f64(self.config.hurry_factor);
        }

        self.pending = Some(scheduler.schedule(delay, AgentTick));
        trace!(state = %self.state, delay_secs = delay.as_secs_f64(), "opponent scheduled");
    }

    fn delay_for(&mut self, state: AgentState) -> Option<Duration> {
        match state {
            AgentState::Angry
            | AgentState::Initial
            | AgentState::MadeMatch
            | AgentState::NoMatchFound => Some(self.config.reaction_delay),
            AgentState::Thinking => Some(self.sample(self.config.thinking_delay)),
            AgentState::AboutToAct => Some(self.sample(self.config.about_to_act_delay)),
            AgentState::Idle | AgentState::Won | AgentState::Lost | AgentState::Disabled => None,
        }
    }

    fn sample(&mut self, range: DelayRange) -> Duration {
        let secs = self
            .rng
            .gen_range_f64(range.min.as_secs_f64()..range.max.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}
