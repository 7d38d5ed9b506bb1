//! The single control loop.
//!
//! `Session` owns the game, the opponent, the timer queue and the observers.
//! User operations and timer firings both go through `&mut self`, so they
//! can never interleave. Time only moves when the owner calls `advance` or
//! `advance_to`; a real-time front end does that from its frame loop or via
//! `RealtimeDriver`.

use std::time::Duration;
use tracing::{debug, info};

use super::snapshot::GameSnapshot;
use crate::agent::{AgentState, AgentTick, OpponentAgent, TimerQueue, Transition};
use crate::cards::{Card, Triple};
use crate::core::{ConfigError, GameConfig, GameRng};
use crate::game::{GameOutcome, GameState, Resolution};

/// Notification published to observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The opponent moved, whether or not it scored.
    AgentStateChanged {
        from: AgentState,
        to: AgentState,
        user_score: i64,
        agent_score: i64,
    },
    /// The game was decided. Published once per game.
    GameOver(GameOutcome),
}

/// Observer callback.
pub type Observer = Box<dyn FnMut(&SessionEvent) + Send>;

/// A running game with its opponent.
pub struct Session {
    config: GameConfig,
    games_started: u64,
    game: GameState,
    agent: OpponentAgent,
    timers: TimerQueue<AgentTick>,
    observers: Vec<Observer>,
    announced: bool,
}

impl Session {
    /// Validate `config` and start the first game.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let (game, agent) = Self::build(&config, 0);
        let mut session = Self {
            config,
            games_started: 0,
            game,
            agent,
            timers: TimerQueue::new(),
            observers: Vec::new(),
            announced: false,
        };
        session.agent.start(&session.game, &mut session.timers);
        Ok(session)
    }

    fn build(config: &GameConfig, game_index: u64) -> (GameState, OpponentAgent) {
        let seed = config.seed.wrapping_add(game_index);
        let game_config = config.clone().with_seed(seed);

        let game = GameState::new(&game_config);
        let agent = OpponentAgent::new(
            config.agent_enabled,
            config.agent.clone(),
            GameRng::new(seed).for_context("agent"),
        );
        (game, agent)
    }

    /// Throw away the current game and deal a new one.
    ///
    /// The pending opponent timer is cancelled first, so nothing scheduled
    /// for the old game can touch the new one. Each new game in a session
    /// gets a different deal. A `deal_count` above the table capacity is
    /// clamped.
    pub fn initialize(&mut self, deal_count: usize, agent_enabled: bool) {
        self.agent.cancel(&mut self.timers);
        self.timers.clear();

        self.config.initial_deal = deal_count.min(self.config.max_in_play);
        self.config.agent_enabled = agent_enabled;
        self.games_started += 1;

        let (mut game, agent) = Self::build(&self.config, self.games_started);
        game.reset_clock(self.timers.now());
        self.game = game;
        self.agent = agent;
        self.announced = false;
        self.agent.start(&self.game, &mut self.timers);
        info!(deal_count, agent_enabled, "new game");
    }

    /// Register an observer.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&SessionEvent) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    // === Read access ===

    #[must_use]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    #[must_use]
    pub fn agent_state(&self) -> AgentState {
        self.agent.state()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Session clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// When the opponent next wakes up, if it will.
    #[must_use]
    pub fn next_wakeup(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Capture a frame for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.game, self.agent.state())
    }

    // === User operations ===

    pub fn select_card(&mut self, card: Card) -> Resolution {
        let resolution = self.game.select_card(card);
        self.after_user_action(resolution);
        resolution
    }

    pub fn deal(&mut self, count: usize, penalize_if_available: bool) -> Resolution {
        let resolution = self.game.deal(count, penalize_if_available);
        self.after_user_action(resolution);
        resolution
    }

    pub fn shuffle_in_play(&mut self) {
        self.game.shuffle_in_play();
    }

    pub fn complete_selection_to_match(&mut self) -> Resolution {
        let resolution = self.game.complete_selection_to_match();
        self.after_user_action(resolution);
        resolution
    }

    pub fn compute_hint(&mut self) {
        self.game.compute_hint();
    }

    pub fn all_valid_triples(&mut self) -> Vec<Triple> {
        self.game.all_valid_triples()
    }

    /// Park the opponent. Returns true if it was active.
    pub fn pause_agent(&mut self) -> bool {
        let from = self.agent.state();
        let paused = self.agent.pause(&mut self.timers);
        if paused {
            self.publish_transition(from);
        }
        paused
    }

    /// Wake a parked opponent. Returns true if it was paused.
    pub fn resume_agent(&mut self) -> bool {
        let from = self.agent.state();
        let resumed = self.agent.resume(&self.game, &mut self.timers);
        if resumed {
            self.publish_transition(from);
        }
        resumed
    }

    // === Time ===

    /// Move the clock forward by `elapsed`, firing due timers.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let target = self.timers.now() + elapsed;
        self.advance_to(target)
    }

    /// Move the clock to `time`, firing every timer due by then in order.
    ///
    /// Returns the number of opponent transitions.
    pub fn advance_to(&mut self, time: Duration) -> usize {
        let mut fired = 0;

        while let Some((handle, AgentTick)) = self.timers.pop_due(time) {
            self.game.set_time(self.timers.now());
            if let Some(transition) = self.agent.on_timer(handle, &mut self.game, &mut self.timers) {
                fired += 1;
                self.publish(transition);
                self.announce_outcome();
            }
        }

        self.timers.advance_to(time);
        self.game.set_time(self.timers.now());
        fired
    }

    // === Internals ===

    fn after_user_action(&mut self, resolution: Resolution) {
        if let Some(outcome) = self.game.outcome() {
            if !self.announced {
                let from = self.agent.state();
                self.agent.finish(outcome, &mut self.timers);
                self.publish_transition(from);
                self.announce_outcome();
            }
            return;
        }

        if resolution.is_match() {
            let from = self.agent.state();
            if self.agent.provoke(&self.game, &mut self.timers) {
                debug!("opponent provoked");
                self.publish_transition(from);
            }
        }
    }

    fn announce_outcome(&mut self) {
        if self.announced {
            return;
        }
        if let Some(outcome) = self.game.outcome() {
            self.announced = true;
            self.emit(SessionEvent::GameOver(outcome));
        }
    }

    fn publish_transition(&mut self, from: AgentState) {
        let to = self.agent.state();
        if from != to {
            self.publish(Transition {
                from,
                to,
                claim: None,
            });
        }
    }

    fn publish(&mut self, transition: Transition) {
        let event = SessionEvent::AgentStateChanged {
            from: transition.from,
            to: transition.to,
            user_score: self.game.user_score(),
            agent_score: self.game.agent_score(),
        };
        self.emit(event);
    }

    fn emit(&mut self, event: SessionEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("now", &self.timers.now())
            .field("agent", &self.agent.state())
            .field("user_score", &self.game.user_score())
            .field("agent_score", &self.game.agent_score())
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn session(agent: bool) -> Session {
        Session::new(GameConfig::default().with_seed(21).with_agent(agent)).unwrap()
    }

    fn recorder(session: &mut Session) -> Arc<Mutex<Vec<SessionEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        session.subscribe(move |e| sink.lock().unwrap().push(*e));
        events
    }

    #[test]
    fn test_rejects_invalid_config() {
        let err = Session::new(GameConfig::default().with_max_in_play(100)).unwrap_err();
        assert!(matches!(err, ConfigError::MaxInPlay { .. }));
    }

    #[test]
    fn test_agent_starts_initial() {
        let s = session(true);
        assert_eq!(s.agent_state(), AgentState::Initial);
        assert_eq!(s.next_wakeup(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_every_transition_notifies() {
        let mut s = session(true);
        let events = recorder(&mut s);

        let fired = s.advance(Duration::from_secs(3));
        assert_eq!(fired, 1);
        assert_eq!(s.agent_state(), AgentState::Thinking);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            SessionEvent::AgentStateChanged {
                from: AgentState::Initial,
                to: AgentState::Thinking,
                ..
            }
        ));
    }

    #[test]
    fn test_disabled_agent_stays_put() {
        let mut s = session(false);
        let events = recorder(&mut s);
        let table_before = s.game().in_play().clone();

        assert_eq!(s.advance(Duration::from_secs(3600)), 0);
        assert_eq!(s.agent_state(), AgentState::Disabled);
        assert_eq!(s.game().agent_score(), 0);
        assert_eq!(s.game().in_play(), &table_before);
        assert_eq!(s.next_wakeup(), None);
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_user_match_provokes_agent() {
        let mut s = session(true);
        s.advance(Duration::from_secs(3));
        assert_eq!(s.agent_state(), AgentState::Thinking);

        let triple = s
            .all_valid_triples()
            .first()
            .copied()
            .expect("seeded table has a triple");
        for c in triple {
            s.select_card(c);
        }
        let resolution = s.deal(3, true);
        assert!(resolution.is_match());
        assert_eq!(s.agent_state(), AgentState::Angry);

        // Behind the user, so the reaction delay shrinks.
        let wait = s.next_wakeup().unwrap() - s.now();
        assert!((wait.as_secs_f64() - 2.1).abs() < 1e-6);
    }

    #[test]
    fn test_initialize_cancels_pending_timer() {
        let mut s = session(true);
        s.advance(Duration::from_secs(5));
        assert_eq!(s.agent_state(), AgentState::Thinking);

        s.initialize(12, false);
        assert_eq!(s.agent_state(), AgentState::Disabled);
        assert_eq!(s.next_wakeup(), None);
        assert_eq!(s.advance(Duration::from_secs(60)), 0);
        assert_eq!(s.game().agent_score(), 0);
        s.game().check_invariants();
    }

    #[test]
    fn test_initialize_deals_a_new_table() {
        let mut s = session(true);
        let first = s.game().in_play().clone();
        s.advance(Duration::from_secs(2));

        s.initialize(15, true);
        assert_eq!(s.game().in_play().len(), 15);
        assert_ne!(s.game().in_play(), &first);
        assert_eq!(s.agent_state(), AgentState::Initial);
        assert_eq!(s.next_wakeup(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_pause_resume_notifies() {
        let mut s = session(true);
        let events = recorder(&mut s);

        assert!(s.pause_agent());
        assert_eq!(s.advance(Duration::from_secs(60)), 0);
        assert!(s.resume_agent());
        assert_eq!(s.agent_state(), AgentState::Initial);
        assert_eq!(events.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_snapshot_flags() {
        let mut s = session(false);
        let card = s.game().in_play()[0];
        s.select_card(card);

        let snap = s.snapshot();
        assert_eq!(snap.cards.len(), 12);
        assert!(snap.cards[0].selected);
        assert!(!snap.cards[1].selected);
        assert_eq!(snap.agent_state, AgentState::Disabled);
        assert_eq!(snap.deck_remaining, 69);
        assert!(snap.can_deal);
    }
}
