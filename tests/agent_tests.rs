//! Opponent behaviour through the session control loop.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use triples::{AgentState, GameConfig, GameOutcome, Session, SessionEvent};

fn session(seed: u64, agent: bool) -> Session {
    Session::new(GameConfig::default().with_seed(seed).with_agent(agent)).unwrap()
}

// =============================================================================
// Disabled opponent
// =============================================================================

#[test]
fn test_disabled_opponent_is_inert() {
    let mut s = session(1, false);
    let table = s.game().in_play().clone();

    for _ in 0..100 {
        assert_eq!(s.advance(Duration::from_secs(10)), 0);
    }

    assert_eq!(s.agent_state(), AgentState::Disabled);
    assert_eq!(s.game().agent_score(), 0);
    assert_eq!(s.game().in_play(), &table);
    assert_eq!(s.next_wakeup(), None);
}

#[test]
fn test_disabled_opponent_stays_disabled_after_user_match() {
    let mut s = session(2, false);
    let triple = s
        .all_valid_triples()
        .first()
        .copied()
        .expect("seeded table has a triple");
    for c in triple {
        s.select_card(c);
    }
    assert!(s.deal(3, false).is_match());
    assert_eq!(s.agent_state(), AgentState::Disabled);
    assert_eq!(s.next_wakeup(), None);
}

// =============================================================================
// Active opponent
// =============================================================================

#[test]
fn test_opponent_claims_over_time() {
    let mut s = session(4, true);
    s.advance(Duration::from_secs(120));

    assert!(s.game().agent_score() > 0);
    assert!(s.game().matched().len() >= 3);
    assert_eq!(s.game().user_score(), 0);
    s.game().check_invariants();
}

#[test]
fn test_opponent_finishes_the_game_alone() {
    let mut s = session(8, true);
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    s.subscribe(move |e| sink.lock().unwrap().push(*e));

    let mut elapsed = 0;
    while s.game().outcome().is_none() && elapsed < 20_000 {
        s.advance(Duration::from_secs(5));
        s.game().check_invariants();
        elapsed += 5;
    }

    let outcome = s.game().outcome().expect("game ends");
    assert!(s.game().deck().is_empty());
    assert!(!s.game().has_valid_triple());
    match outcome {
        GameOutcome::AgentWon => assert_eq!(s.agent_state(), AgentState::Won),
        GameOutcome::UserWon => assert_eq!(s.agent_state(), AgentState::Lost),
    }
    assert_eq!(s.next_wakeup(), None);

    let events = events.lock().unwrap();
    let game_overs = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::GameOver(_)))
        .count();
    assert_eq!(game_overs, 1);
    assert!(events.len() > 10);
}

#[test]
fn test_same_seed_same_opponent() {
    let mut a = session(13, true);
    let mut b = session(13, true);

    a.advance(Duration::from_secs(200));
    b.advance(Duration::from_secs(200));

    assert_eq!(a.game().agent_score(), b.game().agent_score());
    assert_eq!(a.game().matched(), b.game().matched());
    assert_eq!(a.agent_state(), b.agent_state());
}

#[test]
fn test_timer_firings_never_overlap() {
    let mut s = session(5, true);
    for _ in 0..200 {
        s.advance(Duration::from_millis(700));
        // One pending wake-up at most, and never in the past.
        if let Some(at) = s.next_wakeup() {
            assert!(at >= s.now());
        }
    }
}
