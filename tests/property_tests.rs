//! Property tests for the match predicate and the card-location invariants.

use proptest::prelude::*;
use std::time::Duration;

use triples::cards::{full_deck, is_match, Card, DECK_SIZE};
use triples::{GameConfig, Session};

fn any_card() -> impl Strategy<Value = Card> {
    (0..DECK_SIZE).prop_map(|i| full_deck()[i])
}

#[derive(Clone, Debug)]
enum Op {
    Select(usize),
    Deal(bool),
    Hint,
    Complete,
    Shuffle,
    Wait(u64),
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..81usize).prop_map(Op::Select),
        1 => any::<bool>().prop_map(Op::Deal),
        1 => Just(Op::Hint),
        1 => Just(Op::Complete),
        1 => Just(Op::Shuffle),
        2 => (0..15u64).prop_map(Op::Wait),
    ]
}

proptest! {
    /// Property: the predicate ignores argument order
    #[test]
    fn prop_match_is_symmetric(a in any_card(), b in any_card(), c in any_card()) {
        let m = is_match(a, b, c);
        prop_assert_eq!(m, is_match(a, c, b));
        prop_assert_eq!(m, is_match(b, a, c));
        prop_assert_eq!(m, is_match(b, c, a));
        prop_assert_eq!(m, is_match(c, a, b));
        prop_assert_eq!(m, is_match(c, b, a));
    }

    /// Property: a match holds iff each attribute is constant or all-distinct
    #[test]
    fn prop_match_is_per_attribute(a in any_card(), b in any_card(), c in any_card()) {
        let (oa, ob, oc) = (a.ordinals(), b.ordinals(), c.ordinals());
        let expected = (0..4).all(|i| {
            let same = oa[i] == ob[i] && ob[i] == oc[i];
            let distinct = oa[i] != ob[i] && oa[i] != oc[i] && ob[i] != oc[i];
            same || distinct
        });
        prop_assert_eq!(is_match(a, b, c), expected);
    }

    /// Property: any two distinct cards have exactly one completing card
    #[test]
    fn prop_unique_completion(a in any_card(), b in any_card()) {
        prop_assume!(a != b);
        let completions: Vec<Card> = full_deck()
            .into_iter()
            .filter(|&c| c != a && c != b && is_match(a, b, c))
            .collect();
        prop_assert_eq!(completions, vec![Card::completing(a, b)]);
    }

    /// Property: no sequence of operations loses, duplicates or resurrects a card
    #[test]
    fn prop_invariants_hold(seed in 0..1000u64, ops in prop::collection::vec(any_op(), 1..60)) {
        let mut s = Session::new(GameConfig::default().with_seed(seed)).unwrap();
        let mut matched_so_far = 0;

        for op in ops {
            match op {
                Op::Select(i) => {
                    let table = s.game().in_play();
                    if !table.is_empty() {
                        let card = table[i % table.len()];
                        s.select_card(card);
                    }
                }
                Op::Deal(penalize) => { s.deal(3, penalize); }
                Op::Hint => s.compute_hint(),
                Op::Complete => { s.complete_selection_to_match(); }
                Op::Shuffle => s.shuffle_in_play(),
                Op::Wait(secs) => { s.advance(Duration::from_secs(secs)); }
            }

            s.game().check_invariants();
            prop_assert!(s.game().matched().len() >= matched_so_far);
            matched_so_far = s.game().matched().len();
            if let Some(hint) = s.game().hint() {
                prop_assert!(hint.iter().all(|c| s.game().is_in_play(*c)));
            }
        }
    }
}
