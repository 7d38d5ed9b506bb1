//! Valid-triple search.
//!
//! Enumeration is exhaustive over unordered triples of the table, O(n³) in
//! the number of cards in play. Results are shuffled before they are handed
//! out so callers that take the first (or last) entry do not favour cards
//! near the start of the table.

use crate::cards::{is_match, Card, CardSet, Triple};
use crate::core::GameRng;

/// Every matching triple, in table scan order.
#[must_use]
pub fn scan_triples(cards: &[Card]) -> Vec<Triple> {
    let mut found = Vec::new();
    let n = cards.len();

    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                if is_match(cards[i], cards[j], cards[k]) {
                    found.push([cards[i], cards[j], cards[k]]);
                }
            }
        }
    }

    found
}

/// Every matching triple, shuffled.
pub fn valid_triples(cards: &[Card], rng: &mut GameRng) -> Vec<Triple> {
    let mut found = scan_triples(cards);
    rng.shuffle(&mut found);
    found
}

/// True if at least one matching triple exists. Stops at the first hit.
#[must_use]
pub fn has_triple(cards: &[Card]) -> bool {
    let on_table: CardSet = cards.iter().collect();
    let n = cards.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let third = Card::completing(cards[i], cards[j]);
            if third != cards[i] && on_table.contains(third) {
                return true;
            }
        }
    }

    false
}

/// First triple in `triples` that contains every card in `selection`.
#[must_use]
pub fn triple_containing(triples: &[Triple], selection: &[Card]) -> Option<Triple> {
    let wanted: CardSet = selection.iter().collect();
    triples
        .iter()
        .find(|t| t.iter().collect::<CardSet>().is_superset(&wanted))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{full_deck, Color, Count, Shading, Shape};

    fn red(count: Count, shape: Shape) -> Card {
        Card::new(Color::Red, count, shape, Shading::Filled)
    }

    #[test]
    fn test_scan_finds_known_triple() {
        let cards = vec![
            red(Count::One, Shape::Circle),
            red(Count::Two, Shape::Circle),
            red(Count::Three, Shape::Circle),
        ];
        let triples = scan_triples(&cards);
        assert_eq!(triples, vec![[cards[0], cards[1], cards[2]]]);
        assert!(has_triple(&cards));
    }

    #[test]
    fn test_no_triple_among_mismatching_cards() {
        // Every attribute pairs up two-and-one, so nothing matches.
        let cards = vec![
            red(Count::One, Shape::Circle),
            red(Count::One, Shape::Triangle),
            red(Count::Two, Shape::Circle),
            red(Count::Two, Shape::Triangle),
        ];
        let mut rng = GameRng::new(1);
        assert!(valid_triples(&cards, &mut rng).is_empty());
        assert!(!has_triple(&cards));
    }

    #[test]
    fn test_small_tables() {
        let deck = full_deck();
        assert!(scan_triples(&[]).is_empty());
        assert!(scan_triples(&deck[..2]).is_empty());
        assert!(!has_triple(&deck[..2]));
    }

    #[test]
    fn test_full_deck_triple_count() {
        // 81 * 80 / 6 distinct triples in the full deck.
        let deck = full_deck();
        assert_eq!(scan_triples(&deck).len(), 1080);
        assert!(has_triple(&deck));
    }

    #[test]
    fn test_valid_triples_all_match_and_shuffle() {
        let deck = full_deck();
        let table = &deck[..15];
        let mut rng = GameRng::new(9);

        let shuffled = valid_triples(table, &mut rng);
        let scanned = scan_triples(table);
        assert_eq!(shuffled.len(), scanned.len());
        for t in &shuffled {
            assert!(is_match(t[0], t[1], t[2]));
            assert!(scanned.contains(t));
        }
    }

    #[test]
    fn test_triple_containing() {
        let deck = full_deck();
        let triples = scan_triples(&deck[..27]);
        let anchor = triples[5][1];

        let found = triple_containing(&triples, &[anchor]).unwrap();
        assert!(found.contains(&anchor));

        let pair = [triples[3][0], triples[3][2]];
        let found = triple_containing(&triples, &pair).unwrap();
        assert!(found.contains(&pair[0]) && found.contains(&pair[1]));

        assert_eq!(triple_containing(&[], &[anchor]), None);
    }
}
