//! Cards, card identity, and the full deck.
//!
//! A `Card` is an immutable value: two cards are the same card exactly when
//! all four attributes agree. `CardId` packs the four ordinals into a single
//! base-3 number in `0..81`, which gives every card a stable key for the
//! bitset collections in `cards::cardset`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::attributes::{
    completing_ordinal, uniform_or_distinct, Attribute, Color, Count, Shading, Shape,
    ATTRIBUTE_COUNT, VARIANTS,
};
use crate::core::GameRng;

/// Number of distinct cards (3^4).
pub const DECK_SIZE: usize = VARIANTS * VARIANTS * VARIANTS * VARIANTS;

/// Stable card identity in `0..DECK_SIZE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A face-up card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub color: Color,
    pub count: Count,
    pub shape: Shape,
    pub shading: Shading,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(color: Color, count: Count, shape: Shape, shading: Shading) -> Self {
        Self {
            color,
            count,
            shape,
            shading,
        }
    }

    /// Attribute ordinals in fixed order: color, count, shape, shading.
    #[must_use]
    pub fn ordinals(self) -> [u8; ATTRIBUTE_COUNT] {
        [
            self.color.ordinal(),
            self.count.ordinal(),
            self.shape.ordinal(),
            self.shading.ordinal(),
        ]
    }

    fn from_ordinals(ordinals: [u8; ATTRIBUTE_COUNT]) -> Self {
        Self {
            color: Color::from_ordinal(ordinals[0]),
            count: Count::from_ordinal(ordinals[1]),
            shape: Shape::from_ordinal(ordinals[2]),
            shading: Shading::from_ordinal(ordinals[3]),
        }
    }

    /// Stable identity.
    #[must_use]
    pub fn id(self) -> CardId {
        let base = VARIANTS as u8;
        let id = self.ordinals().iter().fold(0u8, |acc, &o| acc * base + o);
        CardId(id)
    }

    /// Card for an identity. Returns `None` outside `0..DECK_SIZE`.
    #[must_use]
    pub fn from_id(id: CardId) -> Option<Self> {
        if id.index() >= DECK_SIZE {
            return None;
        }
        let base = VARIANTS as u8;
        let mut rest = id.0;
        let mut ordinals = [0u8; ATTRIBUTE_COUNT];
        for slot in ordinals.iter_mut().rev() {
            *slot = rest % base;
            rest /= base;
        }
        Some(Self::from_ordinals(ordinals))
    }

    /// The unique card that forms a match with `a` and `b`.
    ///
    /// When `a == b` the result is that same card, which can never be part
    /// of a real triple since cards are unique.
    #[must_use]
    pub fn completing(a: Card, b: Card) -> Card {
        let (oa, ob) = (a.ordinals(), b.ordinals());
        let mut ordinals = [0u8; ATTRIBUTE_COUNT];
        for (i, slot) in ordinals.iter_mut().enumerate() {
            *slot = completing_ordinal(oa[i], ob[i]);
        }
        Self::from_ordinals(ordinals)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.count, self.shading, self.color, self.shape)
    }
}

/// True when every attribute is uniform or pairwise distinct across the three cards.
///
/// ```
/// use triples::cards::{is_match, Card, Color, Count, Shape, Shading};
///
/// let a = Card::new(Color::Red, Count::One, Shape::Circle, Shading::Filled);
/// let b = Card::new(Color::Red, Count::Two, Shape::Triangle, Shading::Filled);
/// let c = Card::new(Color::Red, Count::Three, Shape::Square, Shading::Filled);
/// assert!(is_match(a, b, c));
/// ```
#[must_use]
pub fn is_match(a: Card, b: Card, c: Card) -> bool {
    let (oa, ob, oc) = (a.ordinals(), b.ordinals(), c.ordinals());
    (0..ATTRIBUTE_COUNT).all(|i| uniform_or_distinct([oa[i], ob[i], oc[i]]))
}

/// Every card exactly once, in identity order.
#[must_use]
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in Color::ALL {
        for count in Count::ALL {
            for shape in Shape::ALL {
                for shading in Shading::ALL {
                    deck.push(Card::new(color, count, shape, shading));
                }
            }
        }
    }
    deck
}

/// Every card exactly once, uniformly shuffled.
pub fn shuffled_deck(rng: &mut GameRng) -> Vec<Card> {
    let mut deck = full_deck();
    rng.shuffle(&mut deck);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn card(color: Color, count: Count, shape: Shape, shading: Shading) -> Card {
        Card::new(color, count, shape, shading)
    }

    #[test]
    fn test_full_deck_unique() {
        let deck = full_deck();
        assert_eq!(deck.len(), 81);

        let unique: FxHashSet<_> = deck.iter().copied().collect();
        assert_eq!(unique.len(), 81);
    }

    #[test]
    fn test_ids_follow_deck_order() {
        for (i, c) in full_deck().into_iter().enumerate() {
            assert_eq!(c.id().index(), i);
            assert_eq!(Card::from_id(c.id()), Some(c));
        }
        assert_eq!(Card::from_id(CardId(81)), None);
    }

    #[test]
    fn test_match_mixed_attributes() {
        let a = card(Color::Red, Count::One, Shape::Circle, Shading::Outlined);
        let b = card(Color::Red, Count::Two, Shape::Triangle, Shading::Outlined);
        let c = card(Color::Red, Count::Three, Shape::Square, Shading::Outlined);
        assert!(is_match(a, b, c));
    }

    #[test]
    fn test_two_same_one_different_fails() {
        let a = card(Color::Red, Count::One, Shape::Circle, Shading::Outlined);
        let b = card(Color::Red, Count::Two, Shape::Triangle, Shading::Outlined);
        let c = card(Color::Green, Count::Three, Shape::Square, Shading::Outlined);
        assert!(!is_match(a, b, c));
    }

    #[test]
    fn test_all_distinct_everywhere() {
        let a = card(Color::Red, Count::One, Shape::Circle, Shading::Outlined);
        let b = card(Color::Green, Count::Two, Shape::Triangle, Shading::Striped);
        let c = card(Color::Blue, Count::Three, Shape::Square, Shading::Filled);
        assert!(is_match(a, b, c));
    }

    #[test]
    fn test_completing_card() {
        let a = card(Color::Red, Count::One, Shape::Circle, Shading::Outlined);
        let b = card(Color::Green, Count::One, Shape::Square, Shading::Filled);
        let c = Card::completing(a, b);
        assert_eq!(c, card(Color::Blue, Count::One, Shape::Triangle, Shading::Striped));
        assert!(is_match(a, b, c));
    }

    #[test]
    fn test_shuffled_deck_is_permutation() {
        let mut rng = GameRng::new(3);
        let mut deck = shuffled_deck(&mut rng);
        assert_ne!(deck, full_deck());
        deck.sort();
        assert_eq!(deck, full_deck());
    }

    #[test]
    fn test_display() {
        let c = card(Color::Blue, Count::Two, Shape::Triangle, Shading::Striped);
        assert_eq!(c.to_string(), "2 striped blue triangle");
    }
}
