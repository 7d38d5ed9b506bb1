//! Identity-keyed card collections.
//!
//! `CardSet` is a 128-bit mask indexed by `CardId`, so membership tests and
//! bulk removal are single bit operations rather than scans over a `Vec`.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, DECK_SIZE};

/// Three cards proposed or confirmed as a match.
pub type Triple = [Card; 3];

/// Set of cards keyed by identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSet(u128);

impl CardSet {
    /// Empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Every card in the deck.
    #[must_use]
    pub const fn full() -> Self {
        Self((1u128 << DECK_SIZE) - 1)
    }

    fn bit(card: Card) -> u128 {
        1u128 << card.id().index()
    }

    /// Insert a card. Returns true if it was not already present.
    pub fn insert(&mut self, card: Card) -> bool {
        let was_absent = !self.contains(card);
        self.0 |= Self::bit(card);
        was_absent
    }

    /// Remove a card. Returns true if it was present.
    pub fn remove(&mut self, card: Card) -> bool {
        let was_present = self.contains(card);
        self.0 &= !Self::bit(card);
        was_present
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.0 & Self::bit(card) != 0
    }

    /// True if every card in `other` is in `self`.
    #[must_use]
    pub fn is_superset(&self, other: &CardSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if the sets share no card.
    #[must_use]
    pub fn is_disjoint(&self, other: &CardSet) -> bool {
        self.0 & other.0 == 0
    }

    /// Set union.
    #[must_use]
    pub fn union(&self, other: &CardSet) -> CardSet {
        CardSet(self.0 | other.0)
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// True if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Cards in identity order.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        (0..DECK_SIZE as u8)
            .map(CardId)
            .filter(move |id| self.0 & (1u128 << id.index()) != 0)
            .filter_map(Card::from_id)
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardSet::new();
        for card in iter {
            set.insert(card);
        }
        set
    }
}

impl<'a> FromIterator<&'a Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = &'a Card>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}
