//! Card model: attributes, cards, identity-keyed sets.
//!
//! ## Key Types
//!
//! - `Color`, `Count`, `Shape`, `Shading`: the four three-variant attributes
//! - `Card`: immutable value over the four attributes
//! - `CardId`: stable identity in `0..81`
//! - `CardSet`: bitset keyed by `CardId`
//! - `Triple`: three cards forming (or proposed as) a match
//!
//! `is_match` is the one predicate every score, hint and opponent decision
//! rests on.

pub mod attributes;
pub mod card;
pub mod cardset;

pub use attributes::{Attribute, Color, Count, Shading, Shape};
pub use card::{full_deck, is_match, shuffled_deck, Card, CardId, DECK_SIZE};
pub use cardset::{CardSet, Triple};
