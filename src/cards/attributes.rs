//! Card attributes and the per-attribute matching rule.
//!
//! Every card carries four independent attributes, each drawn from exactly
//! three variants:
//!
//! - `Color`: red, green, blue
//! - `Count`: one, two, three
//! - `Shape`: circle, triangle, square
//! - `Shading`: outlined, striped, filled
//!
//! Matching never looks at what a variant means, only at its ordinal, so
//! the rule is written once over `[u8; 3]` and reused for every attribute.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Variants per attribute.
pub const VARIANTS: usize = 3;

/// Attributes per card.
pub const ATTRIBUTE_COUNT: usize = 4;

/// A three-variant card attribute.
pub trait Attribute: Copy + Eq + fmt::Display + 'static {
    /// All variants in ordinal order.
    const ALL: [Self; VARIANTS];

    /// Ordinal in `0..VARIANTS`.
    fn ordinal(self) -> u8;

    /// Variant for an ordinal. Wraps modulo `VARIANTS`.
    fn from_ordinal(ordinal: u8) -> Self {
        Self::ALL[ordinal as usize % VARIANTS]
    }
}

/// True when the three values are all equal or pairwise distinct.
///
/// ```
/// use triples::cards::attributes::uniform_or_distinct;
///
/// assert!(uniform_or_distinct([1, 1, 1]));
/// assert!(uniform_or_distinct([0, 2, 1]));
/// assert!(!uniform_or_distinct([0, 0, 2]));
/// ```
#[must_use]
pub const fn uniform_or_distinct(values: [u8; 3]) -> bool {
    let [a, b, c] = values;
    (a == b && b == c) || (a != b && a != c && b != c)
}

/// Ordinal that completes `a` and `b` into a uniform-or-distinct triple.
#[must_use]
pub const fn completing_ordinal(a: u8, b: u8) -> u8 {
    let n = VARIANTS as u8;
    (n - (a + b) % n) % n
}

macro_rules! attribute {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl Attribute for $name {
            const ALL: [Self; VARIANTS] = [$($name::$variant),+];

            fn ordinal(self) -> u8 {
                self as u8
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let label = match self {
                    $($name::$variant => $label),+
                };
                f.write_str(label)
            }
        }
    };
}

attribute! {
    /// Card color.
    Color { Red => "red", Green => "green", Blue => "blue" }
}

attribute! {
    /// Number of symbols printed on the card.
    Count { One => "1", Two => "2", Three => "3" }
}

attribute! {
    /// Symbol shape.
    Shape { Circle => "circle", Triangle => "triangle", Square => "square" }
}

attribute! {
    /// Symbol fill.
    Shading { Outlined => "outlined", Striped => "striped", Filled => "filled" }
}
