use crate::error::InvalidValue;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Spades = 2,
    Hearts = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Spades, Suit::Hearts];

    /// Suits an Advanced pass may void, in tie-break order.
    pub const SIDE_SUITS: [Suit; 3] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Clubs),
            1 => Some(Suit::Diamonds),
            2 => Some(Suit::Spades),
            3 => Some(Suit::Hearts),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_heart(self) -> bool {
        matches!(self, Suit::Hearts)
    }

    pub const fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Suit::ALL
            .iter()
            .copied()
            .find(|suit| suit.symbol() == symbol.to_ascii_uppercase())
    }
}

impl TryFrom<u8> for Suit {
    type Error = InvalidValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Suit::from_index(value as usize).ok_or(InvalidValue::Suit(value))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::Suit;
    use crate::error::InvalidValue;

    #[test]
    fn display_returns_ascii_symbols() {
        assert_eq!(Suit::Clubs.to_string(), "C");
        assert_eq!(Suit::Hearts.to_string(), "H");
    }

    #[test]
    fn order_puts_spades_below_hearts() {
        assert!(Suit::Clubs < Suit::Diamonds);
        assert!(Suit::Diamonds < Suit::Spades);
        assert!(Suit::Spades < Suit::Hearts);
    }

    #[test]
    fn try_from_rejects_out_of_range() {
        assert_eq!(Suit::try_from(2), Ok(Suit::Spades));
        assert_eq!(Suit::try_from(4), Err(InvalidValue::Suit(4)));
    }

    #[test]
    fn from_symbol_is_case_insensitive() {
        assert_eq!(Suit::from_symbol('s'), Some(Suit::Spades));
        assert_eq!(Suit::from_symbol('X'), None);
    }
}
