use crate::error::InvalidValue;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// A playing card. Ordering is by suit first, then rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const QUEEN_OF_SPADES: Card = Card::new(Rank::Queen, Suit::Spades);
    pub const TWO_OF_CLUBS: Card = Card::new(Rank::Two, Suit::Clubs);

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub const fn is_penalty(self) -> bool {
        matches!(self.suit, Suit::Hearts) || self.is_queen_of_spades()
    }

    pub const fn is_queen_of_spades(self) -> bool {
        matches!(self.rank, Rank::Queen) && matches!(self.suit, Suit::Spades)
    }

    pub fn penalty_value(self) -> u8 {
        if self.is_queen_of_spades() {
            13
        } else if self.suit == Suit::Hearts {
            1
        } else {
            0
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = InvalidValue;

    /// Parses the display form, e.g. `QS` or `10H`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        let invalid = || InvalidValue::Card(text.to_string());
        let symbol = trimmed.chars().last().ok_or_else(invalid)?;
        let suit = Suit::from_symbol(symbol).ok_or_else(invalid)?;
        let rank_token = &trimmed[..trimmed.len() - symbol.len_utf8()];
        let rank = Rank::from_token(rank_token).ok_or_else(invalid)?;
        Ok(Card::new(rank, suit))
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = InvalidValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Renders a slice of cards as `[2H, QS]`.
pub struct CardList<'a>(pub &'a [Card]);

impl fmt::Display for CardList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, card) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, CardList, Rank, Suit};
    use crate::error::InvalidValue;

    #[test]
    fn queen_of_spades_identified() {
        let card = Card::new(Rank::Queen, Suit::Spades);
        assert!(card.is_queen_of_spades());
        assert!(card.is_penalty());
        assert_eq!(card.penalty_value(), 13);
        assert_eq!(card, Card::QUEEN_OF_SPADES);
    }

    #[test]
    fn regular_card_not_penalty() {
        let card = Card::new(Rank::Ten, Suit::Clubs);
        assert!(!card.is_penalty());
        assert_eq!(card.penalty_value(), 0);
    }

    #[test]
    fn hearts_are_one_point() {
        let card = Card::new(Rank::Ace, Suit::Hearts);
        assert!(card.is_penalty());
        assert_eq!(card.penalty_value(), 1);
    }

    #[test]
    fn display_is_rank_then_suit() {
        assert_eq!(Card::QUEEN_OF_SPADES.to_string(), "QS");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "10H");
    }

    #[test]
    fn suit_dominates_rank_in_ordering() {
        let ace_of_clubs = Card::new(Rank::Ace, Suit::Clubs);
        let two_of_diamonds = Card::new(Rank::Two, Suit::Diamonds);
        assert!(ace_of_clubs < two_of_diamonds);
        assert!(Card::new(Rank::Three, Suit::Hearts) < Card::new(Rank::Four, Suit::Hearts));
    }

    #[test]
    fn parses_display_tokens() {
        assert_eq!("QS".parse::<Card>(), Ok(Card::QUEEN_OF_SPADES));
        assert_eq!("10h".parse::<Card>(), Ok(Card::new(Rank::Ten, Suit::Hearts)));
        assert_eq!(
            "1S".parse::<Card>(),
            Err(InvalidValue::Card("1S".to_string()))
        );
        assert!("".parse::<Card>().is_err());
        assert!("QX".parse::<Card>().is_err());
    }

    #[test]
    fn serializes_as_display_string() {
        let json = serde_json::to_string(&Card::QUEEN_OF_SPADES).unwrap();
        assert_eq!(json, "\"QS\"");
        let back: Card = serde_json::from_str("\"2C\"").unwrap();
        assert_eq!(back, Card::TWO_OF_CLUBS);
        assert!(serde_json::from_str::<Card>("\"ZZ\"").is_err());
    }

    #[test]
    fn card_list_formats_brackets() {
        let cards = [Card::new(Rank::Two, Suit::Hearts), Card::QUEEN_OF_SPADES];
        assert_eq!(CardList(&cards).to_string(), "[2H, QS]");
        assert_eq!(CardList(&[]).to_string(), "[]");
    }
}
