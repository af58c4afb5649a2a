use crate::model::card::Card;
use crate::model::suit::Suit;
use std::vec::Vec;

/// Cards held by one seat, kept sorted by suit then rank and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand.cards.dedup();
        hand
    }

    /// Returns `false` and leaves the hand untouched when the card is already held.
    pub fn add(&mut self, card: Card) -> bool {
        if self.contains(card) {
            return false;
        }
        self.cards.push(card);
        self.sort();
        true
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn count_suit(&self, suit: Suit) -> usize {
        self.cards.iter().filter(|card| card.suit == suit).count()
    }

    fn sort(&mut self) {
        self.cards.sort();
    }
}
