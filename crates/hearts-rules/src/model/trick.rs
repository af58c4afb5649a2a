use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use crate::rules;
use thiserror::Error;

/// Cards played in one trick, in play order, starting with `leader`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trick {
    leader: PlayerPosition,
    cards: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub position: PlayerPosition,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
}

impl Trick {
    pub fn new(leader: PlayerPosition) -> Self {
        Self {
            leader,
            cards: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    /// The played cards without seat information, as the rule engine expects them.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn plays(&self) -> impl Iterator<Item = Play> + '_ {
        self.cards.iter().enumerate().map(|(idx, &card)| Play {
            position: self.leader.advance(idx),
            card,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        rules::leading_suit(&self.cards)
    }

    pub fn expected_position(&self) -> PlayerPosition {
        self.leader.advance(self.cards.len())
    }

    pub fn play(&mut self, position: PlayerPosition, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        let expected = self.expected_position();
        if expected != position {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: position,
            });
        }

        self.cards.push(card);
        Ok(())
    }

    pub fn winner(&self) -> Option<PlayerPosition> {
        if !self.is_complete() {
            return None;
        }
        rules::trick_winner_index(&self.cards).map(|idx| self.leader.advance(idx))
    }

    pub fn penalty_total(&self) -> u8 {
        self.cards.iter().map(|card| card.penalty_value()).sum()
    }
}
