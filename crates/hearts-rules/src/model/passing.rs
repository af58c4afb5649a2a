use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use serde::{Deserialize, Serialize};
use std::array;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassingDirection {
    Left,
    Right,
    Across,
    Hold,
}

impl PassingDirection {
    pub const CYCLE: [PassingDirection; 4] = [
        PassingDirection::Left,
        PassingDirection::Right,
        PassingDirection::Across,
        PassingDirection::Hold,
    ];

    /// Direction used for the `hand_index`-th hand of a rotating session.
    pub const fn for_hand(hand_index: usize) -> PassingDirection {
        Self::CYCLE[hand_index % 4]
    }

    pub const fn requires_selection(self) -> bool {
        !matches!(self, PassingDirection::Hold)
    }

    pub const fn target(self, seat: PlayerPosition) -> PlayerPosition {
        match self {
            PassingDirection::Left => seat.next(),
            PassingDirection::Right => seat.previous(),
            PassingDirection::Across => seat.opposite(),
            PassingDirection::Hold => seat,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PassingDirection::Left => "left",
            PassingDirection::Right => "right",
            PassingDirection::Across => "across",
            PassingDirection::Hold => "hold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PassingError {
    #[error("round is not in the passing phase")]
    NotInPassingPhase,
    #[error("no cards are passed this hand")]
    DirectionDoesNotPass,
    #[error("{0} has already passed")]
    AlreadySubmitted(PlayerPosition),
    #[error("{0} is not in the passing hand")]
    CardNotInHand(Card),
    #[error("{0} was selected more than once")]
    DuplicateCard(Card),
    #[error("not every seat has passed yet")]
    Incomplete,
}

/// Three-card selections collected from every seat before they change hands.
#[derive(Debug, Clone)]
pub struct PassingState {
    direction: PassingDirection,
    submissions: [Option<[Card; 3]>; 4],
}

impl PassingState {
    pub fn new(direction: PassingDirection) -> Self {
        Self {
            direction,
            submissions: array::from_fn(|_| None),
        }
    }

    pub fn direction(&self) -> PassingDirection {
        self.direction
    }

    pub fn submit(
        &mut self,
        seat: PlayerPosition,
        cards: [Card; 3],
        hand: &mut Hand,
    ) -> Result<(), PassingError> {
        if !self.direction.requires_selection() {
            return Err(PassingError::DirectionDoesNotPass);
        }

        if self.submissions[seat.index()].is_some() {
            return Err(PassingError::AlreadySubmitted(seat));
        }

        for (idx, card) in cards.iter().enumerate() {
            if cards[..idx].contains(card) {
                return Err(PassingError::DuplicateCard(*card));
            }
            if !hand.contains(*card) {
                return Err(PassingError::CardNotInHand(*card));
            }
        }

        for card in cards.iter() {
            hand.remove(*card);
        }

        self.submissions[seat.index()] = Some(cards);
        Ok(())
    }

    pub fn submission(&self, seat: PlayerPosition) -> Option<[Card; 3]> {
        self.submissions[seat.index()]
    }

    pub fn is_complete(&self) -> bool {
        self.submissions
            .iter()
            .all(|submission| submission.is_some())
    }

    pub fn apply(&self, hands: &mut [Hand; 4]) -> Result<(), PassingError> {
        if !self.direction.requires_selection() {
            return Err(PassingError::DirectionDoesNotPass);
        }

        if !self.is_complete() {
            return Err(PassingError::Incomplete);
        }

        for seat in PlayerPosition::LOOP.iter().copied() {
            if let Some(cards) = self.submissions[seat.index()] {
                let target = self.direction.target(seat);
                let hand = &mut hands[target.index()];
                for card in cards.iter() {
                    hand.add(*card);
                }
            }
        }

        Ok(())
    }
}
