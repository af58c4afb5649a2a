use hearts_rules::{Card, CardList};
use thiserror::Error;

/// A strategy was asked to decide from a state that cannot occur in a
/// well-formed hand. Callers should treat these as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("no valid card in hand {} for trick {}", CardList(.hand), CardList(.trick))]
    NoLegalCard { hand: Vec<Card>, trick: Vec<Card> },
    #[error("cannot pass three cards from a hand of {len}")]
    NotEnoughCards { len: usize },
}
