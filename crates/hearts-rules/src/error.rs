use thiserror::Error;

/// Rejected attempt to build a suit, rank or card outside its domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidValue {
    #[error("suit index {0} is out of range (expected 0..=3)")]
    Suit(u8),
    #[error("rank value {0} is out of range (expected 2..=14)")]
    Rank(u8),
    #[error("'{0}' is not a card token")]
    Card(String),
}
