#![deny(warnings)]
pub mod error;
pub mod model;
pub mod rules;

pub use error::InvalidValue;
pub use model::card::{Card, CardList};
pub use model::rank::Rank;
pub use model::suit::Suit;
pub use rules::{is_card_valid, leading_suit, legal_cards};
