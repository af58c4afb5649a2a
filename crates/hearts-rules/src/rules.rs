//! Legal-play constraints for a single decision.
//!
//! These functions see only the deciding seat's hand and the cards already
//! in the trick. Opening-trick conventions such as a forced two of clubs are
//! left to the referee that calls them.

use crate::model::card::Card;
use crate::model::suit::Suit;

/// Suit of the first card in the trick, if any card has been played.
pub fn leading_suit(trick: &[Card]) -> Option<Suit> {
    trick.first().map(|card| card.suit)
}

/// Whether `candidate` may be played from `hand` onto `trick`.
///
/// `trick_nr` is part of the decision context so callers can layer
/// opening-trick constraints; the follow-suit and hearts-broken rules do not
/// depend on it. A candidate that is not in `hand` is never valid.
pub fn is_card_valid(
    hand: &[Card],
    trick: &[Card],
    candidate: Card,
    _trick_nr: usize,
    hearts_broken: bool,
) -> bool {
    if !hand.contains(&candidate) {
        return false;
    }

    match leading_suit(trick) {
        None => {
            if candidate.suit.is_heart() && !hearts_broken {
                !hand.iter().any(|card| !card.suit.is_heart())
            } else {
                true
            }
        }
        Some(lead) => candidate.suit == lead || !hand.iter().any(|card| card.suit == lead),
    }
}

/// Every card of `hand` that [`is_card_valid`] accepts, in hand order.
pub fn legal_cards(hand: &[Card], trick: &[Card], trick_nr: usize, hearts_broken: bool) -> Vec<Card> {
    hand.iter()
        .copied()
        .filter(|&card| is_card_valid(hand, trick, card, trick_nr, hearts_broken))
        .collect()
}

/// Position within `trick` of the card currently winning it.
pub fn trick_winner_index(trick: &[Card]) -> Option<usize> {
    let lead = leading_suit(trick)?;
    trick
        .iter()
        .enumerate()
        .filter(|(_, card)| card.suit == lead)
        .max_by_key(|(_, card)| card.rank)
        .map(|(idx, _)| idx)
}
