use super::heuristic::choose_play;
use super::{Strategy, StrategyKind, TurnContext, log_pass_decision, log_play_decision};
use crate::error::InvariantViolation;
use crate::narrator::{Narrator, Silent};
use hearts_rules::{Card, CardList, Rank, Suit};

/// With this many spades the hand can protect its high spades, so they are kept.
const SPADE_GUARD_LENGTH: usize = 6;

/// High spades shed while the hand is short in spades, in order.
const SHED_SPADES: [Card; 3] = [
    Card::QUEEN_OF_SPADES,
    Card::new(Rank::Ace, Suit::Spades),
    Card::new(Rank::King, Suit::Spades),
];

/// Plays like [`super::HeuristicStrategy`] but passes to shed dangerous
/// spades or void its shortest side suit.
#[derive(Debug, Clone, Default)]
pub struct AdvancedStrategy<N = Silent> {
    narrator: N,
}

impl AdvancedStrategy<Silent> {
    pub fn new() -> Self {
        Self { narrator: Silent }
    }
}

impl<N: Narrator> AdvancedStrategy<N> {
    pub fn with_narrator(narrator: N) -> Self {
        Self { narrator }
    }

    pub fn narrator(&self) -> &N {
        &self.narrator
    }
}

/// Next card to pass from what is left of the hand.
fn next_pass(working: &[Card]) -> Option<Card> {
    let spades = working.iter().filter(|card| card.suit == Suit::Spades).count();
    if spades < SPADE_GUARD_LENGTH {
        if let Some(card) = SHED_SPADES.iter().copied().find(|card| working.contains(card)) {
            return Some(card);
        }
    }

    // min_by_key keeps the first of equal lengths, so ties go to the lower suit.
    let shortest = Suit::SIDE_SUITS
        .iter()
        .copied()
        .map(|suit| (suit, working.iter().filter(|card| card.suit == suit).count()))
        .filter(|&(_, len)| len > 0)
        .min_by_key(|&(_, len)| len)
        .map_or(Suit::Spades, |(suit, _)| suit);

    working
        .iter()
        .copied()
        .filter(|card| card.suit == shortest)
        .max_by_key(|card| card.rank)
}

impl<N: Narrator> Strategy for AdvancedStrategy<N> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Advanced
    }

    fn pass_cards(&mut self, hand: &[Card]) -> Result<[Card; 3], InvariantViolation> {
        let not_enough = InvariantViolation::NotEnoughCards { len: hand.len() };
        if hand.len() < 3 {
            return Err(not_enough);
        }

        self.narrator
            .say(format_args!("Hand before passing: {}", CardList(hand)));
        let mut working = hand.to_vec();
        let mut selection = [Card::TWO_OF_CLUBS; 3];
        for slot in selection.iter_mut() {
            let card = next_pass(&working).ok_or_else(|| not_enough.clone())?;
            working.retain(|&held| held != card);
            *slot = card;
        }
        self.narrator
            .say(format_args!("Cards to pass: {}", CardList(&selection)));

        log_pass_decision(self.kind(), hand, &selection);
        Ok(selection)
    }

    fn play_card(
        &mut self,
        hand: &[Card],
        trick: &[Card],
        turn: TurnContext,
    ) -> Result<Card, InvariantViolation> {
        let chosen = choose_play(hand, trick, turn, &mut self.narrator)?;
        log_play_decision(self.kind(), hand, trick, turn, chosen);
        Ok(chosen)
    }
}
