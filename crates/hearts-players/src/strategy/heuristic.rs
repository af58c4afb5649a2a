use super::{Strategy, StrategyKind, TurnContext, log_pass_decision, log_play_decision};
use crate::error::InvariantViolation;
use crate::narrator::{Narrator, Silent};
use hearts_rules::model::deck::Deck;
use hearts_rules::{Card, CardList, Rank, Suit, is_card_valid, leading_suit};
use std::cmp::Reverse;

const HIGH_SPADE_PENALTY: u8 = 10;
const UNBROKEN_HEART_LEAD_KEY: u8 = 100;

/// How badly a seat wants to be rid of `card`: its rank value, plus a
/// surcharge for the queen, king and ace of spades.
pub fn undesirability(card: Card) -> u8 {
    let surcharge = if card.suit == Suit::Spades && card.rank >= Rank::Queen {
        HIGH_SPADE_PENALTY
    } else {
        0
    };
    card.rank.value() + surcharge
}

/// Stable sort, most undesirable first.
fn sort_by_undesirability(cards: &mut [Card]) {
    cards.sort_by_key(|&card| Reverse(undesirability(card)));
}

/// Passes away the three most undesirable cards.
pub(super) fn pass_least_wanted(hand: &[Card]) -> Result<[Card; 3], InvariantViolation> {
    let mut ordered = hand.to_vec();
    sort_by_undesirability(&mut ordered);
    match ordered.as_slice() {
        [first, second, third, ..] => Ok([*first, *second, *third]),
        _ => Err(InvariantViolation::NotEnoughCards { len: hand.len() }),
    }
}

/// Lead low and avoid winning tricks; when a trick must be won, unload the
/// worst card other than the queen of spades.
pub(super) fn choose_play<N: Narrator>(
    hand: &[Card],
    trick: &[Card],
    turn: TurnContext,
    narrator: &mut N,
) -> Result<Card, InvariantViolation> {
    let no_legal_card = || InvariantViolation::NoLegalCard {
        hand: hand.to_vec(),
        trick: trick.to_vec(),
    };

    let Some(lead) = leading_suit(trick) else {
        return hand
            .iter()
            .copied()
            .min_by_key(|card| {
                if !turn.hearts_broken && card.suit.is_heart() {
                    UNBROKEN_HEART_LEAD_KEY
                } else {
                    card.rank.value()
                }
            })
            .ok_or_else(no_legal_card);
    };

    let mut ordered = hand.to_vec();
    sort_by_undesirability(&mut ordered);
    narrator.say(format_args!("Hand: {}", CardList(&ordered)));
    narrator.say(format_args!("Trick so far: {}", CardList(trick)));

    let max_rank_in_lead = trick
        .iter()
        .filter(|card| card.suit == lead)
        .map(|card| card.rank)
        .max()
        .unwrap_or(Rank::Two);
    let valid: Vec<Card> = ordered
        .iter()
        .copied()
        .filter(|&card| is_card_valid(hand, trick, card, turn.trick_nr, turn.hearts_broken))
        .collect();
    // Safe cards cannot take the trick.
    let safe: Vec<Card> = valid
        .iter()
        .copied()
        .filter(|card| card.suit != lead || card.rank <= max_rank_in_lead)
        .collect();

    narrator.say(format_args!("Valid cards: {}", CardList(&valid)));
    narrator.say(format_args!("Safe cards: {}", CardList(&safe)));

    if let Some(&card) = safe.first() {
        return Ok(card);
    }

    match valid.as_slice() {
        [first, second, ..] if first.is_queen_of_spades() => Ok(*second),
        [first, ..] => Ok(*first),
        [] => Err(no_legal_card()),
    }
}

fn narrate_undesirability_table<N: Narrator>(narrator: &mut N) {
    let mut deck = Deck::standard().cards().to_vec();
    deck.sort_by_key(|&card| undesirability(card));
    narrator.say(format_args!("Card undesirability: "));
    for card in deck {
        narrator.say(format_args!("{}: {}", card, undesirability(card)));
    }
}

/// Passes its highest cards and plays to duck tricks.
#[derive(Debug, Clone, Default)]
pub struct HeuristicStrategy<N = Silent> {
    narrator: N,
}

impl HeuristicStrategy<Silent> {
    pub fn new() -> Self {
        Self { narrator: Silent }
    }
}

impl<N: Narrator> HeuristicStrategy<N> {
    /// Attaches `narrator` and reports the undesirability of every card to it.
    pub fn with_narrator(mut narrator: N) -> Self {
        narrate_undesirability_table(&mut narrator);
        Self { narrator }
    }

    pub fn narrator(&self) -> &N {
        &self.narrator
    }
}

impl<N: Narrator> Strategy for HeuristicStrategy<N> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Heuristic
    }

    fn pass_cards(&mut self, hand: &[Card]) -> Result<[Card; 3], InvariantViolation> {
        let selection = pass_least_wanted(hand)?;
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

#[cfg(test)]
mod tests {
    use super::{HeuristicStrategy, undesirability};
    use crate::error::InvariantViolation;
    use crate::strategy::{Strategy, TurnContext};
    use hearts_rules::Card;

    fn c(token: &str) -> Card {
        token.parse().unwrap()
    }

    fn cards(tokens: &[&str]) -> Vec<Card> {
        tokens.iter().map(|t| c(t)).collect()
    }

    #[test]
    fn undesirability_surcharges_high_spades() {
        assert_eq!(undesirability(c("2C")), 2);
        assert_eq!(undesirability(c("AH")), 14);
        assert_eq!(undesirability(c("JS")), 11);
        assert_eq!(undesirability(c("QS")), 22);
        assert_eq!(undesirability(c("KS")), 23);
        assert_eq!(undesirability(c("AS")), 24);
    }

    #[test]
    fn passes_three_most_undesirable() {
        let hand = cards(&["2C", "AH", "QS", "9D", "AS", "KD"]);
        let pass = HeuristicStrategy::new().pass_cards(&hand).unwrap();
        assert_eq!(pass.to_vec(), cards(&["AS", "QS", "AH"]));
    }

    #[test]
    fn pass_ties_keep_hand_order() {
        let hand = cards(&["KC", "KD", "KH", "KS"]);
        let pass = HeuristicStrategy::new().pass_cards(&hand).unwrap();
        assert_eq!(pass.to_vec(), cards(&["KS", "KC", "KD"]));
    }

    #[test]
    fn pass_needs_three_cards() {
        assert_eq!(
            HeuristicStrategy::new().pass_cards(&cards(&["2C"])),
            Err(InvariantViolation::NotEnoughCards { len: 1 })
        );
    }

    #[test]
    fn leads_lowest_rank_avoiding_unbroken_hearts() {
        let hand = cards(&["2H", "9C", "5D", "KS"]);
        let mut strategy = HeuristicStrategy::new();
        let card = strategy
            .play_card(&hand, &[], TurnContext::new(3, false))
            .unwrap();
        assert_eq!(card, c("5D"));
        let card = strategy
            .play_card(&hand, &[], TurnContext::new(3, true))
            .unwrap();
        assert_eq!(card, c("2H"));
    }

    #[test]
    fn leads_first_heart_when_only_hearts_remain() {
        let hand = cards(&["9H", "4H"]);
        let card = HeuristicStrategy::new()
            .play_card(&hand, &[], TurnContext::new(11, false))
            .unwrap();
        assert_eq!(card, c("9H"));
    }

    #[test]
    fn discards_worst_safe_card_when_void() {
        let hand = cards(&["2H", "QS", "AC"]);
        let trick = cards(&["5D", "KD"]);
        let card = HeuristicStrategy::new()
            .play_card(&hand, &trick, TurnContext::new(4, true))
            .unwrap();
        assert_eq!(card, Card::QUEEN_OF_SPADES);
    }

    #[test]
    fn plays_highest_card_that_still_ducks() {
        let hand = cards(&["3S", "8S", "JS", "AD"]);
        let trick = cards(&["9S"]);
        let card = HeuristicStrategy::new()
            .play_card(&hand, &trick, TurnContext::new(1, false))
            .unwrap();
        assert_eq!(card, c("8S"));
    }

    #[test]
    fn holding_a_spade_forbids_discarding_the_heart() {
        let hand = cards(&["2H", "QS"]);
        let trick = cards(&["3S", "5S", "9S"]);
        let card = HeuristicStrategy::new()
            .play_card(&hand, &trick, TurnContext::new(6, true))
            .unwrap();
        // QS is the only spade, so 2H is not a legal discard.
        assert_eq!(card, Card::QUEEN_OF_SPADES);
    }

    #[test]
    fn avoids_winning_with_queen_when_alternative_exists() {
        let hand = cards(&["QS", "10S", "2C"]);
        let trick = cards(&["9S", "4S"]);
        let card = HeuristicStrategy::new()
            .play_card(&hand, &trick, TurnContext::new(2, false))
            .unwrap();
        assert_eq!(card, c("10S"));
    }

    #[test]
    fn must_take_with_highest_when_queen_is_not_first() {
        let hand = cards(&["KS", "QS", "10S"]);
        let trick = cards(&["9S"]);
        let card = HeuristicStrategy::new()
            .play_card(&hand, &trick, TurnContext::new(2, false))
            .unwrap();
        assert_eq!(card, c("KS"));
    }

    #[test]
    fn plays_queen_when_it_is_the_only_legal_card() {
        let hand = cards(&["QS", "2C"]);
        let trick = cards(&["9S"]);
        let card = HeuristicStrategy::new()
            .play_card(&hand, &trick, TurnContext::new(2, false))
            .unwrap();
        assert_eq!(card, Card::QUEEN_OF_SPADES);
    }

    #[test]
    fn empty_hand_is_an_invariant_violation() {
        let mut strategy = HeuristicStrategy::new();
        assert!(matches!(
            strategy.play_card(&[], &[], TurnContext::new(0, false)),
            Err(InvariantViolation::NoLegalCard { .. })
        ));
        assert!(matches!(
            strategy.play_card(&[], &cards(&["2C"]), TurnContext::new(0, false)),
            Err(InvariantViolation::NoLegalCard { .. })
        ));
    }

    #[test]
    fn narrator_sees_table_and_follow_reasoning() {
        let mut strategy = HeuristicStrategy::with_narrator(Vec::<String>::new());
        assert_eq!(strategy.narrator().len(), 53);
        assert_eq!(strategy.narrator()[0], "Card undesirability: ");
        assert_eq!(strategy.narrator()[1], "2C: 2");
        assert_eq!(strategy.narrator()[52], "AS: 24");

        let hand = cards(&["2H", "QS"]);
        let trick = cards(&["3D"]);
        strategy
            .play_card(&hand, &trick, TurnContext::new(1, true))
            .unwrap();
        let lines = &strategy.narrator()[53..];
        assert_eq!(
            lines,
            [
                "Hand: [QS, 2H]",
                "Trick so far: [3D]",
                "Valid cards: [QS, 2H]",
                "Safe cards: [QS, 2H]",
            ]
        );
    }

    #[test]
    fn narration_does_not_change_decisions() {
        let hand = cards(&["2H", "QS", "KS", "4S", "JD", "3C"]);
        let tricks = [
            cards(&[]),
            cards(&["5S"]),
            cards(&["AS", "2S"]),
            cards(&["9D", "10D"]),
            cards(&["4H"]),
        ];
        let mut quiet = HeuristicStrategy::new();
        let mut chatty = HeuristicStrategy::with_narrator(Vec::<String>::new());
        for trick in &tricks {
            for broken in [false, true] {
                let turn = TurnContext::new(5, broken);
                assert_eq!(
                    quiet.play_card(&hand, trick, turn),
                    chatty.play_card(&hand, trick, turn)
                );
            }
        }
        assert_eq!(quiet.pass_cards(&hand), chatty.pass_cards(&hand));
    }
}
