use super::{Strategy, StrategyKind, TurnContext, log_pass_decision, log_play_decision};
use crate::error::InvariantViolation;
use hearts_rules::{Card, is_card_valid};

/// Baseline player: passes the first three cards and plays the first legal one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveStrategy;

impl Strategy for NaiveStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Naive
    }

    fn pass_cards(&mut self, hand: &[Card]) -> Result<[Card; 3], InvariantViolation> {
        let [first, second, third, ..] = hand else {
            return Err(InvariantViolation::NotEnoughCards { len: hand.len() });
        };
        let selection = [*first, *second, *third];
        log_pass_decision(self.kind(), hand, &selection);
        Ok(selection)
    }

    fn play_card(
        &mut self,
        hand: &[Card],
        trick: &[Card],
        turn: TurnContext,
    ) -> Result<Card, InvariantViolation> {
        let chosen = hand
            .iter()
            .copied()
            .find(|&card| is_card_valid(hand, trick, card, turn.trick_nr, turn.hearts_broken))
            .ok_or_else(|| InvariantViolation::NoLegalCard {
                hand: hand.to_vec(),
                trick: trick.to_vec(),
            })?;
        log_play_decision(self.kind(), hand, trick, turn, chosen);
        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::NaiveStrategy;
    use crate::error::InvariantViolation;
    use crate::strategy::{Strategy, TurnContext};
    use hearts_rules::Card;

    fn cards(tokens: &[&str]) -> Vec<Card> {
        tokens.iter().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn passes_first_three_cards_in_hand_order() {
        let hand = cards(&["KH", "2C", "QS", "5D"]);
        let pass = NaiveStrategy.pass_cards(&hand).unwrap();
        assert_eq!(pass.to_vec(), cards(&["KH", "2C", "QS"]));
    }

    #[test]
    fn refuses_to_pass_from_short_hand() {
        let hand = cards(&["KH", "2C"]);
        assert_eq!(
            NaiveStrategy.pass_cards(&hand),
            Err(InvariantViolation::NotEnoughCards { len: 2 })
        );
    }

    #[test]
    fn plays_first_valid_card() {
        let hand = cards(&["AH", "QS", "4D", "9D"]);
        let trick = cards(&["7D"]);
        let card = NaiveStrategy
            .play_card(&hand, &trick, TurnContext::new(2, false))
            .unwrap();
        assert_eq!(card, "4D".parse::<Card>().unwrap());
    }

    #[test]
    fn skips_unbroken_hearts_when_leading() {
        let hand = cards(&["AH", "QS"]);
        let card = NaiveStrategy
            .play_card(&hand, &[], TurnContext::new(2, false))
            .unwrap();
        assert_eq!(card, Card::QUEEN_OF_SPADES);
    }

    #[test]
    fn empty_hand_is_an_invariant_violation() {
        let trick = cards(&["7D"]);
        assert!(matches!(
            NaiveStrategy.play_card(&[], &trick, TurnContext::new(12, true)),
            Err(InvariantViolation::NoLegalCard { .. })
        ));
    }
}
