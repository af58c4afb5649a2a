use crate::model::card::Card;
use crate::model::deck::{Deck, HAND_SIZE};
use crate::model::hand::Hand;
use crate::model::passing::{PassingDirection, PassingError, PassingState};
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use crate::model::trick::{Trick, TrickError};
use crate::rules;
use thiserror::Error;

/// Referee for one pass-then-play hand of four seats.
#[derive(Debug, Clone)]
pub struct RoundState {
    hands: [Hand; 4],
    current_trick: Trick,
    trick_history: Vec<Trick>,
    passing_direction: PassingDirection,
    phase: RoundPhase,
    hearts_broken: bool,
    queen_of_spades_played: bool,
}

#[derive(Debug, Clone)]
pub enum RoundPhase {
    Passing(PassingState),
    Playing,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted {
        winner: PlayerPosition,
        penalties: u8,
        cards: Vec<Card>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("round is not in the play phase")]
    NotInPlayPhase,
    #[error("{0} is not in the player's hand")]
    CardNotInHand(Card),
    #[error("expected {expected} to play but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("must follow {0}")]
    MustFollowSuit(Suit),
    #[error("hearts have not been broken")]
    HeartsNotBroken,
    #[error(transparent)]
    Trick(#[from] TrickError),
}

impl RoundState {
    /// Deals `deck` in runs of thirteen, North first.
    pub fn deal(deck: &Deck, passing_direction: PassingDirection) -> Self {
        Self::from_hands(deck.deal(), passing_direction)
    }

    pub fn from_hands(hands: [Hand; 4], passing_direction: PassingDirection) -> Self {
        let phase = if passing_direction.requires_selection() {
            RoundPhase::Passing(PassingState::new(passing_direction))
        } else {
            RoundPhase::Playing
        };
        let leader = opening_leader(&hands);

        Self {
            hands,
            current_trick: Trick::new(leader),
            trick_history: Vec::new(),
            passing_direction,
            phase,
            hearts_broken: false,
            queen_of_spades_played: false,
        }
    }

    pub fn passing_direction(&self) -> PassingDirection {
        self.passing_direction
    }

    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, RoundPhase::Finished)
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_history(&self) -> &[Trick] {
        &self.trick_history
    }

    /// Zero-based index of the trick in progress.
    pub fn trick_number(&self) -> usize {
        self.trick_history.len()
    }

    pub fn hearts_broken(&self) -> bool {
        self.hearts_broken
    }

    pub fn queen_of_spades_played(&self) -> bool {
        self.queen_of_spades_played
    }

    pub fn expected_seat(&self) -> PlayerPosition {
        self.current_trick.expected_position()
    }

    pub fn submit_pass(
        &mut self,
        seat: PlayerPosition,
        cards: [Card; 3],
    ) -> Result<(), PassingError> {
        match &mut self.phase {
            RoundPhase::Passing(state) => {
                let hand = &mut self.hands[seat.index()];
                state.submit(seat, cards, hand)
            }
            _ => Err(PassingError::NotInPassingPhase),
        }
    }

    /// Hands every submitted pass to its target and starts play.
    pub fn resolve_passes(&mut self) -> Result<(), PassingError> {
        let RoundPhase::Passing(state) = &self.phase else {
            return Err(PassingError::NotInPassingPhase);
        };
        state.apply(&mut self.hands)?;

        // The two of clubs may have changed hands.
        self.current_trick = Trick::new(opening_leader(&self.hands));
        self.phase = RoundPhase::Playing;
        Ok(())
    }

    /// Cards `seat` received in the resolved pass, if any.
    pub fn received_from_pass(&self, seat: PlayerPosition, state: &PassingState) -> Option<[Card; 3]> {
        let sender = PlayerPosition::LOOP
            .iter()
            .copied()
            .find(|from| state.direction().target(*from) == seat)?;
        state.submission(sender)
    }

    pub fn penalty_totals(&self) -> [u8; 4] {
        let mut totals = [0u8; 4];
        for trick in &self.trick_history {
            if let Some(winner) = trick.winner() {
                let idx = winner.index();
                totals[idx] = totals[idx].saturating_add(trick.penalty_total());
            }
        }
        totals
    }

    pub fn play_card(
        &mut self,
        seat: PlayerPosition,
        card: Card,
    ) -> Result<PlayOutcome, PlayError> {
        if !matches!(self.phase, RoundPhase::Playing) {
            return Err(PlayError::NotInPlayPhase);
        }

        let hand = &self.hands[seat.index()];
        if !hand.contains(card) {
            return Err(PlayError::CardNotInHand(card));
        }

        let expected = self.expected_seat();
        if expected != seat {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        let trick_cards = self.current_trick.cards();
        if !rules::is_card_valid(
            hand.cards(),
            trick_cards,
            card,
            self.trick_number(),
            self.hearts_broken,
        ) {
            return Err(match rules::leading_suit(trick_cards) {
                Some(lead) => PlayError::MustFollowSuit(lead),
                None => PlayError::HeartsNotBroken,
            });
        }

        self.current_trick.play(seat, card)?;
        self.hands[seat.index()].remove(card);
        if card.suit.is_heart() {
            self.hearts_broken = true;
        }
        if card.is_queen_of_spades() {
            self.queen_of_spades_played = true;
        }

        if !self.current_trick.is_complete() {
            return Ok(PlayOutcome::Played);
        }

        let winner = self
            .current_trick
            .winner()
            .unwrap_or(self.current_trick.leader());
        let penalties = self.current_trick.penalty_total();
        let finished = std::mem::replace(&mut self.current_trick, Trick::new(winner));
        let cards = finished.cards().to_vec();
        self.trick_history.push(finished);
        if self.trick_history.len() == HAND_SIZE {
            self.phase = RoundPhase::Finished;
        }

        Ok(PlayOutcome::TrickCompleted {
            winner,
            penalties,
            cards,
        })
    }
}

fn opening_leader(hands: &[Hand; 4]) -> PlayerPosition {
    PlayerPosition::LOOP
        .iter()
        .copied()
        .find(|seat| hands[seat.index()].contains(Card::TWO_OF_CLUBS))
        .unwrap_or(PlayerPosition::North)
}

#[cfg(test)]
mod tests {
    use super::{PassingDirection, PlayError, PlayOutcome, RoundPhase, RoundState};
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::hand::Hand;
    use crate::model::player::PlayerPosition;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn hand(tokens: &[&str]) -> Hand {
        Hand::with_cards(tokens.iter().map(|t| t.parse().unwrap()).collect())
    }

    fn small_round() -> RoundState {
        RoundState::from_hands(
            [
                hand(&["2C", "5H"]),
                hand(&["3C", "QS"]),
                hand(&["9D", "6H"]),
                hand(&["AC", "2H"]),
            ],
            PassingDirection::Hold,
        )
    }

    #[test]
    fn dealing_distributes_thirteen_cards_per_player() {
        let deck = Deck::standard();
        let round = RoundState::deal(&deck, PassingDirection::Left);

        for seat in PlayerPosition::LOOP.iter().copied() {
            assert_eq!(round.hand(seat).len(), 13, "{seat} should have 13 cards");
        }
        assert!(matches!(round.phase(), RoundPhase::Passing(_)));
        assert_eq!(round.trick_history().len(), 0);
    }

    #[test]
    fn leader_follows_two_of_clubs_holder() {
        let deck = Deck::shuffled_with_seed(99);
        let round = RoundState::deal(&deck, PassingDirection::Hold);

        let expected = PlayerPosition::LOOP
            .iter()
            .copied()
            .find(|seat| round.hand(*seat).contains(Card::TWO_OF_CLUBS))
            .expect("two of clubs is dealt");

        assert_eq!(round.current_trick().leader(), expected);
        assert!(matches!(round.phase(), RoundPhase::Playing));
    }

    #[test]
    fn passing_flow_moves_cards_and_enters_play_phase() {
        let deck = Deck::shuffled_with_seed(5);
        let mut round = RoundState::deal(&deck, PassingDirection::Across);

        for seat in PlayerPosition::LOOP.iter().copied() {
            let hand = round.hand(seat);
            let cards = [hand.cards()[0], hand.cards()[1], hand.cards()[2]];
            round.submit_pass(seat, cards).unwrap();
        }

        let state = match round.phase() {
            RoundPhase::Passing(state) => state.clone(),
            other => panic!("expected passing phase, got {other:?}"),
        };
        round.resolve_passes().unwrap();
        assert!(matches!(round.phase(), RoundPhase::Playing));
        for seat in PlayerPosition::LOOP.iter().copied() {
            assert_eq!(round.hand(seat).len(), 13);
            let received = round.received_from_pass(seat, &state).unwrap();
            assert_eq!(received, state.submission(seat.opposite()).unwrap());
        }
        let leader = round.current_trick().leader();
        assert!(round.hand(leader).contains(Card::TWO_OF_CLUBS));
    }

    #[test]
    fn resolving_before_everyone_passed_errors() {
        let deck = Deck::standard();
        let mut round = RoundState::deal(&deck, PassingDirection::Left);
        assert!(round.resolve_passes().is_err());
        assert!(matches!(
            round.play_card(PlayerPosition::North, Card::TWO_OF_CLUBS),
            Err(PlayError::NotInPlayPhase)
        ));
    }

    #[test]
    fn follow_suit_is_required() {
        let mut round = small_round();
        assert_eq!(round.expected_seat(), PlayerPosition::North);
        round
            .play_card(PlayerPosition::North, Card::TWO_OF_CLUBS)
            .unwrap();
        assert_eq!(
            round.play_card(PlayerPosition::East, Card::QUEEN_OF_SPADES),
            Err(PlayError::MustFollowSuit(Suit::Clubs))
        );
        round
            .play_card(PlayerPosition::East, Card::new(Rank::Three, Suit::Clubs))
            .unwrap();
    }

    #[test]
    fn out_of_turn_and_missing_cards_rejected() {
        let mut round = small_round();
        assert!(matches!(
            round.play_card(PlayerPosition::East, Card::new(Rank::Three, Suit::Clubs)),
            Err(PlayError::OutOfTurn { .. })
        ));
        assert_eq!(
            round.play_card(PlayerPosition::North, Card::QUEEN_OF_SPADES),
            Err(PlayError::CardNotInHand(Card::QUEEN_OF_SPADES))
        );
    }

    #[test]
    fn full_round_tracks_penalties_and_flags() {
        let mut round = small_round();
        let plays = [
            (PlayerPosition::North, "2C"),
            (PlayerPosition::East, "3C"),
            (PlayerPosition::South, "6H"),
            (PlayerPosition::West, "AC"),
        ];
        let mut last = PlayOutcome::Played;
        for (seat, token) in plays {
            last = round.play_card(seat, token.parse().unwrap()).unwrap();
        }
        match last {
            PlayOutcome::TrickCompleted {
                winner,
                penalties,
                cards,
            } => {
                assert_eq!(winner, PlayerPosition::West);
                assert_eq!(penalties, 1);
                assert_eq!(cards.len(), 4);
            }
            other => panic!("expected TrickCompleted, got {other:?}"),
        }
        assert!(round.hearts_broken());
        assert_eq!(round.trick_number(), 1);
        assert_eq!(round.expected_seat(), PlayerPosition::West);

        for (seat, token) in [
            (PlayerPosition::West, "2H"),
            (PlayerPosition::North, "5H"),
            (PlayerPosition::East, "QS"),
            (PlayerPosition::South, "9D"),
        ] {
            round.play_card(seat, token.parse().unwrap()).unwrap();
        }
        assert!(round.queen_of_spades_played());
        let totals = round.penalty_totals();
        assert_eq!(totals[PlayerPosition::West.index()], 1);
        assert_eq!(totals[PlayerPosition::North.index()], 15);
        assert_eq!(totals.iter().map(|&p| p as u32).sum::<u32>(), 16);
    }

    #[test]
    fn cannot_lead_hearts_before_broken() {
        let mut round = RoundState::from_hands(
            [
                hand(&["2C", "5H"]),
                hand(&["3C", "4C"]),
                hand(&["5C", "6C"]),
                hand(&["AC", "2H"]),
            ],
            PassingDirection::Hold,
        );
        for (seat, token) in [
            (PlayerPosition::North, "2C"),
            (PlayerPosition::East, "3C"),
            (PlayerPosition::South, "5C"),
            (PlayerPosition::West, "AC"),
        ] {
            round.play_card(seat, token.parse().unwrap()).unwrap();
        }
        assert!(!round.hearts_broken());
        // West holds only hearts now, so leading one is allowed.
        round
            .play_card(PlayerPosition::West, Card::new(Rank::Two, Suit::Hearts))
            .unwrap();

        let mut blocked = RoundState::from_hands(
            [
                hand(&["2C", "5H", "7D"]),
                hand(&["3C"]),
                hand(&["4C"]),
                hand(&["5C"]),
            ],
            PassingDirection::Hold,
        );
        assert_eq!(
            blocked.play_card(PlayerPosition::North, Card::new(Rank::Five, Suit::Hearts)),
            Err(PlayError::HeartsNotBroken)
        );
    }
}
