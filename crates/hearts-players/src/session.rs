//! One seat's view of a hand, driven by events from whatever runs the table.

use crate::error::InvariantViolation;
use crate::strategy::{Strategy, StrategyKind, TurnContext};
use hearts_rules::model::hand::Hand;
use hearts_rules::{Card, CardList, is_card_valid};
use thiserror::Error;
use tracing::{Level, event};

const TRICK_SIZE: usize = 4;

/// What the table tells a seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh hand was dealt; any previous state is discarded.
    NewHand { cards: Vec<Card> },
    PassRequested,
    CardsReceived { cards: [Card; 3] },
    /// It is this seat's turn; `trick` holds the cards already played.
    PlayRequested { trick: Vec<Card> },
    TrickCompleted { cards: Vec<Card> },
}

/// What a seat answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Pass([Card; 3]),
    Play(Card),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Strategy(#[from] InvariantViolation),
    #[error("{0} is not in the seat's hand")]
    CardNotInHand(Card),
    #[error("{0} is already in the seat's hand")]
    DuplicateCard(Card),
    #[error("{card} may not be played onto {}", CardList(.trick))]
    IllegalPlay { card: Card, trick: Vec<Card> },
    #[error("a trick cannot hold {len} cards here")]
    InvalidTrick { len: usize },
}

/// Tracks the hand and trick flags for one strategy and checks every card it
/// chooses before answering.
pub struct Session {
    strategy: Box<dyn Strategy>,
    hand: Hand,
    trick_nr: usize,
    hearts_broken: bool,
    queen_of_spades_played: bool,
}

impl Session {
    pub fn new(strategy: Box<dyn Strategy>) -> Self {
        Self {
            strategy,
            hand: Hand::new(),
            trick_nr: 0,
            hearts_broken: false,
            queen_of_spades_played: false,
        }
    }

    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn turn_context(&self) -> TurnContext {
        TurnContext::new(self.trick_nr, self.hearts_broken)
            .with_queen_of_spades_played(self.queen_of_spades_played)
    }

    pub fn handle(&mut self, game_event: GameEvent) -> Result<Option<Action>, SessionError> {
        match game_event {
            GameEvent::NewHand { cards } => {
                self.hand = Hand::new();
                self.trick_nr = 0;
                self.hearts_broken = false;
                self.queen_of_spades_played = false;
                self.receive(&cards)?;
                Ok(None)
            }
            GameEvent::PassRequested => {
                let selection = self.strategy.pass_cards(self.hand.cards())?;
                for (idx, card) in selection.iter().enumerate() {
                    if selection[..idx].contains(card) {
                        return Err(SessionError::DuplicateCard(*card));
                    }
                    if !self.hand.contains(*card) {
                        return Err(SessionError::CardNotInHand(*card));
                    }
                }
                for card in selection {
                    self.hand.remove(card);
                }
                event!(
                    target: "hearts_players::session",
                    Level::DEBUG,
                    strategy = self.kind().as_str(),
                    passed = %CardList(&selection),
                );
                Ok(Some(Action::Pass(selection)))
            }
            GameEvent::CardsReceived { cards } => {
                self.receive(&cards)?;
                Ok(None)
            }
            GameEvent::PlayRequested { trick } => {
                if trick.len() >= TRICK_SIZE {
                    return Err(SessionError::InvalidTrick { len: trick.len() });
                }
                let turn = self.turn_context();
                let card = self.strategy.play_card(self.hand.cards(), &trick, turn)?;
                if !is_card_valid(self.hand.cards(), &trick, card, turn.trick_nr, turn.hearts_broken) {
                    return Err(SessionError::IllegalPlay { card, trick });
                }
                self.hand.remove(card);
                event!(
                    target: "hearts_players::session",
                    Level::DEBUG,
                    strategy = self.kind().as_str(),
                    trick_nr = turn.trick_nr,
                    played = %card,
                );
                Ok(Some(Action::Play(card)))
            }
            GameEvent::TrickCompleted { cards } => {
                if cards.len() != TRICK_SIZE {
                    return Err(SessionError::InvalidTrick { len: cards.len() });
                }
                self.hearts_broken |= cards.iter().any(|card| card.suit.is_heart());
                self.queen_of_spades_played |= cards.iter().any(|card| card.is_queen_of_spades());
                self.strategy.see_played_trick(&cards, self.trick_nr);
                self.trick_nr += 1;
                Ok(None)
            }
        }
    }

    fn receive(&mut self, cards: &[Card]) -> Result<(), SessionError> {
        for &card in cards {
            if !self.hand.add(card) {
                return Err(SessionError::DuplicateCard(card));
            }
        }
        Ok(())
    }
}
