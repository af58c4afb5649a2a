mod advanced;
mod heuristic;
mod naive;

pub use advanced::AdvancedStrategy;
pub use heuristic::{HeuristicStrategy, undesirability};
pub use naive::NaiveStrategy;

use crate::error::InvariantViolation;
use crate::narrator::TracingNarrator;
use hearts_rules::{Card, CardList};
use std::fmt;
use std::str::FromStr;
use tracing::{Level, event};

/// Per-decision game state that is not carried by the hand or the trick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnContext {
    /// Zero-based trick index, 0..=12.
    pub trick_nr: usize,
    pub hearts_broken: bool,
    pub queen_of_spades_played: bool,
}

impl TurnContext {
    pub const fn new(trick_nr: usize, hearts_broken: bool) -> Self {
        Self {
            trick_nr,
            hearts_broken,
            queen_of_spades_played: false,
        }
    }

    pub const fn with_queen_of_spades_played(mut self, played: bool) -> Self {
        self.queen_of_spades_played = played;
        self
    }
}

/// Card selection for one seat.
///
/// `pass_cards` returns three distinct cards of `hand`. `play_card` returns a
/// card of `hand` that [`hearts_rules::is_card_valid`] accepts for `trick`.
/// Both are deterministic for identical inputs.
pub trait Strategy: Send {
    fn kind(&self) -> StrategyKind;

    fn pass_cards(&mut self, hand: &[Card]) -> Result<[Card; 3], InvariantViolation>;

    fn play_card(
        &mut self,
        hand: &[Card],
        trick: &[Card],
        turn: TurnContext,
    ) -> Result<Card, InvariantViolation>;

    /// Called with all four cards once a trick is complete.
    fn see_played_trick(&mut self, _trick: &[Card], _trick_nr: usize) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrategyKind {
    Naive,
    #[default]
    Heuristic,
    Advanced,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Naive,
        StrategyKind::Heuristic,
        StrategyKind::Advanced,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Naive => "naive",
            StrategyKind::Heuristic => "heuristic",
            StrategyKind::Advanced => "advanced",
        }
    }

    /// Reads `HEARTS_STRATEGY`, falling back to the default tier.
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        read("HEARTS_STRATEGY")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    /// Builds a fresh strategy of this tier. With `narrate` the scoring tiers
    /// report their reasoning through [`TracingNarrator`].
    pub fn spawn(self, narrate: bool) -> Box<dyn Strategy> {
        match (self, narrate) {
            (StrategyKind::Naive, _) => Box::new(NaiveStrategy),
            (StrategyKind::Heuristic, false) => Box::new(HeuristicStrategy::new()),
            (StrategyKind::Heuristic, true) => {
                Box::new(HeuristicStrategy::with_narrator(TracingNarrator))
            }
            (StrategyKind::Advanced, false) => Box::new(AdvancedStrategy::new()),
            (StrategyKind::Advanced, true) => {
                Box::new(AdvancedStrategy::with_narrator(TracingNarrator))
            }
        }
    }
}

impl FromStr for StrategyKind {
    type Err = UnknownStrategy;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "naive" | "stupid" => Ok(StrategyKind::Naive),
            "heuristic" | "simple" => Ok(StrategyKind::Heuristic),
            "advanced" | "expert" => Ok(StrategyKind::Advanced),
            _ => Err(UnknownStrategy(raw.to_string())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy '{0}' (expected naive, heuristic or advanced)")]
pub struct UnknownStrategy(pub String);

fn log_pass_decision(kind: StrategyKind, hand: &[Card], selection: &[Card; 3]) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    event!(
        target: "hearts_players::pass",
        Level::INFO,
        strategy = kind.as_str(),
        hand_size = hand.len(),
        cards = %CardList(selection),
    );
}

fn log_play_decision(kind: StrategyKind, hand: &[Card], trick: &[Card], turn: TurnContext, chosen: Card) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    event!(
        target: "hearts_players::play",
        Level::INFO,
        strategy = kind.as_str(),
        hand_size = hand.len(),
        trick = %CardList(trick),
        trick_nr = turn.trick_nr,
        hearts_broken = turn.hearts_broken,
        queen_of_spades_played = turn.queen_of_spades_played,
        chosen = %chosen,
    );
}
