pub mod error;
pub mod narrator;
pub mod session;
pub mod strategy;

pub use error::InvariantViolation;
pub use narrator::{Narrator, Silent, TracingNarrator};
pub use session::{Action, GameEvent, Session, SessionError};
pub use strategy::{
    AdvancedStrategy, HeuristicStrategy, NaiveStrategy, Strategy, StrategyKind, TurnContext,
    UnknownStrategy, undesirability,
};
