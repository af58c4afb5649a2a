use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use hearts_players::{Action, GameEvent, Session, SessionError, StrategyKind, UnknownStrategy};
use hearts_rules::model::deck::Deck;
use hearts_rules::model::passing::{PassingDirection, PassingError};
use hearts_rules::model::player::PlayerPosition;
use hearts_rules::model::round::{PlayError, PlayOutcome, RoundPhase, RoundState};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{ArenaConfig, ResolvedOutputs};

/// Plays seeded hands between four fixed seats.
pub struct ArenaRunner {
    config: ArenaConfig,
    outputs: ResolvedOutputs,
    seats: Vec<SeatBlueprint>,
}

struct SeatBlueprint {
    name: String,
    kind: StrategyKind,
    narrate: bool,
}

/// Summary details returned after a run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub hands_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub agents: Vec<AgentSummary>,
}

/// Points taken by one seat across the run. Lower is better.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSummary {
    pub name: String,
    pub strategy: StrategyKind,
    pub total_points: u32,
    pub average_points: f64,
}

struct HandOutcome {
    passing: PassingDirection,
    points: [u8; 4],
}

#[derive(Debug, Serialize)]
struct DealLogRow<'a> {
    run_id: &'a str,
    deal_id: String,
    hand_index: usize,
    deal_seed: u64,
    passing: &'static str,
    seat: &'static str,
    agent: &'a str,
    strategy: &'static str,
    points: u8,
}

impl ArenaRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: ArenaConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.seats.len() != PlayerPosition::LOOP.len() {
            return Err(RunnerError::SeatCount {
                found: config.seats.len(),
            });
        }

        let seats = config
            .seats
            .iter()
            .map(|seat| -> Result<SeatBlueprint, RunnerError> {
                Ok(SeatBlueprint {
                    name: seat.name.clone(),
                    kind: seat.strategy_kind()?,
                    narrate: seat.narrate,
                })
            })
            .collect::<Result<Vec<_>, RunnerError>>()?;

        Ok(Self {
            config,
            outputs,
            seats,
        })
    }

    /// Execute every hand, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.deals.seed.unwrap_or(0));
        let mut totals = [0u32; 4];
        let mut rows_written = 0usize;

        for hand_index in 0..self.config.deals.hands {
            let deal_seed = rng.next_u64();
            let passing = if self.config.deals.rotate_passing {
                PassingDirection::for_hand(hand_index)
            } else {
                PassingDirection::Left
            };

            let outcome = self.play_hand(deal_seed, passing)?;
            for (total, points) in totals.iter_mut().zip(outcome.points) {
                *total += u32::from(points);
            }
            rows_written += self.write_hand_rows(&mut writer, hand_index, deal_seed, &outcome)?;

            if tracing::enabled!(Level::INFO) {
                event!(
                    target: "hearts_arena::hand",
                    Level::INFO,
                    run_id = %self.config.run_id,
                    hand_index = hand_index as u32,
                    deal_seed,
                    passing = outcome.passing.as_str(),
                    points = ?outcome.points,
                );
            }
        }

        writer.flush()?;

        let hands = self.config.deals.hands;
        let agents = self
            .seats
            .iter()
            .zip(totals)
            .map(|(seat, total_points)| AgentSummary {
                name: seat.name.clone(),
                strategy: seat.kind,
                total_points,
                average_points: f64::from(total_points) / hands as f64,
            })
            .collect();

        Ok(RunSummary {
            hands_played: hands,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            agents,
        })
    }

    fn play_hand(
        &self,
        deal_seed: u64,
        passing: PassingDirection,
    ) -> Result<HandOutcome, RunnerError> {
        let deck = Deck::shuffled_with_seed(deal_seed);
        let mut round = RoundState::deal(&deck, passing);
        let mut sessions: Vec<Session> = self
            .seats
            .iter()
            .map(|seat| Session::new(seat.kind.spawn(seat.narrate)))
            .collect();

        for seat in PlayerPosition::LOOP {
            let cards = round.hand(seat).cards().to_vec();
            ask(&mut sessions, seat, GameEvent::NewHand { cards })?;
        }

        if passing.requires_selection() {
            for seat in PlayerPosition::LOOP {
                let Some(Action::Pass(cards)) = ask(&mut sessions, seat, GameEvent::PassRequested)?
                else {
                    return Err(RunnerError::game(format!("{seat} did not answer with a pass")));
                };
                round.submit_pass(seat, cards)?;
            }

            let RoundPhase::Passing(state) = round.phase().clone() else {
                return Err(RunnerError::game("round left the passing phase early".into()));
            };
            round.resolve_passes()?;

            for seat in PlayerPosition::LOOP {
                let cards = round
                    .received_from_pass(seat, &state)
                    .ok_or_else(|| RunnerError::game(format!("no pass reached {seat}")))?;
                ask(&mut sessions, seat, GameEvent::CardsReceived { cards })?;
            }
        }

        for seat in PlayerPosition::LOOP {
            if sessions[seat.index()].hand() != round.hand(seat) {
                return Err(RunnerError::game(format!("{seat} lost track of its hand")));
            }
        }

        while !round.is_finished() {
            let seat = round.expected_seat();
            let trick = round.current_trick().cards().to_vec();
            let Some(Action::Play(card)) = ask(&mut sessions, seat, GameEvent::PlayRequested { trick })?
            else {
                return Err(RunnerError::game(format!("{seat} did not answer with a card")));
            };

            if let PlayOutcome::TrickCompleted {
                winner,
                penalties,
                cards,
            } = round.play_card(seat, card)?
            {
                event!(
                    target: "hearts_arena::trick",
                    Level::DEBUG,
                    trick_nr = (round.trick_number() - 1) as u32,
                    winner = winner.label(),
                    penalties,
                );
                for listener in PlayerPosition::LOOP {
                    let completed = GameEvent::TrickCompleted {
                        cards: cards.clone(),
                    };
                    ask(&mut sessions, listener, completed)?;
                }
            }
        }

        Ok(HandOutcome {
            passing,
            points: round.penalty_totals(),
        })
    }

    fn write_hand_rows(
        &self,
        writer: &mut BufWriter<File>,
        hand_index: usize,
        deal_seed: u64,
        outcome: &HandOutcome,
    ) -> Result<usize, RunnerError> {
        let deal_id = format!("H{hand_index:05}");
        let mut rows_written = 0usize;
        for (seat, blueprint) in PlayerPosition::LOOP.into_iter().zip(&self.seats) {
            let row = DealLogRow {
                run_id: &self.config.run_id,
                deal_id: deal_id.clone(),
                hand_index,
                deal_seed,
                passing: outcome.passing.as_str(),
                seat: seat.label(),
                agent: &blueprint.name,
                strategy: blueprint.kind.as_str(),
                points: outcome.points[seat.index()],
            };
            serde_json::to_writer(&mut *writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;
        }
        Ok(rows_written)
    }
}

fn ask(
    sessions: &mut [Session],
    seat: PlayerPosition,
    game_event: GameEvent,
) -> Result<Option<Action>, RunnerError> {
    sessions[seat.index()]
        .handle(game_event)
        .map_err(|source| RunnerError::Session { seat, source })
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("configuration requires exactly 4 seats but found {found}")]
    SeatCount { found: usize },
    #[error(transparent)]
    Strategy(#[from] UnknownStrategy),
    #[error("{seat} failed: {source}")]
    Session {
        seat: PlayerPosition,
        #[source]
        source: SessionError,
    },
    #[error("pass rejected: {0}")]
    Pass(#[from] PassingError),
    #[error("play rejected: {0}")]
    Play(#[from] PlayError),
    #[error("game execution failed: {message}")]
    Game { message: String },
}

impl RunnerError {
    fn game(message: String) -> Self {
        RunnerError::Game { message }
    }
}
