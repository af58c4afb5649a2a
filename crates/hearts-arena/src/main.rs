use std::path::PathBuf;

use clap::Parser;

use hearts_arena::config::{ArenaConfig, ResolvedOutputs};
use hearts_arena::logging::init_logging;
use hearts_arena::runner::ArenaRunner;

/// Seeded Hearts hands between four configured strategies.
#[derive(Debug, Parser)]
#[command(
    name = "hearts-arena",
    author,
    version,
    about = "Deterministic Hearts arena for the built-in strategies"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "arena/arena.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of hands to play.
    #[arg(long, value_name = "HANDS")]
    hands: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no hands are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ArenaConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(hands) = cli.hands {
        config.deals.hands = hands;
    }

    if let Some(seed) = cli.seed {
        config.deals.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let hands = config.deals.hands;
    let seating = config
        .seats
        .iter()
        .map(|seat| format!("{} ({})", seat.name, seat.kind))
        .collect::<Vec<_>>()
        .join(", ");

    println!("Loaded configuration '{run_id}' ({hands} hands): {seating}");

    let runner = ArenaRunner::new(config.clone(), outputs.clone())?;

    if cli.validate_only {
        println!("Validation-only mode: no hands played.");
        return Ok(());
    }

    let logging_guard = init_logging(&config.logging, &outputs)?;
    let summary = runner.run()?;
    println!(
        "Arena complete for '{run_id}': {} hands → {} rows at {}",
        summary.hands_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    for agent in &summary.agents {
        println!(
            "  {:<16} {:<10} {:>6} points  {:>6.2} per hand",
            agent.name,
            agent.strategy.as_str(),
            agent.total_points,
            agent.average_points
        );
    }
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
