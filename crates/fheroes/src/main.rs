//! Headless scenario replay
//!
//! Feeds a scripted sequence of turns to the outcome evaluator and reports
//! which mode the game would switch to.

mod replay;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use fh_core::{LoggingSink, ScenarioOutcomeEvaluator, ScenarioSettings};

use crate::replay::{ReplayScript, run_replay};

#[derive(Parser, Debug)]
#[command(name = "fheroes", about = "Replay a scripted scenario through the outcome rules")]
struct Args {
    /// Scenario settings file (rc format); defaults to "defeat all enemies"
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Turn script (JSON)
    #[arg(long)]
    script: PathBuf,

    /// Answer "yes" when offered to continue after a victory
    #[arg(long)]
    keep_playing: bool,

    /// Write the final outcome state to this file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Write the final outcome state to a named slot in the data directory
    #[arg(long, conflicts_with = "save")]
    slot: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .format_timestamp(None)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings = match &args.scenario {
        Some(path) => ScenarioSettings::load_from_file(path)?,
        None => ScenarioSettings::default(),
    };
    let script = ReplayScript::load(&args.script)?;

    let mut evaluator = ScenarioOutcomeEvaluator::new();
    let mut sink = LoggingSink {
        continue_after_victory: args.keep_playing,
    };

    let report = run_replay(&script, &settings, &mut evaluator, &mut sink);
    log::info!(
        "turn {}: {} (result {:?})",
        report.turn,
        report.transition,
        evaluator.result()
    );
    println!("{}", report.transition);

    let save_path = match (&args.save, &args.slot) {
        (Some(path), _) => Some(path.clone()),
        (None, Some(slot)) => Some(fh_save::default_save_path(slot)?),
        (None, None) => None,
    };
    if let Some(path) = save_path {
        fh_save::save_outcome(evaluator.state(), report.turn, &path)?;
        log::info!("outcome state saved to {}", path.display());
    }

    Ok(())
}
