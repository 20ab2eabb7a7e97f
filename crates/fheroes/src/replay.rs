//! Scripted scenario replay
//!
//! A script lists the roster and, for each turn, the kingdom snapshots that
//! changed. Every turn is applied to a [`KingdomTable`] and the outcome
//! evaluator runs once, as the host would at the turn boundary.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fh_core::{
    Color, ColorSet, GameTransition, KingdomSnapshot, KingdomTable, PresentationSink,
    ScenarioContext, ScenarioOutcomeEvaluator, ScenarioSettings, WorldNames,
};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("could not read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("script has no turns")]
    NoTurns,

    #[error("human color {0} is not in the roster")]
    HumanNotInRoster(Color),
}

/// One turn boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptTurn {
    /// Player whose turn just ended
    pub current: Color,
    /// Kingdoms that changed since the previous turn
    #[serde(default)]
    pub kingdoms: Vec<KingdomSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    pub colors: Vec<Color>,
    pub human_colors: Vec<Color>,
    #[serde(default)]
    pub names: WorldNames,
    pub turns: Vec<ScriptTurn>,
}

impl ReplayScript {
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ReplayError> {
        let script: ReplayScript = serde_json::from_str(contents)?;
        if script.turns.is_empty() {
            return Err(ReplayError::NoTurns);
        }
        let roster = script.roster();
        if let Some(color) = script.human_colors.iter().find(|c| !roster.contains(**c)) {
            return Err(ReplayError::HumanNotInRoster(*color));
        }
        Ok(script)
    }

    pub fn roster(&self) -> ColorSet {
        self.colors.iter().copied().collect()
    }

    pub fn humans(&self) -> ColorSet {
        self.human_colors.iter().copied().collect()
    }
}

/// How a replay ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    /// 1-based turn of the last evaluation
    pub turn: u32,
    pub transition: GameTransition,
}

/// Run the script until the evaluator asks to leave the scenario
pub fn run_replay<P: PresentationSink>(
    script: &ReplayScript,
    settings: &ScenarioSettings,
    evaluator: &mut ScenarioOutcomeEvaluator,
    sink: &mut P,
) -> ReplayReport {
    let humans = script.humans();
    let mut world =
        KingdomTable::new(script.names.clone()).with_conditions(settings.wins, settings.loss);
    for color in script.colors.iter().copied() {
        world.update(KingdomSnapshot::new(color, humans.contains(color)));
    }

    evaluator.reset(script.roster());

    let mut report = ReplayReport {
        turn: 0,
        transition: GameTransition::Cancel,
    };

    for (index, turn) in script.turns.iter().enumerate() {
        for snapshot in &turn.kingdoms {
            world.update(snapshot.clone());
        }

        let ctx = ScenarioContext::new(settings.clone(), humans, turn.current);
        report.turn = index as u32 + 1;
        report.transition = evaluator.evaluate(&world, &ctx, sink);
        log::debug!("turn {}: {}", report.turn, report.transition);

        if report.transition != GameTransition::Cancel {
            break;
        }
    }

    report
}
