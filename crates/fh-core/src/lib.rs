//! fh-core: scenario outcome rules for the Free Heroes 2 engine remake
//!
//! This crate decides when a scenario ends and for whom. It has no I/O
//! dependencies: kingdoms are queried through [`KingdomQuery`] and
//! [`WorldLookup`], and everything shown to the player goes through
//! [`PresentationSink`].

pub mod color;
pub mod condition;
pub mod kingdom;
pub mod message;
pub mod outcome;
pub mod presentation;
pub mod scenario;
pub mod stream;

pub use color::{Color, ColorSet};
pub use condition::ConditionFlags;
pub use kingdom::{KingdomQuery, KingdomSnapshot, KingdomTable, TownInfo, WorldLookup, WorldNames};
pub use message::OutcomeMessage;
pub use outcome::{EvaluationState, GameTransition, ScenarioOutcomeEvaluator};
pub use presentation::{LoggingSink, Notification, PresentationSink, RecordingSink};
pub use scenario::{
    ArtifactTarget, CampaignVictory, MapPosition, ScenarioContext, ScenarioError, ScenarioSettings,
};
pub use stream::{StreamError, StreamReader, StreamWriter};
