//! Kingdom queries used by the outcome evaluator
//!
//! The host simulation owns kingdoms, towns and heroes. The evaluator only
//! asks narrow questions through [`KingdomQuery`] and resolves names for
//! outcome messages through [`WorldLookup`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::condition::ConditionFlags;
use crate::scenario::MapPosition;

/// Per-color predicates over the host's kingdoms
pub trait KingdomQuery {
    /// Kingdom still participates in the scenario
    fn is_active(&self, color: Color) -> bool;

    fn is_human_controlled(&self, color: Color) -> bool;

    /// Kingdom still owns towns or heroes
    fn is_in_play(&self, color: Color) -> bool;

    /// Met victory condition, or `COND_NONE`
    fn check_win_condition(&self, color: Color) -> ConditionFlags;

    /// Met loss condition, or `COND_NONE`
    fn check_loss_condition(&self, color: Color) -> ConditionFlags;

    fn has_castles(&self, color: Color) -> bool;

    /// Days left before a kingdom without towns is vanquished
    fn lost_town_grace_days_remaining(&self, color: Color) -> u32;
}

/// Town as seen by message formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TownInfo {
    pub name: String,
    pub is_castle: bool,
}

/// Name lookups for victory/defeat texts; absence is never an error
pub trait WorldLookup {
    fn town_at(&self, position: MapPosition) -> Option<TownInfo>;

    /// Hero whose defeat wins the scenario
    fn victory_hero_name(&self) -> Option<String>;

    /// Hero whose loss loses the scenario
    fn loss_hero_name(&self) -> Option<String>;

    fn artifact_name(&self, id: u32) -> Option<String>;
}

/// Observable state of one kingdom at a turn boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KingdomSnapshot {
    pub color: Color,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub human: bool,
    #[serde(default = "default_true")]
    pub in_play: bool,
    #[serde(default)]
    pub wins: ConditionFlags,
    #[serde(default)]
    pub loss: ConditionFlags,
    #[serde(default = "default_true")]
    pub has_castles: bool,
    #[serde(default)]
    pub lost_town_days: u32,
}

fn default_true() -> bool {
    true
}

impl KingdomSnapshot {
    /// A kingdom in play with a castle and nothing met yet
    pub fn new(color: Color, human: bool) -> Self {
        Self {
            color,
            active: true,
            human,
            in_play: true,
            wins: ConditionFlags::COND_NONE,
            loss: ConditionFlags::COND_NONE,
            has_castles: true,
            lost_town_days: 0,
        }
    }

    /// Kingdom that lost everything
    pub fn vanquished(mut self) -> Self {
        self.active = false;
        self.in_play = false;
        self.has_castles = false;
        self
    }
}

/// Names known to the data layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldNames {
    #[serde(default)]
    pub towns: Vec<(MapPosition, TownInfo)>,
    #[serde(default)]
    pub victory_hero: Option<String>,
    #[serde(default)]
    pub loss_hero: Option<String>,
    #[serde(default)]
    pub artifacts: HashMap<u32, String>,
}

/// In-memory kingdom state, keyed by color
///
/// Snapshot conditions are reported only if the scenario is configured with
/// them. Without [`KingdomTable::with_conditions`] every condition counts.
#[derive(Debug, Clone)]
pub struct KingdomTable {
    kingdoms: HashMap<Color, KingdomSnapshot>,
    names: WorldNames,
    wins: ConditionFlags,
    loss: ConditionFlags,
}

impl Default for KingdomTable {
    fn default() -> Self {
        Self::new(WorldNames::default())
    }
}

impl KingdomTable {
    pub fn new(names: WorldNames) -> Self {
        Self {
            kingdoms: HashMap::new(),
            names,
            wins: ConditionFlags::WINS,
            loss: ConditionFlags::LOSS,
        }
    }

    /// Restrict reported conditions to the scenario's `WINS`/`LOSS` setup
    pub fn with_conditions(mut self, wins: ConditionFlags, loss: ConditionFlags) -> Self {
        self.wins = wins & ConditionFlags::WINS;
        self.loss = (loss & ConditionFlags::LOSS) | enemy_wins_for(self.wins);
        self
    }

    /// Insert or replace a kingdom's snapshot
    pub fn update(&mut self, snapshot: KingdomSnapshot) {
        self.kingdoms.insert(snapshot.color, snapshot);
    }

    pub fn get(&self, color: Color) -> Option<&KingdomSnapshot> {
        self.kingdoms.get(&color)
    }

    pub fn get_mut(&mut self, color: Color) -> Option<&mut KingdomSnapshot> {
        self.kingdoms.get_mut(&color)
    }

    pub fn names(&self) -> &WorldNames {
        &self.names
    }
}

impl FromIterator<KingdomSnapshot> for KingdomTable {
    fn from_iter<I: IntoIterator<Item = KingdomSnapshot>>(iter: I) -> Self {
        let mut table = KingdomTable::default();
        for snapshot in iter {
            table.update(snapshot);
        }
        table
    }
}

/// Opponent-victory losses that follow from the configured victories
fn enemy_wins_for(wins: ConditionFlags) -> ConditionFlags {
    [
        (ConditionFlags::WINS_TOWN, ConditionFlags::LOSS_ENEMY_WINS_TOWN),
        (ConditionFlags::WINS_HERO, ConditionFlags::LOSS_ENEMY_WINS_HERO),
        (ConditionFlags::WINS_ARTIFACT, ConditionFlags::LOSS_ENEMY_WINS_ARTIFACT),
        (ConditionFlags::WINS_GOLD, ConditionFlags::LOSS_ENEMY_WINS_GOLD),
    ]
    .into_iter()
    .filter(|(win, _)| wins.contains(*win))
    .fold(ConditionFlags::COND_NONE, |acc, (_, loss)| acc | loss)
}

// Unknown colors behave like an empty slot
impl KingdomQuery for KingdomTable {
    fn is_active(&self, color: Color) -> bool {
        self.get(color).is_some_and(|k| k.active)
    }

    fn is_human_controlled(&self, color: Color) -> bool {
        self.get(color).is_some_and(|k| k.human)
    }

    fn is_in_play(&self, color: Color) -> bool {
        self.get(color).is_some_and(|k| k.in_play)
    }

    fn check_win_condition(&self, color: Color) -> ConditionFlags {
        self.get(color).map_or(ConditionFlags::COND_NONE, |k| k.wins & self.wins)
    }

    fn check_loss_condition(&self, color: Color) -> ConditionFlags {
        self.get(color).map_or(ConditionFlags::COND_NONE, |k| k.loss & self.loss)
    }

    fn has_castles(&self, color: Color) -> bool {
        self.get(color).is_some_and(|k| k.has_castles)
    }

    fn lost_town_grace_days_remaining(&self, color: Color) -> u32 {
        self.get(color).map_or(0, |k| k.lost_town_days)
    }
}

impl WorldLookup for KingdomTable {
    fn town_at(&self, position: MapPosition) -> Option<TownInfo> {
        self.names
            .towns
            .iter()
            .find(|(pos, _)| *pos == position)
            .map(|(_, town)| town.clone())
    }

    fn victory_hero_name(&self) -> Option<String> {
        self.names.victory_hero.clone()
    }

    fn loss_hero_name(&self) -> Option<String> {
        self.names.loss_hero.clone()
    }

    fn artifact_name(&self, id: u32) -> Option<String> {
        self.names.artifacts.get(&id).cloned()
    }
}
