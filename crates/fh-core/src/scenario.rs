//! Scenario configuration (victory/loss setup and host options)
//!
//! Settings are read from a line-oriented rc file, e.g.
//!
//! ```text
//! # Dragon hunt
//! WINS=town,all
//! LOSS=time
//! WINS_TOWN=12,40
//! LOSS_DAYS=84
//! OPTIONS=continue_after_victory
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::color::{Color, ColorSet};
use crate::condition::ConditionFlags;

/// Errors while reading scenario settings
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("could not read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    #[error("unknown condition '{keyword}' in {key}")]
    UnknownCondition { key: String, keyword: String },

    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("missing value for {0}")]
    MissingValue(String),
}

/// Tile coordinate on the adventure map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MapPosition {
    pub x: i32,
    pub y: i32,
}

impl MapPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Artifact the victory condition asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArtifactTarget {
    /// The map's buried ultimate artifact
    #[default]
    Ultimate,
    /// A specific artifact by id
    Specific(u32),
}

/// Victory kind of the current campaign scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignVictory {
    Standard,
    CaptureDragonCity,
}

/// Static per-scenario configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSettings {
    /// Configured victory conditions
    pub wins: ConditionFlags,
    /// Configured loss conditions
    pub loss: ConditionFlags,

    pub wins_town: Option<MapPosition>,
    pub wins_artifact: ArtifactTarget,
    pub wins_gold: u32,

    pub loss_town: Option<MapPosition>,
    /// Day count (1-based) by which the scenario must be won
    pub loss_days: u32,

    /// Set when this scenario is a campaign stage
    pub campaign: Option<CampaignVictory>,

    /// Host option: offer to keep playing after a single-player victory
    pub continue_after_victory: bool,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            wins: ConditionFlags::WINS_ALL,
            loss: ConditionFlags::LOSS_ALL,
            wins_town: None,
            wins_artifact: ArtifactTarget::Ultimate,
            wins_gold: 0,
            loss_town: None,
            loss_days: 0,
            campaign: None,
            continue_after_victory: false,
        }
    }
}

impl ScenarioSettings {
    /// Load settings from a file
    pub fn load_from_file(path: &Path) -> Result<Self, ScenarioError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_config(&contents)
    }

    /// Parse settings from an rc-format string
    pub fn parse_config(contents: &str) -> Result<Self, ScenarioError> {
        let mut settings = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ScenarioError::MissingValue(line.to_string()));
            };
            settings.set(key.trim(), value.trim())?;
        }

        Ok(settings)
    }

    pub fn is_campaign(&self) -> bool {
        self.campaign.is_some()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ScenarioError> {
        if value.is_empty() {
            return Err(ScenarioError::MissingValue(key.to_string()));
        }

        match key {
            "WINS" => self.wins = parse_conditions(key, value, true)?,
            "LOSS" => self.loss = parse_conditions(key, value, false)?,
            "WINS_TOWN" => self.wins_town = Some(parse_position(key, value)?),
            "LOSS_TOWN" => self.loss_town = Some(parse_position(key, value)?),
            "WINS_ARTIFACT" => {
                self.wins_artifact = if value.eq_ignore_ascii_case("ultimate") {
                    ArtifactTarget::Ultimate
                } else {
                    ArtifactTarget::Specific(parse_number(key, value)?)
                };
            }
            "WINS_GOLD" => self.wins_gold = parse_number(key, value)?,
            "LOSS_DAYS" => self.loss_days = parse_number(key, value)?,
            "CAMPAIGN" => {
                self.campaign = match value.to_lowercase().as_str() {
                    "none" | "no" => None,
                    "standard" => Some(CampaignVictory::Standard),
                    "dragon_city" => Some(CampaignVictory::CaptureDragonCity),
                    _ => return Err(invalid(key, value)),
                };
            }
            "OPTIONS" => {
                for opt in value.split(',') {
                    self.set_option(opt.trim())?;
                }
            }
            _ => return Err(ScenarioError::UnknownSetting(key.to_string())),
        }
        Ok(())
    }

    fn set_option(&mut self, opt: &str) -> Result<(), ScenarioError> {
        // Handle negation
        let (enabled, name) = match opt.strip_prefix('!') {
            Some(name) => (false, name),
            None => (true, opt),
        };

        match name {
            "continue_after_victory" => self.continue_after_victory = enabled,
            _ => return Err(ScenarioError::UnknownSetting(name.to_string())),
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> ScenarioError {
    ScenarioError::InvalidValue(key.to_string(), value.to_string())
}

fn parse_number(key: &str, value: &str) -> Result<u32, ScenarioError> {
    value.parse().map_err(|_| invalid(key, value))
}

fn parse_position(key: &str, value: &str) -> Result<MapPosition, ScenarioError> {
    let (x, y) = value.split_once(',').ok_or_else(|| invalid(key, value))?;
    let x = x.trim().parse().map_err(|_| invalid(key, value))?;
    let y = y.trim().parse().map_err(|_| invalid(key, value))?;
    Ok(MapPosition::new(x, y))
}

fn parse_conditions(key: &str, value: &str, win: bool) -> Result<ConditionFlags, ScenarioError> {
    let mut flags = ConditionFlags::COND_NONE;
    for keyword in value.split(',').map(str::trim) {
        let flag = ConditionFlags::from_keyword(win, &keyword.to_lowercase()).ok_or_else(|| {
            ScenarioError::UnknownCondition {
                key: key.to_string(),
                keyword: keyword.to_string(),
            }
        })?;
        flags |= flag;
    }
    Ok(flags)
}

/// Everything the outcome evaluator reads from the running scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioContext {
    pub settings: ScenarioSettings,
    /// Human-controlled slots of the original roster
    pub human_colors: ColorSet,
    /// Kingdom whose turn it is
    pub current_color: Color,
}

impl ScenarioContext {
    pub fn new(settings: ScenarioSettings, human_colors: ColorSet, current_color: Color) -> Self {
        Self {
            settings,
            human_colors,
            current_color,
        }
    }

    /// Exactly one human slot in the roster
    pub fn is_single_player(&self) -> bool {
        self.human_colors.len() == 1
    }
}
