//! Victory/defeat texts and objective descriptions
//!
//! Names come from the host's data layer through [`WorldLookup`]. A name
//! that cannot be resolved is substituted with an empty string, and an
//! objective whose target cannot be resolved has an empty description.

use serde::{Deserialize, Serialize};

use crate::condition::{ConditionFlags, bits};
use crate::kingdom::WorldLookup;
use crate::scenario::{ArtifactTarget, CampaignVictory, ScenarioSettings};

pub const DAYS_PER_WEEK: u32 = 7;
pub const WEEKS_PER_MONTH: u32 = 4;

/// Text shown with a victory or defeat notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeMessage {
    pub condition: ConditionFlags,
    /// Dialog body; empty when there is nothing to show
    pub body: String,
}

/// Replace every `%{key}` placeholder in `text`
pub fn replace_placeholder(text: &mut String, key: &str, value: &str) {
    let placeholder = format!("%{{{key}}}");
    if text.contains(&placeholder) {
        *text = text.replace(&placeholder, value);
    }
}

fn with_name(template: &str, name: Option<String>) -> String {
    let mut body = template.to_string();
    replace_placeholder(&mut body, "name", &name.unwrap_or_default());
    body
}

fn with_count(template: &str, count: u32) -> String {
    let mut body = template.to_string();
    replace_placeholder(&mut body, "count", &count.to_string());
    body
}

fn victory_town_name(settings: &ScenarioSettings, world: &dyn WorldLookup) -> Option<String> {
    settings
        .wins_town
        .and_then(|pos| world.town_at(pos))
        .map(|town| town.name)
}

fn victory_artifact_name(settings: &ScenarioSettings, world: &dyn WorldLookup) -> Option<String> {
    match settings.wins_artifact {
        ArtifactTarget::Ultimate => Some("Ultimate Artifact".to_string()),
        ArtifactTarget::Specific(id) => world.artifact_name(id),
    }
}

/// Dialog for a victory condition met by the local player
pub fn victory_message(
    condition: ConditionFlags,
    settings: &ScenarioSettings,
    world: &dyn WorldLookup,
) -> OutcomeMessage {
    let body = if settings.campaign == Some(CampaignVictory::CaptureDragonCity) {
        "Dragon city has fallen!  You are now the Master of the Dragons.".to_string()
    } else {
        match condition.bits() {
            bits::WINS_TOWN => with_name(
                "You captured %{name}!\nYou are victorious.",
                victory_town_name(settings, world),
            ),
            bits::WINS_HERO => with_name(
                "You have captured the enemy hero %{name}!\nYour quest is complete.",
                world.victory_hero_name(),
            ),
            bits::WINS_ARTIFACT => with_name(
                "You have found the %{name}.\nYour quest is complete.",
                victory_artifact_name(settings, world),
            ),
            bits::WINS_SIDE => "The enemy is beaten.\nYour side has triumphed!".to_string(),
            bits::WINS_GOLD => with_count(
                "You have built up over %{count} gold in your treasury.\nAll enemies bow before your wealth and power.",
                settings.wins_gold,
            ),
            _ => String::new(),
        }
    };

    OutcomeMessage { condition, body }
}

/// Dialog for a loss condition met by the local player
pub fn defeat_message(
    condition: ConditionFlags,
    settings: &ScenarioSettings,
    world: &dyn WorldLookup,
) -> OutcomeMessage {
    let body = match condition.bits() {
        bits::LOSS_ENEMY_WINS_TOWN => with_name(
            "The enemy has captured %{name}!\nThey are triumphant.",
            victory_town_name(settings, world),
        ),
        bits::LOSS_ENEMY_WINS_HERO => with_name(
            "The enemy has captured the hero %{name}!\nYour quest is a failure.",
            world.victory_hero_name(),
        ),
        bits::LOSS_ENEMY_WINS_ARTIFACT => with_name(
            "The enemy has found the %{name}.\nYour quest is a failure.",
            victory_artifact_name(settings, world),
        ),
        bits::LOSS_ENEMY_WINS_GOLD => with_count(
            "The enemy has built up over %{count} gold in his treasury.\nYou must bow done in defeat before his wealth and power.",
            settings.wins_gold,
        ),
        bits::LOSS_ALL => "You have been eliminated from the game!!!".to_string(),
        bits::LOSS_TOWN => with_name(
            "The enemy has captured %{name}!\nThey are triumphant.",
            settings
                .loss_town
                .and_then(|pos| world.town_at(pos))
                .map(|town| town.name),
        ),
        bits::LOSS_HERO => with_name(
            "You have lost the hero %{name}.\nYour quest is over.",
            world.loss_hero_name(),
        ),
        bits::LOSS_TIME => {
            "You have failed to complete your quest in time.\nAll is lost.".to_string()
        }
        _ => String::new(),
    };

    OutcomeMessage { condition, body }
}

/// Month, week and day (all 1-based) of a 1-based day count
pub fn calendar_date(day_count: u32) -> (u32, u32, u32) {
    let days = day_count.saturating_sub(1);
    let days_per_month = DAYS_PER_WEEK * WEEKS_PER_MONTH;
    let month = days / days_per_month;
    let week = (days - month * days_per_month) / DAYS_PER_WEEK;
    let day = days % DAYS_PER_WEEK;
    (month + 1, week + 1, day + 1)
}

/// Concrete objective text for the scenario information screen
pub fn actual_description(
    condition: ConditionFlags,
    settings: &ScenarioSettings,
    world: &dyn WorldLookup,
) -> String {
    let mut msg = String::new();

    if condition == ConditionFlags::WINS_ALL || condition == ConditionFlags::WINS_SIDE {
        msg = ConditionFlags::WINS_ALL.summary().to_string();
    } else if condition.contains(ConditionFlags::WINS_TOWN) {
        if let Some(town) = settings.wins_town.and_then(|pos| world.town_at(pos)) {
            let template = if town.is_castle {
                "Capture the castle '%{name}'."
            } else {
                "Capture the town '%{name}'."
            };
            msg = with_name(template, Some(town.name));
        }
    } else if condition.contains(ConditionFlags::WINS_HERO) {
        if let Some(hero) = world.victory_hero_name() {
            msg = with_name("Defeat the hero '%{name}'.", Some(hero));
        }
    } else if condition.contains(ConditionFlags::WINS_ARTIFACT) {
        msg = match settings.wins_artifact {
            ArtifactTarget::Ultimate => "Find the ultimate artifact.".to_string(),
            ArtifactTarget::Specific(id) => world
                .artifact_name(id)
                .map(|name| with_name("Find the '%{name}' artifact.", Some(name)))
                .unwrap_or_default(),
        };
    } else if condition.contains(ConditionFlags::WINS_GOLD) {
        msg = with_count("Accumulate %{count} gold.", settings.wins_gold);
    }

    if condition != ConditionFlags::WINS_ALL && condition.contains(ConditionFlags::WINS_ALL) {
        msg.push_str(", or you may win by defeating all enemy heroes and capturing all enemy towns and castles.");
    }

    if condition == ConditionFlags::LOSS_ALL {
        msg = ConditionFlags::LOSS_ALL.summary().to_string();
    } else if condition.contains(ConditionFlags::LOSS_TOWN) {
        if let Some(town) = settings.loss_town.and_then(|pos| world.town_at(pos)) {
            let template = if town.is_castle {
                "Lose the castle '%{name}'."
            } else {
                "Lose the town '%{name}'."
            };
            msg = with_name(template, Some(town.name));
        }
    } else if condition.contains(ConditionFlags::LOSS_HERO) {
        if let Some(hero) = world.loss_hero_name() {
            msg = with_name("Lose the hero: %{name}.", Some(hero));
        }
    } else if condition.contains(ConditionFlags::LOSS_TIME) {
        let (month, week, day) = calendar_date(settings.loss_days);
        let mut text = "Fail to win by the end of month %{month}, week %{week}, day %{day}.".to_string();
        replace_placeholder(&mut text, "day", &day.to_string());
        replace_placeholder(&mut text, "week", &week.to_string());
        replace_placeholder(&mut text, "month", &month.to_string());
        msg = text;
    }

    msg
}
