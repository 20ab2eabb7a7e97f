//! Victory and loss conditions
//!
//! A scenario configures which conditions end it, and the kingdom checks
//! report which of them were met. Both use the same [`ConditionFlags`] bits.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Raw condition values, usable in `match` on [`ConditionFlags::bits`]
pub mod bits {
    pub const WINS_ALL: u32 = 0x0001;
    pub const WINS_TOWN: u32 = 0x0002;
    pub const WINS_HERO: u32 = 0x0004;
    pub const WINS_ARTIFACT: u32 = 0x0008;
    pub const WINS_SIDE: u32 = 0x0010;
    pub const WINS_GOLD: u32 = 0x0020;
    pub const LOSS_ALL: u32 = 0x0100;
    pub const LOSS_TOWN: u32 = 0x0200;
    pub const LOSS_HERO: u32 = 0x0400;
    pub const LOSS_TIME: u32 = 0x0800;
    pub const LOSS_ENEMY_WINS_TOWN: u32 = 0x1000;
    pub const LOSS_ENEMY_WINS_HERO: u32 = 0x2000;
    pub const LOSS_ENEMY_WINS_ARTIFACT: u32 = 0x4000;
    pub const LOSS_ENEMY_WINS_GOLD: u32 = 0x8000;
}

bitflags! {
    /// Win/loss condition bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConditionFlags: u32 {
        /// Defeat all enemy heroes and capture all enemy towns
        const WINS_ALL = bits::WINS_ALL;
        const WINS_TOWN = bits::WINS_TOWN;
        const WINS_HERO = bits::WINS_HERO;
        const WINS_ARTIFACT = bits::WINS_ARTIFACT;
        /// Allied side defeats the opposing side
        const WINS_SIDE = bits::WINS_SIDE;
        const WINS_GOLD = bits::WINS_GOLD;

        /// Lose all heroes and towns
        const LOSS_ALL = bits::LOSS_ALL;
        const LOSS_TOWN = bits::LOSS_TOWN;
        const LOSS_HERO = bits::LOSS_HERO;
        /// Fail to win before the deadline
        const LOSS_TIME = bits::LOSS_TIME;

        // An opponent met one of the WINS_* conditions
        const LOSS_ENEMY_WINS_TOWN = bits::LOSS_ENEMY_WINS_TOWN;
        const LOSS_ENEMY_WINS_HERO = bits::LOSS_ENEMY_WINS_HERO;
        const LOSS_ENEMY_WINS_ARTIFACT = bits::LOSS_ENEMY_WINS_ARTIFACT;
        const LOSS_ENEMY_WINS_GOLD = bits::LOSS_ENEMY_WINS_GOLD;

        const WINS = Self::WINS_ALL.bits()
            | Self::WINS_TOWN.bits()
            | Self::WINS_HERO.bits()
            | Self::WINS_ARTIFACT.bits()
            | Self::WINS_SIDE.bits()
            | Self::WINS_GOLD.bits();

        const LOSS_ENEMY_WINS = Self::LOSS_ENEMY_WINS_TOWN.bits()
            | Self::LOSS_ENEMY_WINS_HERO.bits()
            | Self::LOSS_ENEMY_WINS_ARTIFACT.bits()
            | Self::LOSS_ENEMY_WINS_GOLD.bits();

        const LOSS = Self::LOSS_ALL.bits()
            | Self::LOSS_TOWN.bits()
            | Self::LOSS_HERO.bits()
            | Self::LOSS_TIME.bits()
            | Self::LOSS_ENEMY_WINS.bits();
    }
}

impl ConditionFlags {
    /// No condition met
    pub const COND_NONE: ConditionFlags = ConditionFlags::empty();

    pub const fn is_none(self) -> bool {
        self.is_empty()
    }

    /// Any victory bit set
    pub const fn is_win(self) -> bool {
        self.intersects(Self::WINS)
    }

    /// Any loss bit set
    pub const fn is_loss(self) -> bool {
        self.intersects(Self::LOSS)
    }

    /// Generic one-line description of a single condition
    pub fn summary(self) -> &'static str {
        match self.bits() {
            bits::WINS_ALL => "Defeat all enemy heroes and capture all enemy towns and castles.",
            bits::WINS_TOWN => "Capture a specific town.",
            bits::WINS_HERO => "Defeat a specific hero.",
            bits::WINS_ARTIFACT => "Find a specific artifact.",
            bits::WINS_SIDE => "Your side defeats the opposing side.",
            bits::WINS_GOLD => "Accumulate a large amount of gold.",
            bits::LOSS_ALL => "Lose all your heroes and towns.",
            bits::LOSS_TOWN => "Lose a specific town.",
            bits::LOSS_HERO => "Lose a specific hero.",
            bits::LOSS_TIME => "Run out of time. (Fail to win by a certain point.)",
            _ => "None",
        }
    }

    /// Parse a condition keyword as used in scenario files (`town`, `hero`, ...)
    pub fn from_keyword(win: bool, keyword: &str) -> Option<Self> {
        let flag = match (win, keyword) {
            (true, "all") => Self::WINS_ALL,
            (true, "town") => Self::WINS_TOWN,
            (true, "hero") => Self::WINS_HERO,
            (true, "artifact") => Self::WINS_ARTIFACT,
            (true, "side") => Self::WINS_SIDE,
            (true, "gold") => Self::WINS_GOLD,
            (false, "all") => Self::LOSS_ALL,
            (false, "town") => Self::LOSS_TOWN,
            (false, "hero") => Self::LOSS_HERO,
            (false, "time") => Self::LOSS_TIME,
            _ => return None,
        };
        Some(flag)
    }
}

// Manual serde impl for ConditionFlags
impl Serialize for ConditionFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConditionFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        ConditionFlags::from_bits(bits)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid condition bits {bits:#06x}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families() {
        assert!(ConditionFlags::WINS_GOLD.is_win());
        assert!(!ConditionFlags::WINS_GOLD.is_loss());
        assert!(ConditionFlags::LOSS_ENEMY_WINS_ARTIFACT.is_loss());
        assert!(ConditionFlags::LOSS_ENEMY_WINS.contains(ConditionFlags::LOSS_ENEMY_WINS_GOLD));
        assert!(!ConditionFlags::LOSS_ENEMY_WINS.contains(ConditionFlags::LOSS_TIME));
        assert!(ConditionFlags::COND_NONE.is_none());
        assert!(!ConditionFlags::COND_NONE.is_win());
        assert!(!ConditionFlags::COND_NONE.is_loss());
    }

    #[test]
    fn test_bit_values() {
        assert_eq!(ConditionFlags::WINS.bits(), 0x003f);
        assert_eq!(ConditionFlags::LOSS.bits(), 0xff00);
        assert_eq!(ConditionFlags::LOSS_TIME.bits(), 0x0800);
    }

    #[test]
    fn test_summary() {
        assert_eq!(ConditionFlags::WINS_TOWN.summary(), "Capture a specific town.");
        assert_eq!(ConditionFlags::LOSS_HERO.summary(), "Lose a specific hero.");
        assert_eq!((ConditionFlags::WINS_TOWN | ConditionFlags::WINS_ALL).summary(), "None");
        assert_eq!(ConditionFlags::LOSS_ENEMY_WINS_GOLD.summary(), "None");
    }

    #[test]
    fn test_keywords() {
        assert_eq!(ConditionFlags::from_keyword(true, "gold"), Some(ConditionFlags::WINS_GOLD));
        assert_eq!(ConditionFlags::from_keyword(false, "time"), Some(ConditionFlags::LOSS_TIME));
        assert_eq!(ConditionFlags::from_keyword(false, "gold"), None);
    }

    #[test]
    fn test_deserialize_rejects_unknown_bits() {
        let flags: ConditionFlags = serde_json::from_str("2").unwrap();
        assert_eq!(flags, ConditionFlags::WINS_TOWN);
        assert!(serde_json::from_str::<ConditionFlags>("64").is_err());
    }
}
