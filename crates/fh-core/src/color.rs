//! Kingdom colors and color sets
//!
//! Every kingdom in a scenario is identified by one of six colors. The
//! roster of a scenario and the set of kingdoms still in play are both
//! represented by [`ColorSet`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Kingdom color (one player slot)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Color {
    Blue = 0x01,
    Green = 0x02,
    Red = 0x04,
    Yellow = 0x08,
    Orange = 0x10,
    Purple = 0x20,
}

impl Color {
    /// Bit used for this color inside a [`ColorSet`]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Look up a color from its single bit
    pub fn from_bit(bit: u8) -> Option<Self> {
        Color::iter().find(|c| c.bit() == bit)
    }

    /// Parse a color name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        Color::iter().find(|c| c.to_string().eq_ignore_ascii_case(name))
    }
}

/// Fixed-size set of kingdom colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorSet(u8);

impl ColorSet {
    const MASK: u8 = 0x3f;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(Self::MASK)
    }

    /// Build a set from raw bits, rejecting bits that name no color
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::MASK != 0 {
            None
        } else {
            Some(Self(bits))
        }
    }

    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    pub fn insert(&mut self, color: Color) {
        self.0 |= color.bit();
    }

    /// Remove a color; returns whether it was present
    pub fn remove(&mut self, color: Color) -> bool {
        let present = self.contains(color);
        self.0 &= !color.bit();
        present
    }

    pub const fn intersection(self, other: ColorSet) -> ColorSet {
        Self(self.0 & other.0)
    }

    pub const fn union(self, other: ColorSet) -> ColorSet {
        Self(self.0 | other.0)
    }

    /// Whether every color of `self` is also in `other`
    pub const fn is_subset(self, other: ColorSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The only color of a one-element set
    pub fn single(self) -> Option<Color> {
        if self.len() == 1 {
            Color::from_bit(self.0)
        } else {
            None
        }
    }

    /// Colors in ascending bit order
    pub fn iter(self) -> impl Iterator<Item = Color> {
        Color::iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut set = ColorSet::empty();
        for color in iter {
            set.insert(color);
        }
        set
    }
}

impl From<Color> for ColorSet {
    fn from(color: Color) -> Self {
        Self(color.bit())
    }
}

// Manual serde impl for ColorSet
impl Serialize for ColorSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ColorSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        ColorSet::from_bits(bits)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color bits {bits:#04x}")))
    }
}
