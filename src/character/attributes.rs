use crate::core::constants::{
    NUM_ATTRIBUTES, START_AGILITY, START_LUCK, START_STRENGTH, START_VITALITY,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AttributeType {
    Strength,
    Agility,
    Vitality,
    Luck,
}

impl AttributeType {
    pub fn all() -> [AttributeType; NUM_ATTRIBUTES] {
        [
            AttributeType::Strength,
            AttributeType::Agility,
            AttributeType::Vitality,
            AttributeType::Luck,
        ]
    }

    pub fn abbrev(&self) -> &str {
        match self {
            AttributeType::Strength => "STR",
            AttributeType::Agility => "AGI",
            AttributeType::Vitality => "VIT",
            AttributeType::Luck => "LUCK",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AttributeType::Strength => 0,
            AttributeType::Agility => 1,
            AttributeType::Vitality => 2,
            AttributeType::Luck => 3,
        }
    }
}

/// Base attributes. Only level-ups and blessings raise them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Attributes {
    values: [u32; NUM_ATTRIBUTES],
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new()
    }
}

impl Attributes {
    /// Starting spread for a new character
    pub fn new() -> Self {
        Self::from_values(START_STRENGTH, START_AGILITY, START_VITALITY, START_LUCK)
    }

    pub fn from_values(strength: u32, agility: u32, vitality: u32, luck: u32) -> Self {
        Self {
            values: [strength, agility, vitality, luck],
        }
    }

    pub fn get(&self, attr: AttributeType) -> u32 {
        self.values[attr.index()]
    }

    pub fn set(&mut self, attr: AttributeType, value: u32) {
        self.values[attr.index()] = value;
    }

    pub fn increment(&mut self, attr: AttributeType) {
        self.values[attr.index()] = self.values[attr.index()].saturating_add(1);
    }

    pub fn strength(&self) -> u32 {
        self.get(AttributeType::Strength)
    }

    pub fn agility(&self) -> u32 {
        self.get(AttributeType::Agility)
    }

    pub fn vitality(&self) -> u32 {
        self.get(AttributeType::Vitality)
    }

    pub fn luck(&self) -> u32 {
        self.get(AttributeType::Luck)
    }
}

/// Permanent boons picked up while exploring.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Blessings {
    /// Flat attack added before equipment
    pub attack_bonus: i64,
    /// Extra gold on every credit, in percent
    pub gold_bonus_percent: u32,
}

/// Permanent penalties picked up while exploring.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Curses {
    pub max_hp_penalty: i64,
    pub attack_penalty: i64,
}
