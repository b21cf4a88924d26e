use crate::combat::Monster;
use crate::items::ItemRef;
use serde::Serialize;

/// The eight things that can happen when a region is explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExploreOutcome {
    Monster,
    GoldFind,
    Treasure,
    AttackBlessing,
    VitalityBlessing,
    GoldBlessing,
    Curse,
    Flavor,
}

impl ExploreOutcome {
    pub fn all() -> [ExploreOutcome; 8] {
        [
            ExploreOutcome::Monster,
            ExploreOutcome::GoldFind,
            ExploreOutcome::Treasure,
            ExploreOutcome::AttackBlessing,
            ExploreOutcome::VitalityBlessing,
            ExploreOutcome::GoldBlessing,
            ExploreOutcome::Curse,
            ExploreOutcome::Flavor,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExploreOutcome::Monster => "Monster",
            ExploreOutcome::GoldFind => "Gold",
            ExploreOutcome::Treasure => "Treasure",
            ExploreOutcome::AttackBlessing => "Blessing of Strength",
            ExploreOutcome::VitalityBlessing => "Blessing of Vitality",
            ExploreOutcome::GoldBlessing => "Blessing of Fortune",
            ExploreOutcome::Curse => "Curse",
            ExploreOutcome::Flavor => "Encounter",
        }
    }
}

/// Everything one explore action produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExploreReport {
    pub region_id: usize,
    pub outcome: ExploreOutcome,
    pub first_visit: bool,
    /// Reward multiplier for this visit, carried into any battle it starts
    pub multiplier: f64,
    pub messages: Vec<String>,
    pub gold: u64,
    pub xp: u64,
    pub levels_gained: u32,
    pub found: Option<ItemRef>,
    /// Set when the outcome is a monster; the battle is not yet fought
    pub encounter: Option<Monster>,
}

impl ExploreReport {
    pub(super) fn new(region_id: usize, outcome: ExploreOutcome, first_visit: bool, multiplier: f64) -> Self {
        Self {
            region_id,
            outcome,
            first_visit,
            multiplier,
            messages: Vec::new(),
            gold: 0,
            xp: 0,
            levels_gained: 0,
            found: None,
            encounter: None,
        }
    }
}
