use crate::core::constants::{MONSTER_LEVEL_PER_DISTANCE, MONSTER_MIN_XP, MONSTER_XP_PER_REWARD};
use crate::items::EquipmentId;
use serde::Serialize;

/// Base stats of a monster before distance scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub base_hp: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub base_reward: u32,
}

/// Ordered from the edge of home to the far corners of the map
pub const MONSTER_TEMPLATES: [MonsterTemplate; 8] = [
    MonsterTemplate {
        name: "Jingshen Xiaomei",
        base_hp: 5,
        base_attack: 3,
        base_defense: 0,
        base_reward: 2,
    },
    MonsterTemplate {
        name: "Doujiao",
        base_hp: 8,
        base_attack: 5,
        base_defense: 1,
        base_reward: 3,
    },
    MonsterTemplate {
        name: "Buzhong",
        base_hp: 12,
        base_attack: 7,
        base_defense: 2,
        base_reward: 5,
    },
    MonsterTemplate {
        name: "Liumo",
        base_hp: 6,
        base_attack: 8,
        base_defense: 0,
        base_reward: 4,
    },
    MonsterTemplate {
        name: "Xinqiu",
        base_hp: 15,
        base_attack: 10,
        base_defense: 3,
        base_reward: 7,
    },
    MonsterTemplate {
        name: "Anshilei",
        base_hp: 20,
        base_attack: 12,
        base_defense: 4,
        base_reward: 10,
    },
    MonsterTemplate {
        name: "Gaokao",
        base_hp: 30,
        base_attack: 15,
        base_defense: 6,
        base_reward: 15,
    },
    MonsterTemplate {
        name: "Zhong",
        base_hp: 40,
        base_attack: 20,
        base_defense: 8,
        base_reward: 20,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Monster {
    pub name: &'static str,
    pub max_hp: u32,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub gold_reward: u64,
    pub xp_reward: u64,
}

impl Monster {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }
}

/// Picks the template for a region `distance` steps from home on a map
/// whose farthest region is `max_distance` steps away.
pub fn template_for_distance(distance: u32, max_distance: u32) -> &'static MonsterTemplate {
    let ratio = if max_distance == 0 {
        0.0
    } else {
        (distance as f64 / max_distance as f64).min(1.0)
    };
    let index = ((ratio * MONSTER_TEMPLATES.len() as f64) as usize).min(MONSTER_TEMPLATES.len() - 1);
    &MONSTER_TEMPLATES[index]
}

/// Builds the monster met `distance` steps from home, scaled by
/// `1 + 0.2 × distance`.
pub fn generate_monster(distance: u32, max_distance: u32) -> Monster {
    let template = template_for_distance(distance, max_distance);
    let level_mult = 1.0 + MONSTER_LEVEL_PER_DISTANCE * distance as f64;
    let scale = |base: u32| (base as f64 * level_mult) as u32;

    let max_hp = scale(template.base_hp).max(1);
    Monster {
        name: template.name,
        max_hp,
        hp: max_hp,
        attack: scale(template.base_attack).max(1),
        defense: scale(template.base_defense),
        gold_reward: (scale(template.base_reward) as u64).max(1),
        xp_reward: ((template.base_reward as f64 * level_mult * MONSTER_XP_PER_REWARD) as u64)
            .max(MONSTER_MIN_XP),
    }
}

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    /// Round cap reached with both sides standing; no rewards
    Stalemate,
    Fled,
}

/// What a won battle paid out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VictoryRewards {
    pub gold: u64,
    pub gold_bonus: u64,
    pub xp: u64,
    pub levels_gained: u32,
    pub healed: bool,
    pub drop: Option<EquipmentId>,
}

/// Result of one exchange of blows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundResult {
    pub messages: Vec<String>,
    pub round: u32,
    pub monster_hp: u32,
    pub player_hp: u32,
    /// Set when this round decided the battle
    pub outcome: Option<BattleOutcome>,
    pub rewards: Option<VictoryRewards>,
}

impl RoundResult {
    pub fn battle_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn victory(&self) -> bool {
        self.outcome == Some(BattleOutcome::Victory)
    }
}
