use super::attributes::{Attributes, Blessings, Curses};
use crate::core::constants::*;
use crate::items::Equipment;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedStats {
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub crit_chance: u32,
    /// Weight of the curse outcome when exploring
    pub curse_probability: f64,
}

impl DerivedStats {
    /// Derived stats for bare attributes with no modifiers at all.
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self::calculate_derived_stats(
            attrs,
            &Blessings::default(),
            &Curses::default(),
            &Equipment::new(),
        )
    }

    /// Calculates derived stats from attributes, exploration modifiers and
    /// worn equipment.
    ///
    /// The manhole set bonus multiplies the pre-equipment max HP only, so
    /// the armor's own HP bonuses are not multiplied.
    pub fn calculate_derived_stats(
        attrs: &Attributes,
        blessings: &Blessings,
        curses: &Curses,
        equipment: &Equipment,
    ) -> Self {
        // Base Max HP = BASE_HP + VIT × HP_PER_VITALITY - curse
        let mut base_max_hp =
            BASE_HP + attrs.vitality() as i64 * HP_PER_VITALITY - curses.max_hp_penalty;

        // Base Attack = BASE_ATTACK + STR / 2 + blessing - curse
        let base_attack = BASE_ATTACK + attrs.strength() as i64 / STRENGTH_PER_ATTACK
            + blessings.attack_bonus
            - curses.attack_penalty;

        let (equip_hp, equip_attack) = equipment
            .iter_equipped()
            .fold((0i64, 0i64), |(hp, atk), item| {
                (hp + item.hp_bonus, atk + item.attack_bonus)
            });

        let mut curse_probability = BASE_CURSE_PROBABILITY;
        if equipment.has_full_set() {
            base_max_hp = (base_max_hp as f64 * SET_BONUS_HP_MULTIPLIER) as i64;
            curse_probability *= SET_BONUS_CURSE_MULTIPLIER;
        }

        let max_hp = (base_max_hp + equip_hp).clamp(1, u32::MAX as i64) as u32;
        let attack = (base_attack + equip_attack).clamp(1, u32::MAX as i64) as u32;

        // Defense = BASE_DEFENSE + AGI / 3, Crit = BASE_CRIT_CHANCE + LUCK / 2
        let defense = BASE_DEFENSE + attrs.agility() / AGILITY_PER_DEFENSE;
        let crit_chance = BASE_CRIT_CHANCE + attrs.luck() / LUCK_PER_CRIT;

        Self {
            max_hp,
            attack,
            defense,
            crit_chance,
            curse_probability,
        }
    }
}
