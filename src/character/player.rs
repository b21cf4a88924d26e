use super::attributes::{AttributeType, Attributes, Blessings, Curses};
use super::derived_stats::DerivedStats;
use crate::core::constants::{START_XP_TO_NEXT, XP_CURVE_FACTOR};
use crate::core::error::GameError;
use crate::items::{consumable, ConsumableId, Equipment, EquipmentId};
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;

/// Where the player stands. Regions never point back at the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Position {
    pub region_id: usize,
    pub x: usize,
    pub y: usize,
    pub home_region_id: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    attributes: Attributes,
    blessings: Blessings,
    curses: Curses,
    stats: DerivedStats,
    hp: u32,
    alive: bool,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
    currency: u64,
    pub position: Position,
    inventory: BTreeMap<ConsumableId, u32>,
    equipment: Equipment,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// A fresh level 1 character at full health. Position is set by the
    /// engine once the map exists.
    pub fn new() -> Self {
        let attributes = Attributes::new();
        let stats = DerivedStats::from_attributes(&attributes);
        Self {
            attributes,
            blessings: Blessings::default(),
            curses: Curses::default(),
            stats,
            hp: stats.max_hp,
            alive: true,
            level: 1,
            xp: 0,
            xp_to_next: START_XP_TO_NEXT,
            currency: 0,
            position: Position::default(),
            inventory: BTreeMap::new(),
            equipment: Equipment::new(),
        }
    }

    /// Rebuilds every derived value from attributes, modifiers and worn
    /// gear, then clamps hp. The only writer of derived stats.
    pub fn recompute_derived(&mut self) {
        self.stats = DerivedStats::calculate_derived_stats(
            &self.attributes,
            &self.blessings,
            &self.curses,
            &self.equipment,
        );
        self.hp = self.hp.min(self.stats.max_hp);
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn blessings(&self) -> &Blessings {
        &self.blessings
    }

    pub fn curses(&self) -> &Curses {
        &self.curses
    }

    pub fn stats(&self) -> &DerivedStats {
        &self.stats
    }

    pub fn max_hp(&self) -> u32 {
        self.stats.max_hp
    }

    pub fn attack(&self) -> u32 {
        self.stats.attack
    }

    pub fn defense(&self) -> u32 {
        self.stats.defense
    }

    pub fn crit_chance(&self) -> u32 {
        self.stats.crit_chance
    }

    pub fn curse_probability(&self) -> f64 {
        self.stats.curse_probability
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_full_hp(&self) -> bool {
        self.hp >= self.stats.max_hp
    }

    /// Heals by `amount`, or fully with `None`. Returns hp actually restored.
    pub fn heal(&mut self, amount: Option<u32>) -> u32 {
        let before = self.hp;
        self.hp = match amount {
            Some(amount) => self.hp.saturating_add(amount).min(self.stats.max_hp),
            None => self.stats.max_hp,
        };
        self.hp - before
    }

    /// Applies damage, flagging the player dead at 0 hp. Returns damage taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_sub(amount);
        if self.hp == 0 {
            self.alive = false;
        }
        before - self.hp
    }

    /// Brings a dead player back with the given hp (at least 1)
    pub fn revive(&mut self, hp: u32) {
        self.alive = true;
        self.hp = hp.clamp(1, self.stats.max_hp);
    }

    /// Adds experience and processes every level it pays for.
    /// Returns the number of levels gained.
    pub fn add_experience(&mut self, amount: u64) -> u32 {
        self.xp = self.xp.saturating_add(amount);
        let mut levels_gained = 0;

        while self.xp >= self.xp_to_next {
            self.xp -= self.xp_to_next;
            self.level += 1;
            levels_gained += 1;
            for attr in [
                AttributeType::Strength,
                AttributeType::Agility,
                AttributeType::Vitality,
            ] {
                self.attributes.increment(attr);
            }
            self.recompute_derived();
            self.heal(None);
            self.xp_to_next = ((self.xp_to_next as f64 * XP_CURVE_FACTOR) as u64).max(1);
            info!("player reached level {}", self.level);
        }

        levels_gained
    }

    pub fn currency(&self) -> u64 {
        self.currency
    }

    /// Credits gold plus the blessing bonus. Returns (total credited, bonus).
    pub fn add_currency(&mut self, amount: u64) -> (u64, u64) {
        let bonus = amount * self.blessings.gold_bonus_percent as u64 / 100;
        let total = amount + bonus;
        self.currency = self.currency.saturating_add(total);
        (total, bonus)
    }

    pub fn spend_currency(&mut self, amount: u64) -> Result<(), GameError> {
        if self.currency < amount {
            return Err(GameError::InsufficientFunds {
                needed: amount,
                available: self.currency,
            });
        }
        self.currency -= amount;
        Ok(())
    }

    // Blessings and curses

    pub fn bless_attack(&mut self, amount: i64) {
        self.blessings.attack_bonus += amount;
        self.recompute_derived();
    }

    /// +1 vitality and a full heal
    pub fn bless_vitality(&mut self) {
        self.attributes.increment(AttributeType::Vitality);
        self.recompute_derived();
        self.heal(None);
    }

    pub fn bless_gold(&mut self, percent: u32) {
        self.blessings.gold_bonus_percent += percent;
    }

    pub fn curse_max_hp(&mut self, amount: i64) {
        self.curses.max_hp_penalty += amount;
        self.recompute_derived();
    }

    pub fn curse_attack(&mut self, amount: i64) {
        self.curses.attack_penalty += amount;
        self.recompute_derived();
    }

    // Equipment

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    /// Records an item as obtained. Returns false if it already was.
    pub fn obtain(&mut self, id: EquipmentId) -> bool {
        self.equipment.grant(id)
    }

    pub fn equip(&mut self, id: EquipmentId) -> Result<(), GameError> {
        self.equipment.equip(id)?;
        self.recompute_derived();
        Ok(())
    }

    pub fn unequip(&mut self, id: EquipmentId) -> Result<(), GameError> {
        self.equipment.unequip(id)?;
        self.recompute_derived();
        Ok(())
    }

    // Inventory

    pub fn inventory(&self) -> &BTreeMap<ConsumableId, u32> {
        &self.inventory
    }

    pub fn consumable_count(&self, id: ConsumableId) -> u32 {
        self.inventory.get(&id).copied().unwrap_or(0)
    }

    pub fn add_consumable(&mut self, id: ConsumableId, count: u32) {
        *self.inventory.entry(id).or_insert(0) += count;
    }

    /// Removes one of `id`, dropping the entry when it reaches zero.
    pub fn take_consumable(&mut self, id: ConsumableId) -> Result<(), GameError> {
        match self.inventory.get_mut(&id) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.inventory.remove(&id);
                }
                Ok(())
            }
            _ => Err(GameError::OutOfStock(consumable(id).name)),
        }
    }

    pub fn is_at_home(&self) -> bool {
        self.position.region_id == self.position.home_region_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::SET_PIECES;

    #[test]
    fn test_new_player() {
        let player = Player::new();
        assert_eq!(player.level, 1);
        assert_eq!(player.xp, 0);
        assert_eq!(player.xp_to_next, 100);
        assert_eq!(player.currency(), 0);
        assert_eq!(player.hp(), 32);
        assert_eq!(player.max_hp(), 32);
        assert_eq!(player.attack(), 12);
        assert!(player.is_alive());
        assert!(player.is_full_hp());
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut player = Player::new();
        player.recompute_derived();
        let first = *player.stats();
        player.recompute_derived();
        assert_eq!(*player.stats(), first);
        assert_eq!(player.hp(), 32);
    }

    #[test]
    fn test_single_level_up() {
        let mut player = Player::new();
        player.take_damage(10);

        assert_eq!(player.add_experience(100), 1);
        assert_eq!(player.level, 2);
        assert_eq!(player.xp, 0);
        assert_eq!(player.xp_to_next, 150);
        assert_eq!(player.attributes().strength(), 6);
        assert_eq!(player.attributes().agility(), 4);
        assert_eq!(player.attributes().vitality(), 5);
        assert_eq!(player.attributes().luck(), 2);
        assert_eq!(player.max_hp(), 35);
        assert!(player.is_full_hp());
    }

    #[test]
    fn test_multi_level_experience() {
        let mut player = Player::new();
        // 100 + 150 + 225 = 475 for three levels, 25 left over
        assert_eq!(player.add_experience(500), 3);
        assert_eq!(player.level, 4);
        assert_eq!(player.xp, 25);
        assert_eq!(player.xp_to_next, 337);
        assert!(player.xp < player.xp_to_next);
    }

    #[test]
    fn test_add_currency_with_bonus() {
        let mut player = Player::new();
        assert_eq!(player.add_currency(10), (10, 0));

        player.bless_gold(15);
        // 15% of 7 = 1.05 -> 1
        assert_eq!(player.add_currency(7), (8, 1));
        assert_eq!(player.currency(), 18);
    }

    #[test]
    fn test_spend_currency_rejects_when_short() {
        let mut player = Player::new();
        player.add_currency(50);
        assert_eq!(
            player.spend_currency(60),
            Err(GameError::InsufficientFunds {
                needed: 60,
                available: 50
            })
        );
        assert_eq!(player.currency(), 50);
        player.spend_currency(50).unwrap();
        assert_eq!(player.currency(), 0);
    }

    #[test]
    fn test_heal_and_damage() {
        let mut player = Player::new();
        assert_eq!(player.take_damage(20), 20);
        assert_eq!(player.heal(Some(5)), 5);
        assert_eq!(player.hp(), 17);
        assert_eq!(player.heal(None), 15);
        assert_eq!(player.heal(Some(100)), 0);

        assert_eq!(player.take_damage(500), 32);
        assert_eq!(player.hp(), 0);
        assert!(!player.is_alive());

        player.revive(10);
        assert!(player.is_alive());
        assert_eq!(player.hp(), 10);
    }

    #[test]
    fn test_equip_recomputes() {
        let mut player = Player::new();
        assert_eq!(
            player.equip(EquipmentId::FrozenTwist),
            Err(GameError::NotOwned("Frozen Twist"))
        );

        player.obtain(EquipmentId::FrozenTwist);
        player.equip(EquipmentId::FrozenTwist).unwrap();
        assert_eq!(player.max_hp(), 42);
        // hp is not topped up by gear
        assert_eq!(player.hp(), 32);

        player.unequip(EquipmentId::FrozenTwist).unwrap();
        assert_eq!(player.max_hp(), 32);
    }

    #[test]
    fn test_set_bonus_reverts_when_piece_removed() {
        let mut player = Player::new();
        for piece in SET_PIECES {
            player.obtain(piece);
            player.equip(piece).unwrap();
        }
        assert_eq!(player.max_hp(), 48 + 55);
        assert!((player.curse_probability() - 0.05).abs() < 1e-9);

        player.heal(None);
        player.unequip(EquipmentId::ManholeBib).unwrap();
        assert_eq!(player.max_hp(), 32 + 10 + 15 + 12);
        assert!((player.curse_probability() - 0.10).abs() < 1e-9);
        assert_eq!(player.hp(), player.max_hp());
    }

    #[test]
    fn test_curses_clamp_hp() {
        let mut player = Player::new();
        player.curse_max_hp(2);
        assert_eq!(player.max_hp(), 30);
        assert_eq!(player.hp(), 30);

        player.curse_attack(1);
        assert_eq!(player.attack(), 11);
        player.bless_attack(2);
        assert_eq!(player.attack(), 13);
        assert_eq!(player.curses().max_hp_penalty, 2);
        assert_eq!(player.curses().attack_penalty, 1);
        assert_eq!(player.blessings().attack_bonus, 2);
    }

    #[test]
    fn test_vitality_blessing_heals() {
        let mut player = Player::new();
        player.take_damage(12);
        player.bless_vitality();
        assert_eq!(player.attributes().vitality(), 5);
        assert_eq!(player.max_hp(), 35);
        assert_eq!(player.hp(), 35);
    }

    #[test]
    fn test_inventory_counts() {
        let mut player = Player::new();
        assert_eq!(
            player.take_consumable(ConsumableId::SpicySoup),
            Err(GameError::OutOfStock("Spicy Soup"))
        );

        player.add_consumable(ConsumableId::SpicySoup, 2);
        player.take_consumable(ConsumableId::SpicySoup).unwrap();
        assert_eq!(player.consumable_count(ConsumableId::SpicySoup), 1);
        player.take_consumable(ConsumableId::SpicySoup).unwrap();
        assert!(player.inventory().is_empty());
    }
}
