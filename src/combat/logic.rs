use super::math::{calculate_damage, calculate_player_attack, player_hit_chance, roll_under};
use super::types::{BattleOutcome, Monster, RoundResult, VictoryRewards};
use crate::character::Player;
use crate::core::constants::MONSTER_HIT_CHANCE;
use crate::items::victory_drop;
use log::debug;
use rand::Rng;
use serde::Serialize;

/// A battle in progress against one monster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Battle {
    pub monster: Monster,
    /// Encounter multiplier applied to the rewards (3.33 on first visits)
    pub multiplier: f64,
    /// Rounds resolved so far
    pub rounds: u32,
}

impl Battle {
    pub fn new(monster: Monster, multiplier: f64) -> Self {
        Self {
            monster,
            multiplier,
            rounds: 0,
        }
    }

    pub fn has_started(&self) -> bool {
        self.rounds > 0
    }

    /// Resolves one exchange: the player swings, then the monster answers if
    /// it is still standing. Victory rewards are paid out before returning.
    pub fn resolve_round(
        &mut self,
        player: &mut Player,
        stalemate_rounds: u32,
        rng: &mut impl Rng,
    ) -> RoundResult {
        self.rounds += 1;
        let mut messages = Vec::new();
        let name = self.monster.name;

        if roll_under(player_hit_chance(player.attributes().agility()), rng) {
            let attack = calculate_player_attack(
                player.attack(),
                player.crit_chance(),
                self.monster.defense,
                rng,
            );
            self.monster.take_damage(attack.damage);
            if attack.is_crit {
                messages.push(format!(
                    "Critical hit! You strike {} for {} damage.",
                    name, attack.damage
                ));
            } else {
                messages.push(format!("You hit {} for {} damage.", name, attack.damage));
            }
        } else {
            messages.push(format!("{} dodges your attack.", name));
        }

        if !self.monster.is_alive() {
            messages.push(format!("You defeated {}!", name));
            let rewards = self.pay_out(player, rng, &mut messages);
            return self.finish(player, messages, BattleOutcome::Victory, Some(rewards));
        }

        if roll_under(MONSTER_HIT_CHANCE, rng) {
            let damage = calculate_damage(self.monster.attack, player.defense());
            player.take_damage(damage);
            messages.push(format!("{} hits you for {} damage.", name, damage));
        } else {
            messages.push(format!("You dodge {}'s attack.", name));
        }

        if !player.is_alive() {
            messages.push(format!("You were defeated by {}.", name));
            return self.finish(player, messages, BattleOutcome::Defeat, None);
        }

        if self.rounds >= stalemate_rounds {
            messages.push(format!(
                "After {} rounds neither side can finish the fight. {} wanders off.",
                self.rounds, name
            ));
            return self.finish(player, messages, BattleOutcome::Stalemate, None);
        }

        debug!(
            "round {}: {} hp {}, player hp {}",
            self.rounds,
            name,
            self.monster.hp,
            player.hp()
        );
        RoundResult {
            messages,
            round: self.rounds,
            monster_hp: self.monster.hp,
            player_hp: player.hp(),
            outcome: None,
            rewards: None,
        }
    }

    /// Runs rounds until the battle is decided. The stalemate cap bounds
    /// the loop.
    pub fn resolve_all(
        &mut self,
        player: &mut Player,
        stalemate_rounds: u32,
        rng: &mut impl Rng,
    ) -> Vec<RoundResult> {
        let mut rounds = Vec::new();
        loop {
            let result = self.resolve_round(player, stalemate_rounds, rng);
            let over = result.battle_over();
            rounds.push(result);
            if over {
                return rounds;
            }
        }
    }

    /// Runs away for a fixed hp cost. Dying on the way out is a defeat.
    pub fn flee(&self, player: &mut Player, hp_cost: u32) -> RoundResult {
        let mut messages = Vec::new();
        let lost = player.take_damage(hp_cost);
        messages.push(format!(
            "You run from {} and lose {} hp on the way.",
            self.monster.name, lost
        ));

        let outcome = if player.is_alive() {
            BattleOutcome::Fled
        } else {
            messages.push("You collapse before reaching safety.".to_string());
            BattleOutcome::Defeat
        };
        self.finish(player, messages, outcome, None)
    }

    fn pay_out(
        &self,
        player: &mut Player,
        rng: &mut impl Rng,
        messages: &mut Vec<String>,
    ) -> VictoryRewards {
        let gold = (self.monster.gold_reward as f64 * self.multiplier) as u64;
        let xp = (self.monster.xp_reward as f64 * self.multiplier) as u64;

        let (credited, bonus) = player.add_currency(gold);
        if bonus > 0 {
            messages.push(format!("You gain {} gold (+{} blessed).", credited, bonus));
        } else {
            messages.push(format!("You gain {} gold.", credited));
        }
        messages.push(format!("You gain {} xp.", xp));
        let levels_gained = player.add_experience(xp);
        if levels_gained > 0 {
            messages.push(format!("Level up! You are now level {}.", player.level));
        }

        let healed = player.equipment().heals_on_victory();
        if healed {
            player.heal(None);
            messages.push("The soup-soaked cruller restores you to full health.".to_string());
        }

        let mut drop = None;
        if let Some((item, percent)) = victory_drop() {
            if !player.equipment().is_owned(item.id) && roll_under(percent, rng) {
                player.obtain(item.id);
                drop = Some(item.id);
                messages.push(format!("{} left something behind: {}!", self.monster.name, item.name));
            }
        }

        VictoryRewards {
            gold: credited,
            gold_bonus: bonus,
            xp,
            levels_gained,
            healed,
            drop,
        }
    }

    fn finish(
        &self,
        player: &Player,
        messages: Vec<String>,
        outcome: BattleOutcome,
        rewards: Option<VictoryRewards>,
    ) -> RoundResult {
        debug!("battle with {} ended: {:?}", self.monster.name, outcome);
        RoundResult {
            messages,
            round: self.rounds,
            monster_hp: self.monster.hp,
            player_hp: player.hp(),
            outcome: Some(outcome),
            rewards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::generate_monster;
    use crate::items::EquipmentId;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn weak_monster() -> Monster {
        generate_monster(0, 8)
    }

    #[test]
    fn test_always_hit_wins_round_one() {
        let mut player = Player::new();
        let mut battle = Battle::new(weak_monster(), 1.0);
        let mut rng = StepRng::new(0, 0);

        let result = battle.resolve_round(&mut player, 20, &mut rng);
        assert!(result.battle_over());
        assert!(result.victory());
        assert_eq!(result.round, 1);
        assert_eq!(result.monster_hp, 0);

        let rewards = result.rewards.unwrap();
        assert_eq!(rewards.gold, 2);
        assert_eq!(rewards.xp, 6);
        assert_eq!(player.currency(), 2);
        assert_eq!(player.xp, 6);
        assert_eq!(player.hp(), 32);
        // A roll of 1 also lands the victory drop
        assert_eq!(rewards.drop, Some(EquipmentId::ZhongSword));
        assert!(player.equipment().is_owned(EquipmentId::ZhongSword));
    }

    #[test]
    fn test_multiplier_scales_rewards() {
        let mut player = Player::new();
        let mut battle = Battle::new(weak_monster(), 3.33);
        let mut rng = StepRng::new(0, 0);

        let rewards = battle
            .resolve_round(&mut player, 20, &mut rng)
            .rewards
            .unwrap();
        // 2 × 3.33 = 6.66, 6 × 3.33 = 19.98
        assert_eq!(rewards.gold, 6);
        assert_eq!(rewards.xp, 19);
    }

    #[test]
    fn test_whiffing_ends_in_stalemate() {
        let mut player = Player::new();
        let mut battle = Battle::new(weak_monster(), 1.0);
        // Every roll is 100: the player always misses and so does the monster
        let mut rng = StepRng::new(u64::MAX, 0);

        let rounds = battle.resolve_all(&mut player, 20, &mut rng);
        assert_eq!(rounds.len(), 20);
        let last = rounds.last().unwrap();
        assert_eq!(last.outcome, Some(BattleOutcome::Stalemate));
        assert!(last.rewards.is_none());
        assert_eq!(player.hp(), 32);
        assert_eq!(player.currency(), 0);
        assert_eq!(battle.monster.hp, battle.monster.max_hp);
    }

    #[test]
    fn test_flee_costs_hp() {
        let mut player = Player::new();
        let battle = Battle::new(weak_monster(), 1.0);
        let result = battle.flee(&mut player, 5);
        assert_eq!(result.outcome, Some(BattleOutcome::Fled));
        assert_eq!(player.hp(), 27);
    }

    #[test]
    fn test_flee_can_kill() {
        let mut player = Player::new();
        player.take_damage(30);
        let battle = Battle::new(weak_monster(), 1.0);
        let result = battle.flee(&mut player, 5);
        assert_eq!(result.outcome, Some(BattleOutcome::Defeat));
        assert!(!player.is_alive());
    }

    #[test]
    fn test_cruller_heals_after_victory() {
        let mut player = Player::new();
        player.obtain(EquipmentId::SoupCruller);
        player.equip(EquipmentId::SoupCruller).unwrap();
        player.take_damage(20);

        let mut battle = Battle::new(weak_monster(), 1.0);
        let mut rng = StepRng::new(0, 0);
        let result = battle.resolve_round(&mut player, 20, &mut rng);
        assert!(result.rewards.unwrap().healed);
        assert!(player.is_full_hp());
    }

    #[test]
    fn test_battles_always_terminate() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for distance in 0..=8 {
            let mut player = Player::new();
            let mut battle = Battle::new(generate_monster(distance, 8), 1.0);
            let rounds = battle.resolve_all(&mut player, 20, &mut rng);
            assert!(rounds.len() <= 20);
            assert!(rounds.last().unwrap().battle_over());
            assert!(rounds[..rounds.len() - 1].iter().all(|r| !r.battle_over()));
        }
    }
}
