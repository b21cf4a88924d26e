//! Pure combat math shared by the round resolver and exploration.
//!
//! Every percent check draws exactly one `f64`, so a mocked RNG maps
//! directly onto rolls: a draw of 0.0 is a roll of 1, a draw just under
//! 1.0 is a roll of 100.

use crate::core::constants::*;
use rand::Rng;

/// Result of a player attack calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackResult {
    /// Damage dealt (after crit multiplier if applicable).
    pub damage: u32,
    /// Whether this attack was a critical hit.
    pub is_crit: bool,
}

/// Rolls 1..=100 from a single uniform draw.
pub fn roll_percent(rng: &mut impl Rng) -> u32 {
    let draw: f64 = rng.gen();
    ((draw * 100.0) as u32 + 1).clamp(1, 100)
}

/// True when a 1..=100 roll lands at or under `chance`.
pub fn roll_under(chance: u32, rng: &mut impl Rng) -> bool {
    roll_percent(rng) <= chance
}

/// Player hit chance: 80% shifted 2 points per agility away from 5,
/// clamped to 50..=95.
pub fn player_hit_chance(agility: u32) -> u32 {
    let shift = (agility as i64 - HIT_CHANCE_AGILITY_PIVOT) * HIT_CHANCE_PER_AGILITY;
    (PLAYER_BASE_HIT_CHANCE + shift).clamp(PLAYER_MIN_HIT_CHANCE, PLAYER_MAX_HIT_CHANCE) as u32
}

/// Damage after defense: attack minus half the defender's defense, at least 1.
pub fn calculate_damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense / 2).max(1)
}

/// Applies the crit multiplier, truncating.
pub fn apply_crit(damage: u32) -> u32 {
    (damage as f64 * CRIT_DAMAGE_MULTIPLIER) as u32
}

/// Player damage against a monster, with the crit roll.
pub fn calculate_player_attack(
    attack: u32,
    crit_chance: u32,
    monster_defense: u32,
    rng: &mut impl Rng,
) -> AttackResult {
    let mut damage = calculate_damage(attack, monster_defense);
    let is_crit = roll_under(crit_chance, rng);
    if is_crit {
        damage = apply_crit(damage);
    }
    AttackResult { damage, is_crit }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_roll_percent_bounds() {
        let mut low = StepRng::new(0, 0);
        assert_eq!(roll_percent(&mut low), 1);

        let mut high = StepRng::new(u64::MAX, 0);
        assert_eq!(roll_percent(&mut high), 100);

        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        for _ in 0..1000 {
            let roll = roll_percent(&mut rng);
            assert!((1..=100).contains(&roll));
        }
    }

    #[test]
    fn test_roll_under_edges() {
        let mut low = StepRng::new(0, 0);
        assert!(roll_under(1, &mut low));
        assert!(!roll_under(0, &mut low));

        let mut high = StepRng::new(u64::MAX, 0);
        assert!(roll_under(100, &mut high));
        assert!(!roll_under(99, &mut high));
    }

    #[test]
    fn test_player_hit_chance() {
        assert_eq!(player_hit_chance(5), 80);
        assert_eq!(player_hit_chance(3), 76);
        assert_eq!(player_hit_chance(0), 70);
        assert_eq!(player_hit_chance(12), 94);
        assert_eq!(player_hit_chance(13), 95);
        assert_eq!(player_hit_chance(40), 95);
    }

    #[test]
    fn test_calculate_damage() {
        assert_eq!(calculate_damage(12, 0), 12);
        assert_eq!(calculate_damage(12, 5), 10);
        assert_eq!(calculate_damage(3, 20), 1);
    }

    #[test]
    fn test_crit_truncates() {
        assert_eq!(apply_crit(12), 18);
        assert_eq!(apply_crit(7), 10);
        assert_eq!(apply_crit(1), 1);
    }

    #[test]
    fn test_player_attack_crit_and_plain() {
        let mut always = StepRng::new(0, 0);
        let result = calculate_player_attack(12, 6, 2, &mut always);
        assert_eq!(
            result,
            AttackResult {
                damage: 16,
                is_crit: true
            }
        );

        let mut never = StepRng::new(u64::MAX, 0);
        let result = calculate_player_attack(12, 6, 2, &mut never);
        assert_eq!(
            result,
            AttackResult {
                damage: 11,
                is_crit: false
            }
        );
    }
}
