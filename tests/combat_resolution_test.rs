//! Integration test: combat resolution with scripted dice
//!
//! Every percent check in combat draws one f64, so a scripted source can
//! dictate each roll of a battle exactly.

mod common;

use common::ScriptedRng;
use wayfarer::character::Player;
use wayfarer::combat::{generate_monster, Battle, BattleOutcome};
use wayfarer::items::EquipmentId;

// =============================================================================
// Multi-round battles
// =============================================================================

#[test]
fn test_three_round_victory_follows_the_dice() {
    let mut player = Player::new();
    // Two steps out on a 5x5 map: hp 16, atk 9, def 2, 7 gold, 21 xp
    let monster = generate_monster(2, 8);
    assert_eq!(monster.name, "Buzhong");
    assert_eq!(monster.max_hp, 16);
    let mut battle = Battle::new(monster, 1.0);

    let mut rng = ScriptedRng::from_rolls(&[
        100, 1, // miss, monster hits for 9 - 3/2 = 8
        1, 100, 50, // hit for 12 - 2/2 = 11, no crit, monster hits again
        1, 1, // hit and crit: 11 × 1.5 = 16
        100, // no victory drop
    ]);

    let first = battle.resolve_round(&mut player, 20, &mut rng);
    assert!(!first.battle_over());
    assert_eq!(first.monster_hp, 16);
    assert_eq!(first.player_hp, 24);

    let second = battle.resolve_round(&mut player, 20, &mut rng);
    assert!(!second.battle_over());
    assert_eq!(second.monster_hp, 5);
    assert_eq!(second.player_hp, 16);

    let third = battle.resolve_round(&mut player, 20, &mut rng);
    assert!(third.victory());
    assert_eq!(third.round, 3);
    assert!(third.messages.iter().any(|m| m.starts_with("Critical hit!")));

    let rewards = third.rewards.unwrap();
    assert_eq!(rewards.gold, 7);
    assert_eq!(rewards.xp, 21);
    assert_eq!(rewards.drop, None);
    assert_eq!(player.currency(), 7);
    assert_eq!(player.xp, 21);
    assert_eq!(player.hp(), 16);
    assert!(!player.equipment().is_owned(EquipmentId::ZhongSword));
}

#[test]
fn test_defeat_forces_hp_to_zero() {
    let mut player = Player::new();
    // The far corner monster hits for 52 - 1 = 51
    let mut battle = Battle::new(generate_monster(8, 8), 3.33);
    let mut rng = ScriptedRng::from_rolls(&[100, 1]);

    let result = battle.resolve_round(&mut player, 20, &mut rng);
    assert_eq!(result.outcome, Some(BattleOutcome::Defeat));
    assert_eq!(result.player_hp, 0);
    assert!(result.rewards.is_none());
    assert!(!player.is_alive());
    assert_eq!(player.currency(), 0);
}

#[test]
fn test_high_defense_still_takes_chip_damage() {
    let mut player = Player::new();
    let mut battle = Battle::new(generate_monster(8, 8), 1.0);
    // 12 attack against 20 defense: max(1, 12 - 10) = 2
    let mut rng = ScriptedRng::from_rolls(&[1, 100, 100]);

    let result = battle.resolve_round(&mut player, 20, &mut rng);
    assert_eq!(result.monster_hp, 104 - 2);
    assert_eq!(result.player_hp, 32);
}

#[test]
fn test_stalemate_cap_is_configurable() {
    let mut player = Player::new();
    let mut battle = Battle::new(generate_monster(2, 8), 1.0);
    let misses = vec![100; 10];
    let mut rng = ScriptedRng::from_rolls(&misses);

    let rounds = battle.resolve_all(&mut player, 5, &mut rng);
    assert_eq!(rounds.len(), 5);
    assert_eq!(rounds[4].outcome, Some(BattleOutcome::Stalemate));
    assert!(rounds[4].rewards.is_none());
    assert_eq!(player.xp, 0);
}

#[test]
fn test_victory_drop_only_once() {
    let mut player = Player::new();
    player.obtain(EquipmentId::ZhongSword);

    let mut battle = Battle::new(generate_monster(0, 8), 1.0);
    let mut rng = ScriptedRng::from_rolls(&[1, 1, 1]);
    let result = battle.resolve_round(&mut player, 20, &mut rng);

    assert!(result.victory());
    assert_eq!(result.rewards.unwrap().drop, None);
}

#[test]
fn test_blessed_gold_on_victory() {
    let mut player = Player::new();
    player.bless_gold(20);

    // One crit kills; 7 gold plus 20% = 8
    let mut battle = Battle::new(generate_monster(2, 8), 1.0);
    let mut rng = ScriptedRng::from_rolls(&[1, 1, 100]);
    let rounds = battle.resolve_all(&mut player, 20, &mut rng);

    let rewards = rounds.last().unwrap().rewards.clone().unwrap();
    assert_eq!(rewards.gold, 8);
    assert_eq!(rewards.gold_bonus, 1);
    assert_eq!(player.currency(), 8);
}
