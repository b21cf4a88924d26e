use super::types::{ExploreOutcome, ExploreReport};
use super::weights::roll_outcome;
use crate::character::Player;
use crate::combat::{generate_monster, roll_under};
use crate::core::constants::*;
use crate::core::error::GameError;
use crate::items::{consumable, exploration_drop, ConsumableId, ItemRef};
use crate::map::WorldMap;
use rand::seq::SliceRandom;
use rand::Rng;

const LORE: [&str; 6] = [
    "An old man on a stool insists the noodles here were better forty years ago.",
    "A faded billboard promises the best braised noodles in the province.",
    "Someone has painted \"ZHONG\" in red on every lamppost.",
    "A delivery scooter zips past carrying twelve bowls of soup without spilling a drop.",
    "Two aunties argue over the price of garlic. Neither gives an inch.",
    "A street performer recites a very long poem about a very short bridge.",
];

/// Reward multiplier for a visit
pub fn visit_multiplier(first_visit: bool) -> f64 {
    if first_visit {
        FIRST_VISIT_MULTIPLIER
    } else {
        REPEAT_VISIT_MULTIPLIER
    }
}

/// Explores `region_id`, applying the result to the player and marking the
/// region explored.
///
/// A monster outcome only generates the monster; fighting it is up to the
/// caller. Errors leave the map and player untouched.
pub fn explore_region(
    map: &mut WorldMap,
    player: &mut Player,
    region_id: usize,
    allow_revisits: bool,
    rng: &mut impl Rng,
) -> Result<ExploreReport, GameError> {
    let region = map
        .region(region_id)
        .ok_or(GameError::UnknownRegion(region_id))?;
    if region.explored && !allow_revisits {
        return Err(GameError::AlreadyExplored);
    }

    let first_visit = !region.explored;
    let multiplier = visit_multiplier(first_visit);
    let distance = region.distance_from_home;
    let name = region.name;

    let outcome = roll_outcome(
        distance,
        player.equipment().encounter_reduction(),
        player.curse_probability(),
        rng,
    );

    let mut report = ExploreReport::new(region_id, outcome, first_visit, multiplier);
    report.messages.push(format!("You explore {}.", name));

    match outcome {
        ExploreOutcome::Monster => {
            let monster = generate_monster(distance, map.max_distance());
            report.messages.push(format!(
                "A wild {} appears! (HP {}, ATK {}, DEF {})",
                monster.name, monster.max_hp, monster.attack, monster.defense
            ));
            report.encounter = Some(monster);
        }
        ExploreOutcome::GoldFind => {
            let base = if first_visit {
                rng.gen_range(5..15)
            } else {
                rng.gen_range(2..6)
            };
            let gold = (base as f64 * multiplier) as u64;
            credit_gold(player, &mut report, gold, "You find");
            grant_xp(player, &mut report, gold / 2);
        }
        ExploreOutcome::Treasure => {
            let base = if first_visit {
                rng.gen_range(8..20)
            } else {
                rng.gen_range(3..8)
            };
            let gold = (base as f64 * multiplier) as u64;
            credit_gold(player, &mut report, gold, "You dig up a treasure chest with");
            grant_xp(player, &mut report, (gold as f64 / 1.5) as u64);

            if rng.gen_bool(TREASURE_BONUS_ITEM_CHANCE) {
                let item = if rng.gen_bool(0.5) {
                    ConsumableId::SpicySoup
                } else {
                    ConsumableId::SewerHatch
                };
                player.add_consumable(item, 1);
                report.found = Some(ItemRef::Consumable(item));
                report
                    .messages
                    .push(format!("Tucked in the chest: {}.", consumable(item).name));
            }
        }
        ExploreOutcome::AttackBlessing => {
            let amount = rng.gen_range(1..=2);
            player.bless_attack(amount);
            report
                .messages
                .push(format!("A shrine blesses your arm. Attack +{}.", amount));
            grant_xp(player, &mut report, BLESSING_XP);
        }
        ExploreOutcome::VitalityBlessing => {
            player.bless_vitality();
            report
                .messages
                .push("Fresh air fills your lungs. Vitality +1, fully healed.".to_string());
            grant_xp(player, &mut report, BLESSING_XP);
        }
        ExploreOutcome::GoldBlessing => {
            let percent = rng.gen_range(10..=20);
            player.bless_gold(percent);
            report.messages.push(format!(
                "The god of wealth smiles on you. Gold found +{}%.",
                percent
            ));
            grant_xp(player, &mut report, BLESSING_XP);
        }
        ExploreOutcome::Curse => {
            if rng.gen_bool(0.5) {
                let amount = rng.gen_range(1..=2);
                player.curse_max_hp(amount);
                report
                    .messages
                    .push(format!("A chill settles in your bones. Max HP -{}.", amount));
            } else {
                player.curse_attack(1);
                report
                    .messages
                    .push("Your grip weakens. Attack -1.".to_string());
            }
        }
        ExploreOutcome::Flavor => {
            let rare = exploration_drop().filter(|(item, _)| !player.equipment().is_owned(item.id));
            match rare {
                Some((item, percent)) if roll_under(percent, rng) => {
                    player.obtain(item.id);
                    report.found = Some(ItemRef::Equipment(item.id));
                    report
                        .messages
                        .push(format!("Half buried in frost you find the {}!", item.name));
                    grant_xp(player, &mut report, RARE_FIND_XP);
                }
                _ => {
                    let line = LORE.choose(rng).copied().unwrap_or(LORE[0]);
                    report.messages.push(line.to_string());
                    grant_xp(player, &mut report, (FLAVOR_BASE_XP * multiplier) as u64);
                }
            }
        }
    }

    map.mark_explored(region_id);
    Ok(report)
}

fn credit_gold(player: &mut Player, report: &mut ExploreReport, gold: u64, verb: &str) {
    let (total, bonus) = player.add_currency(gold);
    report.gold += total;
    if bonus > 0 {
        report
            .messages
            .push(format!("{} {} gold (+{} blessed).", verb, total, bonus));
    } else {
        report.messages.push(format!("{} {} gold.", verb, total));
    }
}

fn grant_xp(player: &mut Player, report: &mut ExploreReport, xp: u64) {
    if xp == 0 {
        return;
    }
    report.xp += xp;
    report.messages.push(format!("You gain {} xp.", xp));
    let levels = player.add_experience(xp);
    if levels > 0 {
        report.levels_gained += levels;
        report
            .messages
            .push(format!("Level up! You are now level {}.", player.level));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::generate_map;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_unknown_region_rejected() {
        let mut rng = create_test_rng();
        let mut map = generate_map(5, &mut rng);
        let mut player = Player::new();
        assert_eq!(
            explore_region(&mut map, &mut player, 99, false, &mut rng),
            Err(GameError::UnknownRegion(99))
        );
    }

    #[test]
    fn test_explored_region_rejected_without_change() {
        let mut rng = create_test_rng();
        let mut map = generate_map(5, &mut rng);
        let mut player = Player::new();
        let home = map.home_id();

        let result = explore_region(&mut map, &mut player, home, false, &mut rng);
        assert_eq!(result, Err(GameError::AlreadyExplored));
        assert_eq!(player.currency(), 0);
        assert_eq!(player.xp, 0);
    }

    #[test]
    fn test_first_roll_is_monster_on_low_draw() {
        let mut rng = create_test_rng();
        let mut map = generate_map(5, &mut rng);
        let mut player = Player::new();

        // Region 8 is directly above home
        let mut low = StepRng::new(0, 0);
        let report = explore_region(&mut map, &mut player, 8, false, &mut low).unwrap();
        assert_eq!(report.outcome, ExploreOutcome::Monster);
        assert!(report.first_visit);
        assert!((report.multiplier - 3.33).abs() < 1e-9);

        let monster = report.encounter.unwrap();
        assert_eq!(monster.name, "Doujiao");
        assert!(map.region(8).unwrap().explored);
    }

    #[test]
    fn test_revisits_use_repeat_multiplier() {
        let mut rng = create_test_rng();
        let mut map = generate_map(5, &mut rng);
        let mut player = Player::new();
        explore_region(&mut map, &mut player, 1, false, &mut rng).unwrap();

        assert_eq!(
            explore_region(&mut map, &mut player, 1, false, &mut rng),
            Err(GameError::AlreadyExplored)
        );
        let report = explore_region(&mut map, &mut player, 1, true, &mut rng).unwrap();
        assert!(!report.first_visit);
        assert!((report.multiplier - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_exploring_everything_marks_all() {
        let mut rng = create_test_rng();
        let mut map = generate_map(5, &mut rng);
        let mut player = Player::new();

        for id in 1..=25 {
            if id == map.home_id() {
                continue;
            }
            let report = explore_region(&mut map, &mut player, id, false, &mut rng).unwrap();
            assert_eq!(report.region_id, id);
            assert!(!report.messages.is_empty());
            if report.outcome != ExploreOutcome::Monster {
                assert!(report.encounter.is_none());
            }
        }
        assert!(map.all_explored());
        assert!(player.hp() <= player.max_hp());
    }

    #[test]
    fn test_many_explorations_keep_player_consistent() {
        let mut rng = create_test_rng();
        let mut player = Player::new();
        for _ in 0..50 {
            let mut map = generate_map(7, &mut rng);
            let id = rng.gen_range(1..=49);
            if let Ok(report) = explore_region(&mut map, &mut player, id, true, &mut rng) {
                if let Some(ItemRef::Equipment(id)) = report.found {
                    assert!(player.equipment().is_owned(id));
                }
            }
            assert!(player.hp() <= player.max_hp());
            assert!(player.xp < player.xp_to_next);
        }
    }
}
