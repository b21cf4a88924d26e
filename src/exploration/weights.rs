//! Outcome weights for a single explore action.

use super::types::ExploreOutcome;
use crate::core::constants::*;
use log::debug;
use rand::Rng;

/// Weighted outcome table for a region `distance` steps from home.
///
/// `encounter_reduction` is in percentage points off the monster weight.
/// Every weight is floored at 0.05 after adjustment.
pub fn outcome_weights(
    distance: u32,
    encounter_reduction: u32,
    curse_probability: f64,
) -> [(ExploreOutcome, f64); 8] {
    let distance_bonus = (MONSTER_WEIGHT_PER_DISTANCE * distance as f64).min(MONSTER_WEIGHT_DISTANCE_CAP);
    let monster = MONSTER_BASE_WEIGHT + distance_bonus - encounter_reduction as f64 / 100.0;

    [
        (ExploreOutcome::Monster, monster),
        (ExploreOutcome::GoldFind, GOLD_FIND_WEIGHT),
        (ExploreOutcome::Treasure, TREASURE_WEIGHT),
        (ExploreOutcome::AttackBlessing, BLESSING_WEIGHT),
        (ExploreOutcome::VitalityBlessing, BLESSING_WEIGHT),
        (ExploreOutcome::GoldBlessing, BLESSING_WEIGHT),
        (ExploreOutcome::Curse, curse_probability),
        (ExploreOutcome::Flavor, FLAVOR_WEIGHT),
    ]
    .map(|(outcome, weight)| (outcome, weight.max(MIN_EVENT_WEIGHT)))
}

/// Picks an entry with probability proportional to its weight using a
/// single uniform draw.
pub fn roll_weighted<T: Copy>(table: &[(T, f64)], rng: &mut impl Rng) -> Option<T> {
    let total: f64 = table.iter().map(|(_, w)| w.max(0.0)).sum();
    if table.is_empty() || total <= 0.0 {
        return None;
    }

    let draw: f64 = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (item, weight) in table {
        cumulative += weight.max(0.0);
        if draw < cumulative {
            return Some(*item);
        }
    }
    // Float rounding can leave the draw a hair past the last boundary
    table.last().map(|(item, _)| *item)
}

/// Rolls the outcome of one explore action.
pub fn roll_outcome(
    distance: u32,
    encounter_reduction: u32,
    curse_probability: f64,
    rng: &mut impl Rng,
) -> ExploreOutcome {
    let table = outcome_weights(distance, encounter_reduction, curse_probability);
    let outcome = roll_weighted(&table, rng).unwrap_or(ExploreOutcome::Flavor);
    debug!("explore roll at distance {}: {}", distance, outcome.name());
    outcome
}
