// Map
pub const DEFAULT_MAP_SIZE: usize = 5;
pub const MAP_EXPANSION_STEP: usize = 2;

// Starting character
pub const NUM_ATTRIBUTES: usize = 4;
pub const START_STRENGTH: u32 = 5;
pub const START_AGILITY: u32 = 3;
pub const START_VITALITY: u32 = 4;
pub const START_LUCK: u32 = 2;
pub const START_XP_TO_NEXT: u64 = 100;
pub const XP_CURVE_FACTOR: f64 = 1.5;

// Derived stat formulas
pub const BASE_HP: i64 = 20;
pub const HP_PER_VITALITY: i64 = 3;
pub const BASE_ATTACK: i64 = 10;
pub const STRENGTH_PER_ATTACK: i64 = 2;
pub const BASE_DEFENSE: u32 = 2;
pub const AGILITY_PER_DEFENSE: u32 = 3;
pub const BASE_CRIT_CHANCE: u32 = 5;
pub const LUCK_PER_CRIT: u32 = 2;

// Curses and the manhole set
pub const BASE_CURSE_PROBABILITY: f64 = 0.10;
pub const SET_BONUS_HP_MULTIPLIER: f64 = 1.5;
pub const SET_BONUS_CURSE_MULTIPLIER: f64 = 0.5;
pub const MAX_EQUIPPED_ARMORS: usize = 4;

// Healing
pub const REST_BASE_HEAL: u32 = 5;
pub const REST_VITALITY_DIVISOR: u32 = 2;
pub const SOUP_BASE_HEAL: u32 = 5;
pub const SOUP_VITALITY_DIVISOR: u32 = 3;

// Combat
pub const PLAYER_BASE_HIT_CHANCE: i64 = 80;
pub const HIT_CHANCE_PER_AGILITY: i64 = 2;
pub const HIT_CHANCE_AGILITY_PIVOT: i64 = 5;
pub const PLAYER_MIN_HIT_CHANCE: i64 = 50;
pub const PLAYER_MAX_HIT_CHANCE: i64 = 95;
pub const MONSTER_HIT_CHANCE: u32 = 70;
pub const CRIT_DAMAGE_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_STALEMATE_ROUNDS: u32 = 20;
pub const ENCOUNTER_FLEE_HP_COST: u32 = 5;
pub const RETREAT_FLEE_HP_COST: u32 = 2;

// Monster scaling
pub const MONSTER_LEVEL_PER_DISTANCE: f64 = 0.2;
pub const MONSTER_XP_PER_REWARD: f64 = 3.0;
pub const MONSTER_MIN_XP: u64 = 5;

// Exploration
pub const FIRST_VISIT_MULTIPLIER: f64 = 3.33;
pub const REPEAT_VISIT_MULTIPLIER: f64 = 1.0;
pub const MIN_EVENT_WEIGHT: f64 = 0.05;
pub const MONSTER_BASE_WEIGHT: f64 = 0.20;
pub const MONSTER_WEIGHT_PER_DISTANCE: f64 = 0.02;
pub const MONSTER_WEIGHT_DISTANCE_CAP: f64 = 0.10;
pub const GOLD_FIND_WEIGHT: f64 = 0.20;
pub const TREASURE_WEIGHT: f64 = 0.20;
pub const BLESSING_WEIGHT: f64 = 0.10;
pub const FLAVOR_WEIGHT: f64 = 0.05;
pub const TREASURE_BONUS_ITEM_CHANCE: f64 = 0.3;
pub const BLESSING_XP: u64 = 20;
pub const RARE_FIND_XP: u64 = 50;
pub const FLAVOR_BASE_XP: f64 = 10.0;

// Death
pub const RESURRECTION_COST: u64 = 10;
pub const RESURRECTION_HP_DIVISOR: u32 = 3;
