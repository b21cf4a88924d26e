//! Wayfarer - turn-based RPG simulation engine
//!
//! A player explores a wrapping grid of regions around home, fights
//! distance-scaled monsters, collects gold and gear, and grows the map once
//! every region has been explored. [`Game`] is the command surface; the
//! modules underneath hold the rules.

pub mod character;
pub mod combat;
pub mod core;
pub mod exploration;
pub mod items;
pub mod map;

pub use crate::core::{
    ConfigError, Game, GameConfig, GameError, GameEvent, GameStatus, StatusSnapshot, TurnReport,
};
pub use crate::map::Direction;
