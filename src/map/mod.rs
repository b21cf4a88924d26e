//! World map: region grid, generation, expansion and movement.

pub mod generation;
pub mod navigation;
pub mod types;

pub use generation::{expand_map, generate_map, REGION_NAMES};
pub use navigation::{step, Direction};
pub use types::{Region, RegionKind, WorldMap};
