//! Player attributes, derived stats and progression.

pub mod attributes;
pub mod derived_stats;
pub mod player;

pub use attributes::*;
pub use derived_stats::*;
pub use player::*;
