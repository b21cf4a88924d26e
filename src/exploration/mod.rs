//! Exploration: weighted event table and its effects.

pub mod logic;
pub mod types;
pub mod weights;

pub use logic::*;
pub use types::*;
pub use weights::*;
