//! Item system: catalog, player equipment and the shop.

pub mod catalog;
pub mod equipment;
pub mod shop;
pub mod types;

pub use catalog::*;
pub use equipment::*;
pub use shop::*;
pub use types::*;
