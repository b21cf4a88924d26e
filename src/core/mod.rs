//! Engine facade, configuration, errors and game constants.

pub mod config;
pub mod constants;
pub mod error;
pub mod game;

pub use config::*;
pub use error::*;
pub use game::*;
