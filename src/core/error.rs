use thiserror::Error;

/// Recoverable failures of an engine command.
///
/// Every variant leaves the game state exactly as it was before the call, so
/// the caller can show the message and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("region {0} does not exist on this map")]
    UnknownRegion(usize),

    #[error("this region has already been explored")]
    AlreadyExplored,

    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("unknown item: {0}")]
    UnknownItem(String),

    #[error("{0} is not sold in the shop")]
    NotForSale(&'static str),

    #[error("you already own {0}")]
    AlreadyOwned(&'static str),

    #[error("you do not own {0}")]
    NotOwned(&'static str),

    #[error("{0} is already equipped")]
    AlreadyEquipped(&'static str),

    #[error("{0} is not equipped")]
    NotEquipped(&'static str),

    #[error("at most {max} armor pieces can be worn at once")]
    ArmorSlotsFull { max: usize },

    #[error("already wielding {equipped}, unequip it first")]
    WeaponSlotOccupied { equipped: &'static str },

    #[error("{0} cannot be equipped")]
    NotEquippable(&'static str),

    #[error("{0} cannot be used")]
    NotConsumable(&'static str),

    #[error("you have no {0} left")]
    OutOfStock(&'static str),

    #[error("you can only do that at home")]
    NotAtHome,

    #[error("your hp is already full")]
    AlreadyFullHp,

    #[error("a battle is in progress")]
    BattleInProgress,

    #[error("there is no battle to fight")]
    NoActiveBattle,

    #[error("you have fallen and cannot act")]
    PlayerDefeated,

    #[error("you are still alive")]
    PlayerAlive,

    #[error("resurrection costs {cost} gold, you have {available}")]
    CannotAffordResurrection { cost: u64, available: u64 },

    #[error("the run is over, start a new game")]
    GameOver,
}

/// Errors raised while loading a [`GameConfig`](crate::core::config::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
