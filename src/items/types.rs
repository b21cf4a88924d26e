use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotType {
    Armor,
    Weapon,
}

impl SlotType {
    pub fn name(&self) -> &'static str {
        match self {
            SlotType::Armor => "Armor",
            SlotType::Weapon => "Weapon",
        }
    }
}

/// Every piece of equipment in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipmentId {
    ManholeVisor,
    ManholeBib,
    ManholeBriefs,
    ManholeBoots,
    SoupCruller,
    FrozenTwist,
    ZhongSword,
}

/// Every consumable in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConsumableId {
    /// Restores 5 + VIT/3 hp
    SpicySoup,
    /// Teleports the player home
    SewerHatch,
}

/// Special behavior attached to a catalog entry, dispatched on explicitly by
/// the combat and exploration code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EffectKind {
    None,
    /// Part of the four-piece manhole set (HP x1.5, curse chance halved)
    SetPiece,
    /// Full heal after winning a battle
    FullHealOnVictory,
    /// Lowers the monster encounter weight by this many percentage points
    ReducedEncounters { percent_points: u32 },
    /// Prepended to every message while wielded
    MessagePrefix(&'static str),
}

/// How a catalog item can be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Acquisition {
    Shop { price: u64 },
    /// Rolled on the flavor outcome of an exploration
    ExplorationDrop { percent: u32 },
    /// Rolled after every won battle
    VictoryDrop { percent: u32 },
}

impl Acquisition {
    pub fn price(&self) -> Option<u64> {
        match self {
            Acquisition::Shop { price } => Some(*price),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EquipmentEntry {
    pub id: EquipmentId,
    pub key: &'static str,
    pub name: &'static str,
    pub slot: SlotType,
    pub hp_bonus: i64,
    pub attack_bonus: i64,
    pub effect: EffectKind,
    pub acquisition: Acquisition,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConsumableEntry {
    pub id: ConsumableId,
    pub key: &'static str,
    pub name: &'static str,
    pub price: u64,
    pub description: &'static str,
}

/// Anything the player can name in a buy/equip/use command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemRef {
    Equipment(EquipmentId),
    Consumable(ConsumableId),
}
