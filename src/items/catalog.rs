//! Static item catalog.

use super::types::{
    Acquisition, ConsumableEntry, ConsumableId, EffectKind, EquipmentEntry, EquipmentId, ItemRef,
    SlotType,
};

pub static EQUIPMENT: [EquipmentEntry; 7] = [
    EquipmentEntry {
        id: EquipmentId::ManholeVisor,
        key: "manhole_visor",
        name: "Manhole Visor",
        slot: SlotType::Armor,
        hp_bonus: 10,
        attack_bonus: 0,
        effect: EffectKind::SetPiece,
        acquisition: Acquisition::Shop { price: 200 },
        description: "A face guard hammered out of a scavenged manhole cover. Sturdy.",
    },
    EquipmentEntry {
        id: EquipmentId::ManholeBib,
        key: "manhole_bib",
        name: "Manhole Bib",
        slot: SlotType::Armor,
        hp_bonus: 18,
        attack_bonus: 0,
        effect: EffectKind::SetPiece,
        acquisition: Acquisition::Shop { price: 350 },
        description: "A chest plate made from a manhole cover. Deeply uncomfortable.",
    },
    EquipmentEntry {
        id: EquipmentId::ManholeBriefs,
        key: "manhole_briefs",
        name: "Manhole Briefs",
        slot: SlotType::Armor,
        hp_bonus: 15,
        attack_bonus: 0,
        effect: EffectKind::SetPiece,
        acquisition: Acquisition::Shop { price: 280 },
        description: "Iron underwear with a reassuring sense of safety.",
    },
    EquipmentEntry {
        id: EquipmentId::ManholeBoots,
        key: "manhole_boots",
        name: "Manhole Boots",
        slot: SlotType::Armor,
        hp_bonus: 12,
        attack_bonus: 0,
        effect: EffectKind::SetPiece,
        acquisition: Acquisition::Shop { price: 200 },
        description: "Worn for far too long. The smell is a weapon of its own.",
    },
    EquipmentEntry {
        id: EquipmentId::SoupCruller,
        key: "soup_cruller",
        name: "Soup-Soaked Cruller",
        slot: SlotType::Weapon,
        hp_bonus: 0,
        attack_bonus: 10,
        effect: EffectKind::FullHealOnVictory,
        acquisition: Acquisition::Shop { price: 450 },
        description: "Soft from hours in spicy soup. Better eaten than swung.",
    },
    EquipmentEntry {
        id: EquipmentId::FrozenTwist,
        key: "frozen_twist",
        name: "Frozen Twist",
        slot: SlotType::Weapon,
        hp_bonus: 10,
        attack_bonus: 20,
        effect: EffectKind::ReducedEncounters { percent_points: 30 },
        acquisition: Acquisition::ExplorationDrop { percent: 10 },
        description: "Hard and cold. Good for hitting, good for blocking.",
    },
    EquipmentEntry {
        id: EquipmentId::ZhongSword,
        key: "zhong_sword",
        name: "Sword of Zhong",
        slot: SlotType::Weapon,
        hp_bonus: 0,
        attack_bonus: 50,
        effect: EffectKind::MessagePrefix("Zhong!"),
        acquisition: Acquisition::VictoryDrop { percent: 10 },
        description: "Holding it makes you shout the word whether you want to or not.",
    },
];

pub static CONSUMABLES: [ConsumableEntry; 2] = [
    ConsumableEntry {
        id: ConsumableId::SpicySoup,
        key: "spicy_soup",
        name: "Spicy Soup",
        price: 5,
        description: "Restores hp.",
    },
    ConsumableEntry {
        id: ConsumableId::SewerHatch,
        key: "sewer_hatch",
        name: "Sewer Hatch",
        price: 10,
        description: "Drop in and climb out at home.",
    },
];

/// The four pieces that make up the manhole set
pub const SET_PIECES: [EquipmentId; 4] = [
    EquipmentId::ManholeVisor,
    EquipmentId::ManholeBib,
    EquipmentId::ManholeBriefs,
    EquipmentId::ManholeBoots,
];

pub fn equipment(id: EquipmentId) -> &'static EquipmentEntry {
    let index = match id {
        EquipmentId::ManholeVisor => 0,
        EquipmentId::ManholeBib => 1,
        EquipmentId::ManholeBriefs => 2,
        EquipmentId::ManholeBoots => 3,
        EquipmentId::SoupCruller => 4,
        EquipmentId::FrozenTwist => 5,
        EquipmentId::ZhongSword => 6,
    };
    &EQUIPMENT[index]
}

pub fn consumable(id: ConsumableId) -> &'static ConsumableEntry {
    match id {
        ConsumableId::SpicySoup => &CONSUMABLES[0],
        ConsumableId::SewerHatch => &CONSUMABLES[1],
    }
}

/// Resolves a key ("zhong_sword") or display name ("Sword of Zhong"),
/// ignoring case.
pub fn find_item(name: &str) -> Option<ItemRef> {
    let name = name.trim();
    EQUIPMENT
        .iter()
        .find(|e| e.key.eq_ignore_ascii_case(name) || e.name.eq_ignore_ascii_case(name))
        .map(|e| ItemRef::Equipment(e.id))
        .or_else(|| {
            CONSUMABLES
                .iter()
                .find(|c| c.key.eq_ignore_ascii_case(name) || c.name.eq_ignore_ascii_case(name))
                .map(|c| ItemRef::Consumable(c.id))
        })
}

/// Items the shop sells, in display order
pub fn shop_listing() -> impl Iterator<Item = (ItemRef, &'static str, u64)> {
    let consumables = CONSUMABLES
        .iter()
        .map(|c| (ItemRef::Consumable(c.id), c.name, c.price));
    let equipment = EQUIPMENT.iter().filter_map(|e| {
        e.acquisition
            .price()
            .map(|price| (ItemRef::Equipment(e.id), e.name, price))
    });
    consumables.chain(equipment)
}

/// The item dropped on the flavor outcome of an exploration, if any
pub fn exploration_drop() -> Option<(&'static EquipmentEntry, u32)> {
    EQUIPMENT.iter().find_map(|e| match e.acquisition {
        Acquisition::ExplorationDrop { percent } => Some((e, percent)),
        _ => None,
    })
}

/// The item rolled for after a won battle, if any
pub fn victory_drop() -> Option<(&'static EquipmentEntry, u32)> {
    EQUIPMENT.iter().find_map(|e| match e.acquisition {
        Acquisition::VictoryDrop { percent } => Some((e, percent)),
        _ => None,
    })
}
