use super::catalog::{equipment, SET_PIECES};
use super::types::{EffectKind, EquipmentEntry, EquipmentId, SlotType};
use crate::core::constants::MAX_EQUIPPED_ARMORS;
use crate::core::error::GameError;
use serde::Serialize;
use std::collections::BTreeSet;

/// The player's owned gear and what is currently worn.
///
/// Ownership and slots live here; stat effects are applied by
/// `Player::recompute_derived`, so callers should go through the `Player`
/// wrappers which recompute after every change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Equipment {
    owned: BTreeSet<EquipmentId>,
    armors: Vec<EquipmentId>,
    weapon: Option<EquipmentId>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_owned(&self, id: EquipmentId) -> bool {
        self.owned.contains(&id)
    }

    /// Marks an item obtained. Returns false if it was already owned.
    pub fn grant(&mut self, id: EquipmentId) -> bool {
        self.owned.insert(id)
    }

    pub fn owned(&self) -> impl Iterator<Item = EquipmentId> + '_ {
        self.owned.iter().copied()
    }

    pub fn armors(&self) -> &[EquipmentId] {
        &self.armors
    }

    pub fn weapon(&self) -> Option<EquipmentId> {
        self.weapon
    }

    pub fn is_equipped(&self, id: EquipmentId) -> bool {
        self.weapon == Some(id) || self.armors.contains(&id)
    }

    pub fn equip(&mut self, id: EquipmentId) -> Result<(), GameError> {
        let entry = equipment(id);
        if !self.is_owned(id) {
            return Err(GameError::NotOwned(entry.name));
        }
        if self.is_equipped(id) {
            return Err(GameError::AlreadyEquipped(entry.name));
        }

        match entry.slot {
            SlotType::Armor => {
                if self.armors.len() >= MAX_EQUIPPED_ARMORS {
                    return Err(GameError::ArmorSlotsFull {
                        max: MAX_EQUIPPED_ARMORS,
                    });
                }
                self.armors.push(id);
            }
            SlotType::Weapon => {
                if let Some(current) = self.weapon {
                    return Err(GameError::WeaponSlotOccupied {
                        equipped: equipment(current).name,
                    });
                }
                self.weapon = Some(id);
            }
        }
        Ok(())
    }

    pub fn unequip(&mut self, id: EquipmentId) -> Result<(), GameError> {
        let entry = equipment(id);
        match entry.slot {
            SlotType::Armor => match self.armors.iter().position(|&a| a == id) {
                Some(index) => {
                    self.armors.remove(index);
                    Ok(())
                }
                None => Err(GameError::NotEquipped(entry.name)),
            },
            SlotType::Weapon if self.weapon == Some(id) => {
                self.weapon = None;
                Ok(())
            }
            SlotType::Weapon => Err(GameError::NotEquipped(entry.name)),
        }
    }

    /// Catalog entries for everything worn: armors first, then the weapon
    pub fn iter_equipped(&self) -> impl Iterator<Item = &'static EquipmentEntry> + '_ {
        self.armors
            .iter()
            .chain(self.weapon.iter())
            .map(|&id| equipment(id))
    }

    /// All four manhole pieces worn at once
    pub fn has_full_set(&self) -> bool {
        SET_PIECES.iter().all(|piece| self.armors.contains(piece))
    }

    /// The effect of the wielded weapon, or `EffectKind::None`
    pub fn weapon_effect(&self) -> EffectKind {
        self.weapon
            .map(|id| equipment(id).effect)
            .unwrap_or(EffectKind::None)
    }

    /// Percentage points the wielded weapon shaves off the encounter weight
    pub fn encounter_reduction(&self) -> u32 {
        match self.weapon_effect() {
            EffectKind::ReducedEncounters { percent_points } => percent_points,
            _ => 0,
        }
    }

    pub fn heals_on_victory(&self) -> bool {
        self.weapon_effect() == EffectKind::FullHealOnVictory
    }

    pub fn message_prefix(&self) -> Option<&'static str> {
        match self.weapon_effect() {
            EffectKind::MessagePrefix(prefix) => Some(prefix),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owning_everything() -> Equipment {
        let mut eq = Equipment::new();
        for entry in super::super::catalog::EQUIPMENT.iter() {
            eq.grant(entry.id);
        }
        eq
    }

    #[test]
    fn test_equipment_starts_empty() {
        let eq = Equipment::new();
        assert_eq!(eq.iter_equipped().count(), 0);
        assert_eq!(eq.owned().count(), 0);
        assert!(eq.weapon().is_none());
        assert_eq!(eq.weapon_effect(), EffectKind::None);
    }

    #[test]
    fn test_grant_is_idempotent() {
        let mut eq = Equipment::new();
        assert!(eq.grant(EquipmentId::SoupCruller));
        assert!(!eq.grant(EquipmentId::SoupCruller));
        assert!(eq.is_owned(EquipmentId::SoupCruller));
    }

    #[test]
    fn test_equip_requires_ownership() {
        let mut eq = Equipment::new();
        assert_eq!(
            eq.equip(EquipmentId::ManholeBib),
            Err(GameError::NotOwned("Manhole Bib"))
        );
        assert!(!eq.is_equipped(EquipmentId::ManholeBib));
    }

    #[test]
    fn test_equip_all_four_armors_and_weapon() {
        let mut eq = owning_everything();
        for piece in SET_PIECES {
            eq.equip(piece).unwrap();
        }
        eq.equip(EquipmentId::ZhongSword).unwrap();

        assert_eq!(eq.iter_equipped().count(), 5);
        assert!(eq.has_full_set());
        assert_eq!(eq.message_prefix(), Some("Zhong!"));
    }

    #[test]
    fn test_second_weapon_rejected() {
        let mut eq = owning_everything();
        eq.equip(EquipmentId::SoupCruller).unwrap();
        assert_eq!(
            eq.equip(EquipmentId::FrozenTwist),
            Err(GameError::WeaponSlotOccupied {
                equipped: "Soup-Soaked Cruller"
            })
        );
        assert_eq!(eq.weapon(), Some(EquipmentId::SoupCruller));

        eq.unequip(EquipmentId::SoupCruller).unwrap();
        eq.equip(EquipmentId::FrozenTwist).unwrap();
        assert_eq!(eq.encounter_reduction(), 30);
    }

    #[test]
    fn test_double_equip_rejected() {
        let mut eq = owning_everything();
        eq.equip(EquipmentId::ManholeBoots).unwrap();
        assert_eq!(
            eq.equip(EquipmentId::ManholeBoots),
            Err(GameError::AlreadyEquipped("Manhole Boots"))
        );
        assert_eq!(eq.armors().len(), 1);
    }

    #[test]
    fn test_unequip_not_equipped() {
        let mut eq = owning_everything();
        assert_eq!(
            eq.unequip(EquipmentId::ManholeVisor),
            Err(GameError::NotEquipped("Manhole Visor"))
        );
        assert_eq!(
            eq.unequip(EquipmentId::ZhongSword),
            Err(GameError::NotEquipped("Sword of Zhong"))
        );
    }

    #[test]
    fn test_removing_a_piece_breaks_set() {
        let mut eq = owning_everything();
        for piece in SET_PIECES {
            eq.equip(piece).unwrap();
        }
        eq.unequip(EquipmentId::ManholeBriefs).unwrap();
        assert!(!eq.has_full_set());
    }

    #[test]
    fn test_cruller_heals_on_victory() {
        let mut eq = owning_everything();
        assert!(!eq.heals_on_victory());
        eq.equip(EquipmentId::SoupCruller).unwrap();
        assert!(eq.heals_on_victory());
        assert_eq!(eq.encounter_reduction(), 0);
        assert_eq!(eq.message_prefix(), None);
    }
}
