//! Buying from the home shop.

use super::catalog::{consumable, equipment};
use super::types::ItemRef;
use crate::character::Player;
use crate::core::error::GameError;

/// Price of an item in the shop, or why it is not for sale to this player.
pub fn quote(player: &Player, item: ItemRef) -> Result<u64, GameError> {
    match item {
        ItemRef::Consumable(id) => Ok(consumable(id).price),
        ItemRef::Equipment(id) => {
            let entry = equipment(id);
            let price = entry
                .acquisition
                .price()
                .ok_or(GameError::NotForSale(entry.name))?;
            if player.equipment().is_owned(id) {
                return Err(GameError::AlreadyOwned(entry.name));
            }
            Ok(price)
        }
    }
}

/// Charges the player and hands over the item. Nothing changes on error.
pub fn purchase(player: &mut Player, item: ItemRef) -> Result<String, GameError> {
    let price = quote(player, item)?;
    player.spend_currency(price)?;

    let name = match item {
        ItemRef::Consumable(id) => {
            player.add_consumable(id, 1);
            consumable(id).name
        }
        ItemRef::Equipment(id) => {
            player.obtain(id);
            equipment(id).name
        }
    };
    Ok(format!("Bought {} for {} gold.", name, price))
}
