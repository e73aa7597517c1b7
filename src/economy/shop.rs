//! Shop: buying catalog items and selling owned ones
//!
//! Buying always stamps a new independent instance from the template.
//! Selling only ever touches the inventory, so equipped gear can't be sold.

use crate::combat::{sample_indices, Dice};
use crate::data::{Catalog, ItemTemplate};
use crate::entities::Player;
use crate::game::{ActionError, MessageSink};
use crate::items::{Item, ItemId};

/// Items sell for this fraction of their cost, rounded down
pub const SELL_PRICE_MULTIPLIER: f64 = 0.5;

/// Default number of offers per shop visit
pub const DEFAULT_STOCK_SIZE: usize = 5;

/// Gold received for selling `item`
pub fn sell_price(item: &Item) -> u32 {
    (f64::from(item.cost) * SELL_PRICE_MULTIPLIER).floor() as u32
}

/// Buy one instance of `template`
pub fn buy(
    player: &mut Player,
    template: &ItemTemplate,
    sink: &mut dyn MessageSink,
) -> Result<ItemId, ActionError> {
    if !player.spend_gold(template.cost) {
        sink.warn("You don't have enough gold!".to_string());
        return Err(ActionError::InsufficientGold {
            cost: template.cost,
            gold: player.gold(),
        });
    }
    let id = player.add_from_template(template);
    sink.item(format!("You bought {} for {} gold!", template.name, template.cost));
    log::debug!("Bought {} (#{}) for {}", template.name, id, template.cost);
    Ok(id)
}

/// Sell an unequipped inventory item; returns the gold received
pub fn sell(
    player: &mut Player,
    id: ItemId,
    sink: &mut dyn MessageSink,
) -> Result<u32, ActionError> {
    let Some(item) = player.inventory.remove_by_id(id) else {
        if player.equipment().contains(id) {
            sink.warn("Equipped items cannot be sold.".to_string());
        } else {
            sink.warn("You don't have that item.".to_string());
        }
        return Err(ActionError::ItemNotFound(id));
    };
    let price = sell_price(&item);
    player.add_gold(price);
    sink.item(format!("You sold {} for {} gold!", item.name, price));
    Ok(price)
}

/// One visit's worth of offers
#[derive(Debug, Clone, Default)]
pub struct Shop {
    stock: Vec<ItemTemplate>,
}

impl Shop {
    /// Random sample of up to `size` distinct catalog templates
    pub fn stock_from(catalog: &Catalog, size: usize, dice: &mut dyn Dice) -> Self {
        let templates = &catalog.items.templates;
        let stock = sample_indices(dice, templates.len(), size)
            .into_iter()
            .map(|i| templates[i].clone())
            .collect();
        Self { stock }
    }

    pub fn stock(&self) -> &[ItemTemplate] {
        &self.stock
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    /// Buy the offer at `index` (0-based)
    pub fn buy(
        &self,
        index: usize,
        player: &mut Player,
        sink: &mut dyn MessageSink,
    ) -> Result<ItemId, ActionError> {
        let Some(template) = self.stock.get(index) else {
            sink.warn("Invalid item selection for buying.".to_string());
            return Err(ActionError::NoSuchOffer(index));
        };
        buy(player, template, sink)
    }
}
