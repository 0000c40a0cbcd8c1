use serde::Serialize;
use thiserror::Error;

use super::catalog::is_trade_eligible;
use super::inventory::{Inventory, MAX_SLOTS};
use super::workbench::{BASE_REPAIR_BONUS, UPGRADED_REPAIR_BONUS};

pub const MAX_DATA_LOGS: u32 = 5;
pub const DATA_LOG_BASE_COST: u32 = 2;
pub const TOOL_UPGRADE_COST: u32 = 3;
pub const CARRY_UPGRADE_COST: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EconomyError {
    #[error("slot {slot} is empty")]
    EmptySlot { slot: usize },
    #[error("item in slot {slot} is below trade condition")]
    BelowTradeCondition { slot: usize },
    #[error("{item:?} costs {cost} tokens, have {tokens}")]
    InsufficientTokens {
        item: ShopItem,
        cost: u32,
        tokens: u32,
    },
    #[error("{0:?} is no longer available")]
    SoldOut(ShopItem),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShopItem {
    DataLog,
    ToolUpgrade,
    CarryUpgrade,
}

impl ShopItem {
    pub const ALL: [ShopItem; 3] = [
        ShopItem::DataLog,
        ShopItem::ToolUpgrade,
        ShopItem::CarryUpgrade,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::DataLog => "DATA LOG",
            Self::ToolUpgrade => "TOOL UPGRADE",
            Self::CarryUpgrade => "CARRY UPGRADE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Purchase {
    /// Zero-based index of the log that was just unlocked.
    DataLog { entry: u32 },
    ToolUpgrade,
    CarryUpgrade,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Economy {
    tokens: u32,
    data_logs_purchased: u32,
    tool_upgrade: bool,
    carry_upgrade: bool,
}

impl Default for Economy {
    fn default() -> Self {
        Self::new()
    }
}

impl Economy {
    pub fn new() -> Self {
        Self {
            tokens: 0,
            data_logs_purchased: 0,
            tool_upgrade: false,
            carry_upgrade: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_tokens(tokens: u32) -> Self {
        Self {
            tokens,
            ..Self::new()
        }
    }

    pub fn tokens(&self) -> u32 {
        self.tokens
    }

    pub fn data_logs_purchased(&self) -> u32 {
        self.data_logs_purchased
    }

    pub fn base_repair_bonus(&self) -> f32 {
        if self.tool_upgrade {
            UPGRADED_REPAIR_BONUS
        } else {
            BASE_REPAIR_BONUS
        }
    }

    /// Current price, or `None` once the item can no longer be bought.
    pub fn cost(&self, item: ShopItem) -> Option<u32> {
        match item {
            ShopItem::DataLog if self.data_logs_purchased < MAX_DATA_LOGS => {
                Some(DATA_LOG_BASE_COST + self.data_logs_purchased)
            }
            ShopItem::ToolUpgrade if !self.tool_upgrade => Some(TOOL_UPGRADE_COST),
            ShopItem::CarryUpgrade if !self.carry_upgrade => Some(CARRY_UPGRADE_COST),
            _ => None,
        }
    }

    pub fn can_afford(&self, item: ShopItem) -> bool {
        self.cost(item).is_some_and(|cost| cost <= self.tokens)
    }

    pub fn trade_in(&mut self, slot: usize, inventory: &mut Inventory) -> Result<u32, EconomyError> {
        let entry = inventory
            .occupied(slot)
            .ok_or(EconomyError::EmptySlot { slot })?;
        if !is_trade_eligible(entry.condition) {
            return Err(EconomyError::BelowTradeCondition { slot });
        }
        inventory
            .remove(slot)
            .map_err(|_| EconomyError::EmptySlot { slot })?;
        self.tokens += 1;
        Ok(1)
    }

    /// Checks availability and price before touching any state, so a refused purchase
    /// leaves tokens and upgrades untouched.
    pub fn purchase(
        &mut self,
        item: ShopItem,
        inventory: &mut Inventory,
    ) -> Result<Purchase, EconomyError> {
        let cost = self.cost(item).ok_or(EconomyError::SoldOut(item))?;
        if cost > self.tokens {
            return Err(EconomyError::InsufficientTokens {
                item,
                cost,
                tokens: self.tokens,
            });
        }
        self.tokens -= cost;
        let purchase = match item {
            ShopItem::DataLog => {
                let entry = self.data_logs_purchased;
                self.data_logs_purchased += 1;
                Purchase::DataLog { entry }
            }
            ShopItem::ToolUpgrade => {
                self.tool_upgrade = true;
                Purchase::ToolUpgrade
            }
            ShopItem::CarryUpgrade => {
                self.carry_upgrade = true;
                inventory.set_capacity(MAX_SLOTS);
                Purchase::CarryUpgrade
            }
        };
        Ok(purchase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::ItemTypeId;

    #[test]
    fn trade_in_requires_condition_threshold() {
        let mut economy = Economy::new();
        let mut inventory = Inventory::new();
        inventory.add(ItemTypeId(0), 0.79).expect("room");
        inventory.add(ItemTypeId(0), 0.8).expect("room");

        assert_eq!(
            economy.trade_in(0, &mut inventory),
            Err(EconomyError::BelowTradeCondition { slot: 0 })
        );
        assert_eq!(economy.trade_in(1, &mut inventory), Ok(1));
        assert_eq!(economy.tokens(), 1);
        assert!(inventory.occupied(1).is_none());
        assert!(inventory.occupied(0).is_some());
        assert_eq!(
            economy.trade_in(1, &mut inventory),
            Err(EconomyError::EmptySlot { slot: 1 })
        );
    }

    #[test]
    fn data_log_cost_escalates_and_sells_out() {
        let mut economy = Economy::with_tokens(100);
        let mut inventory = Inventory::new();
        for (purchased, expected_cost) in [2, 3, 4, 5, 6].into_iter().enumerate() {
            assert_eq!(economy.data_logs_purchased(), purchased as u32);
            assert_eq!(economy.cost(ShopItem::DataLog), Some(expected_cost));
            let before = economy.tokens();
            assert_eq!(
                economy.purchase(ShopItem::DataLog, &mut inventory),
                Ok(Purchase::DataLog {
                    entry: purchased as u32
                })
            );
            assert_eq!(economy.tokens(), before - expected_cost);
        }

        assert_eq!(economy.data_logs_purchased(), 5);
        assert_eq!(economy.cost(ShopItem::DataLog), None);
        assert!(!economy.can_afford(ShopItem::DataLog));
        assert_eq!(
            economy.purchase(ShopItem::DataLog, &mut inventory),
            Err(EconomyError::SoldOut(ShopItem::DataLog))
        );
        assert_eq!(economy.tokens(), 80);
    }

    #[test]
    fn insufficient_tokens_never_deducts() {
        let mut economy = Economy::with_tokens(3);
        let mut inventory = Inventory::new();

        assert_eq!(
            economy.purchase(ShopItem::CarryUpgrade, &mut inventory),
            Err(EconomyError::InsufficientTokens {
                item: ShopItem::CarryUpgrade,
                cost: 4,
                tokens: 3
            })
        );
        assert_eq!(economy.tokens(), 3);
        assert_eq!(economy.cost(ShopItem::CarryUpgrade), Some(CARRY_UPGRADE_COST));
        assert_eq!(inventory.capacity(), 8);
    }

    #[test]
    fn upgrades_are_one_shot() {
        let mut economy = Economy::with_tokens(14);
        let mut inventory = Inventory::new();

        economy
            .purchase(ShopItem::ToolUpgrade, &mut inventory)
            .expect("affordable");
        economy
            .purchase(ShopItem::CarryUpgrade, &mut inventory)
            .expect("affordable");

        assert_eq!(economy.base_repair_bonus(), UPGRADED_REPAIR_BONUS);
        assert_eq!(inventory.capacity(), 10);
        assert_eq!(economy.tokens(), 7);
        assert_eq!(economy.cost(ShopItem::ToolUpgrade), None);
        assert_eq!(
            economy.purchase(ShopItem::CarryUpgrade, &mut inventory),
            Err(EconomyError::SoldOut(ShopItem::CarryUpgrade))
        );
        assert_eq!(economy.tokens(), 7);
    }
}
