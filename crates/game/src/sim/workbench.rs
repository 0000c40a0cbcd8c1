use serde::Serialize;
use thiserror::Error;

use super::inventory::{Inventory, InventoryError};
use super::timer::Countdown;

pub const REPAIR_SECONDS: f32 = 2.0;
pub const BASE_REPAIR_BONUS: f32 = 0.2;
pub const UPGRADED_REPAIR_BONUS: f32 = 0.25;
pub const CATEGORY_MATCH_BONUS: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkbenchError {
    #[error("workbench is not open")]
    NotOpen,
    #[error("a repair is already running")]
    Busy,
    #[error("repair needs both a repair slot and a sacrifice slot")]
    MissingSelection,
    #[error("selected slot {slot} no longer holds an item")]
    SlotEmpty { slot: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum WorkbenchState {
    #[default]
    Closed,
    Open,
    Repairing,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RepairOutcome {
    pub repaired_slot: usize,
    pub sacrificed_slot: usize,
    pub bonus: f32,
    pub condition: f32,
    pub category_match: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Workbench {
    state: WorkbenchState,
    repair_slot: Option<usize>,
    sacrifice_slot: Option<usize>,
    timer: Countdown,
}

impl Workbench {
    pub fn state(&self) -> WorkbenchState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == WorkbenchState::Closed
    }

    pub fn repair_slot(&self) -> Option<usize> {
        self.repair_slot
    }

    pub fn sacrifice_slot(&self) -> Option<usize> {
        self.sacrifice_slot
    }

    pub fn repair_progress(&self) -> f32 {
        match self.state {
            WorkbenchState::Repairing => self.timer.fraction_elapsed(),
            _ => 0.0,
        }
    }

    pub fn open(&mut self) {
        self.state = WorkbenchState::Open;
        self.clear_selection();
        self.timer.stop();
    }

    pub fn close(&mut self) -> Result<(), WorkbenchError> {
        if self.state == WorkbenchState::Repairing {
            return Err(WorkbenchError::Busy);
        }
        self.state = WorkbenchState::Closed;
        self.clear_selection();
        Ok(())
    }

    /// Slot click while open: an assigned slot is unassigned, otherwise the slot fills
    /// the repair selection first and the sacrifice selection second. Returns whether
    /// anything changed.
    pub fn select_slot(&mut self, slot: usize, inventory: &Inventory) -> bool {
        if self.state != WorkbenchState::Open {
            return false;
        }
        if self.repair_slot == Some(slot) {
            self.repair_slot = None;
            return true;
        }
        if self.sacrifice_slot == Some(slot) {
            self.sacrifice_slot = None;
            return true;
        }
        if inventory.occupied(slot).is_none() {
            return false;
        }
        if self.repair_slot.is_none() {
            self.repair_slot = Some(slot);
            true
        } else if self.sacrifice_slot.is_none() {
            self.sacrifice_slot = Some(slot);
            true
        } else {
            false
        }
    }

    pub fn can_repair(&self, inventory: &Inventory) -> bool {
        self.state == WorkbenchState::Open && self.selected_pair(inventory).is_ok()
    }

    pub fn start_repair(&mut self, inventory: &Inventory) -> Result<(), WorkbenchError> {
        match self.state {
            WorkbenchState::Closed => return Err(WorkbenchError::NotOpen),
            WorkbenchState::Repairing => return Err(WorkbenchError::Busy),
            WorkbenchState::Open => {}
        }
        self.selected_pair(inventory)?;
        self.state = WorkbenchState::Repairing;
        self.timer.start(REPAIR_SECONDS);
        Ok(())
    }

    /// Advances a running repair and commits it once the timer runs out. The sacrifice
    /// is removed in the same step that raises the repaired condition.
    pub fn tick(
        &mut self,
        dt: f32,
        inventory: &mut Inventory,
        base_bonus: f32,
    ) -> Result<Option<RepairOutcome>, WorkbenchError> {
        if self.state != WorkbenchState::Repairing || !self.timer.tick(dt) {
            return Ok(None);
        }
        self.state = WorkbenchState::Open;
        let pair = self.selected_pair(inventory);
        self.clear_selection();
        let (repaired_slot, sacrificed_slot) = pair?;

        let (repaired, sacrificed) = match (
            inventory.occupied(repaired_slot),
            inventory.occupied(sacrificed_slot),
        ) {
            (Some(repaired), Some(sacrificed)) => (*repaired, *sacrificed),
            _ => return Err(WorkbenchError::MissingSelection),
        };
        let category_match = repaired.type_id.category() == sacrificed.type_id.category();
        let bonus = if category_match {
            base_bonus + CATEGORY_MATCH_BONUS
        } else {
            base_bonus
        };
        let condition = (repaired.condition + bonus).min(1.0);
        inventory
            .set_condition(repaired_slot, condition)
            .map_err(slot_error)?;
        inventory.remove(sacrificed_slot).map_err(slot_error)?;
        Ok(Some(RepairOutcome {
            repaired_slot,
            sacrificed_slot,
            bonus,
            condition,
            category_match,
        }))
    }

    fn selected_pair(&self, inventory: &Inventory) -> Result<(usize, usize), WorkbenchError> {
        let (Some(repair), Some(sacrifice)) = (self.repair_slot, self.sacrifice_slot) else {
            return Err(WorkbenchError::MissingSelection);
        };
        for slot in [repair, sacrifice] {
            if inventory.occupied(slot).is_none() {
                return Err(WorkbenchError::SlotEmpty { slot });
            }
        }
        Ok((repair, sacrifice))
    }

    fn clear_selection(&mut self) {
        self.repair_slot = None;
        self.sacrifice_slot = None;
    }
}

fn slot_error(err: InventoryError) -> WorkbenchError {
    match err {
        InventoryError::EmptySlot { slot } => WorkbenchError::SlotEmpty { slot },
        InventoryError::Full { .. } => WorkbenchError::MissingSelection,
    }
}
