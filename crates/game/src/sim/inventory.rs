use serde::Serialize;
use thiserror::Error;

use super::catalog::ItemTypeId;

pub const MAX_SLOTS: usize = 10;
pub const BASE_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("inventory is full ({capacity} slots)")]
    Full { capacity: usize },
    #[error("slot {slot} is empty or out of range")]
    EmptySlot { slot: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct InventorySlot {
    pub type_id: ItemTypeId,
    pub condition: f32,
    pub occupied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inventory {
    slots: [InventorySlot; MAX_SLOTS],
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            slots: [InventorySlot::default(); MAX_SLOTS],
            capacity: BASE_CAPACITY,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn count(&self) -> usize {
        self.usable().iter().filter(|slot| slot.occupied).count()
    }

    /// Slots inside the current capacity, occupied or not.
    pub fn usable(&self) -> &[InventorySlot] {
        &self.slots[..self.capacity]
    }

    pub fn slot(&self, slot: usize) -> Option<&InventorySlot> {
        self.usable().get(slot)
    }

    pub fn occupied(&self, slot: usize) -> Option<&InventorySlot> {
        self.slot(slot).filter(|entry| entry.occupied)
    }

    /// Occupies the lowest free slot and returns its index.
    pub fn add(&mut self, type_id: ItemTypeId, condition: f32) -> Result<usize, InventoryError> {
        let capacity = self.capacity;
        let (index, slot) = self.slots[..capacity]
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| !slot.occupied)
            .ok_or(InventoryError::Full { capacity })?;
        *slot = InventorySlot {
            type_id,
            condition: condition.clamp(0.0, 1.0),
            occupied: true,
        };
        Ok(index)
    }

    pub fn remove(&mut self, slot: usize) -> Result<InventorySlot, InventoryError> {
        let entry = self
            .slots
            .get_mut(slot)
            .filter(|entry| entry.occupied)
            .ok_or(InventoryError::EmptySlot { slot })?;
        let removed = *entry;
        entry.occupied = false;
        entry.condition = 0.0;
        Ok(removed)
    }

    pub fn set_condition(&mut self, slot: usize, condition: f32) -> Result<(), InventoryError> {
        let entry = self
            .slots
            .get_mut(slot)
            .filter(|entry| entry.occupied)
            .ok_or(InventoryError::EmptySlot { slot })?;
        entry.condition = condition.clamp(0.0, 1.0);
        Ok(())
    }

    /// Raises the ceiling; requests below the current capacity are ignored.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = self.capacity.max(capacity.min(MAX_SLOTS));
    }
}
