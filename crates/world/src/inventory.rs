//! Inventory system for player storage.
//!
//! Provides a 36-slot inventory with ItemStack management including
//! stack merging and multi-slot removal.

use serde::{Deserialize, Serialize};
use thirstcraft_core::{ItemId, ItemStack};

/// Number of slots in a player inventory.
pub const INVENTORY_SIZE: usize = 36;

/// Player inventory with multiple slots.
#[derive(Debug, Clone)]
pub struct Inventory {
    slots: [Option<ItemStack>; INVENTORY_SIZE],
}

impl Serialize for Inventory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(INVENTORY_SIZE))?;
        for slot in &self.slots {
            seq.serialize_element(slot)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Inventory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let slots: Vec<Option<ItemStack>> = Vec::deserialize(deserializer)?;
        if slots.len() != INVENTORY_SIZE {
            return Err(serde::de::Error::custom(format!(
                "Expected {} slots, got {}",
                INVENTORY_SIZE,
                slots.len()
            )));
        }

        let slots_array: [Option<ItemStack>; INVENTORY_SIZE] = slots
            .try_into()
            .map_err(|_| serde::de::Error::custom("Failed to convert to array"))?;

        Ok(Inventory { slots: slots_array })
    }
}

impl Inventory {
    /// Create a new empty inventory.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Get an item stack from a slot.
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        if slot >= INVENTORY_SIZE {
            return None;
        }
        self.slots[slot].as_ref()
    }

    /// Set an item stack in a slot.
    pub fn set(&mut self, slot: usize, stack: Option<ItemStack>) -> bool {
        if slot >= INVENTORY_SIZE {
            return false;
        }
        self.slots[slot] = stack;
        true
    }

    /// Try to add an item stack, merging with existing stacks first.
    /// Returns the remaining items that couldn't fit (if any).
    pub fn add_item(&mut self, mut stack: ItemStack) -> Option<ItemStack> {
        if stack.is_empty() {
            return None;
        }

        // First pass: merge into existing stacks.
        for existing in self.slots.iter_mut().flatten() {
            if existing.can_merge(&stack) && !existing.is_full() {
                let remainder = existing.add(stack.count);
                if remainder == 0 {
                    return None;
                }
                stack.count = remainder;
            }
        }

        // Second pass: find an empty slot for the remainder.
        for slot in &mut self.slots {
            if slot.is_none() {
                *slot = Some(stack);
                return None;
            }
        }

        Some(stack)
    }

    /// Remove up to `amount` of an item type, drawing from multiple stacks.
    /// Returns the amount actually removed.
    pub fn remove_item(&mut self, item_id: ItemId, amount: u32) -> u32 {
        let mut remaining = amount;

        for slot in &mut self.slots {
            if remaining == 0 {
                break;
            }

            if let Some(stack) = slot {
                if stack.item_id == item_id {
                    remaining -= stack.remove(remaining);

                    // Remove empty stacks.
                    if stack.count == 0 {
                        *slot = None;
                    }
                }
            }
        }

        amount - remaining
    }

    /// Count the total number of a specific item across all slots.
    pub fn count_item(&self, item_id: ItemId) -> u32 {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref())
            .filter(|stack| stack.item_id == item_id)
            .map(|stack| stack.count)
            .sum()
    }

    /// Check if the inventory holds at least `amount` of an item.
    pub fn has_item(&self, item_id: ItemId, amount: u32) -> bool {
        self.count_item(item_id) >= amount
    }

    /// Get the number of empty slots.
    pub fn empty_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Check if the inventory is completely empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }

    /// Check if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_some())
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}
