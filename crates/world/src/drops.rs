//! Dropped item entities for inventory overflow.
//!
//! When an item cannot fit in a player's inventory (craft delivery or
//! ingredient refund with a full inventory), it is dropped into the world at
//! the player's location and despawns after 5 minutes.

use serde::{Deserialize, Serialize};
use thirstcraft_core::{ItemStack, Vec3};

/// Maximum lifetime for dropped items (5 minutes = 6000 ticks at 20 TPS).
pub const ITEM_DESPAWN_TICKS: u32 = 6000;

/// A dropped item entity in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroppedItem {
    /// Unique ID for this dropped item.
    pub id: u64,
    /// World position.
    pub position: Vec3,
    /// Horizontal scatter velocity.
    pub vel_x: f64,
    /// Horizontal scatter velocity.
    pub vel_z: f64,
    /// The items being dropped.
    pub stack: ItemStack,
    /// Ticks remaining before despawn.
    pub lifetime_ticks: u32,
}

impl DroppedItem {
    /// Create a new dropped item at the given position.
    ///
    /// Items spawn with a small deterministic scatter velocity derived from
    /// their ID for visual separation.
    pub fn new(id: u64, position: Vec3, stack: ItemStack) -> Self {
        let vel_x = ((id % 100) as f64 - 50.0) / 200.0; // -0.25 to 0.25
        let vel_z = (((id / 100) % 100) as f64 - 50.0) / 200.0;

        Self {
            id,
            position,
            vel_x,
            vel_z,
            stack,
            lifetime_ticks: ITEM_DESPAWN_TICKS,
        }
    }

    /// Age the item by one tick. Returns `true` when it should despawn.
    pub fn update(&mut self) -> bool {
        if self.lifetime_ticks == 0 {
            return true;
        }
        self.lifetime_ticks -= 1;
        self.position.x += self.vel_x;
        self.position.z += self.vel_z;
        self.vel_x *= 0.5;
        self.vel_z *= 0.5;
        false
    }
}

/// World-level pool of dropped items.
#[derive(Debug, Clone, Default)]
pub struct DropPool {
    items: Vec<DroppedItem>,
    next_id: u64,
}

impl DropPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a stack into the world at `position`. Empty stacks are ignored.
    pub fn drop_at(&mut self, position: Vec3, stack: ItemStack) {
        if stack.is_empty() {
            return;
        }
        let id = self.next_id;
        self.next_id += 1;
        tracing::debug!(id, item = stack.item_id, count = stack.count, "item dropped into world");
        self.items.push(DroppedItem::new(id, position, stack));
    }

    /// Advance all dropped items by one tick, removing despawned entries.
    pub fn tick(&mut self) {
        self.items.retain_mut(|item| !item.update());
    }

    /// Number of live dropped items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the pool has no live items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over live dropped items.
    pub fn iter(&self) -> impl Iterator<Item = &DroppedItem> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_assigns_unique_ids() {
        let mut pool = DropPool::new();
        pool.drop_at(Vec3::default(), ItemStack::new(1, 1));
        pool.drop_at(Vec3::default(), ItemStack::new(1, 1));

        let ids: Vec<u64> = pool.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn empty_stacks_are_not_dropped() {
        let mut pool = DropPool::new();
        pool.drop_at(Vec3::default(), ItemStack::empty());
        assert!(pool.is_empty());
    }

    #[test]
    fn items_despawn_after_lifetime() {
        let mut pool = DropPool::new();
        pool.drop_at(Vec3::default(), ItemStack::new(1, 1));

        for _ in 0..ITEM_DESPAWN_TICKS {
            pool.tick();
        }
        assert_eq!(pool.len(), 1);

        pool.tick();
        assert!(pool.is_empty());
    }
}
