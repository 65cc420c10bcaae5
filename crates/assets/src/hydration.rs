//! Per-item hydration values for consumables.
//!
//! Maps item ids to the hydration delta applied when a player finishes
//! consuming them. Values may be negative: some items dehydrate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thirstcraft_core::ItemId;

use crate::AssetError;

#[derive(Debug, Serialize, Deserialize)]
struct HydrationFile {
    items: Vec<HydrationEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct HydrationEntry {
    item_id: ItemId,
    value: f32,
}

/// Lookup table of consumable hydration values.
#[derive(Debug, Clone, Default)]
pub struct HydrationTable {
    values: HashMap<ItemId, f32>,
}

impl HydrationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the table from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let content = fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    /// Load the table from a JSON string. Non-finite values are skipped.
    pub fn load_from_str(content: &str) -> Result<Self, AssetError> {
        let file: HydrationFile = serde_json::from_str(content)?;

        let mut table = Self::new();
        for entry in file.items {
            if !entry.value.is_finite() {
                tracing::warn!(item = entry.item_id, "skipping non-finite hydration value");
                continue;
            }
            table.register(entry.item_id, entry.value);
        }
        Ok(table)
    }

    /// Register a hydration value for an item, replacing any existing one.
    pub fn register(&mut self, item_id: ItemId, value: f32) {
        self.values.insert(item_id, value);
    }

    /// Hydration delta for an item; 0.0 when the item has no entry.
    pub fn value_for(&self, item_id: ItemId) -> f32 {
        self.values.get(&item_id).copied().unwrap_or(0.0)
    }

    /// Number of registered consumables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_defaults_to_zero() {
        let table = HydrationTable::new();
        assert_eq!(table.value_for(42), 0.0);
    }

    #[test]
    fn load_accepts_negative_values() {
        let json = r#"{
            "items": [
                {"item_id": 1, "value": 35.0},
                {"item_id": 2, "value": -10.0}
            ]
        }"#;
        let table = HydrationTable::load_from_str(json).unwrap();
        assert_eq!(table.value_for(1), 35.0);
        assert_eq!(table.value_for(2), -10.0);
    }

    #[test]
    fn register_replaces_existing_value() {
        let mut table = HydrationTable::new();
        table.register(1, 5.0);
        table.register(1, 8.0);
        assert_eq!(table.value_for(1), 8.0);
        assert_eq!(table.len(), 1);
    }
}
