//! Recipe definitions for the timed crafting system.

use serde::{Deserialize, Serialize};
use thirstcraft_core::{ItemId, ItemStack};
use thirstcraft_world::Inventory;

/// Default craft duration when a recipe omits one (100 ticks = 5 seconds).
pub const DEFAULT_CRAFT_TICKS: u64 = 100;

/// One ingredient requirement of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Item required for crafting.
    pub item_id: ItemId,
    /// Amount of this item required.
    pub count: u32,
}

/// A timed crafting recipe.
///
/// Recipes are immutable after catalog load; the crafting core only reads
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe identifier (e.g., "iron_hatchet").
    pub id: String,
    /// Grouping for catalog browsing (e.g., "tools").
    #[serde(default)]
    pub category: String,
    /// Human-readable name shown on completion messages.
    #[serde(default)]
    pub display_name: String,
    /// Item produced by this recipe.
    pub result: ItemStack,
    /// Items consumed when the craft starts.
    pub ingredients: Vec<RecipeIngredient>,
    /// Craft duration in ticks (20 ticks = 1 second).
    #[serde(default = "default_craft_ticks")]
    pub craft_ticks: u64,
}

fn default_craft_ticks() -> u64 {
    DEFAULT_CRAFT_TICKS
}

impl Recipe {
    /// Check if the given inventory holds every required ingredient.
    pub fn can_afford(&self, inventory: &Inventory) -> bool {
        self.ingredients
            .iter()
            .all(|input| inventory.has_item(input.item_id, input.count))
    }

    /// Ingredient requirements as `(item, count)` pairs, the shape consumed
    /// by the craft start/refund paths.
    pub fn ingredient_counts(&self) -> Vec<(ItemId, u32)> {
        self.ingredients
            .iter()
            .map(|input| (input.item_id, input.count))
            .collect()
    }

    /// Name used in user-facing messages, falling back to the id.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.id
        } else {
            &self.display_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hatchet() -> Recipe {
        Recipe {
            id: "iron_hatchet".into(),
            category: "tools".into(),
            display_name: "Iron Hatchet".into(),
            result: ItemStack::new(20, 1),
            ingredients: vec![
                RecipeIngredient {
                    item_id: 10,
                    count: 2,
                },
                RecipeIngredient {
                    item_id: 11,
                    count: 1,
                },
            ],
            craft_ticks: 100,
        }
    }

    #[test]
    fn can_afford_requires_all_ingredients() {
        let recipe = hatchet();
        let mut inv = Inventory::new();
        assert!(!recipe.can_afford(&inv));

        inv.add_item(ItemStack::new(10, 2));
        assert!(!recipe.can_afford(&inv));

        inv.add_item(ItemStack::new(11, 1));
        assert!(recipe.can_afford(&inv));
    }

    #[test]
    fn label_falls_back_to_id() {
        let mut recipe = hatchet();
        assert_eq!(recipe.label(), "Iron Hatchet");
        recipe.display_name.clear();
        assert_eq!(recipe.label(), "iron_hatchet");
    }

    #[test]
    fn craft_ticks_defaults_when_omitted() {
        let json = r#"{
            "id": "rope",
            "result": {"item_id": 30, "count": 1},
            "ingredients": [{"item_id": 31, "count": 3}]
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.craft_ticks, DEFAULT_CRAFT_TICKS);
    }
}
