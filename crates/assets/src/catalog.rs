//! Recipe catalog with JSON-based loading.
//!
//! The catalog is populated once at startup from a config file and is
//! read-only afterwards. A missing file is not an error: a commented
//! template is written in its place so server owners have a starting point.

use crate::{AssetError, Recipe};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Envelope format of the recipe config file.
#[derive(Debug, Serialize, Deserialize)]
struct RecipeFile {
    recipes: Vec<Recipe>,
}

/// Registry of crafting recipes indexed by id.
#[derive(Debug, Clone, Default)]
pub struct RecipeCatalog {
    recipes: HashMap<String, Recipe>,
    // Insertion order, so category listings stay stable across runs.
    order: Vec<String>,
}

impl RecipeCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load recipes from a JSON file. A missing file writes a template and
    /// returns an empty catalog.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "recipe file not found, writing template");
            Self::write_template(path)?;
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    /// Load recipes from a JSON string.
    pub fn load_from_str(content: &str) -> Result<Self, AssetError> {
        let file: RecipeFile = serde_json::from_str(content)?;

        let mut catalog = Self::new();
        for recipe in file.recipes {
            catalog.add_recipe(recipe)?;
        }

        tracing::info!(count = catalog.len(), "recipe catalog loaded");
        Ok(catalog)
    }

    /// Add a validated recipe to the catalog.
    pub fn add_recipe(&mut self, recipe: Recipe) -> Result<(), AssetError> {
        if recipe.result.is_empty() {
            return Err(AssetError::EmptyResult(recipe.id));
        }
        if recipe.ingredients.is_empty() {
            return Err(AssetError::NoIngredients(recipe.id));
        }
        if self.recipes.contains_key(&recipe.id) {
            return Err(AssetError::DuplicateRecipe(recipe.id));
        }

        self.order.push(recipe.id.clone());
        self.recipes.insert(recipe.id.clone(), recipe);
        Ok(())
    }

    /// Get a recipe by id.
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    /// All recipes in a category, in file order.
    pub fn by_category(&self, category: &str) -> Vec<&Recipe> {
        self.order
            .iter()
            .filter_map(|id| self.recipes.get(id))
            .filter(|recipe| recipe.category == category)
            .collect()
    }

    /// All recipes in file order.
    pub fn all(&self) -> impl Iterator<Item = &Recipe> {
        self.order.iter().filter_map(|id| self.recipes.get(id))
    }

    /// Number of loaded recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the catalog holds no recipes.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Write a starter recipe file for server owners to edit.
    fn write_template(path: &Path) -> Result<(), AssetError> {
        use crate::RecipeIngredient;
        use thirstcraft_core::ItemStack;

        let template = RecipeFile {
            recipes: vec![Recipe {
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
            }],
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&template)?)?;
        Ok(())
    }
}
