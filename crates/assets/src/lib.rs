#![warn(missing_docs)]
//! Recipe catalog + consumable table loaded from JSON configuration.

mod catalog;
mod hydration;
mod recipe;

pub use catalog::RecipeCatalog;
pub use hydration::HydrationTable;
pub use recipe::{Recipe, RecipeIngredient};

use thiserror::Error;

/// Errors emitted while loading configuration files.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Wrap IO errors when reading config files.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two recipes declared the same id.
    #[error("duplicate recipe id: {0}")]
    DuplicateRecipe(String),
    /// A recipe produces nothing.
    #[error("recipe {0} has an empty result")]
    EmptyResult(String),
    /// A recipe consumes nothing.
    #[error("recipe {0} has no ingredients")]
    NoIngredients(String),
}
