//! The craft start protocol.
//!
//! Materials are never consumed unless a queue slot is guaranteed to accept
//! the job: capacity and affordability are both checked before the
//! irreversible consume step, and a defensive refund covers the (should-be
//! impossible) case of the enqueue failing afterwards.

use crate::queue::return_items;
use crate::{CraftJob, CraftQueue};
use thiserror::Error;
use thirstcraft_assets::Recipe;
use thirstcraft_core::{ItemId, PlayerId, Vec3};
use thirstcraft_world::{DropPool, Inventory};

/// Why a craft could not be started. No state is mutated for any variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CraftStartError {
    /// The player's queue is at capacity.
    #[error("the crafting queue is full")]
    QueueFull,
    /// The player cannot afford the recipe's ingredients.
    #[error("not enough materials")]
    InsufficientMaterials,
    /// The queue rejected the job after materials were consumed; they have
    /// been refunded.
    #[error("the crafting queue rejected the job")]
    Rejected,
}

/// Start a craft for `owner`, consuming ingredients and enqueueing the job.
pub fn start_craft(
    queue: &mut CraftQueue,
    recipe: &Recipe,
    owner: PlayerId,
    now_ms: u64,
    inventory: &mut Inventory,
    drops: &mut DropPool,
    position: Vec3,
) -> Result<(), CraftStartError> {
    // 1. A slot must be free before anything is consumed.
    if !queue.can_enqueue() {
        return Err(CraftStartError::QueueFull);
    }

    // 2. Every ingredient must be present before anything is consumed.
    if !recipe.can_afford(inventory) {
        return Err(CraftStartError::InsufficientMaterials);
    }

    // 3. Consume. Irreversible from the queue's perspective.
    consume_ingredients(recipe, inventory, drops, position)?;

    // 4. Enqueue.
    let job = CraftJob::new(recipe, owner, now_ms);
    if !queue.enqueue(job, now_ms) {
        // 5. Cannot happen given step 1, but never strand consumed
        // materials if it somehow does.
        tracing::warn!(
            recipe = %recipe.id,
            %owner,
            "enqueue failed after materials were consumed, refunding"
        );
        return_items(&recipe.ingredient_counts(), inventory, drops, position);
        return Err(CraftStartError::Rejected);
    }

    tracing::debug!(recipe = %recipe.id, %owner, "craft started");
    Ok(())
}

/// Remove the recipe's ingredients from the inventory, rolling back on a
/// partial removal (which `can_afford` should have ruled out).
fn consume_ingredients(
    recipe: &Recipe,
    inventory: &mut Inventory,
    drops: &mut DropPool,
    position: Vec3,
) -> Result<(), CraftStartError> {
    let mut removed: Vec<(ItemId, u32)> = Vec::with_capacity(recipe.ingredients.len());

    for input in &recipe.ingredients {
        let got = inventory.remove_item(input.item_id, input.count);
        if got < input.count {
            tracing::warn!(
                recipe = %recipe.id,
                item = input.item_id,
                "partial ingredient removal, rolling back"
            );
            removed.push((input.item_id, got));
            return_items(&removed, inventory, drops, position);
            return Err(CraftStartError::InsufficientMaterials);
        }
        removed.push((input.item_id, got));
    }

    Ok(())
}
