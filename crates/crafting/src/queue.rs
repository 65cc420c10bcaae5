//! The per-player craft queue state machine.

use crate::{CraftJob, JobState};
use std::collections::VecDeque;
use thirstcraft_assets::RecipeCatalog;
use thirstcraft_core::{ItemId, ItemStack, Vec3};
use thirstcraft_world::{DropPool, Inventory};

/// Maximum queued jobs per player.
pub const MAX_QUEUE_SIZE: usize = 11;

/// Observable outcome of a queue tick.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueEvent {
    /// The head job finished and its result was handed to the player
    /// (or dropped into the world if the inventory was full).
    Delivered {
        /// Recipe the delivered job was started from.
        recipe_id: String,
        /// The delivered stack.
        stack: ItemStack,
    },
    /// The head job finished but no result could be resolved. The job is
    /// discarded; nothing enters the inventory.
    DeliveryFailed {
        /// Recipe of the failed job.
        recipe_id: String,
    },
}

/// Bounded FIFO of craft jobs. Only the head runs.
#[derive(Debug, Clone, Default)]
pub struct CraftQueue {
    jobs: VecDeque<CraftJob>,
    capacity: usize,
}

impl CraftQueue {
    /// Create a queue with the standard capacity.
    pub fn new() -> Self {
        Self::with_capacity(MAX_QUEUE_SIZE)
    }

    /// Create a queue with a custom capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            jobs: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Whether another job fits.
    pub fn can_enqueue(&self) -> bool {
        self.jobs.len() < self.capacity
    }

    /// Append a job. Returns `false` (leaving the queue unchanged) when at
    /// capacity. A job entering a non-empty queue is paused; the head of a
    /// previously empty queue keeps running.
    pub fn enqueue(&mut self, mut job: CraftJob, now_ms: u64) -> bool {
        if !self.can_enqueue() {
            return false;
        }
        if !self.jobs.is_empty() {
            job.pause(now_ms);
        }
        self.jobs.push_back(job);
        true
    }

    /// Advance the queue by one tick.
    ///
    /// Resumes a paused head (covers the head changing between ticks),
    /// delivers at most one completed job, and promotes the next job to
    /// running. Delivery overflow is dropped into the world at `position`.
    pub fn tick(
        &mut self,
        now_ms: u64,
        inventory: &mut Inventory,
        drops: &mut DropPool,
        position: Vec3,
        catalog: &RecipeCatalog,
    ) -> Option<QueueEvent> {
        let head = self.jobs.front_mut()?;
        if head.is_paused() {
            head.resume(now_ms);
        }
        if !head.update_completion(now_ms) {
            return None;
        }

        let job = self.jobs.pop_front()?;
        let event = deliver(&job, inventory, drops, position, catalog);

        if let Some(next) = self.jobs.front_mut() {
            next.resume(now_ms);
        }
        Some(event)
    }

    /// Remove the job at `index`, refunding its ingredients when it has not
    /// finished. Out-of-range indices are a no-op. Removing the head
    /// resumes the job behind it.
    pub fn cancel(
        &mut self,
        index: usize,
        now_ms: u64,
        inventory: &mut Inventory,
        drops: &mut DropPool,
        position: Vec3,
    ) {
        let Some(job) = self.jobs.remove(index) else {
            return;
        };

        if job.progress(now_ms) < 1.0 {
            return_items(job.ingredients(), inventory, drops, position);
        }

        if index == 0 {
            if let Some(head) = self.jobs.front_mut() {
                head.resume(now_ms);
            }
        }
    }

    /// Cancel everything: refund every unfinished job and empty the queue.
    pub fn clear(
        &mut self,
        now_ms: u64,
        inventory: &mut Inventory,
        drops: &mut DropPool,
        position: Vec3,
    ) {
        for job in self.jobs.drain(..) {
            if job.progress(now_ms) < 1.0 {
                return_items(job.ingredients(), inventory, drops, position);
            }
        }
    }

    /// Number of queued jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the queue holds no jobs.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate the queued jobs, head first.
    pub fn jobs(&self) -> impl Iterator<Item = &CraftJob> {
        self.jobs.iter()
    }

    /// Number of jobs currently in the running state. The queue invariant
    /// keeps this at most one, and only ever the head.
    pub fn running_count(&self) -> usize {
        self.jobs
            .iter()
            .filter(|job| job.state() == JobState::Running)
            .count()
    }
}

/// Resolve a completed job's result and hand it over. An empty snapshot
/// falls back to the catalog's canonical result before giving up.
fn deliver(
    job: &CraftJob,
    inventory: &mut Inventory,
    drops: &mut DropPool,
    position: Vec3,
    catalog: &RecipeCatalog,
) -> QueueEvent {
    let mut result = job.result().clone();

    if result.is_empty() {
        tracing::warn!(
            recipe = job.recipe_id(),
            "empty result snapshot at delivery, falling back to catalog"
        );
        if let Some(recipe) = catalog.get(job.recipe_id()) {
            result = recipe.result.clone();
        }
    }

    if result.is_empty() {
        tracing::warn!(recipe = job.recipe_id(), "craft delivery failed: no result item");
        return QueueEvent::DeliveryFailed {
            recipe_id: job.recipe_id().to_string(),
        };
    }

    if let Some(remainder) = inventory.add_item(result.clone()) {
        drops.drop_at(position, remainder);
    }

    QueueEvent::Delivered {
        recipe_id: job.recipe_id().to_string(),
        stack: result,
    }
}

/// Hand items back to the player, dropping whatever does not fit.
pub(crate) fn return_items(
    items: &[(ItemId, u32)],
    inventory: &mut Inventory,
    drops: &mut DropPool,
    position: Vec3,
) {
    for &(item_id, count) in items {
        if let Some(remainder) = inventory.add_item(ItemStack::new(item_id, count)) {
            drops.drop_at(position, remainder);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thirstcraft_assets::{Recipe, RecipeIngredient};
    use thirstcraft_core::PlayerId;

    const OWNER: PlayerId = PlayerId(7);
    const POS: Vec3 = Vec3 {
        x: 0.0,
        y: 64.0,
        z: 0.0,
    };

    fn recipe(id: &str, craft_ticks: u64) -> Recipe {
        Recipe {
            id: id.into(),
            category: "materials".into(),
            display_name: String::new(),
            result: ItemStack::new(30, 1),
            ingredients: vec![RecipeIngredient {
                item_id: 31,
                count: 3,
            }],
            craft_ticks,
        }
    }

    fn catalog_with(recipes: &[Recipe]) -> RecipeCatalog {
        let mut catalog = RecipeCatalog::new();
        for r in recipes {
            catalog.add_recipe(r.clone()).unwrap();
        }
        catalog
    }

    #[test]
    fn enqueue_rejects_beyond_capacity() {
        let r = recipe("rope", 100);
        let mut queue = CraftQueue::with_capacity(2);

        assert!(queue.enqueue(CraftJob::new(&r, OWNER, 0), 0));
        assert!(queue.enqueue(CraftJob::new(&r, OWNER, 0), 0));
        assert!(!queue.enqueue(CraftJob::new(&r, OWNER, 0), 0));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn only_the_head_runs() {
        let r = recipe("rope", 100);
        let mut queue = CraftQueue::new();

        for _ in 0..3 {
            queue.enqueue(CraftJob::new(&r, OWNER, 0), 0);
        }

        assert_eq!(queue.running_count(), 1);
        let states: Vec<JobState> = queue.jobs().map(|j| j.state()).collect();
        assert_eq!(
            states,
            vec![JobState::Running, JobState::Paused, JobState::Paused]
        );
    }

    #[test]
    fn tick_delivers_completed_head_and_resumes_next() {
        let r = recipe("rope", 100); // 5000 ms
        let catalog = catalog_with(&[r.clone()]);
        let mut queue = CraftQueue::new();
        let mut inv = Inventory::new();
        let mut drops = DropPool::new();

        queue.enqueue(CraftJob::new(&r, OWNER, 0), 0);
        queue.enqueue(CraftJob::new(&r, OWNER, 0), 0);

        // Not done yet.
        assert!(queue.tick(4999, &mut inv, &mut drops, POS, &catalog).is_none());

        let event = queue.tick(5000, &mut inv, &mut drops, POS, &catalog).unwrap();
        assert!(matches!(event, QueueEvent::Delivered { .. }));
        assert_eq!(inv.count_item(30), 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.running_count(), 1);

        // Second job starts its 5 s from the moment it became the head.
        assert!(queue.tick(9999, &mut inv, &mut drops, POS, &catalog).is_none());
        assert!(queue.tick(10_000, &mut inv, &mut drops, POS, &catalog).is_some());
        assert!(queue.is_empty());
    }

    #[test]
    fn at_most_one_delivery_per_tick() {
        let r = recipe("rope", 20); // 1000 ms
        let catalog = catalog_with(&[r.clone()]);
        let mut queue = CraftQueue::new();
        let mut inv = Inventory::new();
        let mut drops = DropPool::new();

        queue.enqueue(CraftJob::new(&r, OWNER, 0), 0);
        queue.enqueue(CraftJob::new(&r, OWNER, 0), 0);

        // Even far in the future only the head is delivered this tick.
        assert!(queue.tick(60_000, &mut inv, &mut drops, POS, &catalog).is_some());
        assert_eq!(inv.count_item(30), 1);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn cancel_refunds_unfinished_job() {
        let r = recipe("rope", 100);
        let mut queue = CraftQueue::new();
        let mut inv = Inventory::new();
        let mut drops = DropPool::new();

        queue.enqueue(CraftJob::new(&r, OWNER, 0), 0);
        queue.cancel(0, 2500, &mut inv, &mut drops, POS);

        assert!(queue.is_empty());
        assert_eq!(inv.count_item(31), 3);
    }

    #[test]
    fn cancel_of_finished_job_refunds_nothing() {
        let r = recipe("rope", 100);
        let mut queue = CraftQueue::new();
        let mut inv = Inventory::new();
        let mut drops = DropPool::new();

        queue.enqueue(CraftJob::new(&r, OWNER, 0), 0);
        // Elapsed past the full duration: progress clamps to 1.0.
        queue.cancel(0, 10_000, &mut inv, &mut drops, POS);

        assert!(queue.is_empty());
        assert_eq!(inv.count_item(31), 0);
    }

    #[test]
    fn cancel_head_resumes_successor() {
        let r = recipe("rope", 100);
        let mut queue = CraftQueue::new();
        let mut inv = Inventory::new();
        let mut drops = DropPool::new();

        for _ in 0..3 {
            queue.enqueue(CraftJob::new(&r, OWNER, 0), 0);
        }
        queue.cancel(0, 2500, &mut inv, &mut drops, POS);

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.running_count(), 1);
        assert_eq!(queue.jobs().next().unwrap().state(), JobState::Running);
    }

    #[test]
    fn cancel_middle_job_leaves_head_running() {
        let r = recipe("rope", 100);
        let mut queue = CraftQueue::new();
        let mut inv = Inventory::new();
        let mut drops = DropPool::new();

        for _ in 0..3 {
            queue.enqueue(CraftJob::new(&r, OWNER, 0), 0);
        }
        queue.cancel(1, 2500, &mut inv, &mut drops, POS);

        assert_eq!(queue.len(), 2);
        let states: Vec<JobState> = queue.jobs().map(|j| j.state()).collect();
        assert_eq!(states, vec![JobState::Running, JobState::Paused]);
    }

    #[test]
    fn cancel_out_of_range_is_a_noop() {
        let r = recipe("rope", 100);
        let mut queue = CraftQueue::new();
        let mut inv = Inventory::new();
        let mut drops = DropPool::new();

        queue.enqueue(CraftJob::new(&r, OWNER, 0), 0);
        queue.cancel(5, 0, &mut inv, &mut drops, POS);

        assert_eq!(queue.len(), 1);
        assert_eq!(inv.count_item(31), 0);
    }

    #[test]
    fn clear_refunds_every_unfinished_job() {
        let r = recipe("rope", 100);
        let mut queue = CraftQueue::new();
        let mut inv = Inventory::new();
        let mut drops = DropPool::new();

        for _ in 0..3 {
            queue.enqueue(CraftJob::new(&r, OWNER, 0), 0);
        }
        queue.clear(2500, &mut inv, &mut drops, POS);

        assert!(queue.is_empty());
        assert_eq!(inv.count_item(31), 9);
    }

    #[test]
    fn delivery_overflow_drops_into_world() {
        let r = recipe("rope", 20);
        let catalog = catalog_with(&[r.clone()]);
        let mut queue = CraftQueue::new();
        let mut inv = Inventory::new();
        let mut drops = DropPool::new();

        // Fill every slot with unrelated full stacks.
        for i in 0..36u16 {
            inv.add_item(ItemStack::new(100 + i, 64));
        }
        assert!(inv.is_full());

        queue.enqueue(CraftJob::new(&r, OWNER, 0), 0);
        let event = queue.tick(1000, &mut inv, &mut drops, POS, &catalog).unwrap();

        assert!(matches!(event, QueueEvent::Delivered { .. }));
        assert_eq!(drops.len(), 1);
    }

    #[test]
    fn fifo_delivery_order() {
        let a = recipe("rope_a", 20);
        let b = recipe("rope_b", 20);
        let c = recipe("rope_c", 20);
        let catalog = catalog_with(&[a.clone(), b.clone(), c.clone()]);
        let mut queue = CraftQueue::new();
        let mut inv = Inventory::new();
        let mut drops = DropPool::new();

        queue.enqueue(CraftJob::new(&a, OWNER, 0), 0);
        queue.enqueue(CraftJob::new(&b, OWNER, 0), 0);
        queue.enqueue(CraftJob::new(&c, OWNER, 0), 0);

        let mut delivered = Vec::new();
        let mut now = 0;
        while !queue.is_empty() {
            now += 50;
            if let Some(QueueEvent::Delivered { recipe_id, .. }) =
                queue.tick(now, &mut inv, &mut drops, POS, &catalog)
            {
                delivered.push(recipe_id);
            }
            assert!(queue.running_count() <= 1);
        }

        assert_eq!(delivered, vec!["rope_a", "rope_b", "rope_c"]);
    }
}
