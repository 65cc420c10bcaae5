//! A single queued craft with explicit pause/resume accounting.

use thirstcraft_assets::Recipe;
use thirstcraft_core::{ItemId, ItemStack, PlayerId, TICK_MS};

/// Lifecycle of a queued craft.
///
/// Transitions are driven by queue position: a job runs while it is the
/// head and pauses while anything sits in front of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// The head job: elapsed time accrues.
    Running,
    /// Waiting behind another job: progress is frozen.
    Paused,
    /// Finished; awaiting delivery.
    Completed,
}

/// A single in-progress craft in a player's queue.
#[derive(Debug, Clone)]
pub struct CraftJob {
    recipe_id: String,
    owner: PlayerId,
    result: ItemStack,
    ingredients: Vec<(ItemId, u32)>,
    total_ms: u64,
    started_at_ms: u64,
    paused_elapsed_ms: u64,
    state: JobState,
}

impl CraftJob {
    /// Create a running job from a recipe. Snapshots the result and the
    /// ingredient counts so cancel refunds exactly what was consumed even if
    /// the catalog is reloaded underneath the queue.
    pub fn new(recipe: &Recipe, owner: PlayerId, now_ms: u64) -> Self {
        Self {
            recipe_id: recipe.id.clone(),
            owner,
            result: recipe.result.clone(),
            ingredients: recipe.ingredient_counts(),
            // Guard against zero-duration recipes: progress math divides by this.
            total_ms: (recipe.craft_ticks * TICK_MS).max(1),
            started_at_ms: now_ms,
            paused_elapsed_ms: 0,
            state: JobState::Running,
        }
    }

    /// Recipe this job was started from.
    pub fn recipe_id(&self) -> &str {
        &self.recipe_id
    }

    /// The player who queued this job.
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Snapshot of the recipe result taken at start.
    pub fn result(&self) -> &ItemStack {
        &self.result
    }

    /// Ingredient counts consumed at start; the refund source.
    pub fn ingredients(&self) -> &[(ItemId, u32)] {
        &self.ingredients
    }

    /// Current lifecycle state.
    pub fn state(&self) -> JobState {
        self.state
    }

    /// Whether the job is paused.
    pub fn is_paused(&self) -> bool {
        self.state == JobState::Paused
    }

    /// Whether the job has finished.
    pub fn is_completed(&self) -> bool {
        self.state == JobState::Completed
    }

    /// Freeze progress. Called when the job ceases to be the head.
    pub fn pause(&mut self, now_ms: u64) {
        if self.state == JobState::Running {
            self.paused_elapsed_ms = now_ms.saturating_sub(self.started_at_ms);
            self.state = JobState::Paused;
        }
    }

    /// Continue from frozen progress. Called when the job becomes the head.
    pub fn resume(&mut self, now_ms: u64) {
        if self.state == JobState::Paused {
            self.started_at_ms = now_ms.saturating_sub(self.paused_elapsed_ms);
            self.state = JobState::Running;
        }
    }

    /// Completion fraction in `[0, 1]`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        let elapsed = match self.state {
            JobState::Completed => return 1.0,
            JobState::Paused => self.paused_elapsed_ms,
            JobState::Running => now_ms.saturating_sub(self.started_at_ms),
        };
        (elapsed as f32 / self.total_ms as f32).clamp(0.0, 1.0)
    }

    /// Promote a running job whose time has elapsed to `Completed`.
    /// Returns whether the job is now completed. Paused jobs never complete.
    pub fn update_completion(&mut self, now_ms: u64) -> bool {
        if self.state == JobState::Running && self.progress(now_ms) >= 1.0 {
            self.state = JobState::Completed;
        }
        self.state == JobState::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thirstcraft_assets::RecipeIngredient;

    fn recipe(craft_ticks: u64) -> Recipe {
        Recipe {
            id: "rope".into(),
            category: "materials".into(),
            display_name: "Rope".into(),
            result: ItemStack::new(30, 1),
            ingredients: vec![RecipeIngredient {
                item_id: 31,
                count: 3,
            }],
            craft_ticks,
        }
    }

    const OWNER: PlayerId = PlayerId(1);

    #[test]
    fn progress_advances_with_time() {
        let job = CraftJob::new(&recipe(100), OWNER, 0);
        // 100 ticks = 5000 ms.
        assert_eq!(job.progress(0), 0.0);
        assert!((job.progress(2500) - 0.5).abs() < 1e-6);
        assert_eq!(job.progress(5000), 1.0);
        assert_eq!(job.progress(99_999), 1.0);
    }

    #[test]
    fn pause_freezes_progress() {
        let mut job = CraftJob::new(&recipe(100), OWNER, 0);
        job.pause(2500);
        assert!(job.is_paused());

        // Time passes while paused; progress stays frozen at 50%.
        assert!((job.progress(60_000) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn resume_continues_from_frozen_elapsed() {
        let mut job = CraftJob::new(&recipe(100), OWNER, 0);
        job.pause(2500);
        job.resume(10_000);

        // 50% done, 2500 ms of work remaining.
        assert!((job.progress(10_000) - 0.5).abs() < 1e-6);
        assert_eq!(job.progress(12_500), 1.0);
    }

    #[test]
    fn pause_and_resume_are_idempotent() {
        let mut job = CraftJob::new(&recipe(100), OWNER, 0);
        job.pause(1000);
        job.pause(4000); // Already paused: no effect.
        assert!((job.progress(9000) - 0.2).abs() < 1e-6);

        job.resume(10_000);
        job.resume(20_000); // Already running: no effect.
        assert!((job.progress(10_000) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn paused_jobs_never_complete() {
        let mut job = CraftJob::new(&recipe(100), OWNER, 0);
        job.pause(0);
        assert!(!job.update_completion(1_000_000));
        assert!(job.is_paused());
    }

    #[test]
    fn completion_is_sticky() {
        let mut job = CraftJob::new(&recipe(100), OWNER, 0);
        assert!(job.update_completion(5000));
        assert!(job.is_completed());
        assert_eq!(job.progress(0), 1.0);
    }

    #[test]
    fn zero_tick_recipe_completes_immediately() {
        let mut job = CraftJob::new(&recipe(0), OWNER, 0);
        assert!(job.update_completion(1));
    }

    #[test]
    fn snapshots_capture_recipe_contents() {
        let job = CraftJob::new(&recipe(100), OWNER, 0);
        assert_eq!(job.recipe_id(), "rope");
        assert_eq!(job.result().item_id, 30);
        assert_eq!(job.ingredients(), &[(31, 3)]);
    }
}
