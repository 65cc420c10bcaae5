//! Per-player session state with explicit join/leave lifecycle.
//!
//! Sessions are created when a player joins and removed when they leave;
//! nothing here outlives the connection, so the per-player maps cannot grow
//! without bound.

use std::collections::HashMap;
use thirstcraft_core::{GameMode, PlayerId, Vec3};
use thirstcraft_crafting::CraftQueue;
use thirstcraft_survival::{ActivityTracker, SurvivalStats};
use thirstcraft_world::Inventory;

/// Everything the simulation owns for one connected player.
#[derive(Debug)]
pub struct PlayerSession {
    /// The player this session belongs to.
    pub id: PlayerId,
    /// Current game mode; only survival players decay.
    pub mode: GameMode,
    /// The player's inventory.
    pub inventory: Inventory,
    /// Hydration/nutrition pair.
    pub stats: SurvivalStats,
    /// This player's craft queue.
    pub queue: CraftQueue,
    /// Activity accumulator consumed by hydration decay.
    pub(crate) hydration_activity: ActivityTracker,
    /// Activity accumulator consumed by nutrition decay. Separate from the
    /// hydration tracker so both consumers see the full interval's activity.
    pub(crate) nutrition_activity: ActivityTracker,
    /// Last observed position; delivery/refund drop location.
    pub(crate) last_position: Vec3,
}

impl PlayerSession {
    /// Create a session from the player's first observation.
    pub fn new(id: PlayerId, mode: GameMode, stats: SurvivalStats, position: Vec3) -> Self {
        Self {
            id,
            mode,
            inventory: Inventory::new(),
            stats,
            queue: CraftQueue::new(),
            hydration_activity: ActivityTracker::new(position, true),
            nutrition_activity: ActivityTracker::new(position, true),
            last_position: position,
        }
    }

    /// Feed one tick's movement observation into both activity trackers.
    pub(crate) fn observe(
        &mut self,
        position: Vec3,
        on_ground: bool,
        vertical_velocity: f64,
        now_ms: u64,
    ) {
        self.hydration_activity
            .observe(position, on_ground, vertical_velocity, now_ms);
        self.nutrition_activity
            .observe(position, on_ground, vertical_velocity, now_ms);
        self.last_position = position;
    }
}

/// The session store. One entry per connected player.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<PlayerId, PlayerSession>,
}

impl SessionManager {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a session, replacing any stale entry for the same player.
    pub fn insert(&mut self, session: PlayerSession) {
        self.sessions.insert(session.id, session);
    }

    /// Remove and return a player's session.
    pub fn remove(&mut self, id: PlayerId) -> Option<PlayerSession> {
        self.sessions.remove(&id)
    }

    /// Borrow a session.
    pub fn get(&self, id: PlayerId) -> Option<&PlayerSession> {
        self.sessions.get(&id)
    }

    /// Mutably borrow a session.
    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut PlayerSession> {
        self.sessions.get_mut(&id)
    }

    /// Whether a player has a live session.
    pub fn contains(&self, id: PlayerId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no players are connected.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Ids of all connected players.
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.sessions.keys().copied().collect()
    }
}
