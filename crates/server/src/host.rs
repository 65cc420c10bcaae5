//! The per-tick simulation driver.
//!
//! One `tick` call per simulated game tick. The embedding runtime supplies
//! a movement observation for each active player; the host accumulates
//! activity, applies stat decay on its fixed cadence, advances craft
//! queues, and pushes stat sync frames. A failure while processing one
//! player is logged at that player's boundary and never blocks the others.

use crate::{PlayerSession, ProfileStore, SessionManager};
use thiserror::Error;
use thirstcraft_assets::{HydrationTable, RecipeCatalog};
use thirstcraft_core::{GameMode, ItemId, PlayerId, StatKind, Vec3};
use thirstcraft_crafting::{start_craft, CraftStartError, QueueEvent};
use thirstcraft_net::{PacketSink, StatSyncer};
use thirstcraft_survival::{
    apply_decay, decay_amount, DamageCause, DamageSink, DecayOutcome, DecayParams,
    EnvironmentSample, SurvivalStats, DECAY_INTERVAL_TICKS, DEPLETION_DAMAGE,
};
use thirstcraft_world::{DropPool, SimTime, WeatherToggle};

/// Interval between periodic stat syncs (5 seconds).
pub const SYNC_INTERVAL_TICKS: u64 = 100;

/// Host tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct HostConfig {
    /// Ticks per in-game day.
    pub ticks_per_day: u64,
    /// Decay cadence in ticks.
    pub decay_interval_ticks: u64,
    /// Periodic stat sync cadence in ticks.
    pub sync_interval_ticks: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            ticks_per_day: 24000,
            decay_interval_ticks: DECAY_INTERVAL_TICKS,
            sync_interval_ticks: SYNC_INTERVAL_TICKS,
        }
    }
}

/// One tick's movement sample for a player, supplied by the embedding
/// runtime.
#[derive(Debug, Clone, Copy)]
pub struct PlayerObservation {
    /// World position this tick.
    pub position: Vec3,
    /// Whether the player is standing on the ground.
    pub on_ground: bool,
    /// Vertical velocity (positive is upward).
    pub vertical_velocity: f64,
    /// Whether the player is in water.
    pub in_water: bool,
    /// Whether the player has unobstructed sky above.
    pub can_see_sky: bool,
}

/// Errors returned from player-initiated host actions.
#[derive(Debug, Error)]
pub enum HostError {
    /// No session exists for the player.
    #[error("{0} is not connected")]
    UnknownPlayer(PlayerId),
    /// The recipe id is not in the catalog.
    #[error("unknown recipe: {0}")]
    UnknownRecipe(String),
    /// The craft start protocol rejected the request.
    #[error(transparent)]
    Craft(#[from] CraftStartError),
}

/// The authoritative simulation host.
pub struct SurvivalHost {
    config: HostConfig,
    time: SimTime,
    weather: WeatherToggle,
    catalog: RecipeCatalog,
    hydration_values: HydrationTable,
    sessions: SessionManager,
    drops: DropPool,
    syncer: StatSyncer,
    damage: Box<dyn DamageSink>,
    sink: Box<dyn PacketSink>,
    profiles: Option<ProfileStore>,
}

impl SurvivalHost {
    /// Create a host with the default configuration.
    pub fn new(
        catalog: RecipeCatalog,
        hydration_values: HydrationTable,
        damage: Box<dyn DamageSink>,
        sink: Box<dyn PacketSink>,
    ) -> Self {
        Self::with_config(HostConfig::default(), catalog, hydration_values, damage, sink)
    }

    /// Create a host with explicit tuning.
    pub fn with_config(
        config: HostConfig,
        catalog: RecipeCatalog,
        hydration_values: HydrationTable,
        damage: Box<dyn DamageSink>,
        sink: Box<dyn PacketSink>,
    ) -> Self {
        Self {
            config,
            time: SimTime::new(config.ticks_per_day),
            weather: WeatherToggle::new(),
            catalog,
            hydration_values,
            sessions: SessionManager::new(),
            drops: DropPool::new(),
            syncer: StatSyncer::new(),
            damage,
            sink,
            profiles: None,
        }
    }

    /// Attach a profile store; joins load from it and leaves save to it.
    pub fn with_profiles(mut self, profiles: ProfileStore) -> Self {
        self.profiles = Some(profiles);
        self
    }

    /// Simulation clock.
    pub fn time(&self) -> &SimTime {
        &self.time
    }

    /// Mutable simulation clock, for hosts that set the time of day.
    pub fn time_mut(&mut self) -> &mut SimTime {
        &mut self.time
    }

    /// Mutable weather state.
    pub fn weather_mut(&mut self) -> &mut WeatherToggle {
        &mut self.weather
    }

    /// Connected sessions.
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Mutable session access (tests and host adapters).
    pub fn sessions_mut(&mut self) -> &mut SessionManager {
        &mut self.sessions
    }

    /// Items currently dropped in the world.
    pub fn drops(&self) -> &DropPool {
        &self.drops
    }

    /// The loaded recipe catalog.
    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    /// Create a session for a joining player, loading their persisted stats
    /// (fail-open) and pushing an initial sync.
    pub fn join(&mut self, id: PlayerId, mode: GameMode, position: Vec3) {
        let stats = match &self.profiles {
            Some(store) => store.load(id),
            None => SurvivalStats::new(),
        };

        if self.sessions.contains(id) {
            tracing::warn!(player = %id, "join for already-connected player, replacing session");
        }

        self.sessions
            .insert(PlayerSession::new(id, mode, stats, position));
        tracing::info!(player = %id, ?mode, "player joined");

        self.sync_player_stats(id);
    }

    /// Tear down a leaving player's session: cancel the queue with refund,
    /// persist the stat profile, and drop all per-player state.
    ///
    /// Returns the torn-down session so the embedding runtime can carry its
    /// inventory (including just-refunded ingredients) into the player save.
    pub fn leave(&mut self, id: PlayerId) -> Option<PlayerSession> {
        let now_ms = self.time.now_ms();

        let Some(mut session) = self.sessions.remove(id) else {
            tracing::warn!(player = %id, "leave for unknown player");
            return None;
        };

        let position = session.last_position;
        session
            .queue
            .clear(now_ms, &mut session.inventory, &mut self.drops, position);

        if let Some(store) = &self.profiles {
            if let Err(error) = store.save(id, &session.stats) {
                tracing::error!(player = %id, %error, "failed to persist stat profile");
            }
        }

        self.syncer.forget(id);
        tracing::info!(player = %id, "player left");
        Some(session)
    }

    /// Run one simulated tick.
    ///
    /// `observations` carries this tick's movement sample for each active
    /// player. Craft queues advance for every connected player regardless
    /// of whether they were observed this tick.
    pub fn tick(&mut self, observations: &[(PlayerId, PlayerObservation)]) {
        self.time.advance();
        let now_ms = self.time.now_ms();

        self.drops.tick();

        for (id, observation) in observations {
            if let Err(error) = self.process_observation(*id, observation, now_ms) {
                tracing::error!(player = %id, %error, "player tick failed, skipping");
            }
        }

        for id in self.sessions.player_ids() {
            if let Err(error) = self.process_queue(id, now_ms) {
                tracing::error!(player = %id, %error, "queue tick failed, skipping");
            }
        }
    }

    /// Start a craft from a player action.
    pub fn start_craft(&mut self, player: PlayerId, recipe_id: &str) -> Result<(), HostError> {
        let now_ms = self.time.now_ms();

        let recipe = self
            .catalog
            .get(recipe_id)
            .ok_or_else(|| HostError::UnknownRecipe(recipe_id.to_string()))?;
        let session = self
            .sessions
            .get_mut(player)
            .ok_or(HostError::UnknownPlayer(player))?;

        let position = session.last_position;
        start_craft(
            &mut session.queue,
            recipe,
            player,
            now_ms,
            &mut session.inventory,
            &mut self.drops,
            position,
        )?;
        Ok(())
    }

    /// Cancel the job at `index` in a player's queue, refunding if unfinished.
    pub fn cancel_craft(&mut self, player: PlayerId, index: usize) -> Result<(), HostError> {
        let now_ms = self.time.now_ms();
        let session = self
            .sessions
            .get_mut(player)
            .ok_or(HostError::UnknownPlayer(player))?;

        let position = session.last_position;
        session.queue.cancel(
            index,
            now_ms,
            &mut session.inventory,
            &mut self.drops,
            position,
        );
        Ok(())
    }

    /// Cancel every job in a player's queue, refunding unfinished ones.
    pub fn clear_queue(&mut self, player: PlayerId) -> Result<(), HostError> {
        let now_ms = self.time.now_ms();
        let session = self
            .sessions
            .get_mut(player)
            .ok_or(HostError::UnknownPlayer(player))?;

        let position = session.last_position;
        session
            .queue
            .clear(now_ms, &mut session.inventory, &mut self.drops, position);
        Ok(())
    }

    /// Apply the hydration value of a consumed item (finished drinking or
    /// eating). Returns the delta actually applied.
    pub fn consume_item(&mut self, player: PlayerId, item_id: ItemId) -> Result<f32, HostError> {
        let value = self.hydration_values.value_for(item_id);
        if value == 0.0 {
            return Ok(0.0);
        }

        let session = self
            .sessions
            .get_mut(player)
            .ok_or(HostError::UnknownPlayer(player))?;

        let applied = if value >= 0.0 {
            session.stats.hydration.add(value)
        } else {
            -session.stats.hydration.subtract(-value)
        };
        let level = session.stats.hydration.level();

        tracing::info!(player = %player, item = item_id, applied, level, "consumable applied");

        let now_ms = self.time.now_ms();
        self.syncer
            .send_stat(self.sink.as_mut(), player, StatKind::Hydration, level, now_ms);
        Ok(applied)
    }

    /// Push both stat values to a player's remote view immediately.
    pub fn sync_player_stats(&mut self, player: PlayerId) {
        let now_ms = self.time.now_ms();
        let Some(session) = self.sessions.get(player) else {
            return;
        };
        let hydration = session.stats.hydration.level();
        let nutrition = session.stats.nutrition.level();

        self.syncer.send_stat(
            self.sink.as_mut(),
            player,
            StatKind::Hydration,
            hydration,
            now_ms,
        );
        self.syncer.send_stat(
            self.sink.as_mut(),
            player,
            StatKind::Nutrition,
            nutrition,
            now_ms,
        );
    }

    fn process_observation(
        &mut self,
        id: PlayerId,
        observation: &PlayerObservation,
        now_ms: u64,
    ) -> anyhow::Result<()> {
        let env = EnvironmentSample {
            can_see_sky: observation.can_see_sky,
            is_daytime: self.time.is_daytime(),
            is_raining: self.weather.is_raining(),
            in_water: observation.in_water,
        };
        let decay_due = self.time.tick.0 % self.config.decay_interval_ticks == 0;
        let sync_due = self.time.tick.0 % self.config.sync_interval_ticks == 0;

        let session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| anyhow::anyhow!("no session for observed player"))?;

        if !session.mode.is_simulated() {
            return Ok(());
        }

        session.observe(
            observation.position,
            observation.on_ground,
            observation.vertical_velocity,
            now_ms,
        );

        if decay_due {
            // Each stat consumes its own tracker: the hydration interval
            // never zeroes the activity the nutrition interval reads.
            let hydration_sample = session.hydration_activity.take();
            let nutrition_sample = session.nutrition_activity.take();

            let hydration_total = decay_amount(hydration_sample, env, &DecayParams::hydration());
            let nutrition_total = decay_amount(nutrition_sample, env, &DecayParams::nutrition());

            let hydration_outcome = apply_decay(&mut session.stats.hydration, hydration_total);
            let hydration_level = session.stats.hydration.level();
            let nutrition_outcome = apply_decay(&mut session.stats.nutrition, nutrition_total);
            let nutrition_level = session.stats.nutrition.level();

            tracing::debug!(
                player = %id,
                hydration = hydration_total,
                nutrition = nutrition_total,
                distance = hydration_sample.distance,
                jumps = hydration_sample.jumps,
                "interval decay applied"
            );

            self.handle_outcome(id, StatKind::Hydration, hydration_outcome, hydration_level);
            self.handle_outcome(id, StatKind::Nutrition, nutrition_outcome, nutrition_level);
        }

        if decay_due || sync_due {
            self.sync_player_stats(id);
        }

        Ok(())
    }

    /// Log low-stat bands and route depletion damage to the sink.
    fn handle_outcome(&mut self, id: PlayerId, kind: StatKind, outcome: DecayOutcome, level: f32) {
        match outcome {
            DecayOutcome::Normal => {}
            DecayOutcome::Low => {
                tracing::info!(player = %id, %kind, level, "stat in low band");
            }
            DecayOutcome::Depleted => {
                tracing::info!(player = %id, %kind, "stat depleted, applying damage");
                self.damage
                    .apply(id, DEPLETION_DAMAGE, DamageCause::for_stat(kind));
            }
        }
    }

    fn process_queue(&mut self, id: PlayerId, now_ms: u64) -> anyhow::Result<()> {
        let Some(session) = self.sessions.get_mut(id) else {
            return Ok(());
        };
        if session.queue.is_empty() {
            return Ok(());
        }

        let position = session.last_position;
        let event = session.queue.tick(
            now_ms,
            &mut session.inventory,
            &mut self.drops,
            position,
            &self.catalog,
        );

        match event {
            Some(QueueEvent::Delivered { recipe_id, stack }) => {
                tracing::info!(
                    player = %id,
                    recipe = %recipe_id,
                    item = stack.item_id,
                    count = stack.count,
                    "craft delivered"
                );
            }
            Some(QueueEvent::DeliveryFailed { recipe_id }) => {
                tracing::warn!(player = %id, recipe = %recipe_id, "craft delivery failed");
            }
            None => {}
        }

        Ok(())
    }
}
