//! The hydration/nutrition stat pair and decay application.

use serde::{Deserialize, Serialize};
use thirstcraft_core::{PlayerId, ResourceStat, StatKind};

/// Maximum level for both survival stats.
pub const STAT_MAX: f32 = 100.0;

/// Level at or below which a low-stat status signal is surfaced.
pub const LOW_STAT_THRESHOLD: f32 = 40.0;

/// Damage applied when a stat is fully depleted (1 heart).
pub const DEPLETION_DAMAGE: f32 = 2.0;

/// Decay cadence: 600 ticks = 30 simulated seconds.
pub const DECAY_INTERVAL_TICKS: u64 = 600;

/// Why depletion damage was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageCause {
    /// Hydration reached zero.
    Dehydration,
    /// Nutrition reached zero.
    Starvation,
}

impl DamageCause {
    /// The cause used when `kind` depletes.
    pub fn for_stat(kind: StatKind) -> Self {
        match kind {
            StatKind::Hydration => DamageCause::Dehydration,
            StatKind::Nutrition => DamageCause::Starvation,
        }
    }
}

/// External damage applier. The simulation never mutates player health
/// directly; depletion damage is routed through this seam.
pub trait DamageSink {
    /// Apply `amount` damage to `player` with the given cause tag.
    fn apply(&mut self, player: PlayerId, amount: f32, cause: DamageCause);
}

/// A sink that drops all damage. Useful for tests and headless tools.
#[derive(Debug, Default)]
pub struct NullDamageSink;

impl DamageSink for NullDamageSink {
    fn apply(&mut self, _player: PlayerId, _amount: f32, _cause: DamageCause) {}
}

/// Result of applying one decay interval to a stat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecayOutcome {
    /// Level is above the low band.
    Normal,
    /// Level is in the low band (≤ 40): surface a status signal.
    Low,
    /// Level hit zero: depletion damage is due.
    Depleted,
}

/// Subtract a decay amount from a stat and classify the resulting level.
pub fn apply_decay(stat: &mut ResourceStat, amount: f32) -> DecayOutcome {
    stat.subtract(amount);
    let level = stat.level();
    if level <= 0.0 {
        DecayOutcome::Depleted
    } else if level <= LOW_STAT_THRESHOLD {
        DecayOutcome::Low
    } else {
        DecayOutcome::Normal
    }
}

/// The per-player survival stat pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalStats {
    /// Water level.
    pub hydration: ResourceStat,
    /// Food level.
    pub nutrition: ResourceStat,
}

impl SurvivalStats {
    /// Fresh stats for a newly joined player: both at maximum.
    pub fn new() -> Self {
        Self {
            hydration: ResourceStat::full(STAT_MAX),
            nutrition: ResourceStat::full(STAT_MAX),
        }
    }

    /// Borrow a stat by kind.
    pub fn get(&self, kind: StatKind) -> &ResourceStat {
        match kind {
            StatKind::Hydration => &self.hydration,
            StatKind::Nutrition => &self.nutrition,
        }
    }

    /// Mutably borrow a stat by kind.
    pub fn get_mut(&mut self, kind: StatKind) -> &mut ResourceStat {
        match kind {
            StatKind::Hydration => &mut self.hydration,
            StatKind::Nutrition => &mut self.nutrition,
        }
    }

    /// Restore invariants after loading from persisted state. Corrupted
    /// values fail open to full stats rather than damaging the player on
    /// their first decay interval.
    pub fn sanitize(&mut self) {
        self.hydration.sanitize();
        self.nutrition.sanitize();
    }
}

impl Default for SurvivalStats {
    fn default() -> Self {
        Self::new()
    }
}
