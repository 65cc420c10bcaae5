#![warn(missing_docs)]
//! Activity tracking and stat decay for the survival simulation.

mod activity;
mod decay;
mod stats;

pub use activity::{
    ActivitySample, ActivityTracker, JUMP_DEBOUNCE_MS, JUMP_VELOCITY_THRESHOLD, MOVEMENT_EPSILON,
};
pub use decay::{decay_amount, DecayParams, EnvironmentSample};
pub use stats::{
    apply_decay, DamageCause, DamageSink, DecayOutcome, NullDamageSink, SurvivalStats,
    DECAY_INTERVAL_TICKS, DEPLETION_DAMAGE, LOW_STAT_THRESHOLD, STAT_MAX,
};
