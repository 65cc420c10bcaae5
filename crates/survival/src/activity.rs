//! Per-player activity accumulation.
//!
//! Observes one movement sample per tick and accumulates horizontal
//! distance and jump counts until a decay consumer takes the sample.
//! Each decay consumer owns its own tracker so that taking a sample for
//! hydration never starves the nutrition calculation (or vice versa).

use serde::{Deserialize, Serialize};
use thirstcraft_core::Vec3;

/// Minimum per-tick horizontal displacement that counts as movement.
/// Filters out floating-point jitter from a standing player.
pub const MOVEMENT_EPSILON: f64 = 0.05;

/// Minimum upward velocity for a ground-to-air transition to count as a jump.
pub const JUMP_VELOCITY_THRESHOLD: f64 = 0.1;

/// Minimum time between recorded jumps. A single jump is observed over
/// several ticks; without the debounce it would be counted repeatedly.
pub const JUMP_DEBOUNCE_MS: u64 = 500;

/// Accumulated activity taken by a decay consumer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivitySample {
    /// Horizontal blocks traveled since the last take.
    pub distance: f64,
    /// Jumps performed since the last take.
    pub jumps: u32,
}

/// Accumulates one player's movement between decay intervals.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    last_position: Vec3,
    distance_traveled: f64,
    jump_count: u32,
    was_on_ground: bool,
    last_jump_ms: Option<u64>,
}

impl ActivityTracker {
    /// Create a tracker from the first observation of a player.
    pub fn new(position: Vec3, on_ground: bool) -> Self {
        Self {
            last_position: position,
            distance_traveled: 0.0,
            jump_count: 0,
            was_on_ground: on_ground,
            last_jump_ms: None,
        }
    }

    /// Record one tick's movement observation.
    ///
    /// Distance is horizontal only (vertical movement does not count) and
    /// jumps are ground-to-air transitions with upward velocity, debounced
    /// at [`JUMP_DEBOUNCE_MS`].
    pub fn observe(
        &mut self,
        position: Vec3,
        on_ground: bool,
        vertical_velocity: f64,
        now_ms: u64,
    ) {
        let distance = position.horizontal_distance(self.last_position);
        if distance > MOVEMENT_EPSILON {
            self.distance_traveled += distance;
        }
        self.last_position = position;

        if self.was_on_ground && !on_ground && vertical_velocity > JUMP_VELOCITY_THRESHOLD {
            let debounced = self
                .last_jump_ms
                .is_some_and(|t| now_ms.saturating_sub(t) <= JUMP_DEBOUNCE_MS);
            if !debounced {
                self.jump_count += 1;
                self.last_jump_ms = Some(now_ms);
            }
        }

        self.was_on_ground = on_ground;
    }

    /// Current accumulated activity without resetting.
    pub fn peek(&self) -> ActivitySample {
        ActivitySample {
            distance: self.distance_traveled,
            jumps: self.jump_count,
        }
    }

    /// Take the accumulated activity, resetting the counters to zero.
    /// Called exactly once per decay interval by this tracker's consumer.
    pub fn take(&mut self) -> ActivitySample {
        let sample = self.peek();
        self.distance_traveled = 0.0;
        self.jump_count = 0;
        sample
    }
}
