//! Deterministic simulation time and day/night cycle.
//!
//! Provides the SimTime resource for tracking in-game time progression.
//! All time advancement is tick-based to ensure deterministic replay;
//! wall-clock durations derive from the tick counter at 50 ms per tick.

use serde::{Deserialize, Serialize};
use thirstcraft_core::SimTick;

/// Simulation time state tracking day/night cycles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current simulation tick.
    pub tick: SimTick,
    /// Ticks per in-game day (default: 24000 = 20 minutes at 20 TPS).
    pub ticks_per_day: u64,
}

impl SimTime {
    /// Create a new SimTime starting at tick 0 (midnight).
    pub fn new(ticks_per_day: u64) -> Self {
        Self {
            tick: SimTick::ZERO,
            ticks_per_day,
        }
    }

    /// Create a SimTime positioned at an arbitrary tick.
    pub fn at_tick(tick: SimTick, ticks_per_day: u64) -> Self {
        Self {
            tick,
            ticks_per_day,
        }
    }

    /// Advance time by one tick.
    pub fn advance(&mut self) {
        self.tick = self.tick.advance(1);
    }

    /// Elapsed simulated wall-clock milliseconds since tick zero.
    pub fn now_ms(&self) -> u64 {
        self.tick.as_millis()
    }

    /// Time of day as a fraction (0.0 = midnight, 0.5 = noon, 1.0 = next midnight).
    pub fn time_of_day(&self) -> f64 {
        let tick_in_day = self.tick.0 % self.ticks_per_day;
        tick_in_day as f64 / self.ticks_per_day as f64
    }

    /// Whether the sun is up (between sunrise at 0.25 and sunset at 0.75).
    pub fn is_daytime(&self) -> bool {
        let t = self.time_of_day();
        (0.25..0.75).contains(&t)
    }
}

impl Default for SimTime {
    fn default() -> Self {
        Self::new(24000)
    }
}
