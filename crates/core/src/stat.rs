//! Bounded decaying resource stats (hydration, nutrition).
//!
//! A `ResourceStat` is a clamped scalar: every mutator keeps the level inside
//! `[min, max]` and non-finite inputs are corrected to the default (full)
//! value rather than propagated.

use serde::{Deserialize, Serialize};

/// Which survival stat a value refers to. Shared with the sync protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    /// Water level, depleted by activity and sun, restored by drinking.
    Hydration,
    /// Food level, depleted by activity, restored by eating.
    Nutrition,
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatKind::Hydration => write!(f, "hydration"),
            StatKind::Nutrition => write!(f, "nutrition"),
        }
    }
}

/// A bounded scalar stat with clamped mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceStat {
    current: f32,
    min: f32,
    max: f32,
}

impl ResourceStat {
    /// Create a stat starting at its maximum (the default for a fresh player).
    pub fn full(max: f32) -> Self {
        Self {
            current: max,
            min: 0.0,
            max,
        }
    }

    /// Create a stat at a specific starting level, clamped into range.
    pub fn with_level(max: f32, level: f32) -> Self {
        let mut stat = Self::full(max);
        stat.set_level(level);
        stat
    }

    /// Current level.
    pub fn level(&self) -> f32 {
        self.current
    }

    /// Configured maximum.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Fraction of the maximum currently held, in `[0, 1]`.
    pub fn percentage(&self) -> f32 {
        self.current / self.max
    }

    /// Raise the level, clamping at the maximum. Returns the delta actually
    /// applied. Negative amounts are accepted but callers should use
    /// [`ResourceStat::subtract`] instead.
    pub fn add(&mut self, amount: f32) -> f32 {
        if !amount.is_finite() {
            return 0.0;
        }
        let prev = self.current;
        self.current = (self.current + amount).clamp(self.min, self.max);
        self.current - prev
    }

    /// Lower the level, clamping at the minimum. Returns the delta actually
    /// removed.
    pub fn subtract(&mut self, amount: f32) -> f32 {
        if !amount.is_finite() {
            return 0.0;
        }
        let prev = self.current;
        self.current = (self.current - amount).clamp(self.min, self.max);
        prev - self.current
    }

    /// Set the level directly. Non-finite input silently resets to the
    /// default (maximum) value; finite input is clamped into range.
    pub fn set_level(&mut self, level: f32) {
        self.current = if level.is_finite() {
            level.clamp(self.min, self.max)
        } else {
            self.max
        };
    }

    /// Restore invariants after deserializing from an untrusted source.
    /// Corrupted levels fail open to the maximum, never to zero.
    pub fn sanitize(&mut self) {
        if !self.max.is_finite() || self.max <= 0.0 {
            self.max = 100.0;
        }
        if !self.min.is_finite() || self.min >= self.max {
            self.min = 0.0;
        }
        let level = self.current;
        self.set_level(level);
    }
}
