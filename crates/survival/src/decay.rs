//! Stat decay calculation.
//!
//! Pure function mapping accumulated activity and environment into the
//! amount to subtract from a resource stat each decay interval. Totals may
//! be negative (a net gain, e.g. hydrating while swimming).

use crate::ActivitySample;
use serde::{Deserialize, Serialize};

/// Environment flags sampled at decay time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvironmentSample {
    /// Player has unobstructed sky above.
    pub can_see_sky: bool,
    /// The sun is up.
    pub is_daytime: bool,
    /// Precipitation is active (blocks sun exposure).
    pub is_raining: bool,
    /// Player is in water.
    pub in_water: bool,
}

/// Tunable decay coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayParams {
    /// Flat decay applied every interval regardless of activity.
    pub base: f32,
    /// Extra decay per 100 blocks traveled.
    pub distance_per_100: f32,
    /// Cap on the distance contribution.
    pub distance_cap: f32,
    /// Extra decay per 10 jumps.
    pub jump_per_10: f32,
    /// Cap on the jump contribution.
    pub jump_cap: f32,
    /// Added under direct sun (sky visible, daytime, not raining).
    pub sun_bonus: f32,
    /// Added while in water. Negative for hydration (swimming rehydrates);
    /// zero for nutrition, which does not care about water contact.
    pub water_bonus: f32,
}

impl DecayParams {
    /// Coefficients for the hydration stat.
    pub fn hydration() -> Self {
        Self {
            base: 0.8,
            distance_per_100: 0.5,
            distance_cap: 2.0,
            jump_per_10: 0.2,
            jump_cap: 1.0,
            sun_bonus: 0.4,
            water_bonus: -0.3,
        }
    }

    /// Coefficients for the nutrition stat: same shape, no water term.
    pub fn nutrition() -> Self {
        Self {
            water_bonus: 0.0,
            ..Self::hydration()
        }
    }
}

/// Compute the decay amount for one interval. Unclamped; the caller applies
/// it through `ResourceStat::subtract`, which clamps the resulting level.
pub fn decay_amount(
    activity: ActivitySample,
    env: EnvironmentSample,
    params: &DecayParams,
) -> f32 {
    let distance_factor = (params.distance_cap)
        .min((activity.distance / 100.0) as f32 * params.distance_per_100);
    let jump_factor = (params.jump_cap).min(activity.jumps as f32 / 10.0 * params.jump_per_10);

    let sun_factor = if env.can_see_sky && env.is_daytime && !env.is_raining {
        params.sun_bonus
    } else {
        0.0
    };
    let water_factor = if env.in_water { params.water_bonus } else { 0.0 };

    params.base + distance_factor + jump_factor + sun_factor + water_factor
}
