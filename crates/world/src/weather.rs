//! Deterministic weather state for environmental simulation.
//!
//! Weather changes are explicit (host- or test-driven) and logged so
//! simulation runs stay reproducible.

use serde::{Deserialize, Serialize};

/// Weather state affecting sun exposure and gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WeatherState {
    /// Clear skies, no precipitation.
    #[default]
    Clear,
    /// Active precipitation.
    Rain,
    /// Active precipitation plus thunder.
    Thunderstorm,
}

/// World singleton for weather management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WeatherToggle {
    /// Current weather state.
    pub state: WeatherState,
}

impl WeatherToggle {
    /// Create a new weather toggle starting in clear state.
    pub fn new() -> Self {
        Self {
            state: WeatherState::Clear,
        }
    }

    /// Set the weather state.
    pub fn set_state(&mut self, state: WeatherState) {
        if self.state != state {
            tracing::debug!(from = ?self.state, to = ?state, "weather changed");
        }
        self.state = state;
    }

    /// Toggle between clear and rain.
    pub fn toggle(&mut self) {
        let next = match self.state {
            WeatherState::Clear => WeatherState::Rain,
            WeatherState::Rain | WeatherState::Thunderstorm => WeatherState::Clear,
        };
        self.set_state(next);
    }

    /// Check if currently raining (sun exposure is blocked).
    pub fn is_raining(&self) -> bool {
        matches!(self.state, WeatherState::Rain | WeatherState::Thunderstorm)
    }
}
