#![warn(missing_docs)]
//! Authoritative survival simulation host.
//!
//! Owns per-player sessions (stats, inventory, craft queue), drives the
//! tick loop, and persists stat profiles. The embedding game runtime feeds
//! one movement observation per player per tick and receives damage events
//! and sync frames through the boundary traits.

mod host;
mod profile;
mod session;

pub use host::{HostConfig, HostError, PlayerObservation, SurvivalHost};
pub use profile::ProfileStore;
pub use session::{PlayerSession, SessionManager};
