//! Protocol message definitions for stat synchronization.
//!
//! All messages use postcard serialization for compact binary encoding.

use serde::{Deserialize, Serialize};
use thirstcraft_core::{PlayerId, StatKind};

/// Protocol version for compatibility checking.
pub const PROTOCOL_VERSION: u16 = 1;

/// Protocol magic bytes to identify the thirstcraft sync channel.
pub const PROTOCOL_MAGIC: &[u8; 8] = b"TCSY\x00\x01\x00\x00";

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SyncMessage {
    /// Channel handshake with protocol version and schema hash. Checked
    /// once at connection time; everything after is fire-and-forget.
    Hello {
        /// Protocol version.
        version: u16,
        /// Schema hash for compatibility.
        schema_hash: u64,
    },

    /// A player's stat changed; the client view overwrites its copy
    /// (last write wins, no acknowledgment).
    StatSync {
        /// Owning player.
        player: PlayerId,
        /// Which stat the value belongs to.
        kind: StatKind,
        /// Current level.
        value: f32,
    },
}

impl SyncMessage {
    /// Verify message validity. Called on all received messages.
    pub fn verify(&self) -> Result<(), &'static str> {
        match self {
            SyncMessage::Hello { version, .. } => {
                if *version != PROTOCOL_VERSION {
                    return Err("Protocol version mismatch");
                }
            }
            SyncMessage::StatSync { value, .. } => {
                if !value.is_finite() {
                    return Err("Non-finite stat value");
                }
            }
        }
        Ok(())
    }
}
