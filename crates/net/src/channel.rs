//! Delivery seam for encoded sync frames.
//!
//! The server pushes frames into a [`PacketSink`]; what sits behind it
//! (socket, loopback, test recorder) is a host concern. Sends are
//! fire-and-forget: failures are logged at a rate limit and never retried.

use crate::{encode_message, SyncMessage};
use std::collections::HashMap;
use thiserror::Error;
use thirstcraft_core::{PlayerId, StatKind};

/// Minimum gap between unreachable-player warnings for one player.
pub const WARN_INTERVAL_MS: u64 = 10_000;

/// Failure to hand a frame to a player's remote view.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The player has no live connection.
    #[error("{0} is not reachable")]
    Unreachable(PlayerId),
    /// Transport-level failure.
    #[error("send failed: {0}")]
    Send(String),
}

/// Receives encoded frames addressed to a player.
pub trait PacketSink {
    /// Deliver one frame to `player`'s remote view.
    fn deliver(&mut self, player: PlayerId, frame: &[u8]) -> Result<(), SyncError>;
}

/// A sink that discards every frame. Useful for headless tools and tests.
#[derive(Debug, Default)]
pub struct NullPacketSink;

impl PacketSink for NullPacketSink {
    fn deliver(&mut self, _player: PlayerId, _frame: &[u8]) -> Result<(), SyncError> {
        Ok(())
    }
}

/// Fire-and-forget stat sync sender with rate-limited failure logging.
#[derive(Debug, Default)]
pub struct StatSyncer {
    last_warn_ms: HashMap<PlayerId, u64>,
}

impl StatSyncer {
    /// Create a syncer with no warning history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode and send one stat value. Failures are swallowed after a
    /// rate-limited warning; the next periodic sync supersedes this one
    /// anyway (last write wins on the client).
    pub fn send_stat(
        &mut self,
        sink: &mut dyn PacketSink,
        player: PlayerId,
        kind: StatKind,
        value: f32,
        now_ms: u64,
    ) {
        let msg = SyncMessage::StatSync {
            player,
            kind,
            value,
        };

        let frame = match encode_message(&msg) {
            Ok(frame) => frame,
            Err(error) => {
                tracing::warn!(%player, %kind, %error, "failed to encode stat sync");
                return;
            }
        };

        if let Err(error) = sink.deliver(player, &frame) {
            let should_warn = self
                .last_warn_ms
                .get(&player)
                .is_none_or(|last| now_ms.saturating_sub(*last) >= WARN_INTERVAL_MS);
            if should_warn {
                tracing::warn!(%player, %kind, %error, "stat sync not delivered");
                self.last_warn_ms.insert(player, now_ms);
            }
        }
    }

    /// Drop warning history for a player (on disconnect).
    pub fn forget(&mut self, player: PlayerId) {
        self.last_warn_ms.remove(&player);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode_message;

    /// Records delivered frames, optionally failing every send.
    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<(PlayerId, Vec<u8>)>,
        fail: bool,
    }

    impl PacketSink for RecordingSink {
        fn deliver(&mut self, player: PlayerId, frame: &[u8]) -> Result<(), SyncError> {
            if self.fail {
                return Err(SyncError::Unreachable(player));
            }
            self.frames.push((player, frame.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn send_stat_delivers_decodable_frame() {
        let mut syncer = StatSyncer::new();
        let mut sink = RecordingSink::default();

        syncer.send_stat(&mut sink, PlayerId(9), StatKind::Hydration, 55.0, 0);

        assert_eq!(sink.frames.len(), 1);
        let decoded = decode_message(&sink.frames[0].1).unwrap();
        assert_eq!(
            decoded,
            SyncMessage::StatSync {
                player: PlayerId(9),
                kind: StatKind::Hydration,
                value: 55.0,
            }
        );
    }

    #[test]
    fn failed_sends_are_swallowed() {
        let mut syncer = StatSyncer::new();
        let mut sink = RecordingSink {
            fail: true,
            ..Default::default()
        };

        // No panic, no retry; just rate-limited warnings.
        for i in 0..100 {
            syncer.send_stat(&mut sink, PlayerId(9), StatKind::Hydration, 55.0, i * 50);
        }
        assert!(sink.frames.is_empty());
    }
}
