//! Message encoding and decoding with framing.
//!
//! Provides length-prefixed encoding so frames survive concatenation in a
//! byte stream. Frame format: `[length: u32][message_type: u8][payload]`.

use crate::protocol::{SyncMessage, PROTOCOL_MAGIC, PROTOCOL_VERSION};
use anyhow::{Context, Result};
use blake3::Hash;

/// Compute the schema hash from protocol definitions.
///
/// Checked once during the channel handshake to ensure both ends agree on
/// the message layout.
pub fn compute_schema_hash() -> u64 {
    let mut hasher = blake3::Hasher::new();

    hasher.update(&PROTOCOL_VERSION.to_le_bytes());
    hasher.update(PROTOCOL_MAGIC);

    // Message type names (deterministic)
    hasher.update(b"SyncMessage");
    hasher.update(b"Hello");
    hasher.update(b"StatSync");

    let hash: Hash = hasher.finalize();
    u64::from_le_bytes(hash.as_bytes()[0..8].try_into().unwrap())
}

/// Encode a sync message with length prefix.
pub fn encode_message(msg: &SyncMessage) -> Result<Vec<u8>> {
    let payload = postcard::to_allocvec(msg).context("Failed to serialize sync message")?;

    let mut frame = Vec::with_capacity(4 + 1 + payload.len());

    // Length (excluding the length field itself)
    let length = (1 + payload.len()) as u32;
    frame.extend_from_slice(&length.to_le_bytes());

    // Message type tag (for multiplexing if needed)
    frame.push(message_type_tag(msg));

    frame.extend_from_slice(&payload);

    Ok(frame)
}

/// Decode a sync message from frame data.
///
/// Expects data to start with the length prefix.
pub fn decode_message(data: &[u8]) -> Result<SyncMessage> {
    if data.len() < 5 {
        anyhow::bail!("Frame too short: {} bytes (minimum 5)", data.len());
    }

    let length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

    if data.len() < 4 + length {
        anyhow::bail!(
            "Incomplete frame: expected {} bytes, got {}",
            4 + length,
            data.len()
        );
    }

    // Skip message type tag (data[4])
    let payload = &data[5..4 + length];

    let msg: SyncMessage =
        postcard::from_bytes(payload).context("Failed to deserialize sync message")?;

    msg.verify().map_err(|e| anyhow::anyhow!(e))?;

    Ok(msg)
}

/// Get the message type tag for a sync message.
fn message_type_tag(msg: &SyncMessage) -> u8 {
    match msg {
        SyncMessage::Hello { .. } => 0,
        SyncMessage::StatSync { .. } => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thirstcraft_core::{PlayerId, StatKind};

    #[test]
    fn schema_hash_is_deterministic_and_non_zero() {
        let hash1 = compute_schema_hash();
        let hash2 = compute_schema_hash();
        assert_eq!(hash1, hash2);
        assert_ne!(hash1, 0);
    }

    #[test]
    fn encode_decode_hello() {
        let msg = SyncMessage::Hello {
            version: PROTOCOL_VERSION,
            schema_hash: compute_schema_hash(),
        };

        let encoded = encode_message(&msg).expect("Failed to encode");
        let decoded = decode_message(&encoded).expect("Failed to decode");

        assert_eq!(msg, decoded);
    }

    #[test]
    fn encode_decode_stat_sync() {
        let msg = SyncMessage::StatSync {
            player: PlayerId(42),
            kind: StatKind::Hydration,
            value: 73.5,
        };

        let encoded = encode_message(&msg).expect("Failed to encode");
        let decoded = decode_message(&encoded).expect("Failed to decode");

        assert_eq!(msg, decoded);
    }

    #[test]
    fn decode_incomplete_frame_fails() {
        let data = vec![10, 0, 0, 0]; // Length says 10 bytes, but no data
        assert!(decode_message(&data).is_err());
    }

    #[test]
    fn decode_too_short_fails() {
        let data = vec![1, 2, 3];
        assert!(decode_message(&data).is_err());
    }

    #[test]
    fn decode_rejects_invalid_stat_value() {
        let msg = SyncMessage::StatSync {
            player: PlayerId(1),
            kind: StatKind::Nutrition,
            value: f32::INFINITY,
        };
        let encoded = encode_message(&msg).unwrap();
        assert!(decode_message(&encoded).is_err());
    }
}
