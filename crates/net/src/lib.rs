//! Server-to-client stat sync channel.
//!
//! One-directional, fire-and-forget messages carrying a player's current
//! stat value. Transport is out of scope; this crate defines the message
//! schema, a compact binary codec, and the delivery seam the server writes
//! frames into.

mod channel;
mod codec;
mod protocol;

pub use channel::{NullPacketSink, PacketSink, StatSyncer, SyncError, WARN_INTERVAL_MS};
pub use codec::{compute_schema_hash, decode_message, encode_message};
pub use protocol::{SyncMessage, PROTOCOL_MAGIC, PROTOCOL_VERSION};
