//! Per-player stat profile persistence.
//!
//! One small binary file per player: a fixed header (magic, version, CRC32,
//! payload length) followed by a bincode payload of named float fields.
//! Loads fail open: a missing or corrupt profile yields full stats, never
//! zero — a damaged save must not greet a returning player with starvation
//! damage.

use anyhow::{Context, Result};
use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thirstcraft_core::{PlayerId, ResourceStat};
use thirstcraft_survival::{SurvivalStats, STAT_MAX};

/// Magic number for profile file identification ("TCPF" = thirstcraft profile).
const PROFILE_MAGIC: u32 = 0x54435046;

/// Current profile file format version.
const PROFILE_VERSION: u16 = 1;

/// Header length in bytes: magic + version + crc32 + payload_len.
const HEADER_LEN: usize = 14;

/// Serialized stat fields. Each stat is one named float.
#[derive(Debug, Serialize, Deserialize)]
struct StatProfile {
    hydration: f32,
    nutrition: f32,
}

#[derive(Debug, Clone)]
struct ProfileHeader {
    magic: u32,
    version: u16,
    crc32: u32,
    payload_len: u32,
}

impl ProfileHeader {
    fn new(crc32: u32, payload_len: u32) -> Self {
        Self {
            magic: PROFILE_MAGIC,
            version: PROFILE_VERSION,
            crc32,
            payload_len,
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN);
        bytes.extend_from_slice(&self.magic.to_le_bytes());
        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes.extend_from_slice(&self.crc32.to_le_bytes());
        bytes.extend_from_slice(&self.payload_len.to_le_bytes());
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            anyhow::bail!("Profile header too short");
        }

        let magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if magic != PROFILE_MAGIC {
            anyhow::bail!(
                "Invalid profile magic: expected 0x{:08X}, got 0x{:08X}",
                PROFILE_MAGIC,
                magic
            );
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        let crc32 = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
        let payload_len = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]);

        Ok(Self {
            magic,
            version,
            crc32,
            payload_len,
        })
    }
}

/// File store for player stat profiles.
#[derive(Debug)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Create a profile store rooted at the given directory.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).context("Failed to create profile directory")?;
        Ok(Self { dir })
    }

    fn profile_path(&self, id: PlayerId) -> PathBuf {
        self.dir.join(format!("p.{}.tcp", id.0))
    }

    /// Persist a player's stats.
    pub fn save(&self, id: PlayerId, stats: &SurvivalStats) -> Result<()> {
        let profile = StatProfile {
            hydration: stats.hydration.level(),
            nutrition: stats.nutrition.level(),
        };

        let payload = bincode::serialize(&profile).context("Failed to serialize profile")?;

        let mut hasher = Hasher::new();
        hasher.update(&payload);
        let crc32 = hasher.finalize();

        let header = ProfileHeader::new(crc32, payload.len() as u32);

        let mut file =
            File::create(self.profile_path(id)).context("Failed to create profile file")?;
        file.write_all(&header.to_bytes())
            .context("Failed to write header")?;
        file.write_all(&payload).context("Failed to write payload")?;

        Ok(())
    }

    /// Load a player's stats, failing open to full stats on any problem.
    pub fn load(&self, id: PlayerId) -> SurvivalStats {
        match self.try_load(id) {
            Ok(profile) => {
                // with_level corrects non-finite values to the maximum.
                let mut stats = SurvivalStats {
                    hydration: ResourceStat::with_level(STAT_MAX, profile.hydration),
                    nutrition: ResourceStat::with_level(STAT_MAX, profile.nutrition),
                };
                stats.sanitize();
                stats
            }
            Err(error) => {
                if self.profile_path(id).exists() {
                    tracing::warn!(player = %id, %error, "corrupt profile, using defaults");
                } else {
                    tracing::debug!(player = %id, "no profile on disk, using defaults");
                }
                SurvivalStats::new()
            }
        }
    }

    fn try_load(&self, id: PlayerId) -> Result<StatProfile> {
        let path = self.profile_path(id);
        let mut file = File::open(&path).context("Failed to open profile file")?;

        let mut header_bytes = [0u8; HEADER_LEN];
        file.read_exact(&mut header_bytes)
            .context("Failed to read profile header")?;
        let header = ProfileHeader::from_bytes(&header_bytes)?;

        if header.version != PROFILE_VERSION {
            anyhow::bail!("Unsupported profile version: {}", header.version);
        }

        let mut payload = vec![0u8; header.payload_len as usize];
        file.read_exact(&mut payload)
            .context("Failed to read profile payload")?;

        let mut hasher = Hasher::new();
        hasher.update(&payload);
        let computed_crc = hasher.finalize();

        if computed_crc != header.crc32 {
            anyhow::bail!(
                "CRC32 mismatch: expected {:08X}, got {:08X}",
                header.crc32,
                computed_crc
            );
        }

        bincode::deserialize(&payload).context("Failed to deserialize profile")
    }
}
