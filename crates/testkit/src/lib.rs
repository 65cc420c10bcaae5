#![warn(missing_docs)]
//! Deterministic testing surfaces (event stream + scratch-dir plumbing).

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thirstcraft_core::SimTick;

/// Primary event record captured by headless tests.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Human-readable kind label.
    pub kind: &'a str,
    /// Free-form payload for smoke tests.
    pub payload: String,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

/// A unique scratch directory under the system temp dir for one test run.
///
/// Stamped with wall-clock nanoseconds plus a process-local counter so
/// parallel tests never collide. The caller owns cleanup.
pub fn scratch_dir(prefix: &str) -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let stamp = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_millis());
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("{}-{}-{}", prefix, stamp, seq))
}
