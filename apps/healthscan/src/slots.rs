//! # Slots Module
//!
//! File-system side of persistence: the JSON file slot, backend selection,
//! and the wall clock used for `savedAt`.

use chrono::{SecondsFormat, Utc};
use healthscan_core::wizard::Clock;
use healthscan_core::{RedbSlot, ScanError, StateSlot};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Default location of the saved state.
pub const DEFAULT_STORE: &str = "healthscan_state.json";

/// Backends accepted by `--backend`.
pub const BACKENDS: [&str; 2] = ["file", "redb"];

// =============================================================================
// FILE SLOT
// =============================================================================

/// Slot stored as a single file holding the raw record.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateSlot for FileSlot {
    fn get(&self) -> Result<Option<String>, ScanError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ScanError::Storage(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    /// Write to a temp file beside the target, then rename over it, so a
    /// crash leaves either the old record or the new one.
    fn set(&mut self, raw: &str) -> Result<(), ScanError> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| {
            ScanError::Storage(format!("failed to create {}: {e}", parent.display()))
        })?;

        let write_err =
            |e: io::Error| ScanError::Storage(format!("failed to write {}: {e}", self.path.display()));
        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(raw.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    fn remove(&mut self) -> Result<(), ScanError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ScanError::Storage(format!(
                "failed to remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

// =============================================================================
// BACKEND SELECTION
// =============================================================================

/// Open the slot for `backend` at `path`.
pub fn open_slot(path: &Path, backend: &str) -> Result<Box<dyn StateSlot>, ScanError> {
    debug!(path = %path.display(), backend, "opening state slot");
    match backend {
        "file" => Ok(Box::new(FileSlot::new(path))),
        "redb" => Ok(Box::new(RedbSlot::open(path)?)),
        other => Err(ScanError::Storage(format!(
            "unknown backend '{other}' (expected one of: {})",
            BACKENDS.join(", ")
        ))),
    }
}

// =============================================================================
// CLOCK
// =============================================================================

/// UTC wall clock, millisecond precision with a `Z` suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

// =============================================================================
// TESTS
// =============================================================================
