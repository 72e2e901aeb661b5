//! The process-wide, append-only event log.
//!
//! Backed by an append-only concurrent vector, so the loader-callback append path
//! is lock-free and safe under concurrent invocation from whatever threads trigger
//! loads. Insertion order is the order in which appends land, which is the order
//! the loader invoked the callbacks. Entries are never reordered or removed.
//!
//! Persistence writes the full current snapshot wholesale: the records are copied
//! out first and all file I/O happens outside anything the append path touches.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::{record::ImageRecord, Result};

static GLOBAL: OnceLock<EventLog> = OnceLock::new();

/// Insertion-ordered, append-only sequence of [`ImageRecord`]s.
///
/// The loader API only accepts process-wide callbacks, so a single log instance
/// serves the whole process; obtain it through [`EventLog::global`]. Independent
/// instances exist only for tests.
#[derive(Debug, Default)]
pub struct EventLog {
    records: boxcar::Vec<ImageRecord>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> EventLog {
        EventLog {
            records: boxcar::Vec::new(),
        }
    }

    /// The process-wide log written by the loader callbacks.
    ///
    /// Created on first access, alive until process exit.
    pub fn global() -> &'static EventLog {
        GLOBAL.get_or_init(EventLog::new)
    }

    /// Append one record.
    ///
    /// Lock-free; callable concurrently from loader callbacks on any thread.
    pub fn append(&self, record: ImageRecord) {
        self.records.push(record);
    }

    /// Number of records accumulated so far.
    pub fn len(&self) -> usize {
        self.records.count()
    }

    /// Returns `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// An ordered, owned copy of all records accumulated so far.
    ///
    /// Safe to take while appends continue; records appended concurrently may or
    /// may not be included, but the returned prefix is always in insertion order.
    pub fn snapshot(&self) -> Vec<ImageRecord> {
        self.records.iter().map(|(_, record)| record.clone()).collect()
    }

    /// Serialize the full current snapshot to `path`, overwriting any prior file.
    ///
    /// The on-disk layout is a JSON array of pre-formatted record strings, one per
    /// record, in insertion order.
    pub fn persist(&self, path: &Path) -> Result<()> {
        // Copy first; file I/O never overlaps the append path.
        let lines: Vec<String> = self.snapshot().iter().map(ToString::to_string).collect();

        fs::write(path, serde_json::to_vec_pretty(&lines)?)?;
        Ok(())
    }

    /// Load the record strings persisted by a previous [`EventLog::persist`].
    ///
    /// Returns `None` when the file is absent or does not parse; a prior snapshot
    /// is best-effort state, not a source of truth.
    pub fn load_last(path: &Path) -> Option<Vec<String>> {
        let bytes = fs::read(path).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}
