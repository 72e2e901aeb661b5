// Copyright 2026 the dyldtrack authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # dyldtrack
//!
//! In-process tracking of dynamic library load and unload events, with Mach-O
//! metadata capture. `dyldtrack` registers with the dynamic loader, observes every
//! image the process maps or unmaps for its entire lifetime, and records each
//! event's library identity, in-memory location, `__TEXT` size, and build UUID in
//! an append-only log that can be persisted and reloaded.
//!
//! ## Features
//!
//! - **Checked binary introspection** - image headers and load commands are read
//!   through bounds-checked views, never through struct casts over raw memory
//! - **Loader-safe callbacks** - non-blocking, lock-free log appends; nothing
//!   panics or allocates its way into a loader deadlock
//! - **Append-only event log** - insertion order is callback order, entries are
//!   never reordered or dropped once recorded
//! - **Snapshot persistence** - the log serializes wholesale to a cache file and
//!   reloads best-effort, surviving backgrounding and teardown
//! - **Degrading extraction** - malformed or UUID-less images produce placeholder
//!   values instead of lost events
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dyldtrack::LoadTracker;
//!
//! // First instance registers the loader callbacks for the whole process.
//! let tracker = LoadTracker::new();
//!
//! // ... the process loads and unloads libraries ...
//!
//! for record in tracker.log() {
//!     println!("{record}");
//! }
//!
//! // Flush on backgrounding or at any explicit point.
//! tracker.save()?;
//! # Ok::<(), dyldtrack::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`image`] - the binary-introspection core: header classification, the
//!   load-command walker, and the UUID/`__TEXT` metadata extractors
//! - [`resolver`] - address-to-module lookup behind a trait seam
//! - [`record`] - immutable per-event records and their textual format
//! - [`log`] - the process-wide append-only [`EventLog`] with persistence
//! - [`recorder`] - the callback body gluing resolution, extraction and append
//! - [`tracker`] - lifecycle: one-way callback registration and the save policy
//!
//! The loader delivers events synchronously on arbitrary threads; see the module
//! docs of [`tracker`] for the constraints the callback path honors.

#[macro_use]
pub(crate) mod error;

pub mod image;
pub mod log;
pub mod record;
pub mod recorder;
pub mod resolver;
pub mod tracker;

pub mod prelude;

#[cfg(test)]
pub(crate) mod test;

/// `dyldtrack` Result type
///
/// Shorthand used by every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// `dyldtrack` Error type
///
/// The main error type for image parsing, event recording and log persistence.
pub use error::Error;

/// Handle over the process-wide tracking service.
///
/// See [`tracker::LoadTracker`] for lifecycle details.
pub use tracker::LoadTracker;

/// The process-wide append-only event log.
pub use log::EventLog;

/// One observed load or unload event.
pub use record::{ImageEvent, ImageRecord};
