//! # dyldtrack Prelude
//!
//! Convenient re-exports of the types most consumers need. Import this module to
//! wire the tracker into a host application without spelling out module paths.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dyldtrack operations
pub use crate::Error;

/// The result type used throughout dyldtrack
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Lifecycle handle: registers the loader callbacks and owns the save policy
pub use crate::LoadTracker;

/// The process-wide append-only event log
pub use crate::EventLog;

// ================================================================================================
// Records
// ================================================================================================

/// One observed load/unload event
pub use crate::record::{ImageEvent, ImageRecord};

// ================================================================================================
// Introspection Layer
// ================================================================================================

/// Bounds-checked view over a mapped image
pub use crate::image::ImageView;

/// Metadata queries over an image view
pub use crate::image::{build_uuid, text_segment_size};

/// Address-to-module resolution seam
pub use crate::resolver::{DladdrResolver, ImageResolver, ResolvedImage};
