//! Event records for observed image loads and unloads.
//!
//! One [`ImageRecord`] is produced per loader event, immutable once created. The
//! textual rendering is the on-disk and read-interface format:
//!
//! ```text
//! Added: libfoo.dylib: 0x10f2a4000 (0x4000) /usr/lib/libfoo.dylib <aabbccdd-...>
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resolver::ResolvedImage;

/// Path placeholder when the resolver found the image but produced no usable path.
const NAME_NOT_FOUND: &str = "Name Not Found";

/// Whether an image was mapped into or unmapped from the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageEvent {
    /// The image was mapped into the process
    Added,
    /// The image was unmapped from the process
    Removed,
}

impl fmt::Display for ImageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageEvent::Added => f.write_str("Added"),
            ImageEvent::Removed => f.write_str("Removed"),
        }
    }
}

/// One load or unload event, with the image's identity and in-memory geometry.
///
/// All numeric fields are pre-rendered: lowercase hex without padding for the
/// addresses and sizes, canonical 8-4-4-4-12 hyphenated form for the UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// What happened to the image
    pub event: ImageEvent,
    /// Last component of the image path; empty when the path is unavailable
    pub name: String,
    /// The image's on-disk path, or a placeholder when unavailable
    pub path: String,
    /// Load base address, lowercase hex without the `0x` prefix
    pub base_address: String,
    /// Mapped size of the `__TEXT` segment, lowercase hex without the `0x` prefix
    pub text_size: String,
    /// Build UUID in canonical hyphenated form; all-zero when absent
    pub uuid: String,
}

impl ImageRecord {
    /// Build a record from a resolved image and its extracted metadata.
    ///
    /// A missing path degrades to an empty name and the literal placeholder path
    /// rather than failing the event.
    pub fn new(event: ImageEvent, resolved: &ResolvedImage, text_size: u64, uuid: Uuid) -> ImageRecord {
        let (name, path) = match &resolved.path {
            Some(path) => {
                let name = path.rsplit('/').next().unwrap_or_default().to_string();
                (name, path.clone())
            }
            None => (String::new(), NAME_NOT_FOUND.to_string()),
        };

        ImageRecord {
            event,
            name,
            path,
            base_address: format!("{:x}", resolved.base),
            text_size: format!("{text_size:x}"),
            uuid: uuid.to_string(),
        }
    }
}

impl fmt::Display for ImageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: 0x{} (0x{}) {} <{}>",
            self.event, self.name, self.base_address, self.text_size, self.path, self.uuid
        )
    }
}
