//! Read-only metadata queries built on the command walker.
//!
//! Both extractors degrade instead of failing: an image without the queried
//! command (statically embedded, malformed, truncated) yields the nil UUID or a
//! zero segment size, never an error. A record with placeholder values is worth
//! more than a dropped event when the image itself was resolvable.

use uuid::Uuid;

use crate::image::{
    commands::commands,
    io::read_ne,
    layout::{
        LC_SEGMENT, LC_SEGMENT_64, LC_UUID, SEGMENT_COMMAND_SIZE_32, SEGMENT_COMMAND_SIZE_64,
        SEGMENT_NAME_LEN, SEGMENT_NAME_OFFSET, SEGMENT_VMSIZE_OFFSET_32,
        SEGMENT_VMSIZE_OFFSET_64, SEG_TEXT, UUID_BYTES_OFFSET, UUID_COMMAND_SIZE,
    },
    ImageView,
};

/// Extract the build UUID embedded in an image.
///
/// Scans for the first `LC_UUID` command and captures its 16 payload bytes.
/// Returns [`Uuid::nil`] when the image carries no (well-formed) UUID command.
pub fn build_uuid(view: &ImageView<'_>) -> Uuid {
    commands(view)
        .filter(|lc| lc.kind == LC_UUID && lc.size as usize >= UUID_COMMAND_SIZE)
        .find_map(|lc| {
            let bytes = view.bytes(lc.offset + UUID_BYTES_OFFSET, 16).ok()?;
            let raw: [u8; 16] = bytes.try_into().ok()?;
            Some(Uuid::from_bytes(raw))
        })
        .unwrap_or_else(Uuid::nil)
}

/// Extract the mapped size of an image's `__TEXT` segment.
///
/// Scans for the first 32-bit or 64-bit segment command whose fixed-width name
/// field equals the well-known text segment name, and reads its `vmsize` widened
/// to `u64`. Returns 0 when no such segment is present.
pub fn text_segment_size(view: &ImageView<'_>) -> u64 {
    commands(view)
        .find_map(|lc| {
            let (min_size, vmsize_offset, is_64) = match lc.kind {
                LC_SEGMENT => (SEGMENT_COMMAND_SIZE_32, SEGMENT_VMSIZE_OFFSET_32, false),
                LC_SEGMENT_64 => (SEGMENT_COMMAND_SIZE_64, SEGMENT_VMSIZE_OFFSET_64, true),
                _ => return None,
            };

            if (lc.size as usize) < min_size {
                return None;
            }

            // Fixed-width comparison; the name is not NUL-terminated at full length.
            let name = view
                .bytes(lc.offset + SEGMENT_NAME_OFFSET, SEGMENT_NAME_LEN)
                .ok()?;
            if name != SEG_TEXT {
                return None;
            }

            let vmsize = view.bytes(lc.offset + vmsize_offset, if is_64 { 8 } else { 4 });
            if is_64 {
                read_ne::<u64>(vmsize.ok()?).ok()
            } else {
                read_ne::<u32>(vmsize.ok()?).ok().map(u64::from)
            }
        })
        .unwrap_or(0)
}
