//! Header classification for mapped images.
//!
//! Determines whether an image uses the 32-bit or 64-bit header layout and exposes
//! the header fields the command walker needs. Classification follows the loader's
//! own rule: only the two 64-bit magic values select the 64-bit layout, every other
//! magic falls back to the 32-bit layout.

use crate::{
    image::{
        io::read_ne,
        layout::{
            HEADER_MAGIC_OFFSET, HEADER_NCMDS_OFFSET, HEADER_SIZEOFCMDS_OFFSET, HEADER_SIZE_32,
            HEADER_SIZE_64, MH_CIGAM_64, MH_MAGIC_64,
        },
        ImageView,
    },
    Result,
};

/// Classification of an image header: bitness and byte size.
///
/// Derived from the magic field on demand, never stored in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderInfo {
    /// `true` if the image uses the 64-bit header layout
    pub is_64bit: bool,
    /// Byte size of the header struct for this layout
    pub size: usize,
}

impl HeaderInfo {
    /// Classify an image header by its magic field.
    ///
    /// Both the native and the byte-swapped 64-bit magic select the 64-bit layout.
    /// Any other value is treated as 32-bit. The only failure mode is a view too
    /// short to contain the magic field.
    pub fn classify(view: &ImageView<'_>) -> Result<HeaderInfo> {
        let magic: u32 = read_ne(view.bytes(HEADER_MAGIC_OFFSET, 4)?)?;
        let is_64bit = magic == MH_MAGIC_64 || magic == MH_CIGAM_64;

        Ok(HeaderInfo {
            is_64bit,
            size: if is_64bit {
                HEADER_SIZE_64
            } else {
                HEADER_SIZE_32
            },
        })
    }
}

/// Read the image's declared load-command count (`ncmds`).
pub fn command_count(view: &ImageView<'_>) -> Result<u32> {
    read_ne(view.bytes(HEADER_NCMDS_OFFSET, 4)?)
}

/// Read the image's declared load-command region size (`sizeofcmds`).
pub fn command_region_size(view: &ImageView<'_>) -> Result<u32> {
    read_ne(view.bytes(HEADER_SIZEOFCMDS_OFFSET, 4)?)
}
