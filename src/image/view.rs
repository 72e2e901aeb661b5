//! The audited boundary over loader-owned image memory.
//!
//! [`ImageView`] is the only place in the crate that touches raw pointers. It turns
//! a raw image base address into a byte slice covering exactly the header plus the
//! declared (and capped) load-command region; everything layered on top of it reads
//! through bounds-checked slices and never sees an address again.
//!
//! A view built from a raw address borrows memory owned by the dynamic loader and
//! is only valid for the duration of the loader callback that supplied the address.

use crate::{
    image::{
        io::read_ne,
        layout::{
            HEADER_SIZEOFCMDS_OFFSET, HEADER_SIZE_32, HEADER_SIZE_64, MAX_COMMAND_REGION,
            MH_CIGAM_64, MH_MAGIC_64,
        },
    },
    Error::OutOfBounds,
    Result,
};

/// A bounds-checked byte view over a mapped image's header and load commands.
///
/// Construct with [`ImageView::new`] over an in-memory buffer (synthetic images,
/// tests), or with [`ImageView::from_raw`] over a raw image base address delivered
/// by the loader.
#[derive(Debug)]
pub struct ImageView<'data> {
    data: &'data [u8],
}

impl<'data> ImageView<'data> {
    /// Create a view over an in-memory image buffer.
    ///
    /// ## Arguments
    /// * 'data' - The buffer holding the image header and command region
    pub fn new(data: &'data [u8]) -> ImageView<'data> {
        ImageView { data }
    }

    /// Create a view over a mapped image from its raw base address.
    ///
    /// Reads the header to learn the declared command-region size, clamps it to
    /// [`MAX_COMMAND_REGION`], and covers header + commands only. Fails with
    /// [`crate::Error::Malformed`] on a null base.
    ///
    /// # Safety
    ///
    /// `base` must point to the header of an image currently mapped by the dynamic
    /// loader, and the returned view must not outlive the loader callback that
    /// supplied the address. The header declares the extent of the command region;
    /// this constructor trusts that at least a full header is mapped at `base`,
    /// which the loader guarantees for every image it reports.
    pub unsafe fn from_raw(base: *const u8) -> Result<ImageView<'data>> {
        if base.is_null() {
            return Err(malformed_error!("null image base address"));
        }

        // A full header is always mapped; read it to size the rest of the view.
        let header = std::slice::from_raw_parts(base, HEADER_SIZE_64);
        let magic: u32 = read_ne(header)?;
        let header_size = if magic == MH_MAGIC_64 || magic == MH_CIGAM_64 {
            HEADER_SIZE_64
        } else {
            HEADER_SIZE_32
        };

        let sizeofcmds: u32 = read_ne(&header[HEADER_SIZEOFCMDS_OFFSET..])?;
        let region = (sizeofcmds as usize).min(MAX_COMMAND_REGION);

        Ok(ImageView {
            data: std::slice::from_raw_parts(base, header_size + region),
        })
    }

    /// Borrow `len` bytes starting at `offset`, validated against the view extent.
    pub fn bytes(&self, offset: usize, len: usize) -> Result<&'data [u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(OutOfBounds);
        };

        if offset_end > self.data.len() {
            return Err(OutOfBounds);
        }

        Ok(&self.data[offset..offset_end])
    }

    /// The full view contents.
    pub fn data(&self) -> &'data [u8] {
        self.data
    }

    /// Number of bytes covered by this view.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the view covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_in_bounds() {
        let mut data = vec![0xCC_u8; 64];
        data[10..15].fill(0xBB);

        let view = ImageView::new(&data);

        assert_eq!(view.len(), 64);
        assert_eq!(view.bytes(10, 5).unwrap(), &[0xBB; 5]);
        assert_eq!(view.bytes(64, 0).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn bytes_out_of_bounds() {
        let data = vec![0u8; 32];
        let view = ImageView::new(&data);

        assert!(view.bytes(0, 33).is_err());
        assert!(view.bytes(32, 1).is_err());
        assert!(view.bytes(usize::MAX, 2).is_err());
    }

    #[test]
    fn empty_view() {
        let view = ImageView::new(&[]);

        assert!(view.is_empty());
        assert!(view.bytes(0, 1).is_err());
        assert_eq!(view.bytes(0, 0).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn from_raw_null_is_malformed() {
        let result = unsafe { ImageView::from_raw(std::ptr::null()) };
        assert!(matches!(result.unwrap_err(), crate::Error::Malformed { .. }));
    }

    #[test]
    fn from_raw_covers_header_and_commands() {
        let image = crate::test::ImageBuilder::new_64()
            .uuid_command([0xAB; 16])
            .build();

        let view = unsafe { ImageView::from_raw(image.as_ptr()) }.unwrap();
        assert_eq!(view.len(), image.len());
        assert_eq!(view.data(), image.as_slice());
    }
}
