//! Bounds-checked field readers for in-memory image metadata.
//!
//! All metadata access in this crate goes through these helpers rather than through
//! pointer casts or `#[repr(C)]` struct reinterpretation. Every read is validated
//! against the length of the backing view, so a truncated or lying command stream
//! produces [`crate::Error::OutOfBounds`] instead of a wild read.
//!
//! Reads are native-endian: a mapped image is always in the byte order of the host
//! that mapped it, including the byte-swapped magic constants which are compared as
//! plain values.
//!
//! # Examples
//!
//! ```rust,ignore
//! use dyldtrack::image::io::read_ne_at;
//!
//! let data = 0x4000_u32.to_ne_bytes();
//! let mut offset = 0;
//! let value: u32 = read_ne_at(&data, &mut offset)?;
//! assert_eq!(value, 0x4000);
//! assert_eq!(offset, 4);
//! # Ok::<(), dyldtrack::Error>(())
//! ```

use crate::{Error::OutOfBounds, Result};

/// Trait for implementing type-specific safe field reading operations.
///
/// Abstracts the conversion from a fixed-size byte array to a typed value so the
/// reading functions can stay generic over the field widths that occur in image
/// headers and load commands.
pub trait FieldIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in native-endian
    fn from_ne_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte buffer in native-endian
    fn to_ne_bytes(self) -> Self::Bytes;
}

// Implement FieldIO support for u32
impl FieldIO for u32 {
    type Bytes = [u8; 4];

    fn from_ne_bytes(bytes: Self::Bytes) -> Self {
        u32::from_ne_bytes(bytes)
    }

    fn to_ne_bytes(self) -> Self::Bytes {
        u32::to_ne_bytes(self)
    }
}

// Implement FieldIO support for u64
impl FieldIO for u64 {
    type Bytes = [u8; 8];

    fn from_ne_bytes(bytes: Self::Bytes) -> Self {
        u64::from_ne_bytes(bytes)
    }

    fn to_ne_bytes(self) -> Self::Bytes {
        u64::to_ne_bytes(self)
    }
}

/// Safely reads a value of type `T` in native byte order from a data buffer.
///
/// Reads from the beginning of the buffer. Returns [`crate::Error::OutOfBounds`] if
/// there are insufficient bytes.
pub fn read_ne<T: FieldIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_ne_at(data, &mut offset)
}

/// Safely reads a value of type `T` in native byte order at a specific offset.
///
/// Advances `offset` by the number of bytes read. Returns
/// [`crate::Error::OutOfBounds`] if there are insufficient bytes; the offset is left
/// untouched in that case.
pub fn read_ne_at<T: FieldIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    if (type_len + *offset) > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..*offset + type_len].try_into() else {
        return Err(OutOfBounds);
    };

    *offset += type_len;

    Ok(T::from_ne_bytes(read))
}
