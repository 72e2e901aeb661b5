//! Mach-O layout constants for the header and load-command region.
//!
//! Field positions are spelled out as offsets into a byte view instead of
//! `#[repr(C)]` struct casts, so that every access stays bounds-checked by
//! [`crate::image::ImageView`].

// =============================================================================
// Magic Numbers
// =============================================================================

/// 64-bit Mach-O magic (native byte order)
pub const MH_MAGIC_64: u32 = 0xFEED_FACF;

/// 64-bit Mach-O magic (byte-swapped)
pub const MH_CIGAM_64: u32 = 0xCFFA_EDFE;

/// 32-bit Mach-O magic (native byte order)
pub const MH_MAGIC: u32 = 0xFEED_FACE;

/// 32-bit Mach-O magic (byte-swapped)
pub const MH_CIGAM: u32 = 0xCEFA_EDFE;

// =============================================================================
// Header Layout
// =============================================================================

/// Size of `mach_header` in bytes
pub const HEADER_SIZE_32: usize = 28;

/// Size of `mach_header_64` in bytes (adds the trailing `reserved` field)
pub const HEADER_SIZE_64: usize = 32;

/// Offset of the `magic` field within either header variant
pub const HEADER_MAGIC_OFFSET: usize = 0;

/// Offset of the `ncmds` field within either header variant
pub const HEADER_NCMDS_OFFSET: usize = 16;

/// Offset of the `sizeofcmds` field within either header variant
pub const HEADER_SIZEOFCMDS_OFFSET: usize = 20;

// =============================================================================
// Load Commands
// =============================================================================

/// Segment of this file (32-bit variant)
pub const LC_SEGMENT: u32 = 0x1;

/// Segment of this file (64-bit variant)
pub const LC_SEGMENT_64: u32 = 0x19;

/// Build UUID of this file
pub const LC_UUID: u32 = 0x1B;

/// Size of the generic `load_command` prefix (`cmd` + `cmdsize`)
pub const LOAD_COMMAND_SIZE: usize = 8;

/// Offset of the 16 UUID payload bytes within a `uuid_command`
pub const UUID_BYTES_OFFSET: usize = 8;

/// Minimum size of a well-formed `uuid_command`
pub const UUID_COMMAND_SIZE: usize = 24;

/// Offset of the fixed 16-byte `segname` field within either segment command variant
pub const SEGMENT_NAME_OFFSET: usize = 8;

/// Length of the fixed `segname` field; not NUL-terminated when fully occupied
pub const SEGMENT_NAME_LEN: usize = 16;

/// Offset of `vmsize` within a 32-bit `segment_command` (after `vmaddr: u32`)
pub const SEGMENT_VMSIZE_OFFSET_32: usize = 28;

/// Offset of `vmsize` within a `segment_command_64` (after `vmaddr: u64`)
pub const SEGMENT_VMSIZE_OFFSET_64: usize = 32;

/// Minimum size of a 32-bit `segment_command` (without trailing sections)
pub const SEGMENT_COMMAND_SIZE_32: usize = 56;

/// Minimum size of a `segment_command_64` (without trailing sections)
pub const SEGMENT_COMMAND_SIZE_64: usize = 72;

/// The well-known text segment name, zero-padded to the fixed field width
pub const SEG_TEXT: [u8; SEGMENT_NAME_LEN] = *b"__TEXT\0\0\0\0\0\0\0\0\0\0";

// =============================================================================
// Hardening
// =============================================================================

/// Upper bound on the load-command region accepted from a mapped image.
///
/// `sizeofcmds` is loader-supplied and untrusted; real-world values stay in the
/// tens of kilobytes. Anything past this cap is treated as the end of the
/// well-formed region rather than walked.
pub const MAX_COMMAND_REGION: usize = 0x10_0000;
