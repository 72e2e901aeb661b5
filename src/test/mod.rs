//! Shared test fixtures: synthetic in-memory images.

use crate::image::layout::{
    HEADER_SIZE_32, HEADER_SIZE_64, LC_SEGMENT, LC_SEGMENT_64, LC_UUID, MH_MAGIC, MH_MAGIC_64,
    SEGMENT_NAME_LEN, SEG_TEXT,
};

/// Builds a minimal image buffer: a 32- or 64-bit header followed by an arbitrary
/// sequence of load commands. `ncmds` and `sizeofcmds` are derived from the added
/// commands unless overridden.
pub(crate) struct ImageBuilder {
    is_64bit: bool,
    magic: u32,
    command_count: Option<u32>,
    commands: Vec<Vec<u8>>,
}

impl ImageBuilder {
    pub(crate) fn new_64() -> ImageBuilder {
        ImageBuilder {
            is_64bit: true,
            magic: MH_MAGIC_64,
            command_count: None,
            commands: Vec::new(),
        }
    }

    pub(crate) fn new_32() -> ImageBuilder {
        ImageBuilder {
            is_64bit: false,
            magic: MH_MAGIC,
            command_count: None,
            commands: Vec::new(),
        }
    }

    /// Override the header magic (classification tests).
    pub(crate) fn magic(mut self, magic: u32) -> ImageBuilder {
        self.magic = magic;
        self
    }

    /// Override the declared `ncmds` (walker hardening tests).
    pub(crate) fn command_count(mut self, ncmds: u32) -> ImageBuilder {
        self.command_count = Some(ncmds);
        self
    }

    /// Append an `LC_UUID` command carrying the given payload bytes.
    pub(crate) fn uuid_command(self, uuid: [u8; 16]) -> ImageBuilder {
        self.raw_command(LC_UUID, &uuid)
    }

    /// Append a 64-bit segment command with the given name and `vmsize`.
    pub(crate) fn segment_64(self, name: [u8; SEGMENT_NAME_LEN], vmsize: u64) -> ImageBuilder {
        let mut payload = Vec::new();
        payload.extend_from_slice(&name);
        payload.extend_from_slice(&0u64.to_ne_bytes()); // vmaddr
        payload.extend_from_slice(&vmsize.to_ne_bytes());
        payload.extend_from_slice(&0u64.to_ne_bytes()); // fileoff
        payload.extend_from_slice(&0u64.to_ne_bytes()); // filesize
        payload.extend_from_slice(&[0u8; 16]); // prots, nsects, flags
        self.raw_command(LC_SEGMENT_64, &payload)
    }

    /// Append a 64-bit `__TEXT` segment command.
    pub(crate) fn text_segment_64(self, vmsize: u64) -> ImageBuilder {
        self.segment_64(SEG_TEXT, vmsize)
    }

    /// Append a 32-bit `__TEXT` segment command.
    pub(crate) fn text_segment_32(self, vmsize: u32) -> ImageBuilder {
        let mut payload = Vec::new();
        payload.extend_from_slice(&SEG_TEXT);
        payload.extend_from_slice(&0u32.to_ne_bytes()); // vmaddr
        payload.extend_from_slice(&vmsize.to_ne_bytes());
        payload.extend_from_slice(&0u32.to_ne_bytes()); // fileoff
        payload.extend_from_slice(&0u32.to_ne_bytes()); // filesize
        payload.extend_from_slice(&[0u8; 16]); // prots, nsects, flags
        self.raw_command(LC_SEGMENT, &payload)
    }

    /// Append a command of the given kind; `cmdsize` covers prefix + payload.
    pub(crate) fn raw_command(self, kind: u32, payload: &[u8]) -> ImageBuilder {
        let size = (8 + payload.len()) as u32;
        self.raw_command_with_size(kind, size, payload)
    }

    /// Append a command with an explicit (possibly lying) `cmdsize`.
    pub(crate) fn raw_command_with_size(
        mut self,
        kind: u32,
        size: u32,
        payload: &[u8],
    ) -> ImageBuilder {
        let mut command = Vec::new();
        command.extend_from_slice(&kind.to_ne_bytes());
        command.extend_from_slice(&size.to_ne_bytes());
        command.extend_from_slice(payload);
        self.commands.push(command);
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let sizeofcmds: usize = self.commands.iter().map(Vec::len).sum();
        let ncmds = self.command_count.unwrap_or(self.commands.len() as u32);

        let mut image = Vec::new();
        image.extend_from_slice(&self.magic.to_ne_bytes());
        image.extend_from_slice(&0u32.to_ne_bytes()); // cputype
        image.extend_from_slice(&0u32.to_ne_bytes()); // cpusubtype
        image.extend_from_slice(&0u32.to_ne_bytes()); // filetype
        image.extend_from_slice(&ncmds.to_ne_bytes());
        image.extend_from_slice(&(sizeofcmds as u32).to_ne_bytes());
        image.extend_from_slice(&0u32.to_ne_bytes()); // flags
        if self.is_64bit {
            image.extend_from_slice(&0u32.to_ne_bytes()); // reserved
        }
        debug_assert_eq!(
            image.len(),
            if self.is_64bit {
                HEADER_SIZE_64
            } else {
                HEADER_SIZE_32
            }
        );

        for command in self.commands {
            image.extend_from_slice(&command);
        }
        image
    }
}
