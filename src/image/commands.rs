//! Pull-based iteration over an image's load commands.
//!
//! The walker is a finite, lazy iterator: consumers stop early by short-circuiting
//! (`find`, `take_while`, a `for` with `break`) instead of mutating a shared stop
//! flag. Iteration ends after the header's declared command count, on the first
//! zero-size command (the malformed-stream sentinel), on any read that would cross
//! the view, and when a command would extend past the declared command region.

use crate::image::{
    header::{command_count, HeaderInfo},
    io::read_ne,
    layout::{LOAD_COMMAND_SIZE, MAX_COMMAND_REGION},
    ImageView,
};

/// A view of one load command within an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadCommand {
    /// Command kind (`cmd`)
    pub kind: u32,
    /// Declared size of the command in bytes (`cmdsize`), never zero when yielded
    pub size: u32,
    /// Byte offset of the command within its image view
    pub offset: usize,
}

/// Iterate the load commands of an image.
///
/// Returns an empty iterator for an image whose header cannot be read; a degraded
/// walk is indistinguishable from an image with no commands, which is what the
/// extractors' "not found" defaults require.
pub fn commands<'view, 'data>(view: &'view ImageView<'data>) -> CommandIter<'view, 'data> {
    match HeaderInfo::classify(view).and_then(|header| Ok((header, command_count(view)?))) {
        Ok((header, ncmds)) => CommandIter {
            view,
            cursor: header.size,
            end: view.len().min(header.size.saturating_add(MAX_COMMAND_REGION)),
            remaining: ncmds,
        },
        Err(_) => CommandIter {
            view,
            cursor: 0,
            end: 0,
            remaining: 0,
        },
    }
}

/// Finite iterator over the load commands of one image view.
///
/// Created by [`commands`].
#[derive(Debug)]
pub struct CommandIter<'view, 'data> {
    view: &'view ImageView<'data>,
    cursor: usize,
    end: usize,
    remaining: u32,
}

impl Iterator for CommandIter<'_, '_> {
    type Item = LoadCommand;

    fn next(&mut self) -> Option<LoadCommand> {
        if self.remaining == 0 {
            return None;
        }

        let prefix = self.view.bytes(self.cursor, LOAD_COMMAND_SIZE).ok()?;
        let kind: u32 = read_ne(prefix).ok()?;
        let size: u32 = read_ne(&prefix[4..]).ok()?;

        // Zero-size sentinel: stop instead of spinning on the same offset forever.
        if size == 0 {
            self.remaining = 0;
            return None;
        }

        // A command reaching past the declared region means the stream is lying
        // about itself; stop before reading unrelated memory.
        let next_cursor = self.cursor.checked_add(size as usize)?;
        if next_cursor > self.end {
            self.remaining = 0;
            return None;
        }

        let command = LoadCommand {
            kind,
            size,
            offset: self.cursor,
        };

        self.cursor = next_cursor;
        self.remaining -= 1;

        Some(command)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining as usize))
    }
}
