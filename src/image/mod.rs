//! Binary introspection over mapped Mach-O images.
//!
//! This module is the core of the crate: given the base address of an image the
//! dynamic loader just mapped (or is about to unmap), it walks the image's header
//! and load commands in place and extracts the metadata an event record needs.
//!
//! # Architecture
//!
//! Everything is layered on [`ImageView`], the one audited unsafe boundary:
//!
//! - [`io`] - bounds-checked native-endian field readers
//! - [`layout`] - Mach-O constants and fixed field offsets
//! - [`header`] - 32/64-bit header classification ([`HeaderInfo`])
//! - [`commands`] - pull-based load-command iteration ([`commands()`])
//! - [`metadata`] - the build-UUID and `__TEXT`-size queries
//!
//! # Examples
//!
//! ```rust
//! use dyldtrack::image::{self, ImageView};
//!
//! // Any in-memory image buffer works; loader callbacks use ImageView::from_raw.
//! let buffer = vec![0u8; 32];
//! let view = ImageView::new(&buffer);
//!
//! assert_eq!(image::text_segment_size(&view), 0);
//! assert!(image::build_uuid(&view).is_nil());
//! ```

pub mod commands;
pub mod header;
pub mod io;
pub mod layout;
mod view;

mod metadata;

pub use commands::{commands, CommandIter, LoadCommand};
pub use header::HeaderInfo;
pub use metadata::{build_uuid, text_segment_size};
pub use view::ImageView;
