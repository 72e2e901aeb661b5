//! The loader-event body: resolve, extract, format, append.
//!
//! Called once per add/remove callback. Its only externally visible effect is the
//! log append; failures surface on the diagnostic channel and never propagate.

use crate::{
    image::{build_uuid, text_segment_size, ImageView},
    log::EventLog,
    record::{ImageEvent, ImageRecord},
    resolver::ImageResolver,
};

/// Record one load or unload event for the image at `addr`.
///
/// Resolves the owning module, extracts the `__TEXT` size and build UUID from the
/// mapped image, and appends one formatted record to `log`. On resolution failure
/// the event is dropped with a diagnostic; loader events are transient and cannot
/// be replayed. Malformed metadata degrades to placeholder values instead.
pub fn record_image_event(
    log: &EventLog,
    resolver: &dyn ImageResolver,
    view: &ImageView<'_>,
    addr: usize,
    event: ImageEvent,
) {
    let Some(resolved) = resolver.resolve(addr) else {
        log::warn!("{}; dropping {event} event", crate::Error::ImageResolution(addr));
        return;
    };

    let text_size = text_segment_size(view);
    let uuid = build_uuid(view);

    let record = ImageRecord::new(event, &resolved, text_size, uuid);
    log::debug!("{record}");
    log.append(record);
}
