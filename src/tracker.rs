//! Tracker lifecycle: callback registration and the save policy.
//!
//! The dynamic loader only accepts process-wide callback entry points, not
//! per-instance closures, so registration happens exactly once for the process no
//! matter how many [`LoadTracker`] handles exist. Registration is one-way: there is
//! no unregister primitive, the callbacks live until process teardown.
//!
//! Callback bodies run on whatever thread triggered the load, possibly during
//! process startup and possibly inside loader-sensitive code paths. They stay
//! non-blocking (the log append is lock-free), perform no dynamic loading, and
//! catch panics so nothing unwinds across the FFI boundary.

use std::path::{Path, PathBuf};
use std::sync::Once;

use crate::{
    log::EventLog,
    record::ImageEvent,
    recorder::record_image_event,
    resolver::DladdrResolver,
    Result,
};

/// File name of the persisted snapshot inside the cache directory.
const LOG_FILE_NAME: &str = "dyldtrack-log.json";

static REGISTER: Once = Once::new();

#[cfg(any(target_os = "macos", target_os = "ios"))]
extern "C" {
    fn _dyld_register_func_for_add_image(
        callback: extern "C" fn(*const libc::c_void, libc::intptr_t),
    );
    fn _dyld_register_func_for_remove_image(
        callback: extern "C" fn(*const libc::c_void, libc::intptr_t),
    );
}

extern "C" fn add_image_callback(header: *const libc::c_void, _slide: libc::intptr_t) {
    // A panic must not unwind into the loader.
    let _ = std::panic::catch_unwind(|| handle_image_event(header.cast(), ImageEvent::Added));
}

extern "C" fn remove_image_callback(header: *const libc::c_void, _slide: libc::intptr_t) {
    let _ = std::panic::catch_unwind(|| handle_image_event(header.cast(), ImageEvent::Removed));
}

fn handle_image_event(header: *const u8, event: ImageEvent) {
    let view = match unsafe { crate::image::ImageView::from_raw(header) } {
        Ok(view) => view,
        Err(e) => {
            log::warn!("unreadable image header at {:#x}: {e}", header as usize);
            return;
        }
    };

    record_image_event(
        EventLog::global(),
        &DladdrResolver,
        &view,
        header as usize,
        event,
    );
}

fn register_callbacks() {
    REGISTER.call_once(|| {
        #[cfg(any(target_os = "macos", target_os = "ios"))]
        unsafe {
            // The loader replays the add callback for every image already loaded,
            // so the log starts complete even when the tracker comes up late.
            _dyld_register_func_for_add_image(add_image_callback);
            _dyld_register_func_for_remove_image(remove_image_callback);
        }

        #[cfg(not(any(target_os = "macos", target_os = "ios")))]
        {
            // Keep the callbacks referenced on hosts without a dyld.
            let _ = (add_image_callback, remove_image_callback);
            log::debug!("no dynamic loader notification facility on this target");
        }
    });
}

/// Default location of the persisted snapshot: a fixed file inside the process's
/// cache directory.
pub fn default_log_path() -> PathBuf {
    let cache_dir = if cfg!(any(target_os = "macos", target_os = "ios")) {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join("Library/Caches"))
            .unwrap_or_else(std::env::temp_dir)
    } else {
        std::env::temp_dir()
    };

    cache_dir.join(LOG_FILE_NAME)
}

/// Handle over the process-wide load/unload tracking service.
///
/// Constructing the first tracker registers the loader callbacks; further
/// instances observe the same log. Dropping a tracker persists the log once more
/// as a best effort, so an ungraceful termination after backgrounding still has a
/// prior save.
///
/// # Examples
///
/// ```rust,no_run
/// use dyldtrack::LoadTracker;
///
/// let tracker = LoadTracker::new();
/// for line in tracker.log() {
///     println!("{line}");
/// }
/// tracker.save().expect("cache dir writable");
/// ```
#[derive(Debug)]
pub struct LoadTracker {
    log_path: PathBuf,
}

impl LoadTracker {
    /// Start tracking, persisting to the default cache-directory path.
    pub fn new() -> LoadTracker {
        LoadTracker::with_log_path(default_log_path())
    }

    /// Start tracking, persisting to `log_path`.
    pub fn with_log_path(log_path: impl Into<PathBuf>) -> LoadTracker {
        register_callbacks();
        LoadTracker {
            log_path: log_path.into(),
        }
    }

    /// An ordered snapshot of every record accumulated so far.
    ///
    /// Safe to call from any thread at any time while events continue to arrive.
    pub fn log(&self) -> Vec<crate::record::ImageRecord> {
        EventLog::global().snapshot()
    }

    /// Where this tracker persists its snapshots.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Persist the full current log now, overwriting any prior snapshot.
    pub fn save(&self) -> Result<()> {
        EventLog::global().persist(&self.log_path)
    }

    /// Host wiring point for the platform's "entering background" notification.
    ///
    /// Persists immediately; a failed write is non-fatal and the in-memory log
    /// remains the source of truth until the next successful save.
    pub fn entered_background(&self) {
        if let Err(e) = self.save() {
            log::warn!("background save of image event log failed: {e}");
        }
    }

    /// Dump the last persisted snapshot to the diagnostic channel.
    ///
    /// Reads the file written by a previous [`LoadTracker::save`]; the in-memory
    /// log is not affected. Does nothing when no prior snapshot exists.
    pub fn print_last_log(&self) {
        match EventLog::load_last(&self.log_path) {
            Some(lines) => {
                for line in lines {
                    log::info!("{line}");
                }
            }
            None => log::info!("no previously saved image event log"),
        }
    }
}

impl Default for LoadTracker {
    fn default() -> Self {
        LoadTracker::new()
    }
}

impl Drop for LoadTracker {
    fn drop(&mut self) {
        if let Err(e) = self.save() {
            log::warn!("final save of image event log failed: {e}");
        }
    }
}
