//! Address-to-module resolution.
//!
//! Maps a raw image address back to the owning image's on-disk path and load base
//! through the OS lookup primitive (`dladdr`). The trait seam exists so the event
//! recorder can be exercised with synthetic images that were never mapped by the
//! loader.

/// The outcome of a successful address-to-module lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// The image's on-disk path, when the lookup could produce one
    pub path: Option<String>,
    /// The image's load base address
    pub base: usize,
}

/// Address-to-module lookup facility.
///
/// Implementations must be callable from a loader callback: non-blocking and free
/// of dynamic loading.
pub trait ImageResolver: Send + Sync {
    /// Resolve the image owning `addr`, or `None` when no loaded module matches.
    fn resolve(&self, addr: usize) -> Option<ResolvedImage>;
}

/// Production resolver backed by `dladdr`.
#[derive(Debug, Default)]
pub struct DladdrResolver;

#[cfg(unix)]
impl ImageResolver for DladdrResolver {
    fn resolve(&self, addr: usize) -> Option<ResolvedImage> {
        let mut info: libc::Dl_info = unsafe { std::mem::zeroed() };

        // dladdr only inspects already-loaded images; it cannot trigger a load.
        let rc = unsafe { libc::dladdr(addr as *const libc::c_void, &mut info) };
        if rc == 0 {
            return None;
        }

        let path = if info.dli_fname.is_null() {
            None
        } else {
            unsafe { std::ffi::CStr::from_ptr(info.dli_fname) }
                .to_str()
                .ok()
                .map(str::to_owned)
        };

        Some(ResolvedImage {
            path,
            base: info.dli_fbase as usize,
        })
    }
}

#[cfg(not(unix))]
impl ImageResolver for DladdrResolver {
    fn resolve(&self, _addr: usize) -> Option<ResolvedImage> {
        None
    }
}
