use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all failure modes of image introspection, event recording and log
/// persistence. Loader callbacks never propagate these errors to the host process; they are
/// either degraded to placeholder values or reported through the diagnostic channel, per the
/// never-crash-the-host rule.
///
/// # Error Categories
///
/// ## Image Parsing Errors
/// - [`Error::OutOfBounds`] - Attempted to read beyond the mapped command region
/// - [`Error::Malformed`] - Corrupted or inconsistent image structure
///
/// ## Event Errors
/// - [`Error::ImageResolution`] - Address-to-module lookup failed for a raw image address
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors during log persistence
/// - [`Error::Serialization`] - Persisted snapshot could not be encoded or decoded
///
/// # Examples
///
/// ```rust,no_run
/// use dyldtrack::{EventLog, Error};
/// use std::path::Path;
///
/// match EventLog::global().persist(Path::new("/var/empty/denied/Log.json")) {
///     Ok(()) => println!("snapshot written"),
///     Err(Error::FileError(io_err)) => eprintln!("cache dir not writable: {}", io_err),
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An out of bound access was attempted while reading image metadata.
    ///
    /// This error occurs when a field read would cross the end of the image view.
    /// It is a safety check that bounds every access to loader-owned memory.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// The image metadata is damaged and could not be walked.
    ///
    /// Indicates a load-command stream that is inconsistent with the header's own
    /// declarations. The error includes the source location where the malformation
    /// was detected for debugging purposes.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The address-to-module lookup found no owning image for an address.
    ///
    /// Loader events are transient and cannot be replayed, so the caller drops the
    /// event after reporting a diagnostic instead of retrying.
    #[error("no loaded module found for address {0:#x}")]
    ImageResolution(usize),

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while persisting or reloading the
    /// event log snapshot.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// A persisted snapshot could not be serialized or deserialized.
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),
}
