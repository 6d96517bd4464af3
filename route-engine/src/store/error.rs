//! Profile store error types.

/// Errors that can occur when loading or saving a route.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document is not valid JSON for a route
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The stored document was written by an incompatible version
    #[error("unsupported document version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// The background writer has stopped
    #[error("route writer is no longer running")]
    WriterClosed,
}
