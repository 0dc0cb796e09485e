//! Error types for the diff crate.

/// Errors that can occur while emitting a diff.
///
/// Comparison itself cannot fail; only the sink receiving events can.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// Writing rendered output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding an event as JSON failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
