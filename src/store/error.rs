//! Submission Store Errors

/// Errors that can occur in the submission store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Insert failed (connectivity, credentials, constraint)
    #[error("Could not save submission: {0}")]
    Write(#[source] sqlx::Error),

    /// Read failed (connectivity, credentials, schema mismatch)
    #[error("Could not load submissions: {0}")]
    Read(#[source] sqlx::Error),

    /// Row does not fit the domain model
    #[error("Invalid stored row: {0}")]
    InvalidRow(String),

    /// Store was explicitly put out of service (in-memory store only)
    #[error("Submission store unavailable")]
    Unavailable,
}
