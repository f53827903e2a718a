/*!
 * Error types for the classcap export pipeline.
 *
 * Typed with the thiserror crate so the delivery layer can map each
 * failure kind to its own status without matching on message strings.
 */

use thiserror::Error;

/// Failures surfaced by the storage collaborator
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying I/O failure
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document could not be decoded
    #[error("malformed stored data: {0}")]
    Malformed(String),

    /// Any other backend failure
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Failures the export orchestrator reports to its caller
#[derive(Error, Debug)]
pub enum ExportError {
    /// Requested format is not one of srt/vtt/txt, or is disabled by configuration
    #[error("unsupported export format: {0}")]
    InvalidFormat(String),

    /// Recording absent, or no translations stored for the requested language
    #[error("nothing to export for recording '{recording_id}' (language: {language})")]
    NotFound {
        /// Recording that was requested
        recording_id: String,
        /// Language that was requested
        language: String,
    },

    /// Alignment produced zero usable cues even though the recording and language exist
    #[error("alignment produced no cues ({dropped} segment(s) dropped for unusable timing)")]
    EmptyResult {
        /// Segments excluded during alignment
        dropped: usize,
    },

    /// Input segment count exceeds the configured processing ceiling
    #[error("segment count {segments} exceeds the configured ceiling of {limit}")]
    ResourceExhausted {
        /// Segments the request would have processed
        segments: usize,
        /// Configured ceiling
        limit: usize,
    },

    /// Failure in the storage collaborator
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
