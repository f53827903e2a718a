/*!
 * Storage collaborator interface for recorded classroom data.
 *
 * The authoritative recording store (database, object storage) lives in
 * the service that owns persistence; this crate only consumes the three
 * read operations the export path needs. Two implementations ship here:
 * - `JsonFileStorage`: reads the directory layout the capture pipeline writes
 * - `MemoryStorage`: in-memory map for tests and embedders
 */

use async_trait::async_trait;

use crate::errors::StorageError;
use crate::segment_model::{RecordingMetadata, TranscriptionSegment, TranslationSegment};

/// Read access to recorded classroom data.
///
/// Segment ordering is not guaranteed by any implementation; the aligner
/// sorts what it needs.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Fetch recording metadata, or None when the recording is unknown
    async fn get_recording(
        &self,
        recording_id: &str,
    ) -> Result<Option<RecordingMetadata>, StorageError>;

    /// Fetch all transcription segments for a recording
    async fn get_transcriptions(
        &self,
        recording_id: &str,
    ) -> Result<Vec<TranscriptionSegment>, StorageError>;

    /// Fetch the translation segments stored for one target language
    ///
    /// Implementations match `language` up to ISO 639 normalization, so a
    /// request for "fra" finds translations stored as "fr". An empty
    /// result means no translations exist for that language.
    async fn get_translations(
        &self,
        recording_id: &str,
        language: &str,
    ) -> Result<Vec<TranslationSegment>, StorageError>;
}

pub mod json;
pub mod memory;

pub use json::{JsonFileStorage, RecordingListing};
pub use memory::MemoryStorage;
