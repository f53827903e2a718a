/*!
 * In-memory storage for tests and embedders.
 */

use std::collections::HashMap;
use async_trait::async_trait;
use parking_lot::RwLock;

use crate::errors::StorageError;
use crate::language_utils;
use crate::segment_model::{RecordingMetadata, TranscriptionSegment, TranslationSegment};
use crate::storage::Storage;

#[derive(Debug, Clone)]
struct RecordingData {
    metadata: RecordingMetadata,
    transcriptions: Vec<TranscriptionSegment>,
    translations: Vec<TranslationSegment>,
}

/// Map-backed storage guarded by a read-write lock.
///
/// Reads dominate (the export path never writes), so `parking_lot::RwLock`
/// keeps concurrent exports cheap.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    recordings: RwLock<HashMap<String, RecordingData>>,
}

impl MemoryStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a recording with its segment streams, replacing any previous
    /// data stored under the same id.
    pub fn insert(
        &self,
        metadata: RecordingMetadata,
        transcriptions: Vec<TranscriptionSegment>,
        translations: Vec<TranslationSegment>,
    ) {
        let id = metadata.id.clone();
        self.recordings.write().insert(
            id,
            RecordingData {
                metadata,
                transcriptions,
                translations,
            },
        );
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_recording(
        &self,
        recording_id: &str,
    ) -> Result<Option<RecordingMetadata>, StorageError> {
        Ok(self
            .recordings
            .read()
            .get(recording_id)
            .map(|data| data.metadata.clone()))
    }

    async fn get_transcriptions(
        &self,
        recording_id: &str,
    ) -> Result<Vec<TranscriptionSegment>, StorageError> {
        Ok(self
            .recordings
            .read()
            .get(recording_id)
            .map(|data| data.transcriptions.clone())
            .unwrap_or_default())
    }

    async fn get_translations(
        &self,
        recording_id: &str,
        language: &str,
    ) -> Result<Vec<TranslationSegment>, StorageError> {
        Ok(self
            .recordings
            .read()
            .get(recording_id)
            .map(|data| {
                data.translations
                    .iter()
                    .filter(|segment| {
                        language_utils::language_codes_match(&segment.language, language)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
