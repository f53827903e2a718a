/*!
 * Common test utilities for the classcap test suite
 */

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;

use classcap::errors::StorageError;
use classcap::segment_model::{RecordingMetadata, TranscriptionSegment, TranslationSegment};
use classcap::storage::{MemoryStorage, Storage};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Writes a recording fixture in the layout `JsonFileStorage` reads
pub fn write_recording_fixture(
    root: &Path,
    recording_id: &str,
    room_name: &str,
    transcriptions: &[TranscriptionSegment],
    translations_by_language: &[(&str, Vec<TranslationSegment>)],
) -> Result<()> {
    let dir = root.join(recording_id);
    std::fs::create_dir_all(&dir)?;

    let metadata = RecordingMetadata::new(recording_id, room_name);
    std::fs::write(
        dir.join("recording.json"),
        serde_json::to_string_pretty(&metadata)?,
    )?;
    std::fs::write(
        dir.join("transcriptions.json"),
        serde_json::to_string_pretty(transcriptions)?,
    )?;
    for (language, segments) in translations_by_language {
        std::fs::write(
            dir.join(format!("translations.{}.json", language)),
            serde_json::to_string_pretty(segments)?,
        )?;
    }

    Ok(())
}

/// Storage wrapper that counts every call reaching it.
///
/// Used to prove that request validation happens before any storage I/O.
pub struct CountingStorage {
    inner: MemoryStorage,
    calls: AtomicUsize,
}

impl CountingStorage {
    /// Wrap an existing in-memory store
    pub fn new(inner: MemoryStorage) -> Self {
        CountingStorage {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Wrap an empty store
    pub fn empty() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Number of storage calls observed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for CountingStorage {
    async fn get_recording(
        &self,
        recording_id: &str,
    ) -> Result<Option<RecordingMetadata>, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_recording(recording_id).await
    }

    async fn get_transcriptions(
        &self,
        recording_id: &str,
    ) -> Result<Vec<TranscriptionSegment>, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_transcriptions(recording_id).await
    }

    async fn get_translations(
        &self,
        recording_id: &str,
        language: &str,
    ) -> Result<Vec<TranslationSegment>, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_translations(recording_id, language).await
    }
}
