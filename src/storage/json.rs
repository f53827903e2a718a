/*!
 * Storage over the directory layout the capture pipeline writes.
 *
 * Expected layout, one subdirectory per recording:
 *
 * ```text
 * <root>/<recording_id>/recording.json
 * <root>/<recording_id>/transcriptions.json
 * <root>/<recording_id>/translations.<language>.json
 * ```
 */

use std::fs;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use walkdir::WalkDir;

use crate::errors::StorageError;
use crate::language_utils;
use crate::segment_model::{RecordingMetadata, TranscriptionSegment, TranslationSegment};
use crate::storage::Storage;

const RECORDING_FILE: &str = "recording.json";
const TRANSCRIPTIONS_FILE: &str = "transcriptions.json";
const TRANSLATIONS_PREFIX: &str = "translations.";

/// A recording visible in the storage root, with the translation
/// languages available for it.
#[derive(Debug, Clone)]
pub struct RecordingListing {
    /// Recording id (the subdirectory name)
    pub id: String,

    /// Language codes with stored translations, as spelled on disk
    pub languages: Vec<String>,
}

/// File-backed storage rooted at a recordings directory.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    /// Create storage over the given recordings root
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        JsonFileStorage {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn recording_dir(&self, recording_id: &str) -> PathBuf {
        self.root.join(recording_id)
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| StorageError::Malformed(format!("{}: {}", path.display(), e)))
    }

    /// Language code embedded in a translations file name, if any
    fn translation_language(file_name: &str) -> Option<&str> {
        file_name
            .strip_prefix(TRANSLATIONS_PREFIX)?
            .strip_suffix(".json")
    }

    /// List the recordings under the root with their available languages.
    ///
    /// Used by the CLI `list` command; not part of the `Storage` contract.
    pub fn list_recordings(&self) -> Result<Vec<RecordingListing>, StorageError> {
        let mut listings = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| StorageError::Backend(e.to_string()))?;
            if !entry.path().is_dir() {
                continue;
            }
            if !entry.path().join(RECORDING_FILE).is_file() {
                debug!("Skipping {:?}: no {}", entry.path(), RECORDING_FILE);
                continue;
            }

            let id = entry.file_name().to_string_lossy().to_string();
            let mut languages = Vec::new();
            for file in WalkDir::new(entry.path()).min_depth(1).max_depth(1) {
                let file = file.map_err(|e| StorageError::Backend(e.to_string()))?;
                let name = file.file_name().to_string_lossy().to_string();
                if let Some(language) = Self::translation_language(&name) {
                    languages.push(language.to_string());
                }
            }
            languages.sort();

            listings.push(RecordingListing { id, languages });
        }

        listings.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(listings)
    }
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn get_recording(
        &self,
        recording_id: &str,
    ) -> Result<Option<RecordingMetadata>, StorageError> {
        let path = self.recording_dir(recording_id).join(RECORDING_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        Self::read_json(&path).map(Some)
    }

    async fn get_transcriptions(
        &self,
        recording_id: &str,
    ) -> Result<Vec<TranscriptionSegment>, StorageError> {
        let path = self.recording_dir(recording_id).join(TRANSCRIPTIONS_FILE);
        if !path.is_file() {
            // A recording without transcriptions is still exportable
            return Ok(Vec::new());
        }

        Self::read_json(&path)
    }

    async fn get_translations(
        &self,
        recording_id: &str,
        language: &str,
    ) -> Result<Vec<TranslationSegment>, StorageError> {
        let dir = self.recording_dir(recording_id);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut segments: Vec<TranslationSegment> = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| StorageError::Backend(e.to_string()))?;
            let name = entry.file_name().to_string_lossy().to_string();
            let Some(file_language) = Self::translation_language(&name) else {
                continue;
            };
            if !language_utils::language_codes_match(file_language, language) {
                continue;
            }

            let batch: Vec<TranslationSegment> = Self::read_json(entry.path())?;
            segments.extend(batch);
        }

        Ok(segments)
    }
}
