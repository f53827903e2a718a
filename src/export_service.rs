/*!
 * Export orchestration: validate the request, fetch the recording data,
 * align the two segment streams, encode, and wrap the result with a
 * filename and MIME type.
 */

use std::str::FromStr;
use std::sync::Arc;
use bytes::Bytes;
use log::{debug, info};

use crate::aligner;
use crate::app_config::Config;
use crate::errors::ExportError;
use crate::language_utils;
use crate::storage::Storage;
use crate::subtitle_encoder::{self, SubtitleFormat};

/// The (content, filename, MIME type) triple handed to the delivery layer.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Encoded document bytes
    pub content: Bytes,

    /// Download filename, `{room_name}_translation_{language}.{extension}`
    pub filename: String,

    /// MIME type matching the format
    pub mime_type: &'static str,
}

/// Orchestrates one export request end to end.
///
/// Holds no per-request state; concurrent exports share a single service
/// value without coordination.
pub struct ExportService {
    storage: Arc<dyn Storage>,
    config: Config,
}

impl ExportService {
    /// Create a service over a storage collaborator with explicit
    /// configuration (never read from ambient global state).
    pub fn new(storage: Arc<dyn Storage>, config: Config) -> Self {
        ExportService { storage, config }
    }

    /// Export a recording's translations for one language in one format.
    ///
    /// Request validation happens before any storage I/O; malformed
    /// segments inside the fetched data are dropped and counted rather
    /// than failing the request, unless nothing survives.
    pub async fn export(
        &self,
        recording_id: &str,
        language: &str,
        format: &str,
    ) -> Result<ExportArtifact, ExportError> {
        let format = SubtitleFormat::from_str(format)
            .map_err(|_| ExportError::InvalidFormat(format.to_string()))?;
        if !self.config.format_enabled(format) {
            return Err(ExportError::InvalidFormat(format.to_string()));
        }

        let language = language.trim().to_lowercase();
        let not_found = || ExportError::NotFound {
            recording_id: recording_id.to_string(),
            language: language.clone(),
        };

        // A code no ISO 639 table recognizes cannot have translations.
        if language_utils::validate_language_code(&language).is_err() {
            return Err(not_found());
        }

        let recording = self
            .storage
            .get_recording(recording_id)
            .await?
            .ok_or_else(not_found)?;

        let translations = self.storage.get_translations(recording_id, &language).await?;
        if translations.is_empty() {
            return Err(not_found());
        }
        let transcriptions = self.storage.get_transcriptions(recording_id).await?;

        let segments = transcriptions.len() + translations.len();
        let limit = self.config.max_segments_per_export;
        if segments > limit {
            return Err(ExportError::ResourceExhausted { segments, limit });
        }

        let alignment = aligner::align(&transcriptions, &translations);
        if alignment.is_empty() {
            return Err(ExportError::EmptyResult {
                dropped: alignment.dropped_total(),
            });
        }
        if alignment.dropped_total() > 0 {
            debug!(
                "Alignment for recording '{}' dropped {} segment(s) with unusable timing",
                recording_id,
                alignment.dropped_total()
            );
        }

        let content = subtitle_encoder::encode(format, &alignment.cues);
        let filename = format!(
            "{}_translation_{}.{}",
            recording.room_name,
            language,
            format.extension()
        );

        info!(
            "Exported {} cue(s) for recording '{}' as {}",
            alignment.cues.len(),
            recording_id,
            filename
        );

        Ok(ExportArtifact {
            content: Bytes::from(content),
            filename,
            mime_type: format.mime_type(),
        })
    }
}
