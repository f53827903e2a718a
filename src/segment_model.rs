/*!
 * Wire models for recorded classroom data.
 *
 * These are the shapes the capture pipeline persists and the storage
 * collaborator hands back. Timing fields stay raw optional floats: stored
 * segments can carry missing, negative, or non-finite times, and only the
 * aligner decides what to do with those.
 */

use serde::{Deserialize, Serialize};

/// One original-language utterance produced by the transcription pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionSegment {
    /// Unique segment id
    pub id: String,

    /// Start time in milliseconds
    #[serde(default)]
    pub start_time_ms: Option<f64>,

    /// End time in milliseconds
    #[serde(default)]
    pub end_time_ms: Option<f64>,

    /// Transcribed text
    pub text: String,

    /// Speaker identity, when the pipeline attributed one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

impl TranscriptionSegment {
    /// Create a segment with well-formed timing
    pub fn new(id: &str, start_time_ms: f64, end_time_ms: f64, text: &str) -> Self {
        TranscriptionSegment {
            id: id.to_string(),
            start_time_ms: Some(start_time_ms),
            end_time_ms: Some(end_time_ms),
            text: text.to_string(),
            speaker: None,
        }
    }

    /// Attach a speaker identity
    pub fn with_speaker(mut self, speaker: &str) -> Self {
        self.speaker = Some(speaker.to_string());
        self
    }
}

/// One translated utterance, timestamped independently of the
/// transcription stream it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationSegment {
    /// Unique segment id
    pub id: String,

    /// Start time in milliseconds
    #[serde(default)]
    pub start_time_ms: Option<f64>,

    /// End time in milliseconds
    #[serde(default)]
    pub end_time_ms: Option<f64>,

    /// Translated text
    pub text: String,

    /// Target language code (ISO 639-1 or 639-2)
    pub language: String,
}

impl TranslationSegment {
    /// Create a segment with well-formed timing
    pub fn new(id: &str, start_time_ms: f64, end_time_ms: f64, text: &str, language: &str) -> Self {
        TranslationSegment {
            id: id.to_string(),
            start_time_ms: Some(start_time_ms),
            end_time_ms: Some(end_time_ms),
            text: text.to_string(),
            language: language.to_string(),
        }
    }
}

/// Metadata describing a recorded classroom session.
///
/// Only `room_name` is load-bearing for the export path (it seeds the
/// download filename); the rest is carried through for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingMetadata {
    /// Recording id
    pub id: String,

    /// Room the session was held in
    pub room_name: String,

    /// When the recording started (RFC 3339), if the store kept it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,

    /// Total recording duration in milliseconds, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl RecordingMetadata {
    /// Create metadata with just the required fields
    pub fn new(id: &str, room_name: &str) -> Self {
        RecordingMetadata {
            id: id.to_string(),
            room_name: room_name.to_string(),
            started_at: None,
            duration_ms: None,
        }
    }
}
