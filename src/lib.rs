/*!
 * # classcap - Classroom Caption Export
 *
 * A Rust library for exporting recorded classroom translations as
 * downloadable caption/subtitle files.
 *
 * ## Features
 *
 * - Nearest-timestamp alignment of independently recorded transcription
 *   and translation streams into one ordered bilingual cue sequence
 * - SubRip (SRT), WebVTT and plain-transcript encoders sharing a single
 *   cue body renderer
 * - Typed failure taxonomy for delivery layers (HTTP handler, CLI)
 * - Pluggable async storage collaborator with JSON-directory and
 *   in-memory implementations
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `segment_model`: wire models for stored recording data
 * - `aligner`: bilingual cue alignment
 * - `subtitle_encoder`: the three output formats plus round-trip parsers
 * - `export_service`: the export orchestrator
 * - `storage`: storage collaborator trait and implementations
 * - `app_config`: configuration management
 * - `language_utils`: ISO language code utilities
 * - `file_utils`: file system operations
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod aligner;
pub mod app_config;
pub mod errors;
pub mod export_service;
pub mod file_utils;
pub mod language_utils;
pub mod segment_model;
pub mod storage;
pub mod subtitle_encoder;

// Re-export main types for easier usage
pub use aligner::{align, Alignment, Cue};
pub use app_config::Config;
pub use errors::{ExportError, StorageError};
pub use export_service::{ExportArtifact, ExportService};
pub use segment_model::{RecordingMetadata, TranscriptionSegment, TranslationSegment};
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use subtitle_encoder::SubtitleFormat;
