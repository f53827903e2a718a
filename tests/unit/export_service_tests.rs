/*!
 * Tests for the export orchestrator
 */

use std::sync::Arc;

use classcap::app_config::Config;
use classcap::errors::ExportError;
use classcap::export_service::ExportService;
use classcap::segment_model::{RecordingMetadata, TranscriptionSegment, TranslationSegment};
use classcap::storage::MemoryStorage;
use classcap::subtitle_encoder::SubtitleFormat;

use crate::common::CountingStorage;

fn populated_storage() -> MemoryStorage {
    let storage = MemoryStorage::new();
    storage.insert(
        RecordingMetadata::new("rec-42", "physics-101"),
        vec![
            TranscriptionSegment::new("o1", 900.0, 1800.0, "Welcome everyone"),
            TranscriptionSegment::new("o2", 5200.0, 6100.0, "Let us begin"),
        ],
        vec![
            TranslationSegment::new("t1", 1000.0, 1900.0, "Bienvenue a tous", "fr"),
            TranslationSegment::new("t2", 5000.0, 5900.0, "Commencons", "fr"),
        ],
    );
    storage
}

fn service_with(storage: MemoryStorage) -> ExportService {
    ExportService::new(Arc::new(storage), Config::default())
}

/// Test a successful SRT export end to end
#[tokio::test]
async fn test_export_withValidRequest_shouldReturnArtifact() {
    let service = service_with(populated_storage());

    let artifact = service.export("rec-42", "fr", "srt").await.unwrap();

    assert_eq!(artifact.filename, "physics-101_translation_fr.srt");
    assert_eq!(artifact.mime_type, "application/x-subrip");

    let content = String::from_utf8(artifact.content.to_vec()).unwrap();
    assert_eq!(
        content,
        "1\n00:00:01,000 --> 00:00:01,900\nWelcome everyone\nBienvenue a tous\n\n\
         2\n00:00:05,000 --> 00:00:05,900\nLet us begin\nCommencons\n\n"
    );
}

/// Test VTT and transcript dispatch through the same request path
#[tokio::test]
async fn test_export_withOtherFormats_shouldDispatchCorrectEncoder() {
    let service = service_with(populated_storage());

    let vtt = service.export("rec-42", "fr", "vtt").await.unwrap();
    assert_eq!(vtt.filename, "physics-101_translation_fr.vtt");
    assert_eq!(vtt.mime_type, "text/vtt");
    assert!(vtt.content.starts_with(b"WEBVTT\n\n"));

    let txt = service.export("rec-42", "fr", "txt").await.unwrap();
    assert_eq!(txt.filename, "physics-101_translation_fr.txt");
    assert_eq!(txt.mime_type, "text/plain");
}

/// Test that an unknown format fails before any storage access
#[tokio::test]
async fn test_export_withUnknownFormat_shouldFailWithoutStorageCalls() {
    let storage = Arc::new(CountingStorage::empty());
    let service = ExportService::new(storage.clone(), Config::default());

    let result = service.export("rec-42", "fr", "xml").await;

    assert!(matches!(result, Err(ExportError::InvalidFormat(f)) if f == "xml"));
    assert_eq!(storage.calls(), 0);
}

/// Test that a configured format restriction is enforced
#[tokio::test]
async fn test_export_withDisabledFormat_shouldFailAsInvalidFormat() {
    let config = Config {
        enabled_formats: vec![SubtitleFormat::Srt],
        ..Config::default()
    };
    let service = ExportService::new(Arc::new(populated_storage()), config);

    let result = service.export("rec-42", "fr", "vtt").await;

    assert!(matches!(result, Err(ExportError::InvalidFormat(_))));
}

/// Test that an unknown recording yields NotFound
#[tokio::test]
async fn test_export_withUnknownRecording_shouldReturnNotFound() {
    let service = service_with(populated_storage());

    let result = service.export("rec-99", "fr", "srt").await;

    assert!(matches!(
        result,
        Err(ExportError::NotFound { recording_id, .. }) if recording_id == "rec-99"
    ));
}

/// Test that a language without stored translations yields NotFound
#[tokio::test]
async fn test_export_withMissingLanguage_shouldReturnNotFound() {
    let service = service_with(populated_storage());

    let result = service.export("rec-42", "de", "srt").await;

    assert!(matches!(
        result,
        Err(ExportError::NotFound { language, .. }) if language == "de"
    ));
}

/// Test that an unrecognized language code yields NotFound, not a crash
#[tokio::test]
async fn test_export_withInvalidLanguageCode_shouldReturnNotFound() {
    let service = service_with(populated_storage());

    let result = service.export("rec-42", "zz-not-a-code", "srt").await;

    assert!(matches!(result, Err(ExportError::NotFound { .. })));
}

/// Test that requests match translations across ISO 639 spellings
#[tokio::test]
async fn test_export_withAlternateLanguageSpelling_shouldStillMatch() {
    let service = service_with(populated_storage());

    // Stored as "fr"; requested as 639-2/T and as legacy 639-2/B
    let part2t = service.export("rec-42", "fra", "srt").await.unwrap();
    assert_eq!(part2t.filename, "physics-101_translation_fra.srt");

    let part2b = service.export("rec-42", "fre", "srt").await.unwrap();
    assert_eq!(part2b.filename, "physics-101_translation_fre.srt");
}

/// Test that all-malformed translations yield EmptyResult
#[tokio::test]
async fn test_export_withOnlyMalformedTranslations_shouldReturnEmptyResult() {
    let storage = MemoryStorage::new();
    let mut bad = TranslationSegment::new("t1", 0.0, 900.0, "bad", "fr");
    bad.start_time_ms = None;
    storage.insert(RecordingMetadata::new("rec-1", "room"), Vec::new(), vec![bad]);
    let service = service_with(storage);

    let result = service.export("rec-1", "fr", "srt").await;

    assert!(matches!(result, Err(ExportError::EmptyResult { dropped }) if dropped == 1));
}

/// Test the segment ceiling
#[tokio::test]
async fn test_export_withSegmentCountAboveCeiling_shouldReturnResourceExhausted() {
    let config = Config {
        max_segments_per_export: 3,
        ..Config::default()
    };
    let service = ExportService::new(Arc::new(populated_storage()), config);

    // 2 transcriptions + 2 translations = 4 > 3
    let result = service.export("rec-42", "fr", "srt").await;

    assert!(matches!(
        result,
        Err(ExportError::ResourceExhausted { segments: 4, limit: 3 })
    ));
}

/// Test that a recording with no transcriptions still exports
#[tokio::test]
async fn test_export_withNoTranscriptions_shouldStillProduceDocument() {
    let storage = MemoryStorage::new();
    storage.insert(
        RecordingMetadata::new("rec-1", "chemistry"),
        Vec::new(),
        vec![TranslationSegment::new("t1", 1000.0, 2000.0, "Seul", "fr")],
    );
    let service = service_with(storage);

    let artifact = service.export("rec-1", "fr", "srt").await.unwrap();

    let content = String::from_utf8(artifact.content.to_vec()).unwrap();
    assert_eq!(content, "1\n00:00:01,000 --> 00:00:02,000\nSeul\n\n");
}
