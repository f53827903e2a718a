/*!
 * Bilingual alignment of transcription and translation streams.
 *
 * The two streams are recorded independently, so nothing guarantees a
 * shared ordering or a one-to-one id mapping between them. Alignment pairs
 * every translated segment with the transcription segment whose start time
 * is nearest, then emits a single time-ordered cue sequence that every
 * encoder consumes as-is.
 */

use log::warn;

use crate::segment_model::{TranscriptionSegment, TranslationSegment};

/// One time-coded bilingual line, the common currency of all encoders.
///
/// Text fields are owned snapshots; a cue stays valid after the source
/// segment collections are gone.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    /// 1-based position, assigned after final ordering
    pub sequence_index: usize,

    /// Start time in milliseconds
    pub start_time_ms: u64,

    /// End time in milliseconds
    pub end_time_ms: u64,

    /// Matched original-language text, None when no transcription could be matched
    pub original_text: Option<String>,

    /// Translated text
    pub translated_text: String,

    /// Target language code
    pub language: String,
}

/// Result of one alignment run: the ordered cues plus counts of segments
/// that were excluded for unusable timing.
#[derive(Debug, Default)]
pub struct Alignment {
    /// Cues sorted by start time, `sequence_index` already assigned
    pub cues: Vec<Cue>,

    /// Transcription segments dropped for a missing/negative/non-finite start
    pub dropped_transcriptions: usize,

    /// Translation segments dropped for a missing/negative/non-finite start
    pub dropped_translations: usize,
}

impl Alignment {
    /// Total number of segments excluded from this run
    pub fn dropped_total(&self) -> usize {
        self.dropped_transcriptions + self.dropped_translations
    }

    /// True when alignment produced no usable cues
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

/// A start time is usable when it is present, finite and non-negative.
fn usable_start_ms(start: Option<f64>) -> Option<f64> {
    start.filter(|ms| ms.is_finite() && *ms >= 0.0)
}

/// Merge one transcription stream and one translation stream into an
/// ordered bilingual cue sequence.
///
/// Segments with unusable start times are dropped and counted, never
/// fatal. Every surviving translation segment yields exactly one cue. The
/// function is pure: concurrent exports can share the same inputs freely.
pub fn align(
    transcriptions: &[TranscriptionSegment],
    translations: &[TranslationSegment],
) -> Alignment {
    let mut sources: Vec<(f64, &TranscriptionSegment)> = Vec::with_capacity(transcriptions.len());
    let mut dropped_transcriptions = 0;
    for segment in transcriptions {
        match usable_start_ms(segment.start_time_ms) {
            Some(start) => sources.push((start, segment)),
            None => dropped_transcriptions += 1,
        }
    }
    if dropped_transcriptions > 0 {
        warn!(
            "Dropped {} transcription segment(s) with unusable start times",
            dropped_transcriptions
        );
    }

    // Sorted once so each translation resolves with a binary search instead
    // of a full scan. Equal start times fall back to the segment id, which
    // keeps the chosen match independent of input array order.
    sources.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)));

    let mut cues: Vec<Cue> = Vec::with_capacity(translations.len());
    let mut dropped_translations = 0;
    for segment in translations {
        let Some(start) = usable_start_ms(segment.start_time_ms) else {
            dropped_translations += 1;
            continue;
        };
        let start_time_ms = start.round() as u64;

        // An end time that is missing, non-finite, or earlier than the
        // start collapses to a zero-duration cue rather than dropping the
        // translation.
        let end_time_ms = match segment.end_time_ms {
            Some(end) if end.is_finite() && end >= start => end.round() as u64,
            _ => start_time_ms,
        };

        let original_text = nearest_source(&sources, start).map(|source| source.text.clone());

        cues.push(Cue {
            sequence_index: 0,
            start_time_ms,
            end_time_ms,
            original_text,
            translated_text: segment.text.clone(),
            language: segment.language.clone(),
        });
    }
    if dropped_translations > 0 {
        warn!(
            "Dropped {} translation segment(s) with unusable start times",
            dropped_translations
        );
    }

    // Stable sort: equal start times keep the translation input order.
    cues.sort_by_key(|cue| cue.start_time_ms);
    for (index, cue) in cues.iter_mut().enumerate() {
        cue.sequence_index = index + 1;
    }

    Alignment {
        cues,
        dropped_transcriptions,
        dropped_translations,
    }
}

/// Binary search for the transcription whose start time is closest to
/// `target`. Equidistant candidates resolve to the smaller start time.
fn nearest_source<'a>(
    sources: &[(f64, &'a TranscriptionSegment)],
    target: f64,
) -> Option<&'a TranscriptionSegment> {
    if sources.is_empty() {
        return None;
    }

    let split = sources.partition_point(|(start, _)| *start < target);
    let before = split.checked_sub(1).and_then(|index| sources.get(index));
    let after = sources.get(split);

    match (before, after) {
        (Some(b), Some(a)) => {
            // Ties go to `b`, which has the smaller start time.
            if (a.0 - target).abs() < (target - b.0).abs() {
                Some(a.1)
            } else {
                Some(b.1)
            }
        }
        (Some(b), None) => Some(b.1),
        (None, Some(a)) => Some(a.1),
        (None, None) => None,
    }
}
