use std::fmt;
use std::str::FromStr;
use anyhow::{Result, anyhow, Context};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::aligner::Cue;

// @module: Subtitle document encoding and verification parsing

// @const: Timecode line regex, hours unbounded, comma or period separator
static TIMECODE_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2,}):(\d{2}):(\d{2})[,.](\d{3}) --> (\d{2,}):(\d{2}):(\d{2})[,.](\d{3})")
        .unwrap()
});

// @const: Line break runs, including surrounding indentation
static LINE_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]*[\r\n]+[ \t]*").unwrap());

/// Output formats the exporter can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    // @format: SubRip, numbered blocks with comma-separated timestamps
    Srt,
    // @format: WebVTT, header-prefixed with period-separated timestamps
    Vtt,
    // @format: Plain bilingual transcript
    Txt,
}

impl SubtitleFormat {
    /// File extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::Txt => "txt",
        }
    }

    /// MIME type served alongside the exported bytes
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Srt => "application/x-subrip",
            Self::Vtt => "text/vtt",
            Self::Txt => "text/plain",
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for SubtitleFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "srt" => Ok(Self::Srt),
            "vtt" => Ok(Self::Vtt),
            "txt" => Ok(Self::Txt),
            _ => Err(anyhow!("Invalid subtitle format: {}", s)),
        }
    }
}

/// Format a millisecond timestamp as `HH:MM:SS<sep>mmm`.
///
/// Hours grow past two digits for recordings longer than 99 hours; they
/// are never wrapped or truncated.
pub fn format_timestamp(ms: u64, separator: char) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!(
        "{:02}:{:02}:{:02}{}{:03}",
        hours, minutes, seconds, separator, millis
    )
}

/// Collapse embedded line breaks to a single space.
///
/// Block-structured subtitle parsers treat blank lines as block
/// terminators, so cue text must stay on one line.
fn collapse_line_breaks(text: &str) -> String {
    LINE_BREAK_REGEX.replace_all(text.trim(), " ").into_owned()
}

/// Append one cue block.
///
/// SRT and VTT both route through here so the two formats can never
/// diverge in cue count or text content; `numbered` and `separator` are
/// the only degrees of freedom. The first content line is never empty: an
/// original text that collapses to nothing is treated as absent.
fn write_cue_block(out: &mut String, cue: &Cue, numbered: bool, separator: char) {
    if numbered {
        out.push_str(&cue.sequence_index.to_string());
        out.push('\n');
    }

    out.push_str(&format_timestamp(cue.start_time_ms, separator));
    out.push_str(" --> ");
    out.push_str(&format_timestamp(cue.end_time_ms, separator));
    out.push('\n');

    if let Some(original) = cue.original_text.as_deref() {
        let original = collapse_line_breaks(original);
        if !original.is_empty() {
            out.push_str(&original);
            out.push('\n');
        }
    }

    out.push_str(&collapse_line_breaks(&cue.translated_text));
    out.push('\n');
    out.push('\n');
}

/// Render cues as a SubRip document.
pub fn encode_srt(cues: &[Cue]) -> String {
    let mut out = String::new();
    for cue in cues {
        write_cue_block(&mut out, cue, true, ',');
    }
    out
}

/// Render cues as a WebVTT document.
///
/// Cue identifiers are omitted; the `WEBVTT` header and the timestamp
/// separator are the only differences from the SubRip rendering.
pub fn encode_vtt(cues: &[Cue]) -> String {
    let mut out = String::from("WEBVTT\n\n");
    for cue in cues {
        write_cue_block(&mut out, cue, false, '.');
    }
    out
}

/// Render cues as a plain bilingual transcript.
///
/// Human-readable and diff-friendly; no timing-syntax contract beyond
/// determinism.
pub fn encode_transcript(cues: &[Cue]) -> String {
    let mut out = String::new();
    for cue in cues {
        let original = match cue.original_text.as_deref().map(collapse_line_breaks) {
            Some(text) if !text.is_empty() => text,
            _ => "(no original)".to_string(),
        };

        out.push_str(&format!(
            "[{}\u{2013}{}] {}\n  \u{2192} {}\n\n",
            format_timestamp(cue.start_time_ms, '.'),
            format_timestamp(cue.end_time_ms, '.'),
            original,
            collapse_line_breaks(&cue.translated_text),
        ));
    }
    out
}

/// Render cues in the requested format.
pub fn encode(format: SubtitleFormat, cues: &[Cue]) -> String {
    match format {
        SubtitleFormat::Srt => encode_srt(cues),
        SubtitleFormat::Vtt => encode_vtt(cues),
        SubtitleFormat::Txt => encode_transcript(cues),
    }
}

/// A cue read back out of a generated document.
///
/// Carries only what the round-trip checks need: timing plus the text
/// lines of the block.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCue {
    /// Start time in milliseconds
    pub start_time_ms: u64,

    /// End time in milliseconds
    pub end_time_ms: u64,

    /// Text lines of the block, in order
    pub text_lines: Vec<String>,
}

/// Parse a SubRip document back into cues.
pub fn parse_srt(content: &str) -> Result<Vec<ParsedCue>> {
    parse_blocks(content, true)
}

/// Parse a WebVTT document back into cues.
pub fn parse_vtt(content: &str) -> Result<Vec<ParsedCue>> {
    let body = content
        .strip_prefix("WEBVTT")
        .ok_or_else(|| anyhow!("Missing WEBVTT header line"))?;
    parse_blocks(body, false)
}

/// Shared block parser for both subtitle formats.
///
/// With `numbered` set, a bare integer line between blocks is consumed as
/// a cue identifier; inside a block it is ordinary text.
fn parse_blocks(content: &str, numbered: bool) -> Result<Vec<ParsedCue>> {
    let mut cues = Vec::new();
    let mut current: Option<ParsedCue> = None;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if let Some(cue) = current.take() {
                if !cue.text_lines.is_empty() {
                    cues.push(cue);
                }
            }
            continue;
        }

        if current.is_none() {
            if numbered && trimmed.parse::<usize>().is_ok() {
                continue;
            }
            if let Some(caps) = TIMECODE_LINE_REGEX.captures(trimmed) {
                current = Some(ParsedCue {
                    start_time_ms: captured_ms(&caps, 1)?,
                    end_time_ms: captured_ms(&caps, 5)?,
                    text_lines: Vec::new(),
                });
                continue;
            }
            return Err(anyhow!("Unexpected text outside a cue block: {}", trimmed));
        }

        if let Some(cue) = current.as_mut() {
            cue.text_lines.push(trimmed.to_string());
        }
    }

    if let Some(cue) = current.take() {
        if !cue.text_lines.is_empty() {
            cues.push(cue);
        }
    }

    Ok(cues)
}

/// Convert one captured timecode (four groups starting at `start_idx`) to
/// milliseconds.
fn captured_ms(caps: &regex::Captures<'_>, start_idx: usize) -> Result<u64> {
    let group = |offset: usize| -> Result<u64> {
        caps.get(start_idx + offset)
            .ok_or_else(|| anyhow!("Missing timecode component"))?
            .as_str()
            .parse()
            .context("Failed to parse timecode component")
    };

    Ok(group(0)? * 3_600_000 + group(1)? * 60_000 + group(2)? * 1_000 + group(3)?)
}
