/*!
 * Tests for configuration loading and validation
 */

use anyhow::Result;
use classcap::app_config::{Config, LogLevel};
use classcap::subtitle_encoder::SubtitleFormat;

/// Test the default configuration
#[test]
fn test_config_default_shouldEnableAllFormats() {
    let config = Config::default();

    assert_eq!(config.max_segments_per_export, 20_000);
    assert_eq!(
        config.enabled_formats,
        vec![SubtitleFormat::Srt, SubtitleFormat::Vtt, SubtitleFormat::Txt]
    );
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test deserializing a partial config file with serde defaults
#[test]
fn test_config_fromPartialJson_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{"log_level": "debug"}"#)?;

    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.max_segments_per_export, 20_000);
    assert_eq!(config.enabled_formats.len(), 3);

    Ok(())
}

/// Test deserializing an explicit format restriction
#[test]
fn test_config_fromJsonWithFormats_shouldParseFormatNames() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{"enabled_formats": ["srt", "vtt"]}"#)?;

    assert!(config.format_enabled(SubtitleFormat::Srt));
    assert!(config.format_enabled(SubtitleFormat::Vtt));
    assert!(!config.format_enabled(SubtitleFormat::Txt));

    Ok(())
}

/// Test validation failures
#[test]
fn test_config_validate_withBadValues_shouldFail() {
    let zero_ceiling = Config {
        max_segments_per_export: 0,
        ..Config::default()
    };
    assert!(zero_ceiling.validate().is_err());

    let no_formats = Config {
        enabled_formats: Vec::new(),
        ..Config::default()
    };
    assert!(no_formats.validate().is_err());
}

/// Test that the config round-trips through JSON
#[test]
fn test_config_serializeDeserialize_shouldRoundTrip() -> Result<()> {
    let config = Config {
        max_segments_per_export: 500,
        enabled_formats: vec![SubtitleFormat::Txt],
        log_level: LogLevel::Warn,
    };

    let json = serde_json::to_string(&config)?;
    let restored: Config = serde_json::from_str(&json)?;

    assert_eq!(restored.max_segments_per_export, 500);
    assert_eq!(restored.enabled_formats, vec![SubtitleFormat::Txt]);
    assert_eq!(restored.log_level, LogLevel::Warn);

    Ok(())
}
