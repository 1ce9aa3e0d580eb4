use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A settings value that is not part of the catalog.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseSettingError {
    kind: &'static str,
    value: String,
}

/// Whisper model size, from fastest to most accurate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhisperModel {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl WhisperModel {
    pub const ALL: &[WhisperModel] = &[
        WhisperModel::Tiny,
        WhisperModel::Base,
        WhisperModel::Small,
        WhisperModel::Medium,
        WhisperModel::Large,
    ];

    /// Lowercase name as passed to the external tool.
    pub fn as_str(&self) -> &'static str {
        match self {
            WhisperModel::Tiny => "tiny",
            WhisperModel::Base => "base",
            WhisperModel::Small => "small",
            WhisperModel::Medium => "medium",
            WhisperModel::Large => "large",
        }
    }
}

impl std::fmt::Display for WhisperModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WhisperModel {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or_else(|| ParseSettingError {
                kind: "whisper model",
                value: s.to_string(),
            })
    }
}

/// Transcript file format produced by the external tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Txt,
    Srt,
    Vtt,
    Json,
    Tsv,
}

impl OutputFormat {
    pub const ALL: &[OutputFormat] = &[
        OutputFormat::Txt,
        OutputFormat::Srt,
        OutputFormat::Vtt,
        OutputFormat::Json,
        OutputFormat::Tsv,
    ];

    /// Lowercase name, doubling as the output file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Srt => "srt",
            OutputFormat::Vtt => "vtt",
            OutputFormat::Json => "json",
            OutputFormat::Tsv => "tsv",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or_else(|| ParseSettingError {
                kind: "output format",
                value: s.to_string(),
            })
    }
}

/// Immutable settings snapshot shared by every job of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionSettings {
    pub model: WhisperModel,
    /// Language code passed through to the tool unvalidated (e.g. "en").
    pub language: String,
    pub output_format: OutputFormat,
    pub output_dir: PathBuf,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            model: WhisperModel::Small,
            language: "en".to_string(),
            output_format: OutputFormat::Txt,
            output_dir: default_output_dir(),
        }
    }
}

/// `<home>/Transcriptions`, falling back to a relative directory when the
/// home directory cannot be determined.
pub fn default_output_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join("Transcriptions"))
        .unwrap_or_else(|| PathBuf::from("Transcriptions"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::tiny("tiny", WhisperModel::Tiny)]
    #[case::base("base", WhisperModel::Base)]
    #[case::small("small", WhisperModel::Small)]
    #[case::medium("medium", WhisperModel::Medium)]
    #[case::large("large", WhisperModel::Large)]
    fn test_model_parses(#[case] name: &str, #[case] expected: WhisperModel) {
        assert_eq!(name.parse::<WhisperModel>().unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }

    #[rstest]
    #[case::txt("txt", OutputFormat::Txt)]
    #[case::srt("srt", OutputFormat::Srt)]
    #[case::vtt("vtt", OutputFormat::Vtt)]
    #[case::json("json", OutputFormat::Json)]
    #[case::tsv("tsv", OutputFormat::Tsv)]
    fn test_format_parses(#[case] name: &str, #[case] expected: OutputFormat) {
        assert_eq!(name.parse::<OutputFormat>().unwrap(), expected);
        assert_eq!(expected.to_string(), name);
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let err = "huge".parse::<WhisperModel>().unwrap_err();
        assert_eq!(err.to_string(), "unknown whisper model 'huge'");
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let err = "pdf".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err.to_string(), "unknown output format 'pdf'");
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Small".parse::<WhisperModel>().is_err());
        assert!("SRT".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_default_settings() {
        let settings = TranscriptionSettings::default();
        assert_eq!(settings.model, WhisperModel::Small);
        assert_eq!(settings.language, "en");
        assert_eq!(settings.output_format, OutputFormat::Txt);
        assert!(settings.output_dir.ends_with("Transcriptions"));
    }

    #[test]
    fn test_settings_serde_uses_lowercase_names() {
        let settings = TranscriptionSettings {
            model: WhisperModel::Medium,
            language: "de".to_string(),
            output_format: OutputFormat::Srt,
            output_dir: PathBuf::from("/out"),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"medium\""));
        assert!(json.contains("\"srt\""));
    }
}
