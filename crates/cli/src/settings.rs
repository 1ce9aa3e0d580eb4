use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use batchscribe_core::shared::settings::{OutputFormat, TranscriptionSettings, WhisperModel};

/// User defaults persisted between runs.
///
/// Loading falls back to the built-in defaults on a missing or unreadable
/// file; saving is best-effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedDefaults {
    pub model: WhisperModel,
    pub language: String,
    pub output_format: OutputFormat,
    pub output_dir: PathBuf,
}

impl Default for SavedDefaults {
    fn default() -> Self {
        Self::from_settings(&TranscriptionSettings::default())
    }
}

impl SavedDefaults {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Batchscribe").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            self.save_to(&path);
        }
    }

    fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = fs::write(path, json);
        }
    }

    pub fn from_settings(settings: &TranscriptionSettings) -> Self {
        Self {
            model: settings.model,
            language: settings.language.clone(),
            output_format: settings.output_format,
            output_dir: settings.output_dir.clone(),
        }
    }

    pub fn into_settings(self) -> TranscriptionSettings {
        TranscriptionSettings {
            model: self.model,
            language: self.language,
            output_format: self.output_format,
            output_dir: self.output_dir,
        }
    }
}
