/// Video container extensions accepted by the folder scan (lowercase).
pub const VIDEO_EXTENSIONS: &[&str] = &["ts", "mp4", "mkv", "avi", "mov", "flv", "wmv", "webm"];

/// Audio extensions accepted by the folder scan (lowercase).
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "aac", "flac", "ogg", "wma"];

/// Every media extension the tool will transcribe. Union of
/// [`VIDEO_EXTENSIONS`] and [`AUDIO_EXTENSIONS`].
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "ts", "mp4", "mkv", "avi", "mov", "flv", "wmv", "webm", "mp3", "wav", "m4a", "aac", "flac",
    "ogg", "wma",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_extensions_cover_video_and_audio() {
        for ext in VIDEO_EXTENSIONS.iter().chain(AUDIO_EXTENSIONS) {
            assert!(MEDIA_EXTENSIONS.contains(ext), "missing {ext}");
        }
        assert_eq!(
            MEDIA_EXTENSIONS.len(),
            VIDEO_EXTENSIONS.len() + AUDIO_EXTENSIONS.len()
        );
    }

    #[test]
    fn test_extensions_are_lowercase() {
        for ext in MEDIA_EXTENSIONS {
            assert_eq!(*ext, ext.to_lowercase());
        }
    }
}
