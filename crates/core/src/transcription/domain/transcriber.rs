use std::path::Path;

use super::job::JobResult;

/// Domain interface for transcribing a single media file.
///
/// Implementations forward the tool's output to `lines` one line at a time,
/// as it arrives, so a live log can render progress during a long run. Tool
/// failure is not an `Err`: every outcome is captured in the returned
/// [`JobResult`] so the batch can carry on with the next file.
pub trait Transcriber: Send {
    fn transcribe(&self, input: &Path, lines: &mut dyn FnMut(&str)) -> JobResult;
}
