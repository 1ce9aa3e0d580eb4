use super::job::JobResult;

/// Cross-cutting reporting seam for batch progress.
///
/// Decouples the runner from specific output mechanisms (stdout, GUI
/// channel, log crate). Invoked from the background thread driving the
/// batch; implementations must not block indefinitely.
pub trait ProgressSink: Send {
    /// A file is about to be handed to the external tool. `index` is
    /// 1-based.
    fn file_started(&mut self, index: usize, total: usize, file_name: &str);

    /// One line of the external tool's output, forwarded as it arrives.
    fn tool_line(&mut self, line: &str);

    /// The file's transcription finished, successfully or not.
    fn file_finished(&mut self, result: &JobResult);
}

/// Silent sink that discards all notifications. Used by tests where
/// progress output is irrelevant.
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn file_started(&mut self, _index: usize, _total: usize, _file_name: &str) {}
    fn tool_line(&mut self, _line: &str) {}
    fn file_finished(&mut self, _result: &JobResult) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_null_sink_all_methods_are_noop() {
        let mut sink = NullProgressSink;
        sink.file_started(1, 3, "a.mp4");
        sink.tool_line("Detecting language...");
        sink.file_finished(&JobResult::success(Path::new("a.mp4"), PathBuf::from("a.txt")));
        // No panics = success
    }
}
