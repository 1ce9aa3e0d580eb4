use std::path::{Path, PathBuf};

use crate::shared::settings::TranscriptionSettings;

/// One file's transcription request under a run's settings snapshot.
#[derive(Debug, Clone)]
pub struct Job {
    pub file: PathBuf,
}

impl Job {
    pub fn new(file: PathBuf) -> Self {
        Self { file }
    }

    /// Base name for log display, lossy on non-UTF-8 paths.
    pub fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.display().to_string())
    }
}

/// Outcome of one job. Created exactly once per job, never mutated.
#[derive(Debug, Clone)]
pub struct JobResult {
    pub file: PathBuf,
    /// Resolved transcript path on success, failure reason otherwise.
    pub outcome: Result<PathBuf, String>,
}

impl JobResult {
    pub fn success(file: &Path, output: PathBuf) -> Self {
        Self {
            file: file.to_path_buf(),
            outcome: Ok(output),
        }
    }

    pub fn failure(file: &Path, reason: impl Into<String>) -> Self {
        Self {
            file: file.to_path_buf(),
            outcome: Err(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Lifecycle of one batch run.
///
/// `Stopped` is reached only by cancellation between files; individual job
/// failures never leave `Running` early, so there is no failed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Stopped,
}

/// An ordered sequence of jobs sharing one settings snapshot, plus the
/// results accumulated as the runner works through them.
///
/// Results are appended in job order; their count never exceeds the job
/// count. A partial result sequence after cancellation is a valid terminal
/// state, not an error.
#[derive(Debug)]
pub struct BatchRun {
    pub settings: TranscriptionSettings,
    pub jobs: Vec<Job>,
    pub results: Vec<JobResult>,
    pub state: RunState,
}

impl BatchRun {
    pub fn new(files: &[PathBuf], settings: TranscriptionSettings) -> Self {
        Self {
            settings,
            jobs: files.iter().cloned().map(Job::new).collect(),
            results: Vec::new(),
            state: RunState::Running,
        }
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of jobs that were actually attempted.
    pub fn attempted(&self) -> usize {
        self.results.len()
    }
}
