use std::path::PathBuf;

use thiserror::Error;

use crate::shared::cancel::CancelToken;
use crate::shared::settings::TranscriptionSettings;

use super::job::{BatchRun, RunState};
use super::progress_sink::ProgressSink;
use super::transcriber::Transcriber;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RunnerError {
    #[error("no input files to transcribe")]
    EmptyBatch,
    #[error("batch runner already ran; create a new runner for another run")]
    AlreadyRan,
}

/// Sequences file-by-file invocation of a [`Transcriber`] and aggregates
/// per-file results.
///
/// Files are processed strictly in list order, one at a time, which keeps
/// the forwarded log readable as a single interleaved stream. The
/// cancellation token is polled before each file; a file already in flight
/// runs to completion before cancellation takes effect. A runner drives at
/// most one run.
pub struct BatchRunner {
    transcriber: Box<dyn Transcriber>,
    settings: TranscriptionSettings,
    state: RunState,
}

impl BatchRunner {
    pub fn new(transcriber: Box<dyn Transcriber>, settings: TranscriptionSettings) -> Self {
        Self {
            transcriber,
            settings,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run the batch to completion or to the first cancelled file boundary.
    ///
    /// Individual job failures are recorded and do not halt the batch; the
    /// caller derives the summary by counting successes in the returned
    /// [`BatchRun`].
    pub fn run(
        &mut self,
        files: &[PathBuf],
        sink: &mut dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<BatchRun, RunnerError> {
        if self.state != RunState::Idle {
            return Err(RunnerError::AlreadyRan);
        }
        if files.is_empty() {
            return Err(RunnerError::EmptyBatch);
        }

        self.state = RunState::Running;
        let mut run = BatchRun::new(files, self.settings.clone());
        let total = run.jobs.len();

        for idx in 0..total {
            if cancel.is_cancelled() {
                log::info!("Batch cancelled after {}/{total} file(s)", run.results.len());
                self.state = RunState::Stopped;
                break;
            }

            sink.file_started(idx + 1, total, &run.jobs[idx].file_name());

            let mut forward = |line: &str| sink.tool_line(line);
            let result = self.transcriber.transcribe(&run.jobs[idx].file, &mut forward);
            sink.file_finished(&result);
            run.results.push(result);
        }

        if self.state == RunState::Running {
            self.state = RunState::Completed;
        }
        run.state = self.state;
        Ok(run)
    }
}
