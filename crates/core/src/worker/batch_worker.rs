use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::shared::cancel::CancelToken;
use crate::shared::settings::TranscriptionSettings;
use crate::transcription::domain::batch_runner::{BatchRunner, RunnerError};
use crate::transcription::domain::job::{BatchRun, JobResult, RunState};
use crate::transcription::domain::progress_sink::ProgressSink;
use crate::transcription::infrastructure::whisper_invoker::WhisperInvoker;

/// Events sent from the worker thread to the front end.
///
/// A run emits any number of per-file events followed by exactly one
/// terminal event: `Completed`, `Stopped`, or `Failed`.
#[derive(Debug)]
pub enum WorkerEvent {
    FileStarted {
        index: usize,
        total: usize,
        file_name: String,
    },
    ToolLine(String),
    FileFinished(JobResult),
    Completed(BatchRun),
    Stopped(BatchRun),
    Failed(String),
}

/// Parameters for one batch run.
pub struct BatchParams {
    pub files: Vec<PathBuf>,
    pub settings: TranscriptionSettings,
    /// Override for the transcription binary. `None` = `whisper` on PATH.
    pub tool: Option<PathBuf>,
}

/// Forwards runner notifications over the event channel. Sends are
/// best-effort so a dropped receiver never wedges the worker.
struct ChannelSink {
    tx: Sender<WorkerEvent>,
}

impl ProgressSink for ChannelSink {
    fn file_started(&mut self, index: usize, total: usize, file_name: &str) {
        let _ = self.tx.send(WorkerEvent::FileStarted {
            index,
            total,
            file_name: file_name.to_string(),
        });
    }

    fn tool_line(&mut self, line: &str) {
        let _ = self.tx.send(WorkerEvent::ToolLine(line.to_string()));
    }

    fn file_finished(&mut self, result: &JobResult) {
        let _ = self.tx.send(WorkerEvent::FileFinished(result.clone()));
    }
}

/// Spawn a background batch worker. Returns the event receiver and the
/// cancellation token honored at file boundaries.
pub fn spawn(params: BatchParams) -> (Receiver<WorkerEvent>, CancelToken) {
    let (tx, rx) = crossbeam_channel::unbounded::<WorkerEvent>();
    let cancel = CancelToken::new();
    let cancel_clone = cancel.clone();

    thread::spawn(move || {
        match run_batch(&tx, &cancel_clone, params) {
            Ok(run) => {
                let event = if run.state == RunState::Stopped {
                    WorkerEvent::Stopped(run)
                } else {
                    WorkerEvent::Completed(run)
                };
                let _ = tx.send(event);
            }
            Err(e) => {
                let _ = tx.send(WorkerEvent::Failed(e.to_string()));
            }
        }
    });

    (rx, cancel)
}

fn run_batch(
    tx: &Sender<WorkerEvent>,
    cancel: &CancelToken,
    params: BatchParams,
) -> Result<BatchRun, RunnerError> {
    let invoker = match params.tool {
        Some(tool) => WhisperInvoker::with_tool(params.settings.clone(), tool),
        None => WhisperInvoker::new(params.settings.clone()),
    };
    let mut runner = BatchRunner::new(Box::new(invoker), params.settings);
    let mut sink = ChannelSink { tx: tx.clone() };
    runner.run(&params.files, &mut sink, cancel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(tool: &str, files: &[&str]) -> BatchParams {
        let dir = tempfile::tempdir().unwrap();
        BatchParams {
            files: files.iter().map(PathBuf::from).collect(),
            settings: TranscriptionSettings {
                output_dir: dir.keep(),
                ..TranscriptionSettings::default()
            },
            tool: Some(PathBuf::from(tool)),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_worker_emits_events_then_completed() {
        let (rx, _cancel) = spawn(params("true", &["a.mp4", "b.mp4"]));

        let events: Vec<WorkerEvent> = rx.iter().collect();
        assert!(matches!(
            events.first(),
            Some(WorkerEvent::FileStarted { index: 1, total: 2, .. })
        ));

        let finished = events
            .iter()
            .filter(|e| matches!(e, WorkerEvent::FileFinished(_)))
            .count();
        assert_eq!(finished, 2);

        match events.last() {
            Some(WorkerEvent::Completed(run)) => {
                assert_eq!(run.success_count(), 2);
                assert_eq!(run.state, RunState::Completed);
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_worker_reports_per_file_failures_in_completed_run() {
        let (rx, _cancel) = spawn(params("false", &["a.mp4"]));

        let events: Vec<WorkerEvent> = rx.iter().collect();
        match events.last() {
            Some(WorkerEvent::Completed(run)) => {
                assert_eq!(run.success_count(), 0);
                assert_eq!(run.attempted(), 1);
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_cancel_during_file_ends_stream_with_stopped() {
        let dir = tempfile::tempdir().unwrap();
        // The tool is `sh` running a script that sleeps, slow enough that
        // cancelling right after the first FileStarted lands while the
        // file is still in flight.
        let script = dir.path().join("slow.sh");
        std::fs::write(&script, "sleep 0.5\n").unwrap();

        let (rx, cancel) = spawn(BatchParams {
            files: vec![script.clone(), script.clone()],
            settings: TranscriptionSettings {
                output_dir: dir.path().join("out"),
                ..TranscriptionSettings::default()
            },
            tool: Some(PathBuf::from("sh")),
        });

        let mut events = Vec::new();
        for event in rx.iter() {
            if matches!(event, WorkerEvent::FileStarted { index: 1, .. }) {
                cancel.cancel();
            }
            events.push(event);
        }

        // The in-flight file runs to completion; the second never starts.
        match events.last() {
            Some(WorkerEvent::Stopped(run)) => {
                assert_eq!(run.state, RunState::Stopped);
                assert_eq!(run.attempted(), 1);
                assert_eq!(run.jobs.len(), 2);
            }
            other => panic!("expected Stopped, got {other:?}"),
        }
        let terminals = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    WorkerEvent::Completed(_) | WorkerEvent::Stopped(_) | WorkerEvent::Failed(_)
                )
            })
            .count();
        assert_eq!(terminals, 1);
    }

    #[test]
    fn test_empty_batch_fails_before_any_launch() {
        let (rx, _cancel) = spawn(params("true", &[]));

        let events: Vec<WorkerEvent> = rx.iter().collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            WorkerEvent::Failed(msg) => assert!(msg.contains("no input files")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
