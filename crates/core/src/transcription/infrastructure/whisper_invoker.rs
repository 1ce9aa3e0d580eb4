use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use thiserror::Error;

use crate::shared::settings::TranscriptionSettings;
use crate::transcription::domain::job::JobResult;
use crate::transcription::domain::transcriber::Transcriber;

/// Binary resolved on PATH when no explicit tool path is given.
pub const DEFAULT_TOOL: &str = "whisper";

#[derive(Error, Debug)]
pub enum InvokeError {
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to launch '{tool}': {source}")]
    Launch {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed waiting on '{tool}': {source}")]
    Wait {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    // The tool's own diagnostics have already been forwarded line-by-line,
    // so a non-zero exit carries no extra detail here.
    #[error("transcription failed")]
    ToolFailed,
}

/// Shells out to the whisper CLI for a single file.
///
/// The child's stdout and stderr are drained by two short-lived reader
/// threads feeding one channel, so lines from both streams reach the caller
/// as they arrive without either pipe filling up. No timeout is enforced; a
/// hung tool blocks the run.
pub struct WhisperInvoker {
    settings: TranscriptionSettings,
    tool: PathBuf,
}

impl WhisperInvoker {
    pub fn new(settings: TranscriptionSettings) -> Self {
        Self::with_tool(settings, PathBuf::from(DEFAULT_TOOL))
    }

    pub fn with_tool(settings: TranscriptionSettings, tool: PathBuf) -> Self {
        Self { settings, tool }
    }

    /// Where the tool writes the transcript for `input`:
    /// `{output_dir}/{input_stem}.{output_format}`, independent of the
    /// tool's actual stdout content.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or(input.as_os_str());
        let mut name = stem.to_os_string();
        name.push(".");
        name.push(self.settings.output_format.as_str());
        self.settings.output_dir.join(name)
    }

    fn invoke(&self, input: &Path, lines: &mut dyn FnMut(&str)) -> Result<PathBuf, InvokeError> {
        let out_dir = &self.settings.output_dir;
        fs::create_dir_all(out_dir).map_err(|source| InvokeError::OutputDir {
            path: out_dir.clone(),
            source,
        })?;

        log::debug!(
            "Invoking {} on {} (model {}, language {}, format {})",
            self.tool.display(),
            input.display(),
            self.settings.model,
            self.settings.language,
            self.settings.output_format
        );

        let mut child = Command::new(&self.tool)
            .arg(input)
            .args(["--model", self.settings.model.as_str()])
            .args(["--language", &self.settings.language])
            .args(["--task", "transcribe"])
            .args(["--output_format", self.settings.output_format.as_str()])
            .arg("--output_dir")
            .arg(out_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| InvokeError::Launch {
                tool: self.tool.display().to_string(),
                source,
            })?;

        let (line_tx, line_rx) = crossbeam_channel::unbounded::<String>();
        let mut readers = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_pipe_reader(stdout, line_tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_pipe_reader(stderr, line_tx.clone()));
        }
        drop(line_tx);

        // Blocks until both pipes close, i.e. until the tool exits.
        for line in line_rx {
            lines(&line);
        }

        let status = child.wait().map_err(|source| InvokeError::Wait {
            tool: self.tool.display().to_string(),
            source,
        })?;
        for handle in readers {
            let _ = handle.join();
        }

        if !status.success() {
            return Err(InvokeError::ToolFailed);
        }
        Ok(self.output_path(input))
    }
}

impl Transcriber for WhisperInvoker {
    fn transcribe(&self, input: &Path, lines: &mut dyn FnMut(&str)) -> JobResult {
        match self.invoke(input, lines) {
            Ok(output) => JobResult::success(input, output),
            Err(e) => JobResult::failure(input, e.to_string()),
        }
    }
}

fn spawn_pipe_reader<R: Read + Send + 'static>(
    pipe: R,
    tx: crossbeam_channel::Sender<String>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for line in BufReader::new(pipe).lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    })
}
