use std::path::PathBuf;
use std::process;

use clap::Parser;
use crossbeam_channel::Receiver;

use batchscribe_core::media::folder_scan;
use batchscribe_core::shared::settings::{OutputFormat, TranscriptionSettings, WhisperModel};
use batchscribe_core::transcription::domain::job::{BatchRun, RunState};
use batchscribe_core::worker::batch_worker::{self, BatchParams, WorkerEvent};

mod settings;

use settings::SavedDefaults;

/// Batch speech-to-text transcription via an external whisper CLI.
#[derive(Parser)]
#[command(name = "batchscribe")]
struct Cli {
    /// Media files to transcribe, processed in the given order.
    inputs: Vec<PathBuf>,

    /// Scan this folder for supported media files instead of listing them.
    #[arg(long, conflicts_with = "inputs")]
    folder: Option<PathBuf>,

    /// Whisper model: tiny, base, small, medium or large.
    #[arg(long)]
    model: Option<String>,

    /// Language code passed through to the tool (e.g. en, de, ja).
    #[arg(long)]
    language: Option<String>,

    /// Transcript format: txt, srt, vtt, json or tsv.
    #[arg(long)]
    output_format: Option<String>,

    /// Directory the transcripts are written to.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Path to the transcription binary (default: `whisper` on PATH).
    #[arg(long)]
    tool: Option<PathBuf>,

    /// Persist the effective settings as defaults for future runs.
    #[arg(long)]
    save_defaults: bool,

    /// Open the output folder after a run with at least one success.
    #[arg(long)]
    open_output: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = effective_settings(&cli)?;
    let files = collect_inputs(&cli)?;

    if cli.save_defaults {
        SavedDefaults::from_settings(&settings).save();
        log::info!("Saved settings as defaults for future runs");
    }

    log::info!(
        "Transcribing {} file(s) (model {}, language {}, format {})",
        files.len(),
        settings.model,
        settings.language,
        settings.output_format
    );

    let output_dir = settings.output_dir.clone();
    let (rx, cancel) = batch_worker::spawn(BatchParams {
        files,
        settings,
        tool: cli.tool.clone(),
    });

    // First Ctrl-C requests cancellation at the next file boundary; a
    // second one gives up on the in-flight tool and exits.
    ctrlc::set_handler(move || {
        if cancel.is_cancelled() {
            process::exit(130);
        }
        log::warn!("Cancellation requested; finishing the current file");
        cancel.cancel();
    })?;

    let batch = drain_events(&rx)?;
    report_summary(&batch)?;

    if cli.open_output && batch.success_count() > 0 {
        let _ = open::that(&output_dir);
    }

    Ok(())
}

/// Flags override saved defaults, which override the built-in defaults.
fn effective_settings(cli: &Cli) -> Result<TranscriptionSettings, Box<dyn std::error::Error>> {
    let mut settings = SavedDefaults::load().into_settings();
    if let Some(model) = &cli.model {
        settings.model = model.parse::<WhisperModel>()?;
    }
    if let Some(language) = &cli.language {
        settings.language = language.clone();
    }
    if let Some(format) = &cli.output_format {
        settings.output_format = format.parse::<OutputFormat>()?;
    }
    if let Some(dir) = &cli.output_dir {
        settings.output_dir = dir.clone();
    }
    Ok(settings)
}

fn collect_inputs(cli: &Cli) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    if let Some(folder) = &cli.folder {
        let files = folder_scan::scan_folder(folder)
            .map_err(|e| format!("failed to read folder {}: {e}", folder.display()))?;
        if files.is_empty() {
            return Err(format!(
                "no supported media files found in {}",
                folder.display()
            )
            .into());
        }
        log::info!("Loaded {} media file(s) from {}", files.len(), folder.display());
        return Ok(files);
    }

    if cli.inputs.is_empty() {
        return Err("no input files given (pass files or --folder)".into());
    }
    for input in &cli.inputs {
        if !input.is_file() {
            return Err(format!("input file not found: {}", input.display()).into());
        }
    }
    Ok(cli.inputs.clone())
}

/// Render events as they arrive until the worker reports a terminal event.
/// Tool output goes verbatim to stdout; structural events go to the logger.
fn drain_events(rx: &Receiver<WorkerEvent>) -> Result<BatchRun, Box<dyn std::error::Error>> {
    for event in rx.iter() {
        match event {
            WorkerEvent::FileStarted {
                index,
                total,
                file_name,
            } => log::info!("Processing {index}/{total}: {file_name}"),
            WorkerEvent::ToolLine(line) => println!("{line}"),
            WorkerEvent::FileFinished(result) => match &result.outcome {
                Ok(output) => log::info!(
                    "Completed {}: {}",
                    result.file.display(),
                    output.display()
                ),
                Err(reason) => log::warn!("Failed {}: {reason}", result.file.display()),
            },
            WorkerEvent::Completed(batch) | WorkerEvent::Stopped(batch) => return Ok(batch),
            WorkerEvent::Failed(message) => return Err(message.into()),
        }
    }
    Err("transcription worker exited without reporting a result".into())
}

fn report_summary(batch: &BatchRun) -> Result<(), Box<dyn std::error::Error>> {
    let successes = batch.success_count();
    let attempted = batch.attempted();

    if batch.state == RunState::Stopped {
        log::warn!(
            "Stopped by user: {successes}/{attempted} attempted file(s) succeeded, {} not started",
            batch.jobs.len() - attempted
        );
        return Ok(());
    }

    if successes == attempted {
        log::info!("All {attempted} file(s) transcribed successfully");
        Ok(())
    } else if successes > 0 {
        log::warn!("Partial success: {successes}/{attempted} file(s) transcribed");
        Ok(())
    } else {
        Err(format!("all {attempted} file(s) failed to transcribe").into())
    }
}
