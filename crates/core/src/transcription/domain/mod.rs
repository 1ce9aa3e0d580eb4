pub mod batch_runner;
pub mod job;
pub mod progress_sink;
pub mod transcriber;
