pub mod media;
pub mod shared;
pub mod transcription;
pub mod worker;
