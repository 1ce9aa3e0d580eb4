pub mod cancel;
pub mod constants;
pub mod settings;
