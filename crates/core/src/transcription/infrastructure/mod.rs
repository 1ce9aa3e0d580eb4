pub mod whisper_invoker;
