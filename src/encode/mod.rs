//! Encoding sinks.
//!
//! Sinks consume padded frames in order; the output format is chosen from the file extension.

/// `ffmpeg`-based video sink (system `ffmpeg` binary).
pub mod ffmpeg;
/// Output formats and targets.
pub mod format;
/// Animated GIF sink.
pub mod gif;
/// Encoder options and timing translation.
pub mod opts;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
