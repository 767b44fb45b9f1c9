use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::encode::format::OutputFormat;
use crate::foundation::error::{ReelError, ReelResult};

/// Frame rate used for video output when neither `fps` nor `duration` is set.
pub const DEFAULT_FPS: f64 = 10.0;

/// Encoder configuration: named options plus an open map forwarded verbatim.
///
/// `fps` and `duration` are two views of frame timing. GIF output is timed by `duration`
/// (seconds per frame), video by `fps`; [`EncodeOpts::resolve_for`] translates between them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOpts {
    /// Frames per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    /// Seconds each frame is displayed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// GIF loop count; `0` or unset loops forever.
    #[serde(rename = "loop", skip_serializing_if = "Option::is_none")]
    pub loop_count: Option<u16>,
    /// Video codec name passed to `ffmpeg -c:v`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    /// Encoder-specific options. Keys are forwarded untouched (`ffmpeg` receives
    /// `-<key> <value>`).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl EncodeOpts {
    /// Set the frame rate.
    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = Some(fps);
        self
    }

    /// Set the per-frame display duration in seconds.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration = Some(secs);
        self
    }

    /// Add an encoder-specific passthrough option.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Check option ranges and passthrough key syntax.
    pub fn validate(&self) -> ReelResult<()> {
        if let Some(fps) = self.fps
            && !(fps.is_finite() && fps > 0.0)
        {
            return Err(ReelError::configuration(format!(
                "fps must be a positive finite number, got {fps}"
            )));
        }
        if let Some(d) = self.duration
            && !(d.is_finite() && d > 0.0)
        {
            return Err(ReelError::configuration(format!(
                "duration must be a positive finite number, got {d}"
            )));
        }
        if let Some(codec) = &self.codec
            && codec.trim().is_empty()
        {
            return Err(ReelError::configuration("codec must not be empty"));
        }
        for key in self.extra.keys() {
            if key.is_empty() || key.starts_with('-') || key.chars().any(char::is_whitespace) {
                return Err(ReelError::configuration(format!(
                    "invalid encoder option key '{key}'"
                )));
            }
        }
        Ok(())
    }

    /// Options as the encoder for `format` expects them.
    ///
    /// For duration-timed formats (GIF) `fps` is removed and becomes `duration = 1 / fps`
    /// unless a duration was given explicitly. Everything else passes through unchanged.
    pub fn resolve_for(&self, format: OutputFormat) -> ReelResult<Self> {
        self.validate()?;
        let mut out = self.clone();
        if format.uses_frame_duration()
            && let Some(fps) = out.fps.take()
            && out.duration.is_none()
        {
            out.duration = Some(1.0 / fps);
        }
        Ok(out)
    }

    /// Per-frame delay in milliseconds (defaults to one frame at [`DEFAULT_FPS`]).
    pub fn frame_delay_ms(&self) -> u32 {
        let secs = match (self.duration, self.fps) {
            (Some(d), _) => d,
            (None, Some(fps)) => 1.0 / fps,
            (None, None) => 1.0 / DEFAULT_FPS,
        };
        (secs * 1000.0).round().max(0.0) as u32
    }

    /// Frames per second for rate-timed formats.
    pub fn frame_rate(&self) -> f64 {
        match (self.fps, self.duration) {
            (Some(fps), _) => fps,
            (None, Some(d)) => 1.0 / d,
            (None, None) => DEFAULT_FPS,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/opts.rs"]
mod tests;
