use crate::encode::format::OutputFormat;
use crate::encode::opts::EncodeOpts;
use crate::foundation::error::{ReelError, ReelResult};
use crate::frame::buffer::Frame;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Width shared by every frame.
    pub width: u32,
    /// Height shared by every frame.
    pub height: u32,
    /// Output format being written.
    pub format: OutputFormat,
    /// Encoder options, already resolved for `format`.
    pub opts: EncodeOpts,
}

/// Sink contract for consuming padded frames in order.
///
/// `push_frame` is called with strictly increasing indices starting at 0, and every frame has
/// the extent announced in `begin`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: usize, frame: &Frame<u8>) -> ReelResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ReelResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<Frame<u8>>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[Frame<u8>] {
        &self.frames
    }

    /// Return `true` once `end` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &Frame<u8>) -> ReelResult<()> {
        if self.cfg.is_none() {
            return Err(ReelError::encode("in-memory sink not started"));
        }
        if idx != self.frames.len() {
            return Err(ReelError::encode(format!(
                "in-memory sink expected frame {}, got {idx}",
                self.frames.len()
            )));
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Reject frames whose extent differs from the one announced in `begin`.
pub(crate) fn check_frame_extent(cfg: &SinkConfig, frame: &Frame<u8>) -> ReelResult<()> {
    if frame.width() != cfg.width || frame.height() != cfg.height {
        return Err(ReelError::encode(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width(),
            frame.height(),
            cfg.width,
            cfg.height
        )));
    }
    Ok(())
}
