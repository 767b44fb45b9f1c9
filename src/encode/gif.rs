use std::io::Write;

use gif::{Encoder, Repeat};

use crate::encode::sink::{FrameSink, SinkConfig, check_frame_extent};
use crate::foundation::error::{ReelError, ReelResult};
use crate::frame::buffer::Frame;

/// Quantizer speed used unless the `speed` option overrides it (1 = best, 30 = fastest).
pub const DEFAULT_SPEED: i32 = 10;

/// Sink that writes an animated GIF to a stream.
///
/// Recognized passthrough option: `speed` (1..=30). Other options are ignored by this encoder.
pub struct GifSink<'a> {
    writer: Option<&'a mut dyn Write>,
    encoder: Option<Encoder<&'a mut dyn Write>>,
    cfg: Option<SinkConfig>,
    speed: i32,
    delay_cs: u16,
}

impl<'a> GifSink<'a> {
    /// Create a sink writing into `writer`.
    pub fn new(writer: &'a mut dyn Write) -> Self {
        Self {
            writer: Some(writer),
            encoder: None,
            cfg: None,
            speed: DEFAULT_SPEED,
            delay_cs: 10,
        }
    }
}

impl FrameSink for GifSink<'_> {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ReelError::encode("gif width/height must be non-zero"));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(ReelError::encode(format!(
                "gif size {}x{} exceeds {max}x{max}",
                cfg.width,
                cfg.height,
                max = u16::MAX
            )));
        }

        let speed = parse_speed(&cfg)?;
        for key in cfg.opts.extra.keys().filter(|k| k.as_str() != "speed") {
            tracing::debug!(key = %key, "gif encoder ignores option");
        }

        let writer = self
            .writer
            .take()
            .ok_or_else(|| ReelError::encode("gif sink already started"))?;
        // Both dimensions were checked against u16::MAX above.
        let mut encoder = Encoder::new(writer, cfg.width as u16, cfg.height as u16, &[])
            .map_err(|e| ReelError::encode(format!("failed to write gif header: {e}")))?;
        let repeat = match cfg.opts.loop_count {
            None | Some(0) => Repeat::Infinite,
            Some(n) => Repeat::Finite(n),
        };
        encoder
            .set_repeat(repeat)
            .map_err(|e| ReelError::encode(format!("failed to set gif repeat: {e}")))?;

        // GIF delays are stored in hundredths of a second.
        let delay_cs = (cfg.opts.frame_delay_ms() + 5) / 10;
        self.delay_cs = u16::try_from(delay_cs).unwrap_or(u16::MAX);
        self.speed = speed;
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, _idx: usize, frame: &Frame<u8>) -> ReelResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| ReelError::encode("gif sink not started"))?;
        check_frame_extent(cfg, frame)?;

        let mut rgba = frame.to_rgba8();
        let mut gif_frame = gif::Frame::from_rgba_speed(
            cfg.width as u16,
            cfg.height as u16,
            &mut rgba,
            self.speed,
        );
        gif_frame.delay = self.delay_cs;

        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| ReelError::encode("gif sink is already finalized"))?;
        encoder
            .write_frame(&gif_frame)
            .map_err(|e| ReelError::encode(format!("failed to write gif frame: {e}")))
    }

    fn end(&mut self) -> ReelResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| ReelError::encode("gif sink not started"))?;
        let writer = encoder
            .into_inner()
            .map_err(|e| ReelError::encode(format!("failed to write gif trailer: {e}")))?;
        writer
            .flush()
            .map_err(|e| ReelError::encode(format!("failed to flush gif output: {e}")))?;
        self.cfg = None;
        Ok(())
    }
}

fn parse_speed(cfg: &SinkConfig) -> ReelResult<i32> {
    let Some(raw) = cfg.opts.extra.get("speed") else {
        return Ok(DEFAULT_SPEED);
    };
    match raw.trim().parse::<i32>() {
        Ok(speed) if (1..=30).contains(&speed) => Ok(speed),
        _ => Err(ReelError::configuration(format!(
            "gif speed must be an integer in 1..=30, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
