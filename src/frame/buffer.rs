use crate::foundation::core::{Extent, MAX_CHANNELS, Sample};
use crate::foundation::error::{ReelError, ReelResult};

/// An immutable, row-major pixel buffer with interleaved channels.
///
/// `data.len() == width * height * channels` always holds.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame<S: Sample = u8> {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<S>,
}

impl<S: Sample> Frame<S> {
    /// Wrap raw interleaved samples.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<S>) -> ReelResult<Self> {
        let expected = sample_count(width, height, channels)?;
        if data.len() != expected {
            return Err(ReelError::configuration(format!(
                "frame data has {} samples, expected {expected} for {width}x{height}x{channels}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// A frame with every pixel set to `fill`; the channel count is `fill.len()`.
    pub fn filled(width: u32, height: u32, fill: &[S]) -> ReelResult<Self> {
        let channels = u8::try_from(fill.len())
            .map_err(|_| ReelError::configuration("too many fill channels"))?;
        let len = sample_count(width, height, channels)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..(len / fill.len()) {
            data.extend_from_slice(fill);
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width and height.
    pub fn extent(&self) -> Extent {
        Extent {
            width: self.width,
            height: self.height,
        }
    }

    /// Channels per pixel (1..=4).
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// All samples, row-major.
    pub fn data(&self) -> &[S] {
        &self.data
    }

    /// Consume the frame and return its samples.
    pub fn into_raw(self) -> Vec<S> {
        self.data
    }

    /// Samples of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[S]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let c = usize::from(self.channels);
        let start = (y as usize * self.width as usize + x as usize) * c;
        Some(&self.data[start..start + c])
    }

    /// Samples of row `y`.
    pub fn row(&self, y: u32) -> &[S] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [S] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    fn stride(&self) -> usize {
        self.width as usize * usize::from(self.channels)
    }

    /// Narrow every sample to 8 bits, keeping the channel layout.
    pub fn to_u8(&self) -> Frame<u8> {
        Frame {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data.iter().map(|s| s.to_u8()).collect(),
        }
    }
}

impl Frame<u8> {
    /// Expand to straight-alpha RGBA8 as consumed by the encoders.
    ///
    /// Gray is replicated, a missing alpha channel becomes fully opaque.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let px_count = self.width as usize * self.height as usize;
        let mut out = Vec::with_capacity(px_count * 4);
        for px in self.data.chunks_exact(usize::from(self.channels)) {
            let rgba = match *px {
                [l] => [l, l, l, 255],
                [l, a] => [l, l, l, a],
                [r, g, b] => [r, g, b, 255],
                [r, g, b, a] => [r, g, b, a],
                _ => unreachable!("channel count is validated at construction"),
            };
            out.extend_from_slice(&rgba);
        }
        out
    }
}

fn sample_count(width: u32, height: u32, channels: u8) -> ReelResult<usize> {
    if channels == 0 || usize::from(channels) > MAX_CHANNELS {
        return Err(ReelError::configuration(format!(
            "frames must have 1..={MAX_CHANNELS} channels, got {channels}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(usize::from(channels)))
        .ok_or_else(|| {
            ReelError::configuration(format!("frame size overflows: {width}x{height}x{channels}"))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/frame/buffer.rs"]
mod tests;
