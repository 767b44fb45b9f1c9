use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ReelError, ReelResult};

/// Maximum number of channels a frame (and therefore a background) may carry.
pub const MAX_CHANNELS: usize = 4;

/// A single pixel sample. Padding preserves the sample type of each frame.
pub trait Sample: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Widen an 8-bit value into this sample type.
    fn from_u8(v: u8) -> Self;
    /// Narrow this sample to 8 bits (encoders consume 8-bit data).
    fn to_u8(self) -> u8;
}

impl Sample for u8 {
    fn from_u8(v: u8) -> Self {
        v
    }

    fn to_u8(self) -> u8 {
        self
    }
}

impl Sample for u16 {
    fn from_u8(v: u8) -> Self {
        u16::from(v) * 257
    }

    fn to_u8(self) -> u8 {
        ((u32::from(self) + 128) / 257).min(255) as u8
    }
}

/// Canvas width/height in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Background fill for padded canvases, as 1..=4 straight 8-bit samples.
///
/// A frame with `n` channels uses the first `n` samples; the background must have at least as
/// many samples as the frame has channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Background {
    samples: Vec<u8>,
}

impl Background {
    /// Build a background from raw samples.
    pub fn new(samples: &[u8]) -> ReelResult<Self> {
        if samples.is_empty() || samples.len() > MAX_CHANNELS {
            return Err(ReelError::configuration(format!(
                "background must have 1..={MAX_CHANNELS} channels, got {}",
                samples.len()
            )));
        }
        Ok(Self {
            samples: samples.to_vec(),
        })
    }

    /// Opaque four-channel background.
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            samples: vec![r, g, b, a],
        }
    }

    /// Opaque white `(255, 255, 255, 255)`.
    pub fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }

    /// Number of samples carried by this background.
    pub fn channels(&self) -> usize {
        self.samples.len()
    }

    /// Raw 8-bit samples.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// The fill value for a frame with `channels` channels, widened to `S`.
    pub fn truncated<S: Sample>(&self, channels: usize) -> ReelResult<Vec<S>> {
        if channels > self.samples.len() {
            return Err(ReelError::configuration(format!(
                "background has {} channel(s) but a frame has {channels}",
                self.samples.len()
            )));
        }
        Ok(self.samples[..channels]
            .iter()
            .copied()
            .map(S::from_u8)
            .collect())
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::white()
    }
}

impl FromStr for Background {
    type Err = ReelError;

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` or a comma list such as `255,0,0,128`.
    fn from_str(s: &str) -> ReelResult<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return parse_hex(s);
        }
        let samples = s
            .split(',')
            .map(|part| {
                part.trim().parse::<u8>().map_err(|_| {
                    ReelError::configuration(format!("invalid background sample '{part}'"))
                })
            })
            .collect::<ReelResult<Vec<u8>>>()?;
        Self::new(&samples)
    }
}

fn parse_hex(s: &str) -> ReelResult<Background> {
    let hex = s.trim_start_matches('#');
    let bad = || ReelError::configuration(format!("invalid hex background '{s}'"));
    if !hex.is_ascii() {
        return Err(bad());
    }

    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
    match hex.len() {
        3 => {
            let mut out = Vec::with_capacity(4);
            for c in hex.chars() {
                let v = c.to_digit(16).ok_or_else(bad)? as u8;
                out.push(v * 17);
            }
            out.push(255);
            Background::new(&out)
        }
        6 => Ok(Background::rgba(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Ok(Background::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => Err(bad()),
    }
}

impl Serialize for Background {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.samples.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Background {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Arr(v) => Self::new(&v).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
