use std::path::Path;

use anyhow::Context;
use image::DynamicImage;

use crate::foundation::error::{ReelError, ReelResult};
use crate::frame::buffer::Frame;

/// Decode an encoded raster image (PNG, JPEG, ...) into an 8-bit frame.
///
/// The channel count of the source (gray, gray+alpha, RGB, RGBA) is preserved.
pub fn decode_frame(bytes: &[u8]) -> ReelResult<Frame<u8>> {
    let img = load_image(bytes)?;
    frame_from_image(img)
}

/// Decode an encoded raster image into a 16-bit frame, preserving its channel count.
pub fn decode_frame16(bytes: &[u8]) -> ReelResult<Frame<u16>> {
    let img = load_image(bytes)?;
    frame16_from_image(img)
}

/// Read and decode a raster image file into an 8-bit frame.
pub fn load_frame(path: &Path) -> ReelResult<Frame<u8>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_frame(&bytes)
        .map_err(|e| ReelError::decode(format!("'{}': {e}", path.display())))
}

/// Convert a decoded image into an 8-bit frame with the same channel count.
pub fn frame_from_image(img: DynamicImage) -> ReelResult<Frame<u8>> {
    let (width, height) = (img.width(), img.height());
    let (channels, data) = match img.color().channel_count() {
        1 => (1, img.into_luma8().into_raw()),
        2 => (2, img.into_luma_alpha8().into_raw()),
        3 => (3, img.into_rgb8().into_raw()),
        _ => (4, img.into_rgba8().into_raw()),
    };
    Frame::new(width, height, channels, data)
}

/// Convert a decoded image into a 16-bit frame with the same channel count.
pub fn frame16_from_image(img: DynamicImage) -> ReelResult<Frame<u16>> {
    let (width, height) = (img.width(), img.height());
    let (channels, data) = match img.color().channel_count() {
        1 => (1, img.into_luma16().into_raw()),
        2 => (2, img.into_luma_alpha16().into_raw()),
        3 => (3, img.into_rgb16().into_raw()),
        _ => (4, img.into_rgba16().into_raw()),
    };
    Frame::new(width, height, channels, data)
}

fn load_image(bytes: &[u8]) -> ReelResult<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| ReelError::decode(format!("decode image from memory: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
