use std::path::{Path, PathBuf};

use crate::assets::decode::load_frame;
use crate::assets::svg_raster::Drawing;
use crate::compose::pad::{Alignment, pad_frames};
use crate::foundation::core::Background;
use crate::foundation::error::{ReelError, ReelResult};
use crate::frame::buffer::Frame;

/// An ordered, homogeneous sequence of frames to encode.
///
/// The input kind is decided once, by the variant, rather than per frame.
#[derive(Clone, Debug)]
pub enum FrameSource {
    /// Vector drawings, rasterized before padding.
    Drawings(Vec<Drawing>),
    /// Pre-rasterized 8-bit buffers.
    Buffers(Vec<Frame<u8>>),
    /// Pre-rasterized 16-bit buffers; narrowed to 8 bits after padding.
    Buffers16(Vec<Frame<u16>>),
}

impl FrameSource {
    /// Number of frames.
    pub fn len(&self) -> usize {
        match self {
            Self::Drawings(v) => v.len(),
            Self::Buffers(v) => v.len(),
            Self::Buffers16(v) => v.len(),
        }
    }

    /// Return `true` when there are no frames.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Drawings(_) => "drawings",
            Self::Buffers(_) => "buffers",
            Self::Buffers16(_) => "buffers16",
        }
    }

    /// Load files as frames: `.svg` files become drawings rasterized at `scale`, anything else
    /// is decoded as a raster image. Mixing the two kinds is rejected.
    pub fn open_paths(paths: &[PathBuf], scale: f32) -> ReelResult<Self> {
        let svg_count = paths.iter().filter(|p| is_svg(p)).count();
        if svg_count == paths.len() {
            let drawings = paths
                .iter()
                .map(|p| Drawing::open(p)?.with_scale(scale))
                .collect::<ReelResult<Vec<_>>>()?;
            return Ok(Self::Drawings(drawings));
        }
        if svg_count > 0 {
            return Err(ReelError::configuration(
                "inputs must be all SVG drawings or all raster images, not a mix",
            ));
        }
        let frames = paths
            .iter()
            .map(|p| load_frame(p))
            .collect::<ReelResult<Vec<_>>>()?;
        Ok(Self::Buffers(frames))
    }

    /// Rasterize (if needed) and pad every frame to the common extent.
    pub fn into_padded(self, bg: &Background, align: Alignment) -> ReelResult<Vec<Frame<u8>>> {
        if self.is_empty() {
            return Err(ReelError::empty_input("no frames to encode"));
        }
        match self {
            Self::Drawings(drawings) => {
                let frames = rasterize_all(&drawings)?;
                pad_frames(&frames, bg, align)
            }
            Self::Buffers(frames) => pad_frames(&frames, bg, align),
            Self::Buffers16(frames) => Ok(pad_frames(&frames, bg, align)?
                .iter()
                .map(Frame::to_u8)
                .collect()),
        }
    }
}

impl From<Vec<Drawing>> for FrameSource {
    fn from(v: Vec<Drawing>) -> Self {
        Self::Drawings(v)
    }
}

impl From<Vec<Frame<u8>>> for FrameSource {
    fn from(v: Vec<Frame<u8>>) -> Self {
        Self::Buffers(v)
    }
}

impl From<Vec<Frame<u16>>> for FrameSource {
    fn from(v: Vec<Frame<u16>>) -> Self {
        Self::Buffers16(v)
    }
}

/// Rasterize drawings in order.
pub fn rasterize_all(drawings: &[Drawing]) -> ReelResult<Vec<Frame<u8>>> {
    drawings.iter().map(Drawing::rasterize).collect()
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/source.rs"]
mod tests;
