use serde::{Deserialize, Serialize};

use crate::foundation::core::{Background, Extent, Sample};
use crate::foundation::error::{ReelError, ReelResult};
use crate::frame::buffer::Frame;

/// Where a smaller frame sits inside the padded canvas.
///
/// The default places frames at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alignment {
    /// Align frame bottoms instead of tops.
    #[serde(rename = "align_bottom")]
    pub bottom: bool,
    /// Align frame right edges instead of left edges.
    #[serde(rename = "align_right")]
    pub right: bool,
}

impl Alignment {
    /// Top-left placement.
    pub const TOP_LEFT: Self = Self {
        bottom: false,
        right: false,
    };

    /// Pixel offset `(x, y)` of a `frame` placed inside `canvas`.
    ///
    /// An axis on which `frame` is larger than `canvas` gets offset 0.
    pub fn offsets(self, frame: Extent, canvas: Extent) -> (u32, u32) {
        let x = if self.right {
            canvas.width.saturating_sub(frame.width)
        } else {
            0
        };
        let y = if self.bottom {
            canvas.height.saturating_sub(frame.height)
        } else {
            0
        };
        (x, y)
    }
}

/// Largest width and largest height across `frames`, taken independently.
pub fn max_extent<S: Sample>(frames: &[Frame<S>]) -> ReelResult<Extent> {
    let width = frames.iter().map(Frame::width).max();
    let height = frames.iter().map(Frame::height).max();
    match (width, height) {
        (Some(width), Some(height)) => Ok(Extent { width, height }),
        _ => Err(ReelError::empty_input(
            "cannot compute a canvas size for zero frames",
        )),
    }
}

/// Place `frame` on a `canvas`-sized buffer filled with `bg`.
///
/// Pixels outside the placed frame keep the background value, truncated to the frame's
/// channel count.
pub fn pad_frame<S: Sample>(
    frame: &Frame<S>,
    canvas: Extent,
    bg: &Background,
    align: Alignment,
) -> ReelResult<Frame<S>> {
    let size = frame.extent();
    if size.width > canvas.width || size.height > canvas.height {
        return Err(ReelError::configuration(format!(
            "frame {}x{} does not fit in canvas {}x{}",
            size.width, size.height, canvas.width, canvas.height
        )));
    }

    let fill = bg.truncated::<S>(usize::from(frame.channels()))?;
    let mut out = Frame::filled(canvas.width, canvas.height, &fill)?;

    let (x, y) = align.offsets(size, canvas);
    let channels = usize::from(frame.channels());
    let col_start = x as usize * channels;
    let col_end = col_start + size.width as usize * channels;
    for row in 0..size.height {
        out.row_mut(y + row)[col_start..col_end].copy_from_slice(frame.row(row));
    }
    Ok(out)
}

/// Pad every frame to the common maximum extent.
///
/// The output has the same length and order as `frames`. Every output frame is
/// `max(height) x max(width)` and keeps its source's channel count and sample type. The
/// background is validated against every frame before any canvas is allocated.
#[tracing::instrument(skip(frames, bg), fields(frames = frames.len()))]
pub fn pad_frames<S: Sample>(
    frames: &[Frame<S>],
    bg: &Background,
    align: Alignment,
) -> ReelResult<Vec<Frame<S>>> {
    let canvas = max_extent(frames)?;

    if let Some(widest) = frames.iter().map(Frame::channels).max() {
        bg.truncated::<S>(usize::from(widest))?;
    }

    tracing::debug!(width = canvas.width, height = canvas.height, "padding frames");
    frames
        .iter()
        .map(|frame| {
            if frame.extent() == canvas {
                Ok(frame.clone())
            } else {
                pad_frame(frame, canvas, bg, align)
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/compose/pad.rs"]
mod tests;
