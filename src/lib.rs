//! framereel pads a sequence of frames to a common canvas and encodes them as an animation.
//!
//! Frames are either vector drawings (SVG, rasterized with `resvg`) or pixel buffers. Every
//! frame is placed on a canvas of the largest width and the largest height in the sequence,
//! filled with a background color, and the result is handed to a GIF encoder or to the system
//! `ffmpeg` depending on the output file extension.
//!
//! - Build a [`FrameSource`]
//! - Pick [`SaveOpts`] (alignment, background, encoder options)
//! - Call [`save_video`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Input loading: raster decode and SVG rasterization.
pub mod assets;
/// Canvas padding and frame inputs.
pub mod compose;
/// Encoding sinks.
pub mod encode;
mod foundation;
/// Pixel buffers.
pub mod frame;
/// The `save_video` pipeline.
pub mod session;

pub use crate::foundation::core::{Background, Extent, MAX_CHANNELS, Sample};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::assets::decode::{decode_frame, decode_frame16, load_frame};
pub use crate::assets::svg_raster::Drawing;
pub use crate::compose::pad::{Alignment, max_extent, pad_frame, pad_frames};
pub use crate::compose::source::FrameSource;
pub use crate::encode::ffmpeg::{FfmpegOutput, FfmpegSink, is_ffmpeg_on_path};
pub use crate::encode::format::{OutputFormat, OutputTarget, VideoContainer};
pub use crate::encode::gif::GifSink;
pub use crate::encode::opts::EncodeOpts;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::frame::buffer::Frame;
pub use crate::session::save::{SaveOpts, SaveStats, save_video, save_video_with_sink};
