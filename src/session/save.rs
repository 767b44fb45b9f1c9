use std::collections::BTreeMap;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::compose::pad::Alignment;
use crate::compose::source::FrameSource;
use crate::encode::ffmpeg::{FfmpegOutput, FfmpegSink, ensure_parent_dir};
use crate::encode::format::{OutputFormat, OutputTarget};
use crate::encode::gif::GifSink;
use crate::encode::opts::EncodeOpts;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Background, Extent};
use crate::foundation::error::{ReelError, ReelResult};

/// Options for [`save_video`].
///
/// Deserializes from a flat JSON object, e.g.
/// `{"align_bottom": true, "bg": "#000000", "fps": 12, "extra": {"crf": "20"}}`.
/// Unrecognized top-level keys with scalar values are encoder options: `{"crf": 20}` is the same
/// as `{"extra": {"crf": "20"}}`. An entry already in `extra` takes precedence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSaveOpts")]
pub struct SaveOpts {
    /// Placement of smaller frames on the canvas.
    #[serde(flatten)]
    pub align: Alignment,
    /// Canvas fill; needs at least as many channels as any frame.
    pub bg: Background,
    /// Encoder options.
    #[serde(flatten)]
    pub encode: EncodeOpts,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawSaveOpts {
    #[serde(flatten)]
    align: Alignment,
    bg: Background,
    #[serde(flatten)]
    encode: EncodeOpts,
    // Must stay last: flattened structs above take their keys first.
    #[serde(flatten)]
    rest: BTreeMap<String, serde_json::Value>,
}

impl TryFrom<RawSaveOpts> for SaveOpts {
    type Error = ReelError;

    fn try_from(raw: RawSaveOpts) -> ReelResult<Self> {
        let mut encode = raw.encode;
        for (key, value) in raw.rest {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Bool(_) | serde_json::Value::Number(_) => value.to_string(),
                other => {
                    return Err(ReelError::configuration(format!(
                        "encoder option '{key}' must be a string, number or bool, got {other}"
                    )));
                }
            };
            encode.extra.entry(key).or_insert(value);
        }
        Ok(Self {
            align: raw.align,
            bg: raw.bg,
            encode,
        })
    }
}

/// Summary of a finished [`save_video`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaveStats {
    /// Frames written.
    pub frames: usize,
    /// Extent shared by every written frame.
    pub extent: Extent,
    /// Format that was written.
    pub format: OutputFormat,
}

/// Pad `frames` to a common canvas and encode them into `target`.
///
/// The output format comes from the target (a path's extension, or the format given with a
/// stream). Nothing is written when the input is empty, the format is unsupported or any frame
/// fails to rasterize.
#[tracing::instrument(skip_all, fields(kind = frames.kind(), frames = frames.len()))]
pub fn save_video<'a>(
    frames: FrameSource,
    target: impl Into<OutputTarget<'a>>,
    opts: &SaveOpts,
) -> ReelResult<SaveStats> {
    let target = target.into();
    let format = target.format()?;
    tracing::debug!(?format, "resolved output format");

    match target {
        OutputTarget::Path(path) => match format {
            OutputFormat::Gif => {
                let mut buf = Vec::new();
                let stats =
                    save_video_with_sink(frames, format, opts, &mut GifSink::new(&mut buf))?;
                ensure_parent_dir(&path)?;
                std::fs::write(&path, &buf).map_err(|e| {
                    ReelError::encode(format!("failed to write '{}': {e}", path.display()))
                })?;
                Ok(stats)
            }
            OutputFormat::Video(_) => {
                save_video_with_sink(frames, format, opts, &mut FfmpegSink::for_path(path))
            }
        },
        OutputTarget::Stream { writer, format } => match format {
            OutputFormat::Gif => {
                let stats =
                    save_video_with_sink(frames, format, opts, &mut GifSink::new(&mut *writer))?;
                writer
                    .flush()
                    .map_err(|e| ReelError::encode(format!("failed to flush gif output: {e}")))?;
                Ok(stats)
            }
            OutputFormat::Video(_) => save_video_with_sink(
                frames,
                format,
                opts,
                &mut FfmpegSink::new(FfmpegOutput::Stream(writer)),
            ),
        },
    }
}

/// Pad `frames` and stream them into `sink` as `format`.
///
/// Encoder options are resolved for `format` before any frame is rasterized, so the sink
/// sees exactly what the encoder would receive (e.g. `duration` instead of `fps` for GIF).
pub fn save_video_with_sink(
    frames: FrameSource,
    format: OutputFormat,
    opts: &SaveOpts,
    sink: &mut dyn FrameSink,
) -> ReelResult<SaveStats> {
    let encode = opts.encode.resolve_for(format)?;
    let padded = frames.into_padded(&opts.bg, opts.align)?;
    let extent = padded
        .first()
        .map(|f| f.extent())
        .ok_or_else(|| ReelError::empty_input("no frames to encode"))?;

    sink.begin(SinkConfig {
        width: extent.width,
        height: extent.height,
        format,
        opts: encode,
    })?;
    for (idx, frame) in padded.iter().enumerate() {
        sink.push_frame(idx, frame)?;
    }
    sink.end()?;

    tracing::debug!(
        frames = padded.len(),
        width = extent.width,
        height = extent.height,
        "encoded frames"
    );
    Ok(SaveStats {
        frames: padded.len(),
        extent,
        format,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/session/save.rs"]
mod tests;
