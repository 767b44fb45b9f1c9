use std::io::Write;
use std::path::{Path, PathBuf};

use crate::foundation::error::{ReelError, ReelResult};

/// Video containers written through `ffmpeg`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoContainer {
    /// MPEG-4 (`.mp4`).
    Mp4,
    /// QuickTime (`.mov`).
    Mov,
    /// Matroska (`.mkv`).
    Mkv,
    /// WebM (`.webm`).
    Webm,
    /// AVI (`.avi`).
    Avi,
}

impl VideoContainer {
    /// `ffmpeg` muxer name (`-f <muxer>`).
    pub fn muxer(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Mov => "mov",
            Self::Mkv => "matroska",
            Self::Webm => "webm",
            Self::Avi => "avi",
        }
    }

    /// Codec used when the caller does not choose one.
    pub fn default_codec(self) -> &'static str {
        match self {
            Self::Webm => "libvpx-vp9",
            Self::Mp4 | Self::Mov | Self::Mkv | Self::Avi => "libx264",
        }
    }
}

/// Encoded output kind, selected from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Animated GIF. Frame timing is a per-frame display duration.
    Gif,
    /// A video container encoded by `ffmpeg`. Frame timing is a frame rate.
    Video(VideoContainer),
}

impl OutputFormat {
    /// Map a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> ReelResult<Self> {
        let fmt = match ext.to_ascii_lowercase().as_str() {
            "gif" => Self::Gif,
            "mp4" | "m4v" => Self::Video(VideoContainer::Mp4),
            "mov" => Self::Video(VideoContainer::Mov),
            "mkv" => Self::Video(VideoContainer::Mkv),
            "webm" => Self::Video(VideoContainer::Webm),
            "avi" => Self::Video(VideoContainer::Avi),
            other => {
                return Err(ReelError::encode(format!(
                    "unsupported output format '.{other}'"
                )));
            }
        };
        Ok(fmt)
    }

    /// Pick the format from `path`'s extension.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ReelError::encode(format!(
                "output path '{}' has no extension to pick a format from",
                path.display()
            ))
        })?;
        Self::from_extension(ext)
    }

    /// Return `true` for looped-image formats timed by per-frame duration.
    pub fn uses_frame_duration(self) -> bool {
        matches!(self, Self::Gif)
    }
}

/// Where encoded bytes go.
pub enum OutputTarget<'a> {
    /// A file; its extension selects the format.
    Path(PathBuf),
    /// Any writable stream, with an explicit format.
    Stream {
        /// Destination.
        writer: &'a mut dyn Write,
        /// Output format.
        format: OutputFormat,
    },
}

impl OutputTarget<'_> {
    /// Resolve the output format for this target.
    pub fn format(&self) -> ReelResult<OutputFormat> {
        match self {
            Self::Path(p) => OutputFormat::from_path(p),
            Self::Stream { format, .. } => Ok(*format),
        }
    }
}

impl std::fmt::Debug for OutputTarget<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Self::Stream { format, .. } => f
                .debug_struct("Stream")
                .field("format", format)
                .finish_non_exhaustive(),
        }
    }
}

impl From<PathBuf> for OutputTarget<'_> {
    fn from(p: PathBuf) -> Self {
        Self::Path(p)
    }
}

impl From<&Path> for OutputTarget<'_> {
    fn from(p: &Path) -> Self {
        Self::Path(p.to_path_buf())
    }
}

impl From<&str> for OutputTarget<'_> {
    fn from(p: &str) -> Self {
        Self::Path(PathBuf::from(p))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/format.rs"]
mod tests;
