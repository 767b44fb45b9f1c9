use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::format::{OutputFormat, VideoContainer};
use crate::encode::sink::{FrameSink, SinkConfig, check_frame_extent};
use crate::foundation::error::{ReelError, ReelResult};
use crate::frame::buffer::Frame;

/// Where `ffmpeg` writes the encoded video.
pub enum FfmpegOutput<'a> {
    /// A file path.
    Path {
        /// Output file.
        path: PathBuf,
        /// Overwrite an existing file.
        overwrite: bool,
    },
    /// `ffmpeg`'s stdout, copied into `writer` once encoding finishes.
    Stream(&'a mut dyn Write),
}

/// Sink that spawns the system `ffmpeg` and streams raw RGBA frames to its stdin.
///
/// Passthrough options are appended as `-<key> <value>` output arguments.
pub struct FfmpegSink<'a> {
    output: FfmpegOutput<'a>,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    stdout_drain: Option<JoinHandle<std::io::Result<Vec<u8>>>>,

    cfg: Option<SinkConfig>,
    last_idx: Option<usize>,
}

impl<'a> FfmpegSink<'a> {
    /// Create a sink writing to `output`.
    pub fn new(output: FfmpegOutput<'a>) -> Self {
        Self {
            output,
            child: None,
            stdin: None,
            stderr_drain: None,
            stdout_drain: None,
            cfg: None,
            last_idx: None,
        }
    }

    /// Create a sink writing (and overwriting) the file at `path`.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FfmpegOutput::Path {
            path: path.into(),
            overwrite: true,
        })
    }
}

impl FrameSink for FfmpegSink<'_> {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        let OutputFormat::Video(container) = cfg.format else {
            return Err(ReelError::encode(format!(
                "ffmpeg sink cannot write {:?} output",
                cfg.format
            )));
        };
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ReelError::encode(
                "ffmpeg sink width/height must be non-zero",
            ));
        }

        if let FfmpegOutput::Path { path, overwrite } = &self.output {
            ensure_parent_dir(path)?;
            if !overwrite && path.exists() {
                return Err(ReelError::encode(format!(
                    "output file '{}' already exists",
                    path.display()
                )));
            }
        }

        if !is_ffmpeg_on_path() {
            return Err(ReelError::encode(
                "ffmpeg is required for video encoding, but was not found on PATH",
            ));
        }

        let args = ffmpeg_args(&cfg, container, &self.output);
        tracing::debug!(?args, "spawning ffmpeg");

        let streaming = matches!(self.output, FfmpegOutput::Stream(_));
        let mut cmd = Command::new("ffmpeg");
        cmd.args(&args)
            .stdin(Stdio::piped())
            .stdout(if streaming {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            ReelError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ReelError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| ReelError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        self.stderr_drain = Some(spawn_drain(stderr));
        if streaming {
            let stdout = child
                .stdout
                .take()
                .ok_or_else(|| ReelError::encode("failed to open ffmpeg stdout (unexpected)"))?;
            self.stdout_drain = Some(spawn_drain(stdout));
        }

        self.child = Some(child);
        self.stdin = Some(stdin);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &Frame<u8>) -> ReelResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| ReelError::encode("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(ReelError::encode(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);
        check_frame_extent(cfg, frame)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(ReelError::encode("ffmpeg sink is already finalized"));
        };
        if let Err(e) = stdin.write_all(&frame.to_rgba8()) {
            // Usually ffmpeg exited early; its stderr says why.
            let context = format!("failed to write frame {idx} to ffmpeg stdin: {e}");
            return Err(self.abort(&context));
        }
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| ReelError::encode("ffmpeg sink not started"))?;

        let status = child
            .wait()
            .map_err(|e| ReelError::encode(format!("failed to wait for ffmpeg to finish: {e}")))?;
        let stderr_bytes = join_drain(self.stderr_drain.take(), "stderr")?;
        let stdout_bytes = join_drain(self.stdout_drain.take(), "stdout")?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(ReelError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        if let FfmpegOutput::Stream(writer) = &mut self.output {
            writer
                .write_all(&stdout_bytes)
                .and_then(|()| writer.flush())
                .map_err(|e| ReelError::encode(format!("failed to write encoded video: {e}")))?;
        }

        self.cfg = None;
        Ok(())
    }
}

impl FfmpegSink<'_> {
    /// Reap ffmpeg after a failed write and build an error carrying its diagnostics.
    fn abort(&mut self, context: &str) -> ReelError {
        drop(self.stdin.take());
        self.cfg = None;
        let status = self.child.take().map(|mut child| child.wait());
        let stderr = join_drain(self.stderr_drain.take(), "stderr").unwrap_or_default();
        let _ = join_drain(self.stdout_drain.take(), "stdout");

        let stderr = String::from_utf8_lossy(&stderr);
        let stderr = stderr.trim();
        match status {
            Some(Ok(status)) if !stderr.is_empty() => ReelError::encode(format!(
                "{context}; ffmpeg exited with status {status}: {stderr}"
            )),
            Some(Ok(status)) => {
                ReelError::encode(format!("{context}; ffmpeg exited with status {status}"))
            }
            _ => ReelError::encode(context.to_string()),
        }
    }
}

impl Drop for FfmpegSink<'_> {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            tracing::debug!("ffmpeg sink dropped before end, killing ffmpeg");
            let _ = child.kill();
            let _ = child.wait();
        }
        let _ = join_drain(self.stderr_drain.take(), "stderr");
        let _ = join_drain(self.stdout_drain.take(), "stdout");
    }
}

/// Command-line arguments for encoding `cfg` into `container`.
pub(crate) fn ffmpeg_args(
    cfg: &SinkConfig,
    container: VideoContainer,
    output: &FfmpegOutput<'_>,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    let mut push = |a: &str| args.push(OsString::from(a));

    match output {
        FfmpegOutput::Path { overwrite: true, .. } | FfmpegOutput::Stream(_) => push("-y"),
        FfmpegOutput::Path { overwrite: false, .. } => push("-n"),
    }

    // Input: raw straight-alpha RGBA8 frames at the configured rate.
    push("-loglevel");
    push("error");
    push("-f");
    push("rawvideo");
    push("-pix_fmt");
    push("rgba");
    push("-s");
    push(&format!("{}x{}", cfg.width, cfg.height));
    push("-r");
    push(&cfg.opts.frame_rate().to_string());
    push("-i");
    push("pipe:0");
    push("-an");

    let codec = cfg
        .opts
        .codec
        .as_deref()
        .unwrap_or_else(|| container.default_codec());
    push("-c:v");
    push(codec);

    let extra = &cfg.opts.extra;
    if !extra.contains_key("pix_fmt") {
        // yuv420p needs even dimensions.
        push("-pix_fmt");
        push("yuv420p");
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            push("-vf");
            push("pad=ceil(iw/2)*2:ceil(ih/2)*2");
        }
    }
    if container == VideoContainer::Mp4 && !extra.contains_key("movflags") {
        push("-movflags");
        match output {
            FfmpegOutput::Path { .. } => push("+faststart"),
            FfmpegOutput::Stream(_) => push("frag_keyframe+empty_moov"),
        }
    }
    for (key, value) in extra {
        push(&format!("-{key}"));
        push(value.as_str());
    }

    match output {
        FfmpegOutput::Path { path, .. } => args.push(path.as_os_str().to_owned()),
        FfmpegOutput::Stream(_) => {
            args.extend(["-f", container.muxer(), "pipe:1"].map(OsString::from));
        }
    }
    args
}

fn spawn_drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<std::io::Result<Vec<u8>>> {
    std::thread::spawn(move || {
        let mut bytes = Vec::new();
        pipe.read_to_end(&mut bytes)?;
        Ok(bytes)
    })
}

fn join_drain(
    handle: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    name: &str,
) -> ReelResult<Vec<u8>> {
    match handle {
        Some(handle) => handle
            .join()
            .map_err(|_| ReelError::encode(format!("ffmpeg {name} drain thread panicked")))?
            .map_err(|e| ReelError::encode(format!("ffmpeg {name} read failed: {e}"))),
        None => Ok(Vec::new()),
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            ReelError::encode(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
