use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;

/// Pad SVG drawings or raster images to a common size and encode them as a GIF or video.
#[derive(Parser, Debug)]
#[command(name = "framereel", version)]
struct Cli {
    /// Input frames, in order: all `.svg` drawings or all raster images.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file; the extension selects the format (`.gif`, `.mp4`, `.mkv`, ...).
    #[arg(long, short)]
    out: PathBuf,

    /// JSON options file (alignment, background, encoder options). Flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Align frame bottoms when sizes differ.
    #[arg(long)]
    align_bottom: bool,

    /// Align frame right edges when sizes differ.
    #[arg(long)]
    align_right: bool,

    /// Canvas fill: `#rrggbb`, `#rrggbbaa` or `r,g,b[,a]`.
    #[arg(long)]
    bg: Option<framereel::Background>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<f64>,

    /// Seconds each frame is shown (GIF timing).
    #[arg(long)]
    duration: Option<f64>,

    /// GIF loop count (0 = forever).
    #[arg(long = "loop")]
    loop_count: Option<u16>,

    /// Video codec passed to ffmpeg.
    #[arg(long)]
    codec: Option<String>,

    /// Encoder option forwarded verbatim, as `key=value` (repeatable).
    #[arg(long = "opt", value_parser = parse_key_value)]
    opts: Vec<(String, String)>,

    /// Raster scale for SVG inputs (pixels per SVG unit).
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let opts = build_opts(&cli)?;
    let frames = framereel::FrameSource::open_paths(&cli.inputs, cli.scale)?;
    let stats = framereel::save_video(frames, cli.out.as_path(), &opts)
        .with_context(|| format!("write '{}'", cli.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {}x{})",
        cli.out.display(),
        stats.frames,
        stats.extent.width,
        stats.extent.height
    );
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn build_opts(cli: &Cli) -> anyhow::Result<framereel::SaveOpts> {
    let mut opts = match &cli.config {
        Some(path) => read_opts_json(path)?,
        None => framereel::SaveOpts::default(),
    };

    opts.align.bottom |= cli.align_bottom;
    opts.align.right |= cli.align_right;
    if let Some(bg) = &cli.bg {
        opts.bg = bg.clone();
    }
    if let Some(fps) = cli.fps {
        opts.encode.fps = Some(fps);
    }
    if let Some(d) = cli.duration {
        opts.encode.duration = Some(d);
    }
    if let Some(n) = cli.loop_count {
        opts.encode.loop_count = Some(n);
    }
    if let Some(codec) = &cli.codec {
        opts.encode.codec = Some(codec.clone());
    }
    for (k, v) in &cli.opts {
        opts.encode.extra.insert(k.clone(), v.clone());
    }
    Ok(opts)
}

fn read_opts_json(path: &Path) -> anyhow::Result<framereel::SaveOpts> {
    let f = File::open(path).with_context(|| format!("open options '{}'", path.display()))?;
    let r = BufReader::new(f);
    let opts: framereel::SaveOpts =
        serde_json::from_reader(r).with_context(|| "parse options JSON")?;
    Ok(opts)
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let k = k.trim();
    if k.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((k.to_string(), v.to_string()))
}
