use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use anyhow::Context;

use crate::assets::decode::decode_frame;
use crate::foundation::core::Extent;
use crate::foundation::error::{ReelError, ReelResult};
use crate::frame::buffer::Frame;

// Avoid pathological allocations from huge viewBoxes or scales.
const MAX_DIM: u32 = 16_384;

/// A parsed vector drawing that can be rasterized into a [`Frame`].
#[derive(Clone, Debug)]
pub struct Drawing {
    tree: Arc<usvg::Tree>,
    scale: f32,
}

impl Drawing {
    /// Parse SVG markup. Relative resources are resolved against the working directory.
    pub fn from_svg_data(bytes: &[u8]) -> ReelResult<Self> {
        Self::parse(bytes, None)
    }

    /// Parse SVG markup from a string.
    pub fn from_svg_str(svg: &str) -> ReelResult<Self> {
        Self::from_svg_data(svg.as_bytes())
    }

    /// Read and parse an SVG file. Relative images and a sibling `fonts/` directory are
    /// resolved against the file's directory.
    pub fn open(path: &Path) -> ReelResult<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("read svg '{}'", path.display()))?;
        Self::parse(&bytes, path.parent())
            .map_err(|e| ReelError::decode(format!("'{}': {e}", path.display())))
    }

    fn parse(bytes: &[u8], resources_dir: Option<&Path>) -> ReelResult<Self> {
        let opts = usvg::Options {
            resources_dir: resources_dir.map(Path::to_path_buf),
            fontdb: svg_fontdb(resources_dir),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(bytes, &opts)
            .map_err(|e| ReelError::decode(format!("parse svg tree: {e}")))?;
        Ok(Self {
            tree: Arc::new(tree),
            scale: 1.0,
        })
    }

    /// Rasterize at `scale` device pixels per SVG user unit.
    pub fn with_scale(mut self, scale: f32) -> ReelResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ReelError::configuration(format!(
                "raster scale must be a positive finite number, got {scale}"
            )));
        }
        self.scale = scale;
        Ok(self)
    }

    /// The parsed SVG tree.
    pub fn tree(&self) -> &usvg::Tree {
        &self.tree
    }

    /// Pixel size of the rasterized drawing.
    pub fn raster_extent(&self) -> ReelResult<Extent> {
        fn to_px(v: f32) -> ReelResult<u32> {
            if !v.is_finite() || v <= 0.0 {
                return Err(ReelError::decode("svg has invalid width/height"));
            }
            Ok((v.ceil() as u32).max(1))
        }

        let size = self.tree.size();
        let width = to_px(size.width() * self.scale)?;
        let height = to_px(size.height() * self.scale)?;
        if width > MAX_DIM || height > MAX_DIM {
            return Err(ReelError::decode(format!(
                "svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
            )));
        }
        Ok(Extent { width, height })
    }

    /// Rasterize into PNG bytes (straight alpha RGBA8).
    pub fn rasterize_png(&self) -> ReelResult<Vec<u8>> {
        let Extent { width, height } = self.raster_extent()?;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| ReelError::decode("failed to allocate svg pixmap"))?;

        let sx = (width as f32) / self.tree.size().width();
        let sy = (height as f32) / self.tree.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(&self.tree, xform, &mut pixmap.as_mut());

        // tiny-skia stores premultiplied pixels; PNG wants straight alpha.
        let mut rgba = Vec::with_capacity(pixmap.data().len());
        for px in pixmap.pixels() {
            let c = px.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        let img = image::RgbaImage::from_raw(width, height, rgba)
            .ok_or_else(|| ReelError::decode("svg pixmap size mismatch"))?;

        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| ReelError::decode(format!("encode rasterized svg as png: {e}")))?;
        Ok(png)
    }

    /// Rasterize to PNG and decode the result into a frame.
    #[tracing::instrument(skip(self))]
    pub fn rasterize(&self) -> ReelResult<Frame<u8>> {
        let png = self.rasterize_png()?;
        decode_frame(&png)
    }
}

/// Font database for drawings whose resources live in `resources_dir`.
///
/// System fonts are scanned once per process. Directories shipping their own font files get
/// one extended database each, shared by every drawing opened from them.
fn svg_fontdb(resources_dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
    static SYSTEM: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    static BY_DIR: OnceLock<Mutex<HashMap<PathBuf, Arc<usvg::fontdb::Database>>>> =
        OnceLock::new();

    let system = SYSTEM.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Arc::new(db)
    });

    let Some(dir) = resources_dir else {
        return Arc::clone(system);
    };
    let mut cache = BY_DIR
        .get_or_init(Mutex::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(db) = cache.get(dir) {
        return Arc::clone(db);
    }

    let local: Vec<PathBuf> = font_files(dir)
        .into_iter()
        .chain(font_files(&dir.join("fonts")))
        .collect();
    let db = if local.is_empty() {
        Arc::clone(system)
    } else {
        let mut db = usvg::fontdb::Database::clone(system);
        for path in &local {
            let _ = db.load_font_file(path);
        }
        Arc::new(db)
    };
    cache.insert(dir.to_path_buf(), Arc::clone(&db));
    db
}

fn font_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    rd.flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|s| s.to_str())
                .map(str::to_ascii_lowercase)
                .is_some_and(|ext| matches!(ext.as_str(), "ttf" | "otf" | "ttc"))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
