/// Raster image decoding into frames.
pub mod decode;
/// SVG parsing and rasterization.
pub mod svg_raster;
