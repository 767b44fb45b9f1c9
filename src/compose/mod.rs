//! Frame compositing: padding frames of different sizes onto a common canvas.

/// Canvas extent, alignment and padding.
pub mod pad;
/// Homogeneous frame inputs (drawings or buffers).
pub mod source;
