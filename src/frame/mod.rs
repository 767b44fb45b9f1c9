/// Typed pixel buffers.
pub mod buffer;
