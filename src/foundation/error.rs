/// Crate-wide result alias.
pub type ReelResult<T> = Result<T, ReelError>;

/// Errors surfaced by padding, rasterization and encoding.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// The frame sequence was empty, so no canvas extent exists.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// A drawing failed to rasterize, or its output could not be decoded into a pixel buffer.
    #[error("decode error: {0}")]
    Decode(String),

    /// The encoder rejected the output format or failed while writing.
    #[error("encode error: {0}")]
    Encode(String),

    /// Invalid options or mismatched inputs (e.g. a background with too few channels).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Anything else, usually an I/O failure carrying `anyhow` context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::EmptyInput`].
    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput(msg.into())
    }

    /// Build a [`ReelError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ReelError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ReelError::Configuration`].
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
