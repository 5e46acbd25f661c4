/// Convenience result type used across codereel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid user-provided options, manifests or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Font data that could not be registered or shaped.
    #[error("font error: {0}")]
    Font(String),

    /// Errors while rasterizing or resampling a canvas.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding frames or image files.
    #[error("encode error: {0}")]
    Encode(String),

    /// An external tool (`ffmpeg`, `ffprobe`, `say`) is missing or failed.
    #[error("process error: {0}")]
    Process(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ReelError::Process`] value.
    pub fn process(msg: impl Into<String>) -> Self {
        Self::Process(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
