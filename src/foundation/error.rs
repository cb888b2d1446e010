/// Result alias used across the crate.
pub type TuckboxResult<T> = Result<T, TuckboxError>;

/// Error taxonomy for template generation.
#[derive(thiserror::Error, Debug)]
pub enum TuckboxError {
    /// Configuration is malformed, incomplete, or out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// The unfolded template does not fit on the printable page.
    #[error("layout error: {0}")]
    Layout(String),

    /// Invalid feature grid definition or out-of-range grid coordinate.
    #[error("grid error: {0}")]
    Grid(String),

    /// A referenced image or font could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Rasterization failed (buffer sizes, surface limits).
    #[error("render error: {0}")]
    Render(String),

    /// Any other failure, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TuckboxError {
    /// Build a [`TuckboxError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TuckboxError::Layout`].
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`TuckboxError::Grid`].
    pub fn grid(msg: impl Into<String>) -> Self {
        Self::Grid(msg.into())
    }

    /// Build a [`TuckboxError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`TuckboxError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
