/// Convenience result type used across the crate.
pub type BoothResult<T> = Result<T, BoothError>;

/// Error type returned by catalog, rendering, encoding, and configuration APIs.
///
/// Camera failures are not represented here: they are classified into
/// [`DeviceError`](crate::DeviceError) and kept as capture-controller state.
#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    /// Input values failed validation (unknown ids, bad geometry, bad colors).
    #[error("validation error: {0}")]
    Validation(String),

    /// A capture-side operation could not produce a usable image.
    #[error("capture error: {0}")]
    Capture(String),

    /// Strip composition failed.
    #[error("render error: {0}")]
    Render(String),

    /// Image encoding or artifact output failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Configuration file could not be loaded or is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error (IO, image decode).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    /// Build a [`BoothError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BoothError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`BoothError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BoothError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`BoothError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
