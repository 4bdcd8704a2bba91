/// Convenience result type used across hairtint.
pub type TintResult<T> = Result<T, TintError>;

/// Top-level error taxonomy used by the try-on APIs.
#[derive(thiserror::Error, Debug)]
pub enum TintError {
    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Camera could not be opened or stopped working.
    #[error("camera error: {0}")]
    Camera(String),

    /// Landmark detector failed to load. Terminal for a session.
    #[error("detector unavailable: {0}")]
    DetectorUnavailable(String),

    /// A single detection pass failed.
    #[error("detection error: {0}")]
    Detection(String),

    /// Errors while drawing or compositing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Key-value storage read or write failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Operation requires a signed-in user.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TintError {
    /// Build a [`TintError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TintError::Camera`] value.
    pub fn camera(msg: impl Into<String>) -> Self {
        Self::Camera(msg.into())
    }

    /// Build a [`TintError::DetectorUnavailable`] value.
    pub fn detector_unavailable(msg: impl Into<String>) -> Self {
        Self::DetectorUnavailable(msg.into())
    }

    /// Build a [`TintError::Detection`] value.
    pub fn detection(msg: impl Into<String>) -> Self {
        Self::Detection(msg.into())
    }

    /// Build a [`TintError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TintError::Storage`] value.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`TintError::Unauthenticated`] value.
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    /// Build a [`TintError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for errors that end the session instead of being retried.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::DetectorUnavailable(_))
    }
}

impl From<serde_json::Error> for TintError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
