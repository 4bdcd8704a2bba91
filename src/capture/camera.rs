//! Camera backend seams and the error categories shown to users.

use std::task::Poll;

use crate::{foundation::error::TintError, render::video::VideoSource};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which camera to ask for.
pub enum FacingMode {
    /// Front camera, facing the user.
    #[default]
    User,
    /// Rear camera.
    Environment,
}

/// Video constraints passed with every permission request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraConstraints {
    /// Requested camera direction.
    pub facing_mode: FacingMode,
}

/// Why the camera could not be started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraErrorKind {
    /// The user or a policy refused access.
    PermissionDenied,
    /// No matching device.
    NotFound,
    /// Another application holds the device.
    InUse,
    /// The platform has no camera API.
    Unsupported,
    /// Anything else.
    Generic,
}

impl CameraErrorKind {
    /// Categorize a browser `DOMException` name.
    pub fn from_dom_name(name: &str) -> Self {
        match name {
            "NotAllowedError" | "PermissionDeniedError" | "SecurityError" => Self::PermissionDenied,
            "NotFoundError" | "DevicesNotFoundError" | "OverconstrainedError" => Self::NotFound,
            "NotReadableError" | "TrackStartError" | "AbortError" => Self::InUse,
            "NotSupportedError" => Self::Unsupported,
            _ => Self::Generic,
        }
    }

    /// User-facing message for this category.
    pub fn message(self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Camera access was denied. Allow camera access in your browser settings and try again."
            }
            Self::NotFound => "No camera was found. Connect a camera and try again.",
            Self::InUse => "The camera is in use by another application. Close it and try again.",
            Self::Unsupported => "This browser does not support camera access.",
            Self::Generic => "The camera could not be started. Please try again.",
        }
    }
}

/// A failed camera request. Displays as the category's user-facing message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", .kind.message())]
pub struct CameraError {
    /// Category.
    pub kind: CameraErrorKind,
    /// Backend-specific detail, for logs only.
    pub detail: String,
}

impl CameraError {
    /// Build an error of `kind` with backend `detail`.
    pub fn new(kind: CameraErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Build an error from a browser `DOMException` name.
    pub fn from_dom_name(name: &str, detail: impl Into<String>) -> Self {
        Self::new(CameraErrorKind::from_dom_name(name), detail)
    }

    /// Same as the `Display` output.
    pub fn user_message(&self) -> &'static str {
        self.kind.message()
    }
}

impl From<CameraError> for TintError {
    fn from(err: CameraError) -> Self {
        TintError::camera(format!("{err} ({})", err.detail))
    }
}

/// A granted camera. Dropping it must release the device as `stop` does.
pub trait CameraStream: VideoSource {
    /// Tracks still delivering frames.
    fn active_tracks(&self) -> usize;
    /// Stop every track. Idempotent.
    fn stop(&mut self);
}

/// An outstanding permission request. Dropping it abandons the request.
pub trait PendingCamera {
    /// `Pending` until the user answers, then the result once.
    fn poll(&mut self) -> Poll<Result<Box<dyn CameraStream>, CameraError>>;
}

/// Source of camera permission requests.
pub trait CameraBackend {
    /// Start a permission request for `constraints`.
    fn open(&mut self, constraints: &CameraConstraints) -> Box<dyn PendingCamera>;
}

/// A request that resolved synchronously.
pub struct Resolved(Option<Result<Box<dyn CameraStream>, CameraError>>);

impl Resolved {
    /// Wrap an already known result.
    pub fn new(result: Result<Box<dyn CameraStream>, CameraError>) -> Self {
        Self(Some(result))
    }
}

impl PendingCamera for Resolved {
    fn poll(&mut self) -> Poll<Result<Box<dyn CameraStream>, CameraError>> {
        match self.0.take() {
            Some(result) => Poll::Ready(result),
            None => Poll::Ready(Err(CameraError::new(
                CameraErrorKind::Generic,
                "camera request polled after completion",
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/camera.rs"]
mod tests;
