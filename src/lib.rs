//! hairtint is a face-tracked hair color try-on engine.
//!
//! Each frame runs through the same pipeline:
//!
//! - a camera ([`CameraBackend`]) supplies video frames
//! - a [`LandmarkDetector`] finds 68-point facial landmarks
//! - the [`OverlayCompositor`] recolors the head region and leaves the face alone
//! - a [`RenderLoop`] mirrors the video onto a canvas, tick by tick
//!
//! [`TryOnSession`] owns all of it together with the camera permission
//! lifecycle, the color selection and snapshots. [`SavedLooks`] keeps
//! snapshots per signed-in user.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod capture;
pub(crate) mod config;
pub(crate) mod detect;
pub(crate) mod frame;
pub(crate) mod landmarks;
pub(crate) mod looks;
pub(crate) mod overlay;
pub(crate) mod palette;
pub(crate) mod pipeline;
pub(crate) mod render;
pub(crate) mod session;

#[cfg(test)]
#[path = "../tests/unit/fixtures.rs"]
pub(crate) mod fixtures;

pub use crate::foundation::core::{
    Affine, BezPath, ColorSelection, FrameSize, Intensity, Point, Rect, Rgb, Vec2,
};
pub use crate::foundation::error::{TintError, TintResult};

pub use crate::capture::camera::{
    CameraBackend, CameraConstraints, CameraError, CameraErrorKind, CameraStream, FacingMode,
    PendingCamera, Resolved,
};
pub use crate::capture::still::StillCamera;
pub use crate::config::{
    DetectionConfig, ENV_JPEG_QUALITY, ENV_MIN_CONFIDENCE, ENV_MODEL_TIMEOUT_MS, OverlayConfig,
    SnapshotConfig, TryOnConfig,
};
pub use crate::detect::detector::{
    BoxedDetector, DetectionFixture, FixedDetector, LandmarkDetector,
};
pub use crate::detect::readiness::{DEFAULT_MODEL_TIMEOUT, DetectorLoader};
pub use crate::detect::worker::DetectionWorker;
pub use crate::frame::buffer::FrameRGBA;
pub use crate::frame::decode::{decode_image, load_image};
pub use crate::frame::snapshot::{
    CapturedLook, DEFAULT_JPEG_QUALITY, decode_data_url, encode_jpeg_data_url,
};
pub use crate::landmarks::model::{
    Detection, JAW_OUTLINE, LANDMARK_COUNT, LEFT_EYEBROW, LandmarkSet, NOSE, RIGHT_EYEBROW,
    primary_face,
};
pub use crate::looks::saved::{AuthState, SavedLooks};
pub use crate::looks::store::{FileStore, KeyValueStore, MemoryStore};
pub use crate::overlay::blend::BlendMode;
pub use crate::overlay::compositor::OverlayCompositor;
pub use crate::overlay::geometry::{HeadProportions, OverlayGeometry, face_path, head_ellipse};
pub use crate::palette::{
    DEFAULT_HAIR_COLOR, HAIR_COLORS, HairColor, default_hair_color, find_hair_color,
};
pub use crate::pipeline::{SequenceStats, render_still, run_sequence};
pub use crate::render::runloop::{DEFAULT_MIN_CONFIDENCE, LoopStats, RenderLoop, TickOutcome};
pub use crate::render::scheduler::{FrameRequest, FrameScheduler, QueueScheduler};
pub use crate::render::video::VideoSource;
pub use crate::session::{
    CameraState, DetectorStatus, SessionFault, SessionTick, TryOnSession,
};
