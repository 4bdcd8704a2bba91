//! Try-on configuration: JSON on disk, with a few environment overrides.

use std::{path::Path, time::Duration};

use anyhow::Context;

use crate::{
    capture::camera::CameraConstraints,
    foundation::{
        core::{ColorSelection, Intensity},
        error::{TintError, TintResult},
    },
    frame::snapshot::DEFAULT_JPEG_QUALITY,
    overlay::{blend::BlendMode, geometry::HeadProportions},
    palette::{DEFAULT_HAIR_COLOR, find_hair_color},
    render::runloop::DEFAULT_MIN_CONFIDENCE,
};

/// Overrides `detection.min_confidence`.
pub const ENV_MIN_CONFIDENCE: &str = "HAIRTINT_MIN_CONFIDENCE";
/// Overrides `detection.model_timeout_ms`.
pub const ENV_MODEL_TIMEOUT_MS: &str = "HAIRTINT_MODEL_TIMEOUT_MS";
/// Overrides `snapshot.jpeg_quality`.
pub const ENV_JPEG_QUALITY: &str = "HAIRTINT_JPEG_QUALITY";

/// Everything a [`TryOnSession`](crate::TryOnSession) is configured with.
/// Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TryOnConfig {
    /// Face detection.
    pub detection: DetectionConfig,
    /// Overlay shape, blend and starting color.
    pub overlay: OverlayConfig,
    /// Camera request constraints.
    pub camera: CameraConstraints,
    /// Snapshot encoding.
    pub snapshot: SnapshotConfig,
}

/// Detection settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Faces scoring below this are ignored.
    pub min_confidence: f32,
    /// How long to wait for the detector to load.
    pub model_timeout_ms: u64,
    /// Run detection on a worker thread instead of inline.
    pub worker_thread: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            model_timeout_ms: 10_000,
            worker_thread: true,
        }
    }
}

/// Overlay settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Head region proportions.
    pub head: HeadProportions,
    /// How the tint mixes with the video.
    pub blend: BlendMode,
    /// Palette id selected when a session starts.
    pub default_color: String,
    /// Starting intensity, clamped on use.
    pub default_intensity: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            head: HeadProportions::default(),
            blend: BlendMode::Overlay,
            default_color: DEFAULT_HAIR_COLOR.to_string(),
            default_intensity: Intensity::default().get(),
        }
    }
}

/// Snapshot settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// JPEG quality in `[1, 100]`.
    pub jpeg_quality: u8,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl TryOnConfig {
    /// Parse and validate.
    pub fn from_json_str(json: &str) -> TintResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_json_file(path: &Path) -> TintResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Apply `HAIRTINT_*` overrides from the process environment.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok());
        self
    }

    /// Apply overrides from `lookup`. Unparseable or out-of-range values are
    /// ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup(ENV_MIN_CONFIDENCE)
            .and_then(|v| v.trim().parse::<f32>().ok())
            .filter(|v| (0.0..=1.0).contains(v))
        {
            self.detection.min_confidence = v;
        }
        if let Some(v) = lookup(ENV_MODEL_TIMEOUT_MS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&v| v > 0)
        {
            self.detection.model_timeout_ms = v;
        }
        if let Some(v) = lookup(ENV_JPEG_QUALITY)
            .and_then(|v| v.trim().parse::<u8>().ok())
            .filter(|v| (1..=100).contains(v))
        {
            self.snapshot.jpeg_quality = v;
        }
    }

    /// Reject out-of-range values and unknown colors.
    pub fn validate(&self) -> TintResult<()> {
        let d = &self.detection;
        if !(0.0..=1.0).contains(&d.min_confidence) {
            return Err(TintError::validation(
                "detection.min_confidence must be within [0, 1]",
            ));
        }
        if d.model_timeout_ms == 0 {
            return Err(TintError::validation(
                "detection.model_timeout_ms must be > 0",
            ));
        }
        self.overlay.head.validate()?;
        if find_hair_color(&self.overlay.default_color).is_none() {
            return Err(TintError::validation(format!(
                "overlay.default_color '{}' is not a known hair color",
                self.overlay.default_color
            )));
        }
        if !self.overlay.default_intensity.is_finite() {
            return Err(TintError::validation(
                "overlay.default_intensity must be finite",
            ));
        }
        if !(1..=100).contains(&self.snapshot.jpeg_quality) {
            return Err(TintError::validation(
                "snapshot.jpeg_quality must be within [1, 100]",
            ));
        }
        Ok(())
    }

    /// Detector load timeout.
    pub fn model_timeout(&self) -> Duration {
        Duration::from_millis(self.detection.model_timeout_ms)
    }

    /// The selection a new session starts with.
    pub fn initial_selection(&self) -> TintResult<ColorSelection> {
        let color = find_hair_color(&self.overlay.default_color).ok_or_else(|| {
            TintError::validation(format!(
                "unknown hair color '{}'",
                self.overlay.default_color
            ))
        })?;
        Ok(color.selection(self.overlay.default_intensity))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
