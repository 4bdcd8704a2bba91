use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::{
        core::FrameSize,
        error::{TintError, TintResult},
    },
    frame::buffer::FrameRGBA,
    landmarks::model::Detection,
};

/// A face landmark detector. Treated as a black box: one call per frame,
/// returning every face found (possibly none).
pub trait LandmarkDetector {
    /// Detect faces in `frame`, in the detector's own order.
    fn detect(&mut self, frame: &FrameRGBA) -> TintResult<Vec<Detection>>;
}

impl<D: LandmarkDetector + ?Sized> LandmarkDetector for Box<D> {
    fn detect(&mut self, frame: &FrameRGBA) -> TintResult<Vec<Detection>> {
        (**self).detect(frame)
    }
}

/// Detector handed across threads by the session.
pub type BoxedDetector = Box<dyn LandmarkDetector + Send>;

/// Detections recorded against a frame of a known size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DetectionFixture {
    /// Size of the frame the faces were found in.
    pub frame: FrameSize,
    /// Recorded detections.
    #[serde(default)]
    pub faces: Vec<Detection>,
}

impl DetectionFixture {
    /// Faces rescaled onto a frame of `size`.
    pub fn faces_for(&self, size: FrameSize) -> Vec<Detection> {
        if size == self.frame {
            return self.faces.clone();
        }
        let scale = self.frame.scale_to(size);
        self.faces.iter().map(|d| d.scaled(scale)).collect()
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    Many(Vec<DetectionFixture>),
    One(DetectionFixture),
}

/// Replays recorded detections, one fixture per call, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct FixedDetector {
    script: Vec<DetectionFixture>,
    cursor: usize,
}

impl FixedDetector {
    /// Fails on an empty script.
    pub fn new(script: Vec<DetectionFixture>) -> TintResult<Self> {
        if script.is_empty() {
            return Err(TintError::validation(
                "fixed detector needs at least one fixture",
            ));
        }
        Ok(Self { script, cursor: 0 })
    }

    /// Replay one fixture forever.
    pub fn single(fixture: DetectionFixture) -> Self {
        Self {
            script: vec![fixture],
            cursor: 0,
        }
    }

    /// Accepts a single fixture object or an array of them.
    pub fn from_json_str(json: &str) -> TintResult<Self> {
        match serde_json::from_str::<FixtureFile>(json)? {
            FixtureFile::Many(script) => Self::new(script),
            FixtureFile::One(fixture) => Ok(Self::single(fixture)),
        }
    }

    /// Read fixtures from a JSON file.
    pub fn from_json_file(path: &Path) -> TintResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read landmark fixtures '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Number of fixtures in the script.
    pub fn len(&self) -> usize {
        self.script.len()
    }

    /// Always false for a constructed detector.
    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

impl LandmarkDetector for FixedDetector {
    fn detect(&mut self, frame: &FrameRGBA) -> TintResult<Vec<Detection>> {
        let fixture = &self.script[self.cursor % self.script.len()];
        self.cursor = (self.cursor + 1) % self.script.len();
        Ok(fixture.faces_for(frame.size()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/detect/detector.rs"]
mod tests;
