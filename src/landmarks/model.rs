//! Facial landmarks as produced by a 68-point detector.
//!
//! Points are grouped by region. Only the regions the overlay needs are kept:
//! the jaw outline, both eyebrows and the nose.

use std::ops::Range;

use crate::foundation::{
    core::{Point, Rect, Vec2},
    error::{TintError, TintResult},
};

/// Number of points in the standard iBUG 68-point layout.
pub const LANDMARK_COUNT: usize = 68;
/// Jaw outline indices, left ear to right ear.
pub const JAW_OUTLINE: Range<usize> = 0..17;
/// Left eyebrow indices.
pub const LEFT_EYEBROW: Range<usize> = 17..22;
/// Right eyebrow indices.
pub const RIGHT_EYEBROW: Range<usize> = 22..27;
/// Nose bridge and base indices.
pub const NOSE: Range<usize> = 27..36;

/// Landmark points of one face, grouped by region, in frame pixel coordinates.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "LandmarkRepr")]
pub struct LandmarkSet {
    /// Jaw outline.
    pub jaw: Vec<Point>,
    /// Left eyebrow.
    pub left_eyebrow: Vec<Point>,
    /// Right eyebrow.
    pub right_eyebrow: Vec<Point>,
    /// Nose.
    pub nose: Vec<Point>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum LandmarkRepr {
    Positions {
        positions: Vec<Point>,
    },
    Groups {
        #[serde(default)]
        jaw: Vec<Point>,
        #[serde(default)]
        left_eyebrow: Vec<Point>,
        #[serde(default)]
        right_eyebrow: Vec<Point>,
        #[serde(default)]
        nose: Vec<Point>,
    },
}

impl TryFrom<LandmarkRepr> for LandmarkSet {
    type Error = TintError;

    fn try_from(repr: LandmarkRepr) -> TintResult<Self> {
        match repr {
            LandmarkRepr::Positions { positions } => Self::from_positions(&positions),
            LandmarkRepr::Groups {
                jaw,
                left_eyebrow,
                right_eyebrow,
                nose,
            } => Ok(Self {
                jaw,
                left_eyebrow,
                right_eyebrow,
                nose,
            }),
        }
    }
}

impl LandmarkSet {
    /// Split a flat 68-point array into regions.
    pub fn from_positions(points: &[Point]) -> TintResult<Self> {
        if points.len() != LANDMARK_COUNT {
            return Err(TintError::validation(format!(
                "expected {LANDMARK_COUNT} landmark positions, got {}",
                points.len()
            )));
        }
        Ok(Self {
            jaw: points[JAW_OUTLINE].to_vec(),
            left_eyebrow: points[LEFT_EYEBROW].to_vec(),
            right_eyebrow: points[RIGHT_EYEBROW].to_vec(),
            nose: points[NOSE].to_vec(),
        })
    }

    /// Jaw outline points.
    pub fn jaw_outline(&self) -> &[Point] {
        &self.jaw
    }

    /// Left eyebrow points.
    pub fn left_eyebrow(&self) -> &[Point] {
        &self.left_eyebrow
    }

    /// Right eyebrow points.
    pub fn right_eyebrow(&self) -> &[Point] {
        &self.right_eyebrow
    }

    /// Nose points.
    pub fn nose(&self) -> &[Point] {
        &self.nose
    }

    /// Every point, region by region.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.jaw
            .iter()
            .chain(&self.left_eyebrow)
            .chain(&self.right_eyebrow)
            .chain(&self.nose)
    }

    /// Whether every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.points().all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Apply `f` to every point, keeping the grouping.
    pub fn map_points(&self, f: impl Fn(Point) -> Point) -> Self {
        let map = |v: &[Point]| v.iter().map(|&p| f(p)).collect::<Vec<_>>();
        Self {
            jaw: map(&self.jaw),
            left_eyebrow: map(&self.left_eyebrow),
            right_eyebrow: map(&self.right_eyebrow),
            nose: map(&self.nose),
        }
    }

    /// Flip horizontally inside a frame of `width` pixels.
    pub fn mirrored(&self, width: f64) -> Self {
        self.map_points(|p| Point::new(width - p.x, p.y))
    }

    /// Scale per axis.
    pub fn scaled(&self, scale: Vec2) -> Self {
        self.map_points(|p| Point::new(p.x * scale.x, p.y * scale.y))
    }
}

/// One detected face.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Detection {
    /// Detector confidence in `[0, 1]`.
    pub score: f32,
    /// Face bounding box.
    #[serde(rename = "box")]
    pub bbox: Rect,
    /// Landmarks of the face.
    pub landmarks: LandmarkSet,
}

impl Detection {
    /// Scale box and landmarks per axis.
    pub fn scaled(&self, scale: Vec2) -> Self {
        Self {
            score: self.score,
            bbox: Rect::new(
                self.bbox.x0 * scale.x,
                self.bbox.y0 * scale.y,
                self.bbox.x1 * scale.x,
                self.bbox.y1 * scale.y,
            ),
            landmarks: self.landmarks.scaled(scale),
        }
    }

    /// Flip box and landmarks horizontally inside a frame of `width` pixels.
    pub fn mirrored(&self, width: f64) -> Self {
        Self {
            score: self.score,
            bbox: Rect::new(
                width - self.bbox.x1,
                self.bbox.y0,
                width - self.bbox.x0,
                self.bbox.y1,
            ),
            landmarks: self.landmarks.mirrored(width),
        }
    }
}

/// Pick the face to recolor: the first detection at or above `min_confidence`.
///
/// Detector output order decides ties; later faces are ignored.
pub fn primary_face(detections: &[Detection], min_confidence: f32) -> Option<&Detection> {
    detections.iter().find(|d| d.score >= min_confidence)
}

#[cfg(test)]
#[path = "../../tests/unit/landmarks/model.rs"]
mod tests;
