//! Head and face shapes derived from a landmark set.

use kurbo::{BezPath, Ellipse, Point};

use crate::{
    foundation::error::{TintError, TintResult},
    landmarks::model::LandmarkSet,
};

const MIN_JAW_POINTS: usize = 17;
const MIN_NOSE_POINTS: usize = 4;
const EYEBROW_EDGE_POINTS: usize = 5;
const CHIN: usize = 8;
const NOSE_BRIDGE_TIP: usize = 3;
const MIN_FACE_WIDTH_PX: f64 = 1.0;

/// Proportions of the head ellipse, relative to the face width and the
/// brow-to-chin distance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HeadProportions {
    /// How far above the eyebrows the head top sits, in face widths.
    pub lift: f64,
    /// Head width, in face widths.
    pub width_scale: f64,
    /// Head height, relative to head top to chin.
    pub height_scale: f64,
}

impl Default for HeadProportions {
    fn default() -> Self {
        Self {
            lift: 0.9,
            width_scale: 1.2,
            height_scale: 1.1,
        }
    }
}

impl HeadProportions {
    /// Reject negative, zero or non-finite proportions.
    pub fn validate(&self) -> TintResult<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !(self.lift.is_finite() && self.lift >= 0.0) {
            return Err(TintError::validation("head lift must be finite and >= 0"));
        }
        if !ok(self.width_scale) || !ok(self.height_scale) {
            return Err(TintError::validation(
                "head width/height scales must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Shapes used by one compositing pass.
#[derive(Clone, Debug)]
pub struct OverlayGeometry {
    /// Region that is recolored.
    pub head: Ellipse,
    /// Region that is never recolored.
    pub face: BezPath,
}

impl OverlayGeometry {
    /// `None` when the landmarks are too sparse or malformed to place a head.
    pub fn from_landmarks(landmarks: &LandmarkSet, proportions: &HeadProportions) -> Option<Self> {
        if !landmarks.is_finite() {
            return None;
        }
        Some(Self {
            head: head_ellipse(landmarks, proportions)?,
            face: face_path(landmarks)?,
        })
    }
}

/// Jaw outline, then the outer five points of each eyebrow walked back
/// across the forehead, closed.
pub fn face_path(landmarks: &LandmarkSet) -> Option<BezPath> {
    let jaw = landmarks.jaw_outline();
    let (first, rest) = jaw.split_first()?;
    let right = brow_edge(landmarks.right_eyebrow())?;
    let left = brow_edge(landmarks.left_eyebrow())?;

    let mut path = BezPath::new();
    path.move_to(*first);
    for &p in rest
        .iter()
        .chain(right.iter().rev())
        .chain(left.iter().rev())
    {
        path.line_to(p);
    }
    path.close_path();
    Some(path)
}

fn brow_edge(brow: &[Point]) -> Option<&[Point]> {
    if brow.is_empty() {
        return None;
    }
    Some(&brow[..brow.len().min(EYEBROW_EDGE_POINTS)])
}

/// Ellipse covering the head, or `None` for unusable landmarks.
pub fn head_ellipse(landmarks: &LandmarkSet, proportions: &HeadProportions) -> Option<Ellipse> {
    let jaw = landmarks.jaw_outline();
    let nose = landmarks.nose();
    if jaw.len() < MIN_JAW_POINTS || nose.len() < MIN_NOSE_POINTS {
        return None;
    }

    // Absolute so mirrored landmarks give the same width.
    let face_width = (jaw[MIN_JAW_POINTS - 1].x - jaw[0].x).abs();
    if face_width < MIN_FACE_WIDTH_PX {
        return None;
    }

    let brow_top = landmarks
        .left_eyebrow()
        .iter()
        .chain(landmarks.right_eyebrow())
        .map(|p| p.y)
        .reduce(f64::min)?;

    let top = brow_top - face_width * proportions.lift;
    let width = face_width * proportions.width_scale;
    let height = (jaw[CHIN].y - top) * proportions.height_scale;
    if !(width.is_finite() && height.is_finite() && height > 0.0) {
        return None;
    }

    let center = Point::new(nose[NOSE_BRIDGE_TIP].x, top + height / 2.0);
    Some(Ellipse::new(center, (width / 2.0, height / 2.0), 0.0))
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/geometry.rs"]
mod tests;
