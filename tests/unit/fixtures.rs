//! Synthetic faces shared by unit tests.

use std::f64::consts::PI;

use crate::{
    foundation::core::{Point, Rect},
    landmarks::model::{Detection, LANDMARK_COUNT, LandmarkSet},
};

/// 68 points of an upright face whose jaw spans `x0..x0+100`, chin at y=250,
/// brows at y=138 and the nose on the centre line.
pub(crate) fn face_positions(x0: f64) -> Vec<Point> {
    let cx = x0 + 50.0;
    let mut pts = Vec::with_capacity(LANDMARK_COUNT);
    for i in 0..17 {
        let t = f64::from(i) / 16.0;
        pts.push(Point::new(cx - 50.0 * (PI * t).cos(), 150.0 + 100.0 * (PI * t).sin()));
    }
    for i in 0..5 {
        pts.push(Point::new(x0 + 5.0 + 8.75 * f64::from(i), 138.0));
    }
    for i in 0..5 {
        pts.push(Point::new(cx + 10.0 + 8.75 * f64::from(i), 138.0));
    }
    for i in 0..9 {
        pts.push(Point::new(cx, 145.0 + 6.0 * f64::from(i)));
    }
    while pts.len() < LANDMARK_COUNT {
        pts.push(Point::new(cx, 200.0));
    }
    pts
}

pub(crate) fn face_landmarks(x0: f64) -> LandmarkSet {
    LandmarkSet::from_positions(&face_positions(x0)).unwrap()
}

pub(crate) fn face_detection(score: f32, x0: f64) -> Detection {
    Detection {
        score,
        bbox: Rect::new(x0, 100.0, x0 + 100.0, 250.0),
        landmarks: face_landmarks(x0),
    }
}
