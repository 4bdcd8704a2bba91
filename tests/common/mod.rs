#![allow(dead_code)]

use std::f64::consts::PI;

use hairtint::{Detection, DetectionFixture, FrameRGBA, FrameSize, LandmarkSet, Point, Rect};

pub const GRAY: [u8; 4] = [128, 128, 128, 255];

/// 68 points of an upright face whose jaw spans `x0..x0+100`.
pub fn face_positions(x0: f64) -> Vec<Point> {
    let cx = x0 + 50.0;
    let mut pts = Vec::with_capacity(68);
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
    while pts.len() < 68 {
        pts.push(Point::new(cx, 200.0));
    }
    pts
}

pub fn face(score: f32, x0: f64) -> Detection {
    Detection {
        score,
        bbox: Rect::new(x0, 100.0, x0 + 100.0, 250.0),
        landmarks: LandmarkSet::from_positions(&face_positions(x0)).unwrap(),
    }
}

pub fn fixture(faces: Vec<Detection>) -> DetectionFixture {
    DetectionFixture {
        frame: FrameSize::new(300, 300),
        faces,
    }
}

pub fn gray_frame() -> FrameRGBA {
    FrameRGBA::filled(FrameSize::new(300, 300), GRAY)
}

/// A frame whose left half is dark and right half light, so mirroring shows.
pub fn split_frame() -> FrameRGBA {
    let size = FrameSize::new(300, 300);
    let mut data = Vec::with_capacity(size.byte_len());
    for _y in 0..300 {
        for x in 0..300 {
            let v = if x < 150 { 40 } else { 200 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    FrameRGBA::from_straight_bytes(size, data).unwrap()
}
