use super::*;
use crate::{
    foundation::core::{Point, Rect},
    landmarks::model::LandmarkSet,
};

fn face(score: f32, x: f64) -> Detection {
    Detection {
        score,
        bbox: Rect::new(x, 10.0, x + 20.0, 30.0),
        landmarks: LandmarkSet {
            jaw: vec![Point::new(x, 20.0), Point::new(x + 20.0, 20.0)],
            ..LandmarkSet::default()
        },
    }
}

fn frame(w: u32, h: u32) -> FrameRGBA {
    FrameRGBA::new(FrameSize::new(w, h))
}

#[test]
fn replays_fixtures_in_order_and_wraps() {
    let mut det = FixedDetector::new(vec![
        DetectionFixture {
            frame: FrameSize::new(100, 100),
            faces: vec![face(0.9, 1.0)],
        },
        DetectionFixture {
            frame: FrameSize::new(100, 100),
            faces: vec![],
        },
    ])
    .unwrap();

    let f = frame(100, 100);
    assert_eq!(det.detect(&f).unwrap(), vec![face(0.9, 1.0)]);
    assert!(det.detect(&f).unwrap().is_empty());
    assert_eq!(det.detect(&f).unwrap().len(), 1);
}

#[test]
fn rescales_to_the_frame_it_is_given() {
    let mut det = FixedDetector::single(DetectionFixture {
        frame: FrameSize::new(100, 100),
        faces: vec![face(0.9, 10.0)],
    });
    let out = det.detect(&frame(200, 50)).unwrap();
    assert_eq!(out[0].landmarks.jaw[0], Point::new(20.0, 10.0));
    assert_eq!(out[0].bbox, Rect::new(20.0, 5.0, 60.0, 15.0));
}

#[test]
fn empty_script_is_rejected() {
    assert!(FixedDetector::new(Vec::new()).is_err());
}

#[test]
fn parses_single_object_or_array() {
    let one = r#"{
        "frame": {"width": 10, "height": 10},
        "faces": [{
            "score": 0.8,
            "box": {"x0": 0.0, "y0": 0.0, "x1": 5.0, "y1": 5.0},
            "landmarks": {"jaw": [{"x": 1.0, "y": 2.0}]}
        }]
    }"#;
    let det = FixedDetector::from_json_str(one).unwrap();
    assert_eq!(det.len(), 1);

    let many = format!("[{one}, {{\"frame\": {{\"width\": 10, \"height\": 10}}}}]");
    let det = FixedDetector::from_json_str(&many).unwrap();
    assert_eq!(det.len(), 2);

    assert!(FixedDetector::from_json_str("[]").is_err());
    assert!(FixedDetector::from_json_str("{").is_err());
}

#[test]
fn boxed_detectors_delegate() {
    let mut boxed: BoxedDetector = Box::new(FixedDetector::single(DetectionFixture {
        frame: FrameSize::new(10, 10),
        faces: vec![face(0.5, 0.0)],
    }));
    assert_eq!(boxed.detect(&frame(10, 10)).unwrap().len(), 1);
}
