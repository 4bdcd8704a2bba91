use super::*;

fn positions() -> Vec<Point> {
    (0..LANDMARK_COUNT)
        .map(|i| Point::new(i as f64, 100.0 + i as f64))
        .collect()
}

fn detection(score: f32, x: f64) -> Detection {
    let mut lm = LandmarkSet::from_positions(&positions()).unwrap();
    lm.jaw[0].x = x;
    Detection {
        score,
        bbox: Rect::new(0.0, 0.0, 10.0, 10.0),
        landmarks: lm,
    }
}

#[test]
fn from_positions_splits_regions() {
    let lm = LandmarkSet::from_positions(&positions()).unwrap();
    assert_eq!(lm.jaw_outline().len(), 17);
    assert_eq!(lm.left_eyebrow().len(), 5);
    assert_eq!(lm.right_eyebrow().len(), 5);
    assert_eq!(lm.nose().len(), 9);
    assert_eq!(lm.left_eyebrow()[0], Point::new(17.0, 117.0));
    assert_eq!(lm.nose()[3], Point::new(30.0, 130.0));
}

#[test]
fn from_positions_rejects_wrong_count() {
    assert!(LandmarkSet::from_positions(&positions()[..60]).is_err());
}

#[test]
fn mirrored_and_scaled_map_every_point() {
    let lm = LandmarkSet::from_positions(&positions()).unwrap();
    let m = lm.mirrored(100.0);
    assert_eq!(m.jaw[0], Point::new(100.0, 100.0));
    assert_eq!(m.nose[8], Point::new(65.0, 135.0));

    let s = lm.scaled(Vec2::new(2.0, 0.5));
    assert_eq!(s.jaw[4], Point::new(8.0, 52.0));
}

#[test]
fn deserializes_positions_or_groups() {
    let pts: Vec<_> = positions()
        .iter()
        .map(|p| serde_json::json!({"x": p.x, "y": p.y}))
        .collect();
    let from_positions: LandmarkSet =
        serde_json::from_value(serde_json::json!({ "positions": pts })).unwrap();
    assert_eq!(from_positions.jaw.len(), 17);

    let groups: LandmarkSet = serde_json::from_value(serde_json::json!({
        "jaw": [],
        "nose": [{"x": 1.0, "y": 2.0}]
    }))
    .unwrap();
    assert!(groups.jaw.is_empty());
    assert_eq!(groups.nose.len(), 1);
}

#[test]
fn deserializing_short_positions_fails() {
    let r: Result<LandmarkSet, _> =
        serde_json::from_value(serde_json::json!({ "positions": [{"x": 1.0, "y": 1.0}] }));
    assert!(r.is_err());
}

#[test]
fn non_finite_points_are_detected() {
    let mut lm = LandmarkSet::from_positions(&positions()).unwrap();
    assert!(lm.is_finite());
    lm.nose[2].y = f64::NAN;
    assert!(!lm.is_finite());
}

#[test]
fn first_match_wins_among_multiple_faces() {
    let faces = vec![detection(0.9, 1.0), detection(0.95, 2.0)];
    let picked = primary_face(&faces, 0.4).unwrap();
    assert_eq!(picked.landmarks.jaw[0].x, 1.0);
}

#[test]
fn low_confidence_faces_are_skipped() {
    let faces = vec![detection(0.2, 1.0), detection(0.8, 2.0)];
    assert_eq!(primary_face(&faces, 0.4).unwrap().landmarks.jaw[0].x, 2.0);
    assert!(primary_face(&faces[..1], 0.4).is_none());
    assert!(primary_face(&[], 0.4).is_none());
}

#[test]
fn mirrored_detection_keeps_box_ordered() {
    let d = detection(0.9, 1.0).mirrored(100.0);
    assert_eq!(d.bbox, Rect::new(90.0, 0.0, 100.0, 10.0));
}
