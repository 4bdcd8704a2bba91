use super::*;
use crate::fixtures::face_landmarks;

#[test]
fn head_ellipse_follows_face_proportions() {
    let e = head_ellipse(&face_landmarks(100.0), &HeadProportions::default()).unwrap();
    // width 100, brows at 138 => top 48, height (250 - 48) * 1.1
    let radii = e.radii();
    assert!((radii.x - 60.0).abs() < 1e-9);
    assert!((radii.y - 111.1).abs() < 1e-9);
    assert!((e.center().x - 150.0).abs() < 1e-9);
    assert!((e.center().y - 159.1).abs() < 1e-9);
}

#[test]
fn mirrored_landmarks_keep_their_size() {
    let lm = face_landmarks(100.0);
    let a = head_ellipse(&lm, &HeadProportions::default()).unwrap();
    let b = head_ellipse(&lm.mirrored(400.0), &HeadProportions::default()).unwrap();
    assert!((a.radii().x - b.radii().x).abs() < 1e-9);
    assert!((b.center().x - 250.0).abs() < 1e-9);
}

#[test]
fn face_path_walks_jaw_then_brows() {
    let lm = face_landmarks(100.0);
    let path = face_path(&lm).unwrap();
    let els = path.elements();
    // move + 16 jaw lines + 5 + 5 brow lines + close
    assert_eq!(els.len(), 1 + 16 + 10 + 1);
    assert_eq!(els[17], kurbo::PathEl::LineTo(lm.right_eyebrow[4]));
    assert_eq!(els[26], kurbo::PathEl::LineTo(lm.left_eyebrow[0]));
    assert_eq!(els[27], kurbo::PathEl::ClosePath);
}

#[test]
fn degenerate_landmarks_yield_nothing() {
    let p = HeadProportions::default();

    let mut empty_jaw = face_landmarks(100.0);
    empty_jaw.jaw.clear();
    assert!(OverlayGeometry::from_landmarks(&empty_jaw, &p).is_none());

    let mut short_jaw = face_landmarks(100.0);
    short_jaw.jaw.truncate(9);
    assert!(OverlayGeometry::from_landmarks(&short_jaw, &p).is_none());

    let mut no_nose = face_landmarks(100.0);
    no_nose.nose.truncate(3);
    assert!(OverlayGeometry::from_landmarks(&no_nose, &p).is_none());

    let mut no_brows = face_landmarks(100.0);
    no_brows.left_eyebrow.clear();
    assert!(OverlayGeometry::from_landmarks(&no_brows, &p).is_none());

    let mut nan = face_landmarks(100.0);
    nan.jaw[3].x = f64::NAN;
    assert!(OverlayGeometry::from_landmarks(&nan, &p).is_none());

    let mut collapsed = face_landmarks(100.0);
    collapsed.jaw[16].x = collapsed.jaw[0].x + 0.5;
    assert!(OverlayGeometry::from_landmarks(&collapsed, &p).is_none());
}

#[test]
fn proportions_validate() {
    assert!(HeadProportions::default().validate().is_ok());
    let bad = HeadProportions {
        width_scale: 0.0,
        ..HeadProportions::default()
    };
    assert!(bad.validate().is_err());
    let bad = HeadProportions {
        lift: f64::NAN,
        ..HeadProportions::default()
    };
    assert!(bad.validate().is_err());
}
