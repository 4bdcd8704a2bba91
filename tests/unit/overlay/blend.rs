use super::*;

#[test]
fn overlay_darkens_shadows_and_lightens_highlights() {
    assert_eq!(BlendMode::Overlay.apply(1.0, 0.25), 0.5);
    assert!((BlendMode::Overlay.apply(0.0, 0.75) - 0.5).abs() < 1e-6);
    assert_eq!(BlendMode::Overlay.apply(0.5, 0.3), 0.3);
}

#[test]
fn tint_layer_excludes_face_and_scales_by_intensity() {
    let head = [255, 255, 0];
    let face = [0, 255, 0];
    let layer = tint_layer(&head, &face, [255, 0, 0], 1.0);
    assert_eq!(&layer[0..4], &[255, 0, 0, 255]);
    assert_eq!(&layer[4..8], &[0, 0, 0, 0]);
    assert_eq!(&layer[8..12], &[0, 0, 0, 0]);

    let half = tint_layer(&[255], &[0], [255, 255, 255], 0.5);
    assert_eq!(half, vec![128, 128, 128, 128]);
}

#[test]
fn opaque_overlay_over_gray() {
    // d = 128/255 > 0.5, s = (1, 0, 0)
    let mut dst = [128, 128, 128, 255];
    composite_in_place(&mut dst, &[255, 0, 0, 255], BlendMode::Overlay).unwrap();
    assert_eq!(dst, [255, 1, 1, 255]);
}

#[test]
fn transparent_source_leaves_destination() {
    let mut dst = [10, 20, 30, 255, 40, 50, 60, 255];
    let before = dst;
    composite_in_place(&mut dst, &[0; 8], BlendMode::Overlay).unwrap();
    assert_eq!(dst, before);
}

#[test]
fn normal_mode_is_source_over() {
    let mut dst = [0, 0, 255, 255];
    composite_in_place(&mut dst, &[128, 0, 0, 128], BlendMode::Normal).unwrap();
    assert_eq!(dst, [128, 0, 127, 255]);
}

#[test]
fn mismatched_buffers_are_rejected() {
    let mut dst = [0u8; 8];
    assert!(composite_in_place(&mut dst, &[0u8; 4], BlendMode::Overlay).is_err());
}
