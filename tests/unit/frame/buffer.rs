use super::*;

fn strip(px: &[[u8; 4]]) -> FrameRGBA {
    let data: Vec<u8> = px.iter().flatten().copied().collect();
    FrameRGBA::from_premul_bytes(FrameSize::new(px.len() as u32, 1), data).unwrap()
}

#[test]
fn from_premul_bytes_rejects_length_mismatch() {
    assert!(FrameRGBA::from_premul_bytes(FrameSize::new(2, 2), vec![0; 15]).is_err());
}

#[test]
fn filled_premultiplies_color() {
    let f = FrameRGBA::filled(FrameSize::new(1, 1), [200, 100, 0, 128]);
    assert_eq!(
        f.pixel(0, 0).unwrap(),
        [
            ((200u16 * 128 + 127) / 255) as u8,
            ((100u16 * 128 + 127) / 255) as u8,
            0,
            128
        ]
    );
}

#[test]
fn draw_mirrored_flips_rows() {
    let src = strip(&[
        [255, 0, 0, 255],
        [0, 255, 0, 255],
        [0, 0, 255, 255],
    ]);
    let mut dst = FrameRGBA::new(src.size());
    dst.draw_mirrored(&src).unwrap();
    assert_eq!(dst.pixel(0, 0), Some([0, 0, 255, 255]));
    assert_eq!(dst.pixel(1, 0), Some([0, 255, 0, 255]));
    assert_eq!(dst.pixel(2, 0), Some([255, 0, 0, 255]));
}

#[test]
fn draw_mirrored_resamples_to_destination_size() {
    let src = strip(&[[255, 0, 0, 255], [0, 0, 255, 255]]);
    let mut dst = FrameRGBA::new(FrameSize::new(4, 2));
    dst.draw_mirrored(&src).unwrap();
    assert_eq!(dst.pixel(0, 0), Some([0, 0, 255, 255]));
    assert_eq!(dst.pixel(1, 1), Some([0, 0, 255, 255]));
    assert_eq!(dst.pixel(2, 0), Some([255, 0, 0, 255]));
    assert_eq!(dst.pixel(3, 1), Some([255, 0, 0, 255]));
}

#[test]
fn resize_to_reports_changes_once() {
    let mut f = FrameRGBA::new(FrameSize::new(2, 2));
    assert!(f.resize_to(FrameSize::new(3, 2)));
    assert!(!f.resize_to(FrameSize::new(3, 2)));
    assert_eq!(f.data.len(), 3 * 2 * 4);
}

#[test]
fn pixel_out_of_bounds_is_none() {
    let f = FrameRGBA::new(FrameSize::new(2, 2));
    assert!(f.pixel(2, 0).is_none());
    assert!(f.pixel(0, 2).is_none());
}
