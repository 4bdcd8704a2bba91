use std::task::Poll;

use super::*;

fn frames(n: u8) -> Vec<FrameRGBA> {
    (0..n)
        .map(|i| FrameRGBA::filled(FrameSize::new(2, 2), [i, i, i, 255]))
        .collect()
}

fn grant(cam: &mut StillCamera) -> Box<dyn CameraStream> {
    match cam.open(&CameraConstraints::default()).poll() {
        Poll::Ready(Ok(stream)) => stream,
        _ => panic!("still camera should grant immediately"),
    }
}

#[test]
fn plays_frames_once_then_ends() {
    let mut cam = StillCamera::new(frames(2));
    let mut s = grant(&mut cam);
    assert!(s.is_playing());
    assert_eq!(s.current_frame().unwrap().unwrap().pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(s.current_frame().unwrap().unwrap().pixel(0, 0), Some([1, 1, 1, 255]));
    // Still showing the last frame.
    assert!(s.is_playing());
    assert!(s.current_frame().unwrap().is_none());
    assert!(!s.is_playing());
    assert_eq!(s.native_size(), FrameSize::new(2, 2));
}

#[test]
fn looping_wraps_around() {
    let mut cam = StillCamera::new(frames(2)).looping(true);
    let mut s = grant(&mut cam);
    for _ in 0..5 {
        s.current_frame().unwrap();
    }
    assert!(s.is_playing());
    assert_eq!(s.current_frame().unwrap().unwrap().pixel(0, 0), Some([1, 1, 1, 255]));
}

#[test]
fn stop_and_drop_release_tracks() {
    let mut cam = StillCamera::new(frames(1));
    let mut a = grant(&mut cam);
    let b = grant(&mut cam);
    assert_eq!(cam.live_tracks(), 2);
    assert_eq!(cam.opens(), 2);

    a.stop();
    a.stop();
    assert_eq!(a.active_tracks(), 0);
    assert!(!a.is_playing());
    assert_eq!(cam.live_tracks(), 1);

    drop(b);
    assert_eq!(cam.live_tracks(), 0);
}

#[test]
fn abandoned_grant_releases_its_track() {
    let mut cam = StillCamera::new(frames(1));
    let pending = cam.open(&CameraConstraints::default());
    assert_eq!(cam.live_tracks(), 1);
    drop(pending);
    assert_eq!(cam.live_tracks(), 0);
}
