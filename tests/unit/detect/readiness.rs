use super::*;

#[test]
fn ready_loader_yields_once() {
    let mut loader = DetectorLoader::ready(7_u32);
    assert!(matches!(loader.poll(), Poll::Ready(Ok(7))));
    assert!(loader.is_taken());
    assert!(matches!(loader.poll(), Poll::Ready(Err(_))));
}

#[test]
fn spawned_loader_delivers_through_wait() {
    let mut loader = DetectorLoader::spawn(Duration::from_secs(5), || Ok("model")).unwrap();
    assert_eq!(loader.wait().unwrap(), "model");
    assert!(loader.wait().is_err());
}

#[test]
fn slow_loader_times_out_as_unavailable() {
    let mut loader = DetectorLoader::spawn(Duration::from_millis(100), || {
        thread::sleep(Duration::from_millis(1000));
        Ok(1_u8)
    })
    .unwrap();
    assert!(matches!(loader.poll(), Poll::Pending));
    let err = loader.wait().unwrap_err();
    assert!(err.is_terminal());
    assert!(err.to_string().contains("not ready after 100 ms"));
}

#[test]
fn load_errors_become_terminal() {
    let mut loader =
        DetectorLoader::<u8>::spawn(Duration::from_secs(5), || Err(TintError::validation("bad weights")))
            .unwrap();
    let err = loader.wait().unwrap_err();
    assert!(matches!(err, TintError::DetectorUnavailable(_)));
    assert!(err.to_string().contains("bad weights"));
}

#[test]
fn panicking_loader_is_reported() {
    let mut loader =
        DetectorLoader::<u8>::spawn(Duration::from_secs(5), || panic!("loader blew up")).unwrap();
    let err = loader.wait().unwrap_err();
    assert!(err.is_terminal());
}

#[test]
fn failed_loader_is_terminal_on_poll() {
    let mut loader = DetectorLoader::<u8>::failed(TintError::detection("no backend"));
    match loader.poll() {
        Poll::Ready(Err(e)) => assert!(e.is_terminal()),
        other => panic!("unexpected {other:?}"),
    }
}
