use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TintError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(TintError::camera("x").to_string().contains("camera error:"));
    assert!(
        TintError::detector_unavailable("x")
            .to_string()
            .contains("detector unavailable:")
    );
    assert!(
        TintError::detection("x")
            .to_string()
            .contains("detection error:")
    );
    assert!(TintError::render("x").to_string().contains("render error:"));
    assert!(
        TintError::storage("x")
            .to_string()
            .contains("storage error:")
    );
    assert!(
        TintError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TintError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_detector_unavailable_is_terminal() {
    assert!(TintError::detector_unavailable("model").is_terminal());
    assert!(!TintError::camera("denied").is_terminal());
    assert!(!TintError::detection("miss").is_terminal());
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: TintError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, TintError::Serde(_)));
}
