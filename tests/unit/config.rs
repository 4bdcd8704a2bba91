use std::collections::HashMap;

use super::*;
use crate::palette::default_hair_color;

#[test]
fn defaults_match_the_try_on() {
    let cfg = TryOnConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.detection.min_confidence, 0.4);
    assert_eq!(cfg.model_timeout(), Duration::from_secs(10));
    assert_eq!(cfg.snapshot.jpeg_quality, 92);
    assert_eq!(cfg.overlay.blend, BlendMode::Overlay);

    let sel = cfg.initial_selection().unwrap();
    assert_eq!(sel.color, default_hair_color().rgb);
    assert_eq!(sel.intensity.get(), 0.7);
}

#[test]
fn partial_json_fills_in_defaults() {
    let cfg = TryOnConfig::from_json_str(
        r#"{"detection": {"min_confidence": 0.6}, "overlay": {"default_color": "pink", "head": {"lift": 1.0}}}"#,
    )
    .unwrap();
    assert_eq!(cfg.detection.min_confidence, 0.6);
    assert_eq!(cfg.detection.model_timeout_ms, 10_000);
    assert_eq!(cfg.overlay.head.lift, 1.0);
    assert_eq!(cfg.overlay.head.width_scale, 1.2);
    assert_eq!(cfg.overlay.default_color, "pink");
}

#[test]
fn invalid_values_are_rejected() {
    assert!(TryOnConfig::from_json_str(r#"{"detection": {"min_confidence": 1.5}}"#).is_err());
    assert!(TryOnConfig::from_json_str(r#"{"overlay": {"default_color": "teal"}}"#).is_err());
    assert!(TryOnConfig::from_json_str(r#"{"snapshot": {"jpeg_quality": 0}}"#).is_err());
    assert!(TryOnConfig::from_json_str(r#"{"detection": {"model_timeout_ms": 0}}"#).is_err());
    assert!(TryOnConfig::from_json_str("not json").is_err());
}

#[test]
fn overrides_apply_only_valid_values() {
    let env: HashMap<&str, &str> = HashMap::from([
        (ENV_MIN_CONFIDENCE, "0.55"),
        (ENV_MODEL_TIMEOUT_MS, "abc"),
        (ENV_JPEG_QUALITY, "101"),
    ]);
    let mut cfg = TryOnConfig::default();
    cfg.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
    assert_eq!(cfg.detection.min_confidence, 0.55);
    assert_eq!(cfg.detection.model_timeout_ms, 10_000);
    assert_eq!(cfg.snapshot.jpeg_quality, 92);

    let env: HashMap<&str, &str> =
        HashMap::from([(ENV_MODEL_TIMEOUT_MS, " 2500 "), (ENV_JPEG_QUALITY, "80")]);
    cfg.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
    assert_eq!(cfg.model_timeout(), Duration::from_millis(2500));
    assert_eq!(cfg.snapshot.jpeg_quality, 80);
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tryon.json");
    std::fs::write(&path, r#"{"camera": {"facing_mode": "environment"}}"#).unwrap();
    let cfg = TryOnConfig::from_json_file(&path).unwrap();
    assert_eq!(
        cfg.camera.facing_mode,
        crate::capture::camera::FacingMode::Environment
    );
    assert!(TryOnConfig::from_json_file(&dir.path().join("missing.json")).is_err());
}
