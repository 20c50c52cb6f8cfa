use super::*;
use crate::synth::throw::build_throw_scene;

#[test]
fn export_then_import_is_identity() {
    let scene = build_throw_scene("A throws a vase at B", 31);
    let text = scene.to_json_pretty().unwrap();
    assert!(text.starts_with("{\n  "));
    let back = Scene::from_json_str(&text).unwrap();
    assert_eq!(back, scene);
    assert_eq!(back.fingerprint().unwrap(), scene.fingerprint().unwrap());
}

#[test]
fn reader_and_str_agree() {
    let scene = build_throw_scene("", 6);
    let text = scene.to_json_pretty().unwrap();
    let a = Scene::from_json_str(&text).unwrap();
    let b = Scene::from_reader(text.as_bytes()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn malformed_text_is_an_import_error() {
    let err = Scene::from_json_str("{ \"fps\": 12, ").unwrap_err();
    assert!(matches!(err, StickmanError::Import(_)));
    assert!(err.to_string().contains("parse scene JSON"));
}

#[test]
fn schema_violation_is_a_validation_error() {
    let err = Scene::from_json_str(r#"{"fps": 12, "frames": [], "catalog": {}}"#).unwrap_err();
    let errors = err.scene_errors().unwrap();
    assert_eq!(errors.structural().len(), 1);
    assert_eq!(errors.structural()[0].path(), "$.frames");
}

#[test]
fn missing_file_is_an_import_error() {
    let err = Scene::from_path("/nonexistent/stickman/scene.json").unwrap_err();
    assert!(matches!(err, StickmanError::Import(_)));
}

#[test]
fn fingerprint_tracks_content() {
    let a = build_throw_scene("", 1).fingerprint().unwrap();
    let b = build_throw_scene("", 1).fingerprint().unwrap();
    let c = build_throw_scene("", 2).fingerprint().unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn value_matches_pretty_text() {
    let scene = build_throw_scene("", 12);
    let from_text: serde_json::Value =
        serde_json::from_str(&scene.to_json_pretty().unwrap()).unwrap();
    assert_eq!(from_text, scene.to_value().unwrap());
    assert_eq!(from_text["fps"], 12);
    assert_eq!(from_text["catalog"]["vase01"]["type"], "placeholder");
}
