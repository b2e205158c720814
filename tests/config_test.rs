//! Configuration loading and validation.

mod common;

use recplay::config::Config;

#[test]
fn test_defaults() {
    let cfg = Config::from_toml(
        r#"
[recorder]
base_url = "https://rec.test/api"

[[cameras]]
id = "1"
"#,
    )
    .expect("config");
    assert_eq!(cfg.recorder.timeout_secs, 30);
    assert_eq!(cfg.viewer.thumbnail, "thumbnail.png");
    assert_eq!(cfg.default_camera(), "1");
    assert_eq!(cfg.dual_pair(), None);
    assert!(cfg.api.enabled);
    assert_eq!(cfg.api.port, 8080);
    assert_eq!(cfg.cameras[0].category(), "camera-1");
}

#[test]
fn test_fixture_config() {
    let cfg = common::test_config();
    assert_eq!(cfg.cameras.len(), 3);
    assert_eq!(cfg.default_camera(), "7554");
    assert_eq!(cfg.dual_pair(), Some(("7554".into(), "7555".into())));
}

fn rejects(toml: &str) -> String {
    Config::from_toml(toml).expect_err("should be rejected").to_string()
}

#[test]
fn test_validation() {
    let base = "[recorder]\nbase_url = \"https://rec.test/api\"\n";

    assert!(rejects(&format!("cameras = []\n{base}")).contains("No cameras"));
    assert!(rejects(&format!("{base}[[cameras]]\nid = \"1\"\n[[cameras]]\nid = \"1\"\n")).contains("Duplicate"));
    assert!(rejects(&format!(
        "{base}[[cameras]]\nid = \"1\"\n[viewer]\ndual_cameras = [\"1\", \"2\"]\n"
    ))
    .contains("dual camera '2'"));
    assert!(rejects(&format!(
        "{base}[[cameras]]\nid = \"1\"\n[viewer]\ndefault_camera = \"9\"\n"
    ))
    .contains("default_camera"));
    assert!(rejects("[[cameras]]\nid = \"1\"\n").contains("Invalid TOML"));
}

#[test]
fn test_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, common::config_toml("https://rec.test/api", "f.json")).expect("write");
    let cfg = Config::from_file(&path).expect("load");
    assert_eq!(cfg.recorder.base_url, "https://rec.test/api");

    assert!(Config::from_file(&dir.path().join("missing.toml")).is_err());
}
