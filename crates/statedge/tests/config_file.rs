use statedge_core::{resolve, AccessTier, BuildMode, Config};

#[test]
fn test_load_bare_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"free":"exp_a","premium":"exp_b","plus":"https://whop.com/win-now/statedge/"}"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.build_mode, BuildMode::default());
    for tier in AccessTier::ALL {
        assert!(resolve(tier, &config.destinations).is_ok());
    }
}

#[test]
fn test_load_full_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"destinations":{"plus":"https://upgrade.example/checkout"},"build_mode":"production"}"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.build_mode, BuildMode::Production);
    assert!(resolve(AccessTier::Free, &config.destinations).is_err());
    assert_eq!(
        resolve(AccessTier::Plus, &config.destinations).unwrap().url(),
        "https://upgrade.example/checkout"
    );
}

#[test]
fn test_load_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("invalid config"));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::load(&dir.path().join("absent.json")).is_err());
}
