use super::*;
use tempfile::tempdir;

#[test]
fn relative_paths_follow_settings_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("lims.toml");
    std::fs::write(
        &path,
        "snapshot = \"lims.json\"\nrules_dir = \"/etc/lims/rules\"\n",
    )
    .expect("write");
    let settings = Settings::load(Some(&path)).expect("settings");
    assert_eq!(settings.snapshot, Some(dir.path().join("lims.json")));
    assert_eq!(settings.rules_dir, Some(PathBuf::from("/etc/lims/rules")));
}

#[test]
fn empty_file_is_default() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("lims.toml");
    std::fs::write(&path, "").expect("write");
    assert_eq!(Settings::load(Some(&path)).expect("settings"), Settings::default());
}

#[test]
fn explicit_missing_file_fails() {
    let dir = tempdir().expect("tempdir");
    let err = Settings::load(Some(&dir.path().join("absent.toml"))).expect_err("missing");
    assert!(matches!(err, SettingsError::Io { .. }));
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("lims.toml");
    std::fs::write(&path, "host = \"clinical-lims\"\n").expect("write");
    let err = Settings::load(Some(&path)).expect_err("unknown key");
    assert!(matches!(err, SettingsError::Toml { .. }));
}
