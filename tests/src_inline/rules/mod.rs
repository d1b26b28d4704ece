use super::*;
use tempfile::tempdir;

fn assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/rules")
}

#[test]
fn shipped_tables_match_builtin_defaults() {
    let dir = assets_dir();
    let categories: Categories = load_table(&dir.join(APPTAGS_FILE)).expect("apptags");
    assert_eq!(categories, Categories::default());
    let panels: PanelRules = load_table(&dir.join(PANELS_FILE)).expect("panels");
    assert_eq!(panels, PanelRules::default());
    let kits: CaptureKitRules = load_table(&dir.join(CAPTURE_KITS_FILE)).expect("kits");
    assert_eq!(kits, CaptureKitRules::default());
}

#[test]
fn missing_dir_uses_defaults() {
    let rules = Rules::load(None).expect("rules");
    assert_eq!(*rules.categories, Categories::default());
}

#[test]
fn partial_override_keeps_other_defaults() {
    let dir = tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join(PANELS_FILE),
        "collaborators = [\"cust900\"]\nmaster_list = [\"EP\"]\n",
    )
    .expect("write");
    let rules = Rules::load(Some(dir.path())).expect("rules");
    assert_eq!(rules.panels.collaborators, vec!["cust900"]);
    assert_eq!(rules.panels.baseline, "OMIM-AUTO");
    assert!(rules.panels.combos.is_empty());
    assert_eq!(rules.capture_kits, CaptureKitRules::default());
}

#[test]
fn broken_override_reports_path() {
    let dir = tempdir().expect("tempdir");
    std::fs::write(dir.path().join(APPTAGS_FILE), "panel = 3").expect("write");
    let err = Rules::load(Some(dir.path())).expect_err("bad toml");
    match err {
        RulesError::Toml { path, .. } => assert!(path.ends_with(APPTAGS_FILE)),
        other => panic!("expected toml error, got {other:?}"),
    }
}
