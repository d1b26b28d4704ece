use super::*;
use clap::Parser;

#[test]
fn config_collects_repeated_panels() {
    let cli = Cli::parse_from([
        "lims-case",
        "config",
        "cust003",
        "17010",
        "--panel",
        "EP",
        "--panel",
        "IEM",
        "--json",
    ]);
    match cli.command {
        Command::Config(args) => {
            assert_eq!(args.customer, "cust003");
            assert_eq!(args.family, "17010");
            assert!(args.json);
            let options = args.options();
            assert_eq!(
                options.gene_panels,
                Some(vec!["EP".to_string(), "IEM".to_string()])
            );
            assert!(!options.force);
        }
        _ => panic!("expected config command"),
    }
}

#[test]
fn config_without_panels_keeps_lims_panels() {
    let cli = Cli::parse_from(["lims-case", "config", "cust003", "17010"]);
    match cli.command {
        Command::Config(args) => assert_eq!(args.options().gene_panels, None),
        _ => panic!("expected config command"),
    }
}

#[test]
fn global_options_after_subcommand() {
    let cli = Cli::parse_from([
        "lims-case",
        "sample",
        "ADM1234A1",
        "--snapshot",
        "lims.json",
        "--log-level",
        "debug",
    ]);
    assert_eq!(cli.snapshot, Some(PathBuf::from("lims.json")));
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
}

#[test]
fn check_force_requires_update() {
    let result = Cli::try_parse_from(["lims-case", "check", "ADM1", "--force"]);
    assert!(result.is_err());
    let cli = Cli::parse_from(["lims-case", "check", "ADM1", "--update", "--force"]);
    match cli.command {
        Command::Check(args) => assert!(args.update && args.force),
        _ => panic!("expected check command"),
    }
}

#[test]
fn panels_need_at_least_one_panel() {
    assert!(Cli::try_parse_from(["lims-case", "panels", "cust003"]).is_err());
}

#[test]
fn missing_snapshot_is_reported() {
    let ctx = Context {
        settings: Settings::default(),
    };
    let err = ctx.open_lims().expect_err("no snapshot");
    assert!(err.to_string().contains("--snapshot"));
}

#[test]
fn export_accepts_joined_case_id() {
    let cli = Cli::parse_from(["lims-case", "export", "cust003-17010", "--json"]);
    match cli.command {
        Command::Export(args) => {
            assert_eq!(args.customer_or_case, "cust003-17010");
            assert_eq!(args.family_id, None);
            assert!(args.json);
        }
        _ => panic!("expected export command"),
    }
}

#[test]
fn update_writes_snapshot() {
    use crate::lims::{Lims, LimsSample, Snapshot, udf};

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("lims.json");
    let snapshot = Snapshot {
        samples: vec![LimsSample::new("ACC1", "17010-I-1A").with_udf(udf::STATUS, "unknown")],
        processes: Vec::new(),
    };
    std::fs::write(&path, serde_json::to_string(&snapshot).expect("json")).expect("write");
    let ctx = Context {
        settings: Settings {
            snapshot: Some(path.clone()),
            rules_dir: None,
        },
    };

    let cli = Cli::parse_from(["lims-case", "update", "17010-I-1A", "Status", "affected", "--dry-run"]);
    let Command::Update(args) = cli.command else {
        panic!("expected update command");
    };
    update::handle(args, &ctx).expect("dry run");
    let sample = MemoryLims::open(&path).expect("open").fetch_sample("ACC1").expect("sample");
    assert_eq!(sample.udf(udf::STATUS).as_deref(), Some("unknown"));

    let cli = Cli::parse_from(["lims-case", "update", "17010-I-1A", "Status", "affected"]);
    let Command::Update(args) = cli.command else {
        panic!("expected update command");
    };
    update::handle(args, &ctx).expect("update");
    let sample = MemoryLims::open(&path).expect("open").fetch_sample("ACC1").expect("sample");
    assert_eq!(sample.udf(udf::STATUS).as_deref(), Some("affected"));
}
