use std::fs;
use std::path::{Path, PathBuf};

use takelist::config::TakeListConfig;
use takelist::tooling::cli::{CliContext, Commands};
use takelist::ApiError;
use tempfile::TempDir;

fn config_for(root: &Path, autosave: bool) -> TakeListConfig {
    let mut config = TakeListConfig::default();
    config.project.name = "demo".to_string();
    config.project.root_dir = Some(root.join("data"));
    config.session.autosave = autosave;
    config
}

fn context(temp: &TempDir, autosave: bool) -> CliContext {
    CliContext::with_config(temp.path().to_path_buf(), config_for(temp.path(), autosave)).unwrap()
}

fn add(sequence: &str, slate: &str, take: u32, status: Option<&str>, notes: &str) -> Commands {
    Commands::Add {
        sequence: sequence.to_string(),
        slate: slate.to_string(),
        take,
        notes: notes.to_string(),
        status: status.map(str::to_string),
        timecode: "00:00:01:00".to_string(),
        duration: 0.0,
    }
}

fn list_json(cli: &mut CliContext) -> serde_json::Value {
    let output = cli
        .execute(&Commands::List {
            format: "json".to_string(),
        })
        .unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn add_and_list_json_contract() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp, true);

    cli.execute(&add("Shot1", "Run in place", 1, Some("G"), "Good take"))
        .unwrap();
    cli.execute(&add("Shot1", "Run in place", 2, Some("NG"), "Bad take"))
        .unwrap();

    let parsed = list_json(&mut cli);
    let rows = parsed.as_array().expect("list output should be an array");
    assert_eq!(rows.len(), 2);
    for key in ["Sequence", "Slate", "Take", "Timecode", "Duration", "Status", "Notes"] {
        assert!(rows[0].get(key).is_some(), "missing {}", key);
    }
    assert_eq!(rows[0]["Status"], "G");
    assert_eq!(rows[1]["Status"], "NG");
    assert_eq!(rows[1]["Take"], 2);
}

#[test]
fn add_defaults_to_session_status() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp, true);
    cli.execute(&add("Shot1", "A", 1, None, "")).unwrap();
    assert_eq!(list_json(&mut cli)[0]["Status"], "G");
}

#[test]
fn duplicate_add_keeps_existing_take() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp, true);
    cli.execute(&add("Shot1", "A", 1, Some("S"), "first")).unwrap();
    let output = cli
        .execute(&add("Shot1", "A", 1, Some("NG"), "second"))
        .unwrap();
    assert!(output.contains("already exists"));

    let parsed = list_json(&mut cli);
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["Notes"], "first");
    assert_eq!(parsed[0]["Status"], "S");
}

#[test]
fn set_edits_only_notes_and_status() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp, true);
    cli.execute(&add("Shot1", "A", 1, Some("G"), "")).unwrap();

    let set = |field: &str, value: &str| Commands::Set {
        sequence: "Shot1".to_string(),
        slate: "A".to_string(),
        take: 1,
        field: field.to_string(),
        value: value.to_string(),
    };

    cli.execute(&set("Notes", "hair in gate")).unwrap();
    cli.execute(&set("Status", "S")).unwrap();
    assert!(matches!(
        cli.execute(&set("Timecode", "00:00:05:00")),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        cli.execute(&set("Status", "great")),
        Err(ApiError::InvalidInput(_))
    ));

    let missing = Commands::Set {
        sequence: "Shot1".to_string(),
        slate: "A".to_string(),
        take: 99,
        field: "Notes".to_string(),
        value: "x".to_string(),
    };
    assert!(matches!(cli.execute(&missing), Err(ApiError::NotFound(_))));

    let parsed = list_json(&mut cli);
    assert_eq!(parsed[0]["Notes"], "hair in gate");
    assert_eq!(parsed[0]["Status"], "S");
    assert_eq!(parsed[0]["Timecode"], "00:00:01:00");
}

#[test]
fn rejects_malformed_add_input() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp, true);

    let bad_timecode = Commands::Add {
        sequence: "Shot1".to_string(),
        slate: "A".to_string(),
        take: 1,
        notes: String::new(),
        status: None,
        timecode: "1:00".to_string(),
        duration: 0.0,
    };
    assert!(matches!(
        cli.execute(&bad_timecode),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        cli.execute(&add("Shot1", "A", 1, Some("??"), "")),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        cli.execute(&add("", "A", 1, None, "")),
        Err(ApiError::InvalidInput(_))
    ));
    assert_eq!(cli.session().tree().take_count(), 0);
}

#[test]
fn changes_persist_without_autosave() {
    let temp = TempDir::new().unwrap();
    {
        let mut cli = context(&temp, false);
        cli.execute(&add("Shot1", "A", 1, Some("G"), "kept")).unwrap();
    }
    let mut cli = context(&temp, false);
    assert_eq!(list_json(&mut cli)[0]["Notes"], "kept");

    let path = PathBuf::from(cli.execute(&Commands::Path).unwrap());
    assert!(path.ends_with("data/projects/demo/takelist.csv"));
    assert!(path.exists());
}

#[test]
fn export_then_import_into_another_project() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp, true);
    cli.execute(&add("Shot1", "A", 1, Some("G"), "one")).unwrap();
    cli.execute(&add("Shot1", "B", 1, Some("S"), "two")).unwrap();

    let export_path = temp.path().join("exports").join("day1.csv");
    let output = cli
        .execute(&Commands::Export {
            path: export_path.clone(),
        })
        .unwrap();
    assert!(output.starts_with("Exported 2 takes"));

    let other = TempDir::new().unwrap();
    let mut target = context(&other, true);
    target.execute(&add("Shot1", "A", 1, Some("NG"), "local")).unwrap();
    let output = target
        .execute(&Commands::Import { path: export_path })
        .unwrap();
    assert!(output.contains("Imported 1 takes"));
    assert!(output.contains("1 duplicates skipped"));

    let parsed = list_json(&mut target);
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[0]["Notes"], "local");
}

#[test]
fn list_text_and_tree_formats() {
    let temp = TempDir::new().unwrap();
    let mut cli = context(&temp, true);
    cli.execute(&add("Shot1", "Run in place", 1, Some("G"), "Good take"))
        .unwrap();

    let tree = cli
        .execute(&Commands::List {
            format: "tree".to_string(),
        })
        .unwrap();
    assert!(tree.contains("Shot1 [Sequence]"));
    assert!(tree.contains("Run in place [Slate]"));

    let text = cli
        .execute(&Commands::List {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(text.contains("Total takes: 1"));

    assert!(cli
        .execute(&Commands::List {
            format: "xml".to_string()
        })
        .is_err());
}

#[test]
fn project_file_configures_take_list_location() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("takelist.toml"),
        "[project]\nname = \"from-toml\"\nroot_dir = \"data\"\n\n[session]\nframe_rate = 24\n",
    )
    .unwrap();

    let mut cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    assert_eq!(cli.config().session.frame_rate, 24);
    let path = cli.execute(&Commands::Path).unwrap();
    assert!(
        path.ends_with("data/projects/from-toml/takelist.csv"),
        "unexpected path {}",
        path
    );

    let shown = cli.execute(&Commands::Config).unwrap();
    assert!(shown.contains("from-toml"));
}

#[test]
fn explicit_config_file_is_validated() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("custom.toml");
    fs::write(&config_path, "[session]\nframe_rate = 0\n").unwrap();
    let result = CliContext::new(temp.path().to_path_buf(), Some(config_path));
    assert!(matches!(result, Err(ApiError::ConfigError(_))));
}
