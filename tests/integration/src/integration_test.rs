//! End-to-end flows across the workspace crates
//!
//! Configuration files are loaded through `filedrop-fs`, sessions run against
//! a scripted operator, and the managed store is checked on disk afterwards.

use chrono::{DateTime, FixedOffset};
use filedrop::{BufChannel, Session, SessionConfig, Zone};
use filedrop_fs::ManagedRoot;
use filedrop_test_utils::{ScriptedInput, TestStore, Transcript};
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Read;
use std::path::Path;

fn session_from_file(config_path: &Path, lines: &[String]) -> (Session, Transcript) {
    let config = SessionConfig::load(config_path).unwrap();
    let (input, _) = ScriptedInput::lines(lines);
    let transcript = Transcript::new();
    let session = Session::with_channel(config, BufChannel::new(input, transcript.clone()));
    (session, transcript)
}

#[test]
fn test_config_file_drives_root_and_zone() {
    let store = TestStore::new();
    let config_path = store.base().join("filedrop.toml");
    fs::write(
        &config_path,
        format!(
            "root = {}\ntime_zone = \"+02:00\"\n",
            serde_json::to_string(&store.root()).unwrap()
        ),
    )
    .unwrap();
    store.seed("orders.csv", "id\n1\n");

    let (session, transcript) = session_from_file(&config_path, &["2021-01-02 15:04".to_string()]);

    assert_eq!(session.root(), &ManagedRoot::new(store.root()));
    let mut content = String::new();
    session
        .resolve("orders.csv")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    let cutoff: DateTime<FixedOffset> = session.var("cutoff").unwrap();

    assert_eq!(content, "id\n1\n");
    assert_eq!(cutoff.to_rfc3339(), "2021-01-02T15:04:00+02:00");
    assert_eq!(transcript.contents(), "cutoff: ");
}

#[test]
fn test_yaml_and_json_configs_agree() {
    let store = TestStore::new();
    let yaml = store.base().join("filedrop.yaml");
    let json = store.base().join("filedrop.json");
    fs::write(
        &yaml,
        "root: dump\ntime_zone: utc\nretry:\n  source_attempts: 2\n  directory_attempts: 1\n",
    )
    .unwrap();
    fs::write(
        &json,
        r#"{"root": "dump", "time_zone": "UTC", "retry": {"source_attempts": 2, "directory_attempts": 1}}"#,
    )
    .unwrap();

    let from_yaml = SessionConfig::load(&yaml).unwrap();
    let from_json = SessionConfig::load(&json).unwrap();

    assert_eq!(from_yaml, from_json);
    assert_eq!(from_yaml.time_zone, Zone::Utc);
}

#[test]
fn test_imported_drop_folder_is_resolvable_by_name() {
    let store = TestStore::new();
    let a = store.source("a.txt", "alpha");
    let b = store.source("b.txt", "beta");
    let (input, counter) = ScriptedInput::lines([
        String::new(),
        a.display().to_string(),
        b.display().to_string(),
    ]);
    let session = Session::with_channel(
        SessionConfig::new().with_root(store.root()),
        BufChannel::new(input, Transcript::new()),
    );

    // Empty on first look: the folder is created and the operator acknowledges.
    assert!(session.list_dir("inbox").unwrap().is_empty());
    session.import_into("inbox").unwrap();
    session.import_into("inbox").unwrap();

    let listed = session.list_dir("inbox").unwrap();
    assert_eq!(
        listed,
        vec![store.managed("inbox/a.txt"), store.managed("inbox/b.txt")]
    );
    for name in ["inbox/a.txt", "inbox/b.txt"] {
        session.resolve(name).unwrap();
    }
    assert_eq!(counter.get(), 3);
    assert_eq!(store.read_managed("inbox/b.txt"), "beta");
}
