//! Operator behaviour at the edges of the line protocol.

use assert_fs::prelude::*;
use filedrop::{BufChannel, Error, Session, SessionConfig};
use filedrop_test_utils::{ScriptedInput, TestStore, Transcript};
use predicates::prelude::*;
use pretty_assertions::assert_eq;

fn raw_session(store: &TestStore, chunks: &[&str]) -> (Session, Transcript) {
    let (input, _) = ScriptedInput::raw(chunks);
    let transcript = Transcript::new();
    let session = Session::with_channel(
        SessionConfig::new().with_root(store.root()),
        BufChannel::new(input, transcript.clone()),
    );
    (session, transcript)
}

#[test]
fn test_windows_line_endings_are_stripped() {
    let store = TestStore::new();
    let (session, _) = raw_session(&store, &["report.pdf\r\n", "  spaced  \r\n"]);

    assert_eq!(session.answer("name").unwrap(), "report.pdf");
    assert_eq!(session.answer("padding").unwrap(), "  spaced  ");
}

#[test]
fn test_quoted_drop_with_crlf_imports() {
    let store = TestStore::new();
    let source = store.source("with space.txt", "dragged");
    let line = format!("\"{}\"\r\n", source.display());
    let (session, _) = raw_session(&store, &[line.as_str()]);

    session.check("dragged.txt").unwrap();

    assert_eq!(store.read_managed("dragged.txt"), "dragged");
}

#[test]
fn test_half_written_line_is_a_channel_error() {
    let store = TestStore::new();
    let (session, _) = raw_session(&store, &["no terminator"]);

    assert!(matches!(session.answer("x"), Err(Error::Channel { .. })));
}

#[test]
fn test_line_split_across_reads_is_joined() {
    let store = TestStore::new();
    let (session, _) = raw_session(&store, &["par", "tial", "\n"]);

    assert_eq!(session.answer("x").unwrap(), "partial");
}

#[test]
fn test_absolute_name_stays_under_the_root() {
    let store = TestStore::new();
    let source = store.source("abs.txt", "kept inside");
    let line = format!("{}\n", source.display());
    let (session, transcript) = raw_session(&store, &[line.as_str()]);

    let path = session.check("/nested/abs.txt").unwrap();

    assert!(path.starts_with(store.root()));
    assert_eq!(store.read_managed("nested/abs.txt"), "kept inside");
    assert!(transcript.contents().contains("/nested/abs.txt\" not found"));
}

#[test]
fn test_importing_leaves_the_source_alone() {
    let temp = assert_fs::TempDir::new().unwrap();
    let source = temp.child("outside/keep.txt");
    source.write_str("original").unwrap();
    let store = TestStore::new();
    let line = format!("{}\n", source.path().display());
    let (session, _) = raw_session(&store, &[line.as_str()]);

    session.check("copy.txt").unwrap();

    source.assert("original");
    source.assert(predicate::path::is_file());
    assert_eq!(store.read_managed("copy.txt"), "original");
}
