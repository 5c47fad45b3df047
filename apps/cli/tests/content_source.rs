//! Local content source tests.

mod common;

use pretty_assertions::assert_eq;

use common::fixtures;
use common::TestContent;
use fastlearn_cli::error::CliError;
use fastlearn_cli::source::{ContentSource, EntryKind};

/// Directories come first, then files, each sorted by name.
#[test]
fn test_list_orders_directories_first() {
    let ctx = TestContent::new();
    ctx.write("zeta.md", "");
    ctx.write("alpha.txt", "");
    ctx.mkdir("ingles");
    ctx.mkdir("aleman");
    ctx.write(".hidden.md", "");

    let entries = ctx.source.list("").unwrap();
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["aleman", "ingles", "alpha.txt", "zeta.md"]);
    assert_eq!(entries[0].kind, EntryKind::Dir);
    assert_eq!(entries[3].kind, EntryKind::File);
}

/// Nested listings report paths relative to the root.
#[test]
fn test_list_nested_paths() {
    let ctx = TestContent::new();
    ctx.write("ingles/a1/unit1.md", &fixtures::sample_quiz(1, false));

    let entries = ctx.source.list("ingles").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, "ingles/a1");

    let files = ctx.source.list("ingles/a1").unwrap();
    assert_eq!(files[0].path, "ingles/a1/unit1.md");
    assert!(files[0].is_quiz_file());
}

/// Fetching returns the document text.
#[test]
fn test_fetch_quiz_document() {
    let ctx = TestContent::new();
    let content = fixtures::sample_quiz(2, true);
    ctx.write("unit.md", &content);

    assert_eq!(ctx.source.fetch("unit.md").unwrap(), content);
}

/// Only .txt and .md may be fetched.
#[test]
fn test_fetch_rejects_unsupported_file() {
    let ctx = TestContent::new();
    ctx.write("image.png", "not text");

    let result = ctx.source.fetch("image.png");
    assert!(matches!(result, Err(CliError::UnsupportedFile(_))));
}

/// Missing files and directories map to NotFound.
#[test]
fn test_missing_paths_are_not_found() {
    let ctx = TestContent::new();
    assert!(matches!(ctx.source.fetch("nope.md"), Err(CliError::NotFound(_))));
    assert!(matches!(ctx.source.list("nope"), Err(CliError::NotFound(_))));
}

/// Paths may not leave the content root.
#[test]
fn test_paths_cannot_escape_root() {
    let ctx = TestContent::new();
    assert!(ctx.root().exists());
    assert!(matches!(
        ctx.source.fetch("../secret.md"),
        Err(CliError::OutsideRoot(_))
    ));
}
