//! Content source: where quiz documents come from.
//!
//! The quiz core only sees text. A source lists a directory tree of
//! documents and fetches one of them by relative path.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::error::{CliError, Result};

/// Extensions that may be loaded as quiz documents.
const QUIZ_EXTENSIONS: [&str; 2] = ["txt", "md"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Dir,
    File,
}

/// One item of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Path relative to the source root, `/`-separated.
    pub path: String,
}

impl ContentEntry {
    pub fn icon(&self) -> &'static str {
        match self.kind {
            EntryKind::Dir => "📁",
            EntryKind::File => "📄",
        }
    }

    pub fn is_quiz_file(&self) -> bool {
        self.kind == EntryKind::File && is_quiz_file(&self.name)
    }
}

/// Whether a file name has a loadable extension.
pub fn is_quiz_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| QUIZ_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Join a child name onto a relative directory path.
pub fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent.trim_end_matches('/'), name)
    }
}

/// Parent of a relative path, `""` at the root.
pub fn parent_path(path: &str) -> String {
    match path.trim_end_matches('/').rsplit_once('/') {
        Some((parent, _)) => parent.to_string(),
        None => String::new(),
    }
}

/// A browsable tree of quiz documents.
pub trait ContentSource {
    /// List a directory, directories first, each group sorted by name.
    fn list(&self, path: &str) -> Result<Vec<ContentEntry>>;

    /// Fetch a `.txt` or `.md` document.
    fn fetch(&self, path: &str) -> Result<String>;
}

/// Documents stored under a local directory.
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative path, refusing anything that leaves the root.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => return Err(CliError::OutsideRoot(path.to_string())),
            }
        }
        Ok(self.root.join(relative))
    }
}

fn not_found(path: &str, err: std::io::Error) -> CliError {
    if err.kind() == ErrorKind::NotFound {
        CliError::NotFound(path.to_string())
    } else {
        CliError::Io(err)
    }
}

impl ContentSource for LocalSource {
    fn list(&self, path: &str) -> Result<Vec<ContentEntry>> {
        let dir = self.resolve(path)?;
        let mut entries = Vec::new();

        for item in fs::read_dir(&dir).map_err(|e| not_found(path, e))? {
            let item = item?;
            let name = item.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let kind = if item.file_type()?.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };
            entries.push(ContentEntry {
                path: child_path(path, &name),
                name,
                kind,
            });
        }

        entries.sort_by(|a, b| {
            (a.kind != EntryKind::Dir, &a.name).cmp(&(b.kind != EntryKind::Dir, &b.name))
        });
        tracing::debug!(path, count = entries.len(), "listed content directory");
        Ok(entries)
    }

    fn fetch(&self, path: &str) -> Result<String> {
        if !is_quiz_file(path) {
            return Err(CliError::UnsupportedFile(path.to_string()));
        }
        let file = self.resolve(path)?;
        let text = fs::read_to_string(&file).map_err(|e| not_found(path, e))?;
        tracing::info!(path, bytes = text.len(), "loaded quiz document");
        Ok(text)
    }
}
