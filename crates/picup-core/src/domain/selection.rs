//! Folder-picker results.
//!
//! The destination picker returns a remote folder; the source picker returns
//! a local path.  Either payload may come back empty (the user backed out,
//! or the picker failed), which callers must handle explicitly.

use std::fmt;

/// A folder on the remote server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFolder {
    /// Absolute path on the server, e.g. `/Photos/Phone`.
    pub remote_path: String,
}

impl RemoteFolder {
    pub fn new(remote_path: impl Into<String>) -> Self {
        Self {
            remote_path: remote_path.into(),
        }
    }
}

/// Result of the upload destination picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadPathSelection {
    pub folder: Option<RemoteFolder>,
}

impl UploadPathSelection {
    pub fn folder(folder: RemoteFolder) -> Self {
        Self {
            folder: Some(folder),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Result of the local source folder picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcePathSelection {
    pub path: Option<String>,
}

impl SourcePathSelection {
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Which picker a selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    UploadPath,
    SourcePath,
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionKind::UploadPath => f.write_str("upload path"),
            SelectionKind::SourcePath => f.write_str("source path"),
        }
    }
}
