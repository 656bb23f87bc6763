//! Abstract directory service used by the walker and the sweep engine.
//!
//! Every listing row carries an explicit [`EntryKind`], so callers never have
//! to probe a path to find out what it is. Backends that cannot determine the
//! kind of an entry must fail the listing rather than guess.

pub mod local;
pub mod memory;
pub mod pool;

pub use local::{LocalDirectoryService, LocalSessionFactory};
pub use memory::{MemoryDirectoryService, MemorySessionFactory};
pub use pool::{SessionFactory, SessionPool};

use crate::error::Result;

/// What a listing row points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
}

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl RemoteEntry {
    pub fn dir(name: impl Into<String>) -> Self {
        RemoteEntry {
            name: name.into(),
            kind: EntryKind::Dir,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        RemoteEntry {
            name: name.into(),
            kind: EntryKind::File,
        }
    }
}

/// Blocking capability set of a directory session.
///
/// Calls either complete or return an error; there is no retry layer. A failed
/// call leaves the session in an unknown state, so callers discard it instead
/// of reusing it (see [`SessionPool`]).
pub trait DirectoryService {
    /// List the entries of `path`. Order is whatever the backend returns.
    fn list(&mut self, path: &str) -> Result<Vec<RemoteEntry>>;

    /// Remove the directory at `path`. Fails if it is not empty.
    fn remove_dir(&mut self, path: &str) -> Result<()>;

    /// Store `contents` as the file at `path`, replacing any previous one.
    fn store_file(&mut self, path: &str, contents: &[u8]) -> Result<()>;
}

/// Joins a service path and a child name with a single separator.
pub fn join(base: &str, name: &str) -> String {
    if base.ends_with('/') {
        format!("{}{}", base, name)
    } else {
        format!("{}/{}", base, name)
    }
}

/// Final component of a service path.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Parent of a service path, with `/` as its own parent.
pub fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => "",
    }
}
