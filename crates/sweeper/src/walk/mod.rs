//! Pre-order traversal of a remote directory subtree.
//!
//! The walker drives an explicit worklist instead of recursing: each listed
//! directory pushes its subdirectories onto a stack in reverse listing order,
//! so directories come out parent-first and in the order the backend returned
//! them. The sequence is lazy, finite, and not restartable; the first listing
//! failure is yielded and fuses the iterator.

pub mod tree;

pub use tree::TreeLines;

use crate::error::Result;
use crate::service::{join, DirectoryService, EntryKind};

/// One visited directory with its immediate children, partitioned by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    pub path: String,
    pub files: Vec<String>,
    pub dirs: Vec<String>,
}

pub struct Walker<'a, S: DirectoryService + ?Sized> {
    service: &'a mut S,
    pending: Vec<String>,
    failed: bool,
}

impl<'a, S: DirectoryService + ?Sized> Walker<'a, S> {
    pub fn new(service: &'a mut S, root: &str) -> Self {
        Walker {
            service,
            pending: vec![root.to_string()],
            failed: false,
        }
    }
}

impl<'a, S: DirectoryService + ?Sized> Iterator for Walker<'a, S> {
    type Item = Result<DirectoryListing>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let path = self.pending.pop()?;
        let entries = match self.service.list(&path) {
            Ok(entries) => entries,
            Err(err) => {
                self.failed = true;
                return Some(Err(err));
            }
        };

        let mut files = Vec::new();
        let mut dirs = Vec::new();
        for entry in entries {
            match entry.kind {
                EntryKind::File => files.push(entry.name),
                EntryKind::Dir => dirs.push(entry.name),
            }
        }

        for name in dirs.iter().rev() {
            self.pending.push(join(&path, name));
        }

        Some(Ok(DirectoryListing { path, files, dirs }))
    }
}
