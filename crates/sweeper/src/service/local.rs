//! Directory service over a locally mounted mirror of the remote volume.
//!
//! Service paths are resolved beneath the mount point, so `/srv/drop/acme`
//! with a mount of `/mnt/backup` reads `/mnt/backup/srv/drop/acme`. Listing
//! order is sorted by name to keep runs reproducible.

use crate::error::{Result, SweepError};
use crate::service::{DirectoryService, EntryKind, RemoteEntry, SessionFactory};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalSessionFactory {
    mount: PathBuf,
}

impl LocalSessionFactory {
    pub fn new<P: AsRef<Path>>(mount: P) -> Self {
        LocalSessionFactory {
            mount: mount.as_ref().to_path_buf(),
        }
    }
}

impl SessionFactory for LocalSessionFactory {
    type Session = LocalDirectoryService;

    fn connect(&self) -> Result<Self::Session> {
        if !self.mount.is_dir() {
            return Err(SweepError::Config(format!(
                "Mount point is not a directory: {}",
                self.mount.display()
            )));
        }
        Ok(LocalDirectoryService {
            mount: self.mount.clone(),
        })
    }
}

pub struct LocalDirectoryService {
    mount: PathBuf,
}

impl LocalDirectoryService {
    fn resolve(&self, path: &str) -> PathBuf {
        self.mount.join(path.trim_start_matches('/'))
    }
}

impl DirectoryService for LocalDirectoryService {
    fn list(&mut self, path: &str) -> Result<Vec<RemoteEntry>> {
        let local = self.resolve(path);
        let reader = fs::read_dir(&local)
            .map_err(|e| SweepError::transport("list", path, e))?;

        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| SweepError::transport("list", path, e))?;
            let file_type = entry
                .file_type()
                .map_err(|e| SweepError::transport("list", path, e))?;
            let kind = if file_type.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };
            entries.push(RemoteEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                kind,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn remove_dir(&mut self, path: &str) -> Result<()> {
        fs::remove_dir(self.resolve(path))
            .map_err(|e| SweepError::transport("remove_dir", path, e))
    }

    fn store_file(&mut self, path: &str, contents: &[u8]) -> Result<()> {
        fs::write(self.resolve(path), contents)
            .map_err(|e| SweepError::transport("store_file", path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_and_kinds() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("drop/acme")).unwrap();
        fs::write(temp.path().join("drop/notes.txt"), b"x").unwrap();

        let mut session = LocalSessionFactory::new(temp.path()).connect().unwrap();
        let entries = session.list("/drop").unwrap();

        assert_eq!(
            entries,
            vec![RemoteEntry::dir("acme"), RemoteEntry::file("notes.txt")]
        );
    }

    #[test]
    fn test_remove_dir_only_when_empty() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("drop/full")).unwrap();
        fs::write(temp.path().join("drop/full/data.csv"), b"1").unwrap();
        fs::create_dir_all(temp.path().join("drop/empty")).unwrap();

        let mut session = LocalSessionFactory::new(temp.path()).connect().unwrap();

        assert!(session.remove_dir("/drop/full").is_err());
        session.remove_dir("/drop/empty").unwrap();
        assert!(!temp.path().join("drop/empty").exists());
    }

    #[test]
    fn test_store_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("logs")).unwrap();

        let mut session = LocalSessionFactory::new(temp.path()).connect().unwrap();
        session.store_file("/logs/2024-01-01.log", b"done").unwrap();

        assert_eq!(
            fs::read(temp.path().join("logs/2024-01-01.log")).unwrap(),
            b"done"
        );
    }

    #[test]
    fn test_connect_requires_mount() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("absent");

        let result = LocalSessionFactory::new(&missing).connect();
        assert!(matches!(result, Err(SweepError::Config(_))));
    }
}
