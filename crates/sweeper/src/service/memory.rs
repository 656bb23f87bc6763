//! In-memory directory service.
//!
//! Every session opened from one [`MemorySessionFactory`] shares the same
//! tree, so removals performed through one session are visible to all others.
//! Used by the test suites and as a throwaway backend for experiments.

use crate::error::{Result, SweepError};
use crate::service::{base_name, parent_of, DirectoryService, EntryKind, RemoteEntry, SessionFactory};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug)]
enum Node {
    Dir(BTreeMap<String, Node>),
    File(Vec<u8>),
}

impl Node {
    fn find(&self, path: &str) -> Option<&Node> {
        let mut node = self;
        for segment in segments(path) {
            node = match node {
                Node::Dir(children) => children.get(segment)?,
                Node::File(_) => return None,
            };
        }
        Some(node)
    }

    fn find_mut(&mut self, path: &str) -> Option<&mut Node> {
        let mut node = self;
        for segment in segments(path) {
            node = match node {
                Node::Dir(children) => children.get_mut(segment)?,
                Node::File(_) => return None,
            };
        }
        Some(node)
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

type SharedTree = Rc<RefCell<Node>>;

/// Opens sessions over one shared in-memory tree.
#[derive(Clone)]
pub struct MemorySessionFactory {
    root: SharedTree,
}

impl MemorySessionFactory {
    pub fn new() -> Self {
        MemorySessionFactory {
            root: Rc::new(RefCell::new(Node::Dir(BTreeMap::new()))),
        }
    }

    /// A session sharing this factory's tree.
    pub fn session(&self) -> MemoryDirectoryService {
        MemoryDirectoryService {
            root: self.root.clone(),
        }
    }
}

impl Default for MemorySessionFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionFactory for MemorySessionFactory {
    type Session = MemoryDirectoryService;

    fn connect(&self) -> Result<Self::Session> {
        Ok(self.session())
    }
}

pub struct MemoryDirectoryService {
    root: SharedTree,
}

impl MemoryDirectoryService {
    /// Creates a directory, including missing intermediate directories.
    pub fn add_dir(&self, path: &str) -> Result<()> {
        let mut tree = self.root.borrow_mut();
        let mut node = &mut *tree;
        for segment in segments(path) {
            node = match node {
                Node::Dir(children) => children
                    .entry(segment.to_string())
                    .or_insert_with(|| Node::Dir(BTreeMap::new())),
                Node::File(_) => return Err(SweepError::NotADirectory(path.to_string())),
            };
        }
        Ok(())
    }

    /// Creates a file, including missing intermediate directories.
    pub fn add_file(&self, path: &str, contents: &[u8]) -> Result<()> {
        self.add_dir(parent_of(path))?;
        self.write_file(path, contents)
    }

    fn write_file(&self, path: &str, contents: &[u8]) -> Result<()> {
        let name = base_name(path).to_string();
        if name.is_empty() {
            return Err(SweepError::transport("store_file", path, "missing file name"));
        }

        let mut tree = self.root.borrow_mut();
        let parent = tree
            .find_mut(parent_of(path))
            .ok_or_else(|| SweepError::NotFound(parent_of(path).to_string()))?;

        let children = match parent {
            Node::Dir(children) => children,
            Node::File(_) => return Err(SweepError::NotADirectory(parent_of(path).to_string())),
        };

        if let Some(Node::Dir(_)) = children.get(&name) {
            return Err(SweepError::transport(
                "store_file",
                path,
                "a directory with that name exists",
            ));
        }

        children.insert(name, Node::File(contents.to_vec()));
        Ok(())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.root.borrow().find(path).is_some()
    }

    pub fn read_file(&self, path: &str) -> Option<Vec<u8>> {
        match self.root.borrow().find(path) {
            Some(Node::File(contents)) => Some(contents.clone()),
            _ => None,
        }
    }
}

impl DirectoryService for MemoryDirectoryService {
    fn list(&mut self, path: &str) -> Result<Vec<RemoteEntry>> {
        let tree = self.root.borrow();
        match tree.find(path) {
            None => Err(SweepError::NotFound(path.to_string())),
            Some(Node::File(_)) => Err(SweepError::NotADirectory(path.to_string())),
            Some(Node::Dir(children)) => Ok(children
                .iter()
                .map(|(name, node)| RemoteEntry {
                    name: name.clone(),
                    kind: match node {
                        Node::Dir(_) => EntryKind::Dir,
                        Node::File(_) => EntryKind::File,
                    },
                })
                .collect()),
        }
    }

    fn remove_dir(&mut self, path: &str) -> Result<()> {
        let name = base_name(path).to_string();
        if name.is_empty() {
            return Err(SweepError::transport("remove_dir", path, "cannot remove root"));
        }

        let mut tree = self.root.borrow_mut();
        let parent = tree
            .find_mut(parent_of(path))
            .ok_or_else(|| SweepError::NotFound(path.to_string()))?;

        let children = match parent {
            Node::Dir(children) => children,
            Node::File(_) => return Err(SweepError::NotADirectory(parent_of(path).to_string())),
        };

        match children.get(&name) {
            None => Err(SweepError::NotFound(path.to_string())),
            Some(Node::File(_)) => Err(SweepError::NotADirectory(path.to_string())),
            Some(Node::Dir(grandchildren)) => {
                if !grandchildren.is_empty() {
                    return Err(SweepError::transport(
                        "remove_dir",
                        path,
                        "directory not empty",
                    ));
                }
                children.remove(&name);
                Ok(())
            }
        }
    }

    fn store_file(&mut self, path: &str, contents: &[u8]) -> Result<()> {
        self.write_file(path, contents)
    }
}
