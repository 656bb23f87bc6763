//! Box-drawing rendering of a remote directory tree.
//!
//! Directories only, in listing order. The last sibling at each level gets
//! the corner glyph, everything above it the tee; prefixes grow by a vertical
//! bar beneath a tee and a blank column beneath a corner.

use crate::error::Result;
use crate::service::{join, DirectoryService, EntryKind};

const TEE: &str = "├── ";
const LAST: &str = "└── ";
const BRANCH: &str = "│   ";
const SPACE: &str = "    ";

struct Frame {
    path: String,
    prefix: String,
    dirs: Vec<String>,
    index: usize,
}

/// Lazy sequence of display lines for the subtree under `root`.
pub struct TreeLines<'a, S: DirectoryService + ?Sized> {
    service: &'a mut S,
    start: Option<String>,
    stack: Vec<Frame>,
    failed: bool,
}

impl<'a, S: DirectoryService + ?Sized> TreeLines<'a, S> {
    pub fn new(service: &'a mut S, root: &str) -> Self {
        TreeLines {
            service,
            start: Some(root.to_string()),
            stack: Vec::new(),
            failed: false,
        }
    }
}

fn list_dirs<S: DirectoryService + ?Sized>(service: &mut S, path: &str) -> Result<Vec<String>> {
    let entries = service.list(path)?;
    Ok(entries
        .into_iter()
        .filter(|entry| entry.kind == EntryKind::Dir)
        .map(|entry| entry.name)
        .collect())
}

impl<'a, S: DirectoryService + ?Sized> Iterator for TreeLines<'a, S> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        if let Some(root) = self.start.take() {
            match list_dirs(self.service, &root) {
                Ok(dirs) => self.stack.push(Frame {
                    path: root,
                    prefix: String::new(),
                    dirs,
                    index: 0,
                }),
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }

        let (line, child_path, child_prefix) = loop {
            let frame = self.stack.last_mut()?;
            if frame.index >= frame.dirs.len() {
                self.stack.pop();
                continue;
            }

            let idx = frame.index;
            frame.index += 1;

            let name = frame.dirs[idx].clone();
            let last = idx + 1 == frame.dirs.len();
            let pointer = if last { LAST } else { TEE };
            let line = format!("{}{}{}", frame.prefix, pointer, name);
            let child_path = join(&frame.path, &name);
            let child_prefix = format!("{}{}", frame.prefix, if last { SPACE } else { BRANCH });
            break (line, child_path, child_prefix);
        };

        match list_dirs(self.service, &child_path) {
            Ok(dirs) => self.stack.push(Frame {
                path: child_path,
                prefix: child_prefix,
                dirs,
                index: 0,
            }),
            Err(err) => {
                self.failed = true;
                return Some(Err(err));
            }
        }

        Some(Ok(line))
    }
}

/// Renders the whole subtree eagerly.
pub fn render<S: DirectoryService + ?Sized>(service: &mut S, root: &str) -> Result<Vec<String>> {
    TreeLines::new(service, root).collect()
}
