//! Read-only directory listing, real or in-memory.
//!
//! Resolution and matching only ever need "is this a directory" and "what
//! are the immediate children", so both go through [`DirectoryListing`].
//! Tests swap in [`MemoryListing`] instead of touching the disk.

use crate::key::FoldedKey;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Name as it appears on disk.
    pub name: String,
    pub key: FoldedKey,
    pub kind: EntryKind,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        let name = name.into();
        Self {
            key: FoldedKey::new(&name),
            name,
            kind,
        }
    }
}

pub trait DirectoryListing {
    fn is_dir(&self, path: &Path) -> bool;

    /// Immediate children of `path`, in the order the backend yields them.
    fn list(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>>;
}

impl<T: DirectoryListing + ?Sized> DirectoryListing for &T {
    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn list(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>> {
        (**self).list(path)
    }
}

/// Listing backed by `std::fs`. Symlinks are followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsListing;

impl DirectoryListing for FsListing {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                tracing::debug!(path = %entry.path().display(), "skipping non-UTF-8 entry name");
                continue;
            };
            // Broken symlinks and entries that vanish mid-listing are neither.
            let Ok(meta) = std::fs::metadata(entry.path()) else {
                continue;
            };
            let kind = if meta.is_dir() {
                EntryKind::Directory
            } else if meta.is_file() {
                EntryKind::File
            } else {
                continue;
            };
            entries.push(DirectoryEntry::new(name, kind));
        }
        Ok(entries)
    }
}

/// In-memory directory tree. Children are listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryListing {
    dirs: HashMap<PathBuf, Vec<(String, EntryKind)>>,
}

impl MemoryListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and any missing parents.
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path.as_ref());
        self
    }

    /// Add a file and any missing parent directories.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            self.add_dir(parent);
            self.push_child(parent, name.to_string_lossy().into_owned(), EntryKind::File);
        }
        self
    }

    fn add_dir(&mut self, path: &Path) {
        if self.dirs.contains_key(path) {
            return;
        }
        self.dirs.insert(path.to_path_buf(), Vec::new());
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            self.add_dir(parent);
            self.push_child(parent, name.to_string_lossy().into_owned(), EntryKind::Directory);
        }
    }

    fn push_child(&mut self, parent: &Path, name: String, kind: EntryKind) {
        let children = self.dirs.entry(parent.to_path_buf()).or_default();
        if !children.iter().any(|(n, _)| *n == name) {
            children.push((name, kind));
        }
    }
}

impl DirectoryListing for MemoryListing {
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains_key(path)
    }

    fn list(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>> {
        let children = self.dirs.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", path.display()),
            )
        })?;
        Ok(children
            .iter()
            .map(|(name, kind)| DirectoryEntry::new(name.clone(), *kind))
            .collect())
    }
}
