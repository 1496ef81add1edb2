//! Image roots and case-insensitive person-folder resolution.

use crate::key::FoldedKey;
use crate::listing::{DirectoryEntry, DirectoryListing, EntryKind};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which of the two image trees a root, folder or cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RootKind {
    Original,
    Face,
}

impl RootKind {
    /// Capitalized label for the start of a sentence.
    pub fn title(self) -> &'static str {
        match self {
            RootKind::Original => "Original",
            RootKind::Face => "Face",
        }
    }

    /// Lowercase label used inside sentences ("not found in face folder").
    pub fn label(self) -> &'static str {
        match self {
            RootKind::Original => "original",
            RootKind::Face => "face",
        }
    }
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootKind::Original => f.write_str("ORIGINAL"),
            RootKind::Face => f.write_str("FACE"),
        }
    }
}

#[derive(Error, Debug)]
pub enum RootError {
    #[error("the {kind} image path is not a valid directory: {}", .path.display())]
    NotADirectory { kind: RootKind, path: PathBuf },
    #[error("could not read the {kind} image directory {}: {source}", .path.display())]
    Unreadable {
        kind: RootKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A validated base directory holding one subfolder per person.
#[derive(Debug, Clone)]
pub struct ImageRoot {
    kind: RootKind,
    path: PathBuf,
    /// On-disk subfolder name per folded key; the first listed wins.
    subdirs: HashMap<FoldedKey, String>,
}

impl ImageRoot {
    /// Validate `path` and snapshot its immediate subdirectories.
    ///
    /// Fails if `path` is not a directory or cannot be listed. Files
    /// directly under the root are ignored.
    pub fn open<L>(listing: &L, kind: RootKind, path: &Path) -> Result<Self, RootError>
    where
        L: DirectoryListing + ?Sized,
    {
        if !listing.is_dir(path) {
            return Err(RootError::NotADirectory {
                kind,
                path: path.to_path_buf(),
            });
        }

        let entries: Vec<DirectoryEntry> = listing
            .list(path)
            .map_err(|source| RootError::Unreadable {
                kind,
                path: path.to_path_buf(),
                source,
            })?
            .into_iter()
            .filter(|e| e.kind == EntryKind::Directory)
            .collect();

        let mut subdirs = HashMap::with_capacity(entries.len());
        for entry in entries {
            subdirs.entry(entry.key).or_insert(entry.name);
        }

        tracing::debug!(
            root = kind.label(),
            path = %path.display(),
            subdirs = subdirs.len(),
            "opened image root"
        );

        Ok(Self {
            kind,
            path: path.to_path_buf(),
            subdirs,
        })
    }

    pub fn kind(&self) -> RootKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Find the subfolder for `person`, ignoring case.
    ///
    /// If several subfolders fold to the same key, the first one in listing
    /// order is returned. That order comes from the filesystem and is not
    /// otherwise specified.
    pub fn resolve_person(&self, person: &str) -> Option<PathBuf> {
        self.subdirs
            .get(&FoldedKey::new(person))
            .map(|name| self.path.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{FsListing, MemoryListing};
    use tempfile::TempDir;

    fn root(listing: &MemoryListing) -> ImageRoot {
        ImageRoot::open(listing, RootKind::Original, Path::new("/orig")).unwrap()
    }

    #[test]
    fn test_resolve_any_casing() {
        let listing = MemoryListing::new().with_dir("/orig/JANE DOE");
        let root = root(&listing);
        for person in ["Jane Doe", "jane doe", "JANE DOE"] {
            assert_eq!(
                root.resolve_person(person),
                Some(PathBuf::from("/orig/JANE DOE")),
                "{person}"
            );
        }
    }

    #[test]
    fn test_resolve_returns_on_disk_spelling() {
        let listing = MemoryListing::new().with_dir("/orig/jane doe");
        assert_eq!(
            root(&listing).resolve_person("Jane Doe"),
            Some(PathBuf::from("/orig/jane doe"))
        );
    }

    #[test]
    fn test_resolve_ignores_files() {
        let listing = MemoryListing::new().with_file("/orig/Jane Doe");
        assert!(root(&listing).resolve_person("Jane Doe").is_none());
    }

    #[test]
    fn test_resolve_not_found() {
        let listing = MemoryListing::new().with_dir("/orig/Omar");
        assert!(root(&listing).resolve_person("Jane").is_none());
    }

    #[test]
    fn test_resolve_no_partial_match() {
        let listing = MemoryListing::new().with_dir("/orig/Jane Doe Jr");
        assert!(root(&listing).resolve_person("Jane Doe").is_none());
    }

    #[test]
    fn test_duplicate_casing_returns_exactly_one() {
        let listing = MemoryListing::new()
            .with_dir("/orig/Jane")
            .with_dir("/orig/jane");
        let found = root(&listing).resolve_person("JANE").unwrap();
        assert!(found == Path::new("/orig/Jane") || found == Path::new("/orig/jane"));
    }

    #[test]
    fn test_open_rejects_missing_root() {
        let listing = MemoryListing::new();
        let err = ImageRoot::open(&listing, RootKind::Face, Path::new("/nope")).unwrap_err();
        assert!(matches!(err, RootError::NotADirectory { kind: RootKind::Face, .. }));
        assert_eq!(
            err.to_string(),
            "the FACE image path is not a valid directory: /nope"
        );
    }

    #[test]
    fn test_open_rejects_file_root() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("data.csv");
        std::fs::write(&file, b"a,b\n").unwrap();
        let err = ImageRoot::open(&FsListing, RootKind::Original, &file).unwrap_err();
        assert!(matches!(err, RootError::NotADirectory { .. }));
    }

    #[test]
    fn test_open_real_directory() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("Li Wei")).unwrap();
        let root = ImageRoot::open(&FsListing, RootKind::Original, tmp.path()).unwrap();
        assert_eq!(root.kind(), RootKind::Original);
        assert_eq!(root.resolve_person("LI WEI"), Some(tmp.path().join("Li Wei")));
    }
}
