//! Case-insensitive filename matching within one person folder.

use crate::key::FoldedKey;
use crate::listing::{DirectoryListing, EntryKind};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of matching one record against one image root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// Path of the matched file, using its on-disk spelling.
    Found(PathBuf),
    /// The person folder exists but holds no file with this name.
    FileMissing,
    /// No person folder was resolved in this root.
    DirectoryMissing,
}

/// Files of one resolved person folder, keyed by folded filename.
#[derive(Debug, Clone)]
pub struct PersonDir {
    path: PathBuf,
    files: HashMap<FoldedKey, String>,
}

impl PersonDir {
    /// List the immediate files of `path`. Nested folders are not searched.
    pub fn scan<L>(listing: &L, path: &Path) -> io::Result<Self>
    where
        L: DirectoryListing + ?Sized,
    {
        let mut files = HashMap::new();
        for entry in listing.list(path)? {
            if entry.kind != EntryKind::File {
                continue;
            }
            // Same-key files are ambiguous; keep whichever was listed first.
            files.entry(entry.key).or_insert(entry.name);
        }

        tracing::debug!(path = %path.display(), files = files.len(), "scanned person folder");

        Ok(Self {
            path: path.to_path_buf(),
            files,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Look up `filename` ignoring case.
    pub fn lookup(&self, filename: &str) -> MatchResult {
        match self.files.get(&FoldedKey::new(filename)) {
            Some(actual) => MatchResult::Found(self.path.join(actual)),
            None => MatchResult::FileMissing,
        }
    }
}

/// Match `filename` against an optional resolved folder.
///
/// A missing folder short-circuits to [`MatchResult::DirectoryMissing`]
/// without any lookup.
pub fn match_record(dir: Option<&PersonDir>, filename: &str) -> MatchResult {
    match dir {
        Some(dir) => dir.lookup(filename),
        None => MatchResult::DirectoryMissing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::MemoryListing;

    fn jane_dir() -> PersonDir {
        let listing = MemoryListing::new()
            .with_file("/orig/Jane/IMG_001.JPG")
            .with_file("/orig/Jane/img_002.png")
            .with_file("/orig/Jane/nested/img_003.jpg");
        PersonDir::scan(&listing, Path::new("/orig/Jane")).unwrap()
    }

    #[test]
    fn test_lookup_ignores_case() {
        let dir = jane_dir();
        assert_eq!(
            dir.lookup("img_001.jpg"),
            MatchResult::Found(PathBuf::from("/orig/Jane/IMG_001.JPG"))
        );
        assert_eq!(
            dir.lookup("IMG_002.PNG"),
            MatchResult::Found(PathBuf::from("/orig/Jane/img_002.png"))
        );
    }

    #[test]
    fn test_lookup_missing_file() {
        assert_eq!(jane_dir().lookup("missing.jpg"), MatchResult::FileMissing);
    }

    #[test]
    fn test_nested_files_not_searched() {
        let dir = jane_dir();
        assert_eq!(dir.file_count(), 2);
        assert_eq!(dir.lookup("img_003.jpg"), MatchResult::FileMissing);
        assert_eq!(dir.lookup("nested"), MatchResult::FileMissing);
    }

    #[test]
    fn test_missing_directory_short_circuits() {
        assert_eq!(match_record(None, "img_001.jpg"), MatchResult::DirectoryMissing);
    }

    #[test]
    fn test_file_and_directory_misses_differ() {
        let dir = jane_dir();
        let file_miss = match_record(Some(&dir), "nope.jpg");
        let dir_miss = match_record(None, "nope.jpg");
        assert_eq!(file_miss, MatchResult::FileMissing);
        assert_ne!(file_miss, dir_miss);
    }

    #[test]
    fn test_scan_unlisted_folder_errors() {
        let listing = MemoryListing::new();
        assert!(PersonDir::scan(&listing, Path::new("/orig/Ghost")).is_err());
    }
}
