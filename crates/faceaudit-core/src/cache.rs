//! Parsed-CSV cache keyed by content digest.
//!
//! Entries live for the lifetime of the cache. Changed content hashes to a
//! new key, so nothing is ever invalidated explicitly.

use crate::catalog::{Catalog, CatalogError};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct CsvCache {
    entries: HashMap<[u8; 32], Arc<Catalog>>,
    hits: usize,
}

impl CsvCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `bytes`, or return the catalog already parsed from identical bytes.
    /// Parse failures are not cached.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<Arc<Catalog>, CatalogError> {
        let digest: [u8; 32] = Sha256::digest(bytes).into();

        if let Some(catalog) = self.entries.get(&digest) {
            self.hits += 1;
            tracing::debug!(hits = self.hits, "CSV cache hit");
            return Ok(Arc::clone(catalog));
        }

        let catalog = Arc::new(Catalog::from_bytes(bytes)?);
        self.entries.insert(digest, Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Read `path` and load it through the cache.
    pub fn load_path(&mut self, path: &Path) -> Result<Arc<Catalog>, CatalogError> {
        let bytes = std::fs::read(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_bytes(&bytes)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_A: &[u8] = b"image_filename,name\na.jpg,Jane\n";
    const CSV_B: &[u8] = b"image_filename,name\nb.jpg,Omar\n";

    #[test]
    fn test_same_content_is_cached() {
        let mut cache = CsvCache::new();
        let first = cache.load_bytes(CSV_A).unwrap();
        let second = cache.load_bytes(CSV_A).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_new_content_new_entry() {
        let mut cache = CsvCache::new();
        let a = cache.load_bytes(CSV_A).unwrap();
        let b = cache.load_bytes(CSV_B).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.hits(), 0);
        assert_eq!(b.records()[0].name, "Omar");
    }

    #[test]
    fn test_parse_failure_not_cached() {
        let mut cache = CsvCache::new();
        assert!(cache.load_bytes(b"just,columns\n1,2\n").is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_load_path_rereads_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("attrs.csv");
        let mut cache = CsvCache::new();

        std::fs::write(&path, CSV_A).unwrap();
        let a = cache.load_path(&path).unwrap();
        std::fs::write(&path, CSV_B).unwrap();
        let b = cache.load_path(&path).unwrap();

        assert_eq!(a.records()[0].name, "Jane");
        assert_eq!(b.records()[0].name, "Omar");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_load_path_missing_file_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("absent.csv");
        let mut cache = CsvCache::new();

        let err = cache.load_path(&path).unwrap_err();
        match &err {
            CatalogError::Io { path: p, .. } => assert_eq!(p, &path),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("could not read CSV file "));
        assert!(cache.is_empty());
    }
}
