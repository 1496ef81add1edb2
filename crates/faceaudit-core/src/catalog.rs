//! Attribute CSV loading.
//!
//! The CSV must have a header row containing `image_filename` and `name`.
//! Every other column is kept verbatim, in header order, as an attribute.

use crate::index::NameIndex;
use crate::key::FoldedKey;
use crate::{IMAGE_FILENAME_COLUMN, NAME_COLUMN};
use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("could not read CSV file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error loading CSV file: {0}")]
    Csv(#[from] csv::Error),
    #[error("the CSV file is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// One CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRecord {
    pub image_filename: String,
    pub name: String,
    /// Non-identifying columns as (column, value), in header order.
    pub attributes: Vec<(String, String)>,
}

impl AttributeRecord {
    pub fn attribute(&self, column: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }
}

/// Rows of one person, split into usable records and a skipped count.
#[derive(Debug)]
pub struct PersonRows<'a> {
    pub records: Vec<&'a AttributeRecord>,
    /// Rows for the person whose `image_filename` is empty.
    pub skipped: usize,
}

/// Parsed attribute CSV.
///
/// The person index and the per-person row grouping are built once at parse
/// time, so lookups by person never rescan the records.
#[derive(Debug, Clone)]
pub struct Catalog {
    columns: Vec<String>,
    records: Vec<AttributeRecord>,
    index: NameIndex,
    /// Record positions per folded name, in CSV order. Empty names are absent.
    by_person: HashMap<FoldedKey, Vec<usize>>,
}

impl Catalog {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CatalogError> {
        Self::from_reader(bytes)
    }

    /// Parse CSV from any reader. Rows with a different field count than
    /// the header are rejected.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let position = |wanted: &str| columns.iter().position(|c| c == wanted);
        let (file_idx, name_idx) = match (position(IMAGE_FILENAME_COLUMN), position(NAME_COLUMN)) {
            (Some(f), Some(n)) => (f, n),
            (f, n) => {
                let mut missing = Vec::new();
                if f.is_none() {
                    missing.push(IMAGE_FILENAME_COLUMN.to_string());
                }
                if n.is_none() {
                    missing.push(NAME_COLUMN.to_string());
                }
                return Err(CatalogError::MissingColumns(missing));
            }
        };

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row?;
            let field = |idx: usize| row.get(idx).unwrap_or_default().to_string();
            let attributes = columns
                .iter()
                .enumerate()
                .filter(|(idx, _)| *idx != file_idx && *idx != name_idx)
                .map(|(idx, column)| (column.clone(), field(idx)))
                .collect();
            records.push(AttributeRecord {
                image_filename: field(file_idx),
                name: field(name_idx),
                attributes,
            });
        }

        tracing::info!(
            rows = records.len(),
            columns = columns.len(),
            "loaded attribute CSV"
        );

        let index = NameIndex::build(records.iter().map(|r| r.name.as_str()));
        let mut by_person: HashMap<FoldedKey, Vec<usize>> = HashMap::new();
        for (pos, record) in records.iter().enumerate() {
            if !record.name.is_empty() {
                by_person.entry(FoldedKey::new(&record.name)).or_default().push(pos);
            }
        }

        Ok(Self {
            columns,
            records,
            index,
            by_person,
        })
    }

    /// Header row, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[AttributeRecord] {
        &self.records
    }

    /// Index of every non-empty person name in the CSV.
    pub fn person_index(&self) -> &NameIndex {
        &self.index
    }

    /// Rows whose name matches `person` ignoring case, in CSV order.
    ///
    /// Rows with an empty name never match.
    pub fn rows_for(&self, person: &str) -> PersonRows<'_> {
        let mut rows = PersonRows {
            records: Vec::new(),
            skipped: 0,
        };
        let Some(positions) = self.by_person.get(&FoldedKey::new(person)) else {
            return rows;
        };
        for record in positions.iter().map(|&pos| &self.records[pos]) {
            if record.image_filename.is_empty() {
                rows.skipped += 1;
            } else {
                rows.records.push(record);
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
image_filename,name,nationality,gender,expression
IMG_001.JPG,John Smith,British,male,smiling
img_002.jpg,john smith,British,male,neutral
a.png,Jane Doe,,female,
,JOHN SMITH,British,male,
b.png,,Unknown,,
";

    #[test]
    fn test_parse_columns_and_attributes() {
        let catalog = Catalog::from_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            catalog.columns(),
            ["image_filename", "name", "nationality", "gender", "expression"]
        );
        assert_eq!(catalog.records().len(), 5);

        let first = &catalog.records()[0];
        assert_eq!(first.image_filename, "IMG_001.JPG");
        assert_eq!(first.name, "John Smith");
        let attr_names: Vec<&str> = first.attributes.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(attr_names, ["nationality", "gender", "expression"]);
        assert_eq!(first.attribute("expression"), Some("smiling"));
        assert_eq!(first.attribute("name"), None);
    }

    #[test]
    fn test_empty_cells_kept_as_empty_values() {
        let catalog = Catalog::from_bytes(SAMPLE.as_bytes()).unwrap();
        let jane = &catalog.records()[2];
        assert_eq!(jane.attribute("nationality"), Some(""));
    }

    #[test]
    fn test_rows_for_person_any_case() {
        let catalog = Catalog::from_bytes(SAMPLE.as_bytes()).unwrap();
        let rows = catalog.rows_for("JOHN smith");
        let files: Vec<&str> = rows.records.iter().map(|r| r.image_filename.as_str()).collect();
        assert_eq!(files, ["IMG_001.JPG", "img_002.jpg"]);
        assert_eq!(rows.skipped, 1);
    }

    #[test]
    fn test_rows_for_empty_name_never_match() {
        let catalog = Catalog::from_bytes(SAMPLE.as_bytes()).unwrap();
        let rows = catalog.rows_for("");
        assert!(rows.records.is_empty());
        assert_eq!(rows.skipped, 0);
    }

    #[test]
    fn test_person_index_skips_empty_names() {
        let catalog = Catalog::from_bytes(SAMPLE.as_bytes()).unwrap();
        let index = catalog.person_index();
        assert_eq!(index.names(), ["Jane Doe", "John Smith"]);
    }

    #[test]
    fn test_missing_required_columns() {
        let err = Catalog::from_bytes(b"file,name\na.jpg,Jane\n").unwrap_err();
        match err {
            CatalogError::MissingColumns(cols) => assert_eq!(cols, ["image_filename"]),
            other => panic!("unexpected error: {other}"),
        }

        let err = Catalog::from_bytes(b"nationality\nBritish\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "the CSV file is missing required column(s): image_filename, name"
        );
    }

    #[test]
    fn test_empty_input_reports_missing_columns() {
        let err = Catalog::from_bytes(b"").unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumns(_)));
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let err = Catalog::from_bytes(b"image_filename,name\na.jpg,Jane,extra\n").unwrap_err();
        assert!(matches!(err, CatalogError::Csv(_)));
    }

    #[test]
    fn test_header_only() {
        let catalog = Catalog::from_bytes(b"image_filename,name\n").unwrap();
        assert!(catalog.records().is_empty());
        assert!(catalog.person_index().is_empty());
    }
}
