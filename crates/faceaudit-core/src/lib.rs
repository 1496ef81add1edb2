//! faceaudit-core — Record-to-file reconciliation for face attribute datasets.
//!
//! Matches rows of an attribute CSV to image files laid out as
//! `<root>/<person>/<image>` under an original root and an optional
//! face-crop root. Person names and filenames are compared through
//! [`FoldedKey`], so casing differences between the CSV and the disk
//! never cause a miss.

pub mod cache;
pub mod catalog;
pub mod index;
pub mod key;
pub mod listing;
pub mod matcher;
pub mod render;
pub mod resolver;
pub mod summary;
pub mod types;

pub use cache::CsvCache;
pub use catalog::{AttributeRecord, Catalog, CatalogError};
pub use index::NameIndex;
pub use key::FoldedKey;
pub use listing::{DirectoryEntry, DirectoryListing, EntryKind, FsListing, MemoryListing};
pub use matcher::{MatchResult, PersonDir};
pub use render::{render_person, FaceRoot, Roots};
pub use resolver::{ImageRoot, RootError, RootKind};
pub use summary::{summarize, PersonSummary};
pub use types::{AttributeRow, CellStatus, PersonStatus, RenderModel, RowView, Severity};

/// Column holding the image filename of each record.
pub const IMAGE_FILENAME_COLUMN: &str = "image_filename";

/// Column holding the person name of each record.
pub const NAME_COLUMN: &str = "name";

