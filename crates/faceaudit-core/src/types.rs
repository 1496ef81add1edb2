use crate::matcher::MatchResult;
use crate::resolver::RootKind;
use serde::Serialize;
use std::path::PathBuf;

/// How prominently a status should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Lowercase name, used as the text prefix and the HTML class.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Everything needed to display one person: header status plus one row per record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    /// Display spelling of the selected person.
    pub person: String,
    pub status: PersonStatus,
    /// Rows for this person dropped for lacking an `image_filename`.
    pub skipped_rows: usize,
    /// Empty unless `status` is [`PersonStatus::Ready`].
    pub rows: Vec<RowView>,
}

impl RenderModel {
    pub fn is_ready(&self) -> bool {
        matches!(self.status, PersonStatus::Ready { .. })
    }
}

/// Person-level outcome. Anything but `Ready` suppresses the image rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PersonStatus {
    Ready { image_count: usize },
    NoData,
    OriginalFolderMissing,
    OriginalFolderUnreadable { reason: String },
}

impl PersonStatus {
    pub fn severity(&self) -> Severity {
        match self {
            PersonStatus::Ready { .. } => Severity::Info,
            PersonStatus::NoData => Severity::Warning,
            PersonStatus::OriginalFolderMissing | PersonStatus::OriginalFolderUnreadable { .. } => {
                Severity::Error
            }
        }
    }

    pub fn message(&self, person: &str) -> String {
        match self {
            PersonStatus::Ready { image_count: 1 } => "Found 1 image for this person.".to_string(),
            PersonStatus::Ready { image_count } => {
                format!("Found {image_count} images for this person.")
            }
            PersonStatus::NoData => format!("No data found for '{person}' in the CSV file."),
            PersonStatus::OriginalFolderMissing => format!(
                "Originals folder not found: could not find a subfolder for '{person}' \
                 in the original directory (checked case-insensitively)."
            ),
            PersonStatus::OriginalFolderUnreadable { reason } => {
                format!("Could not read the originals folder for '{person}': {reason}")
            }
        }
    }
}

/// One record with its two image cells and attribute table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub image_filename: String,
    pub original: CellStatus,
    pub face: CellStatus,
    pub attributes: Vec<AttributeRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeRow {
    pub attribute: String,
    pub value: String,
}

/// Outcome for one (record, image root) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CellStatus {
    Found { path: PathBuf, filename: String },
    FileMissing,
    DirectoryMissing,
    DirectoryUnreadable { reason: String },
    /// The root path was given but is not a directory.
    RootInvalid { path: PathBuf },
    /// The root path is a directory that could not be listed.
    RootUnreadable { path: PathBuf, reason: String },
    /// No root path was given.
    NotConfigured,
}

impl CellStatus {
    pub fn is_found(&self) -> bool {
        matches!(self, CellStatus::Found { .. })
    }

    pub fn severity(&self) -> Severity {
        match self {
            CellStatus::Found { .. } | CellStatus::NotConfigured => Severity::Info,
            _ => Severity::Warning,
        }
    }

    /// Placeholder text for a cell without an image. `None` when found.
    pub fn message(&self, root: RootKind, person: &str) -> Option<String> {
        let title = root.title();
        let root = root.label();
        match self {
            CellStatus::Found { .. } => None,
            CellStatus::FileMissing => Some(format!("File not found in {root} folder.")),
            CellStatus::DirectoryMissing => Some(format!(
                "Folder for '{person}' not found in {root} directory."
            )),
            CellStatus::DirectoryUnreadable { reason } => Some(format!(
                "Could not read folder for '{person}' in {root} directory: {reason}"
            )),
            CellStatus::RootInvalid { path } => Some(format!(
                "{title} directory is not a valid directory: {}",
                path.display()
            )),
            CellStatus::RootUnreadable { path, reason } => Some(format!(
                "Could not read {root} directory {}: {reason}",
                path.display()
            )),
            CellStatus::NotConfigured => Some(format!("No {root} image directory provided.")),
        }
    }
}

impl From<MatchResult> for CellStatus {
    fn from(result: MatchResult) -> Self {
        match result {
            MatchResult::Found(path) => {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                CellStatus::Found { path, filename }
            }
            MatchResult::FileMissing => CellStatus::FileMissing,
            MatchResult::DirectoryMissing => CellStatus::DirectoryMissing,
        }
    }
}
