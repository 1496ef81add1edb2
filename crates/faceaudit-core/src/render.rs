//! The per-person reconciliation pipeline.
//!
//! `render_person` is a pure function of the catalog, the opened roots and
//! the directory listing: the same inputs always yield the same
//! [`RenderModel`].

use crate::catalog::Catalog;
use crate::listing::DirectoryListing;
use crate::matcher::{self, PersonDir};
use crate::resolver::{ImageRoot, RootError, RootKind};
use crate::types::{AttributeRow, CellStatus, PersonStatus, RenderModel, RowView};
use std::path::Path;

/// State of the optional face-crop root.
#[derive(Debug)]
pub enum FaceRoot {
    NotConfigured,
    /// A path was given but could not be opened.
    Invalid(RootError),
    Open(ImageRoot),
}

/// The two image roots of a dataset.
#[derive(Debug)]
pub struct Roots {
    pub original: ImageRoot,
    pub face: FaceRoot,
}

impl Roots {
    /// Open both roots.
    ///
    /// The original root is required and any problem with it is returned as
    /// an error. Problems with the face root are kept in [`FaceRoot::Invalid`]
    /// so the originals can still be shown. An empty face path counts as not
    /// configured.
    pub fn open<L>(listing: &L, original: &Path, face: Option<&Path>) -> Result<Self, RootError>
    where
        L: DirectoryListing + ?Sized,
    {
        let original = ImageRoot::open(listing, RootKind::Original, original)?;

        let face = match face.filter(|p| !p.as_os_str().is_empty()) {
            None => FaceRoot::NotConfigured,
            Some(path) => match ImageRoot::open(listing, RootKind::Face, path) {
                Ok(root) => FaceRoot::Open(root),
                Err(e) => {
                    tracing::warn!(error = %e, "face root unusable; showing originals only");
                    FaceRoot::Invalid(e)
                }
            },
        };

        Ok(Self { original, face })
    }
}

/// Where a person's folder stands in one root.
enum Folder {
    Resolved(PersonDir),
    Missing,
    Unreadable(String),
    /// The whole root is unusable; every cell gets the same status.
    Unavailable(CellStatus),
}

impl Folder {
    fn locate<L>(listing: &L, root: &ImageRoot, person: &str) -> Self
    where
        L: DirectoryListing + ?Sized,
    {
        let Some(path) = root.resolve_person(person) else {
            tracing::debug!(root = root.kind().label(), person, "no person folder");
            return Folder::Missing;
        };
        match PersonDir::scan(listing, &path) {
            Ok(dir) => Folder::Resolved(dir),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not list person folder");
                Folder::Unreadable(e.to_string())
            }
        }
    }

    fn cell(&self, filename: &str) -> CellStatus {
        match self {
            Folder::Resolved(dir) => matcher::match_record(Some(dir), filename).into(),
            Folder::Missing => matcher::match_record(None, filename).into(),
            Folder::Unreadable(reason) => CellStatus::DirectoryUnreadable {
                reason: reason.clone(),
            },
            Folder::Unavailable(status) => status.clone(),
        }
    }
}

/// Reconcile every CSV row of `selected` with both image roots.
///
/// `selected` may be any casing of a person name; the model carries the
/// canonical spelling when the CSV knows the person.
pub fn render_person<L>(listing: &L, catalog: &Catalog, roots: &Roots, selected: &str) -> RenderModel
where
    L: DirectoryListing + ?Sized,
{
    let person = catalog
        .person_index()
        .canonical(selected)
        .unwrap_or(selected)
        .to_string();

    let rows = catalog.rows_for(&person);
    let mut model = RenderModel {
        person,
        status: PersonStatus::NoData,
        skipped_rows: rows.skipped,
        rows: Vec::new(),
    };

    if rows.records.is_empty() {
        tracing::info!(person = %model.person, "no CSV rows for person");
        return model;
    }

    let original = match Folder::locate(listing, &roots.original, &model.person) {
        Folder::Missing => {
            model.status = PersonStatus::OriginalFolderMissing;
            return model;
        }
        Folder::Unreadable(reason) => {
            model.status = PersonStatus::OriginalFolderUnreadable { reason };
            return model;
        }
        folder => folder,
    };

    let face = match &roots.face {
        FaceRoot::NotConfigured => Folder::Unavailable(CellStatus::NotConfigured),
        FaceRoot::Invalid(RootError::NotADirectory { path, .. }) => {
            Folder::Unavailable(CellStatus::RootInvalid { path: path.clone() })
        }
        FaceRoot::Invalid(RootError::Unreadable { path, source, .. }) => {
            Folder::Unavailable(CellStatus::RootUnreadable {
                path: path.clone(),
                reason: source.to_string(),
            })
        }
        FaceRoot::Open(root) => Folder::locate(listing, root, &model.person),
    };

    model.rows = rows
        .records
        .iter()
        .map(|record| RowView {
            image_filename: record.image_filename.clone(),
            original: original.cell(&record.image_filename),
            face: face.cell(&record.image_filename),
            attributes: record
                .attributes
                .iter()
                .map(|(attribute, value)| AttributeRow {
                    attribute: attribute.clone(),
                    value: value.clone(),
                })
                .collect(),
        })
        .collect();
    model.status = PersonStatus::Ready {
        image_count: model.rows.len(),
    };

    tracing::info!(
        person = %model.person,
        rows = model.rows.len(),
        originals_found = model.rows.iter().filter(|r| r.original.is_found()).count(),
        faces_found = model.rows.iter().filter(|r| r.face.is_found()).count(),
        "rendered person"
    );

    model
}
