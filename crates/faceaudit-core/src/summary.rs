//! Dataset-wide audit: one render per person, reduced to counts.

use crate::catalog::Catalog;
use crate::listing::DirectoryListing;
use crate::render::{render_person, Roots};
use crate::types::{CellStatus, PersonStatus, RowView};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonSummary {
    pub person: String,
    pub status: PersonStatus,
    pub records: usize,
    pub skipped_rows: usize,
    pub originals_found: usize,
    pub originals_missing: usize,
    pub faces_found: usize,
    /// Face cells that should have an image but do not. Cells of an
    /// unconfigured face root are not counted.
    pub faces_missing: usize,
}

impl PersonSummary {
    pub fn is_complete(&self) -> bool {
        matches!(self.status, PersonStatus::Ready { .. })
            && self.originals_missing == 0
            && self.faces_missing == 0
    }

    /// One-cell status for tables: "ok", "incomplete", or the person-level
    /// message when the images could not be checked at all.
    pub fn status_label(&self) -> String {
        match &self.status {
            PersonStatus::Ready { .. } if self.is_complete() => "ok".to_string(),
            PersonStatus::Ready { .. } => "incomplete".to_string(),
            other => other.message(&self.person),
        }
    }
}

/// Render every indexed person, in display order, and count the outcomes.
pub fn summarize<L>(listing: &L, catalog: &Catalog, roots: &Roots) -> Vec<PersonSummary>
where
    L: DirectoryListing + ?Sized,
{
    catalog
        .person_index()
        .names()
        .iter()
        .map(|name| {
            let model = render_person(listing, catalog, roots, name);
            let count = |pred: fn(&RowView) -> bool| model.rows.iter().filter(|r| pred(r)).count();
            PersonSummary {
                records: model.rows.len(),
                skipped_rows: model.skipped_rows,
                originals_found: count(|r| r.original.is_found()),
                originals_missing: count(|r| !r.original.is_found()),
                faces_found: count(|r| r.face.is_found()),
                faces_missing: count(|r| !r.face.is_found() && r.face != CellStatus::NotConfigured),
                person: model.person.clone(),
                status: model.status.clone(),
            }
        })
        .collect()
}
