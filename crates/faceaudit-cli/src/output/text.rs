use super::caption;
use anyhow::Result;
use faceaudit_core::{CellStatus, PersonSummary, RenderModel, RootKind};
use std::io::Write;

pub(super) fn people<W: Write>(out: &mut W, people: &[String]) -> Result<()> {
    for name in people {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

pub(super) fn person<W: Write>(out: &mut W, model: &RenderModel) -> Result<()> {
    writeln!(out, "== Images and attributes for: {} ==", model.person)?;
    writeln!(
        out,
        "{}: {}",
        model.status.severity().label(),
        model.status.message(&model.person)
    )?;
    if model.skipped_rows > 0 {
        writeln!(
            out,
            "warning: skipped {} row(s) for this person with no image_filename.",
            model.skipped_rows
        )?;
    }

    for (i, row) in model.rows.iter().enumerate() {
        writeln!(out, "---")?;
        writeln!(out, "[{}] {}", i + 1, row.image_filename)?;
        cell(out, "Original image", &row.original, RootKind::Original, &model.person)?;
        cell(out, "Face image", &row.face, RootKind::Face, &model.person)?;

        writeln!(out, "  Attributes:")?;
        let width = row
            .attributes
            .iter()
            .map(|a| a.attribute.chars().count())
            .max()
            .unwrap_or(0)
            .max("Attribute".len());
        writeln!(out, "    {:<width$}  Value", "Attribute")?;
        for attr in &row.attributes {
            writeln!(out, "    {:<width$}  {}", attr.attribute, attr.value)?;
        }
    }
    Ok(())
}

fn cell<W: Write>(
    out: &mut W,
    label: &str,
    status: &CellStatus,
    root: RootKind,
    person: &str,
) -> Result<()> {
    match status {
        CellStatus::Found { path, filename } => {
            writeln!(out, "  {label}: {}", path.display())?;
            writeln!(out, "    {}", caption(path, filename))?;
        }
        other => {
            let message = other.message(root, person).unwrap_or_default();
            writeln!(out, "  {label}: {}: {message}", other.severity().label())?;
        }
    }
    Ok(())
}

pub(super) fn summary<W: Write>(out: &mut W, summary: &[PersonSummary]) -> Result<()> {
    let width = summary
        .iter()
        .map(|s| s.person.chars().count())
        .max()
        .unwrap_or(0)
        .max("Person".len());

    writeln!(
        out,
        "{:<width$}  {:>7}  {:>9}  {:>9}  {:>10}  {:>10}  Status",
        "Person", "Records", "Orig ok", "Orig miss", "Face ok", "Face miss"
    )?;
    for s in summary {
        writeln!(
            out,
            "{:<width$}  {:>7}  {:>9}  {:>9}  {:>10}  {:>10}  {}",
            s.person,
            s.records,
            s.originals_found,
            s.originals_missing,
            s.faces_found,
            s.faces_missing,
            s.status_label(),
        )?;
    }

    let complete = summary.iter().filter(|s| s.is_complete()).count();
    writeln!(out, "{complete} of {} people complete", summary.len())?;
    Ok(())
}
