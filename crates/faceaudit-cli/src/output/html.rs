//! Self-contained HTML page. Images are linked with `file://` URLs, so the
//! page is meant to be opened on the machine that holds the dataset.

use super::{absolute, caption};
use crate::config::Config;
use anyhow::Result;
use faceaudit_core::{CellStatus, PersonSummary, RenderModel, RootKind, Severity};
use std::io::Write;
use std::path::Path;

const STYLE: &str = "\
body{font-family:sans-serif;margin:1.5em;}
.row{display:grid;grid-template-columns:1fr 1fr 2fr;gap:1em;border-top:1px solid #ccc;padding:1em 0;}
.cell img{max-width:100%;}
.caption{color:#555;font-size:.85em;}
.info{background:#e8f0fe;padding:.5em;}
.warning{background:#fff4e5;padding:.5em;}
.error{background:#fde8e8;padding:.5em;}
table{border-collapse:collapse;width:100%;}
td,th{border:1px solid #ddd;padding:.25em .5em;text-align:left;}";

pub(super) fn people<W: Write>(out: &mut W, config: &Config, people: &[String]) -> Result<()> {
    header(out, "People", config)?;
    writeln!(out, "<ul>")?;
    for name in people {
        writeln!(out, "<li>{}</li>", escape(name))?;
    }
    writeln!(out, "</ul>")?;
    footer(out)
}

pub(super) fn person<W: Write>(out: &mut W, config: &Config, model: &RenderModel) -> Result<()> {
    header(
        out,
        &format!("Images and attributes for: {}", model.person),
        config,
    )?;
    notice(out, model.status.severity(), &model.status.message(&model.person))?;
    if model.skipped_rows > 0 {
        notice(
            out,
            Severity::Warning,
            &format!(
                "Skipped {} row(s) for this person with no image_filename.",
                model.skipped_rows
            ),
        )?;
    }

    for row in &model.rows {
        writeln!(out, "<div class=\"row\">")?;
        cell(out, "Original Image", &row.original, RootKind::Original, &model.person)?;
        cell(out, "Face Image", &row.face, RootKind::Face, &model.person)?;

        writeln!(out, "<div class=\"cell\"><div class=\"caption\">Attributes</div>")?;
        writeln!(out, "<table><tr><th>Attribute</th><th>Value</th></tr>")?;
        for attr in &row.attributes {
            writeln!(
                out,
                "<tr><td>{}</td><td>{}</td></tr>",
                escape(&attr.attribute),
                escape(&attr.value)
            )?;
        }
        writeln!(out, "</table></div>")?;
        writeln!(out, "</div>")?;
    }
    footer(out)
}

pub(super) fn summary<W: Write>(out: &mut W, config: &Config, summary: &[PersonSummary]) -> Result<()> {
    header(out, "Dataset summary", config)?;
    writeln!(
        out,
        "<table><tr><th>Person</th><th>Records</th><th>Originals found</th>\
         <th>Originals missing</th><th>Faces found</th><th>Faces missing</th><th>Status</th></tr>"
    )?;
    for s in summary {
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&s.person),
            s.records,
            s.originals_found,
            s.originals_missing,
            s.faces_found,
            s.faces_missing,
            escape(&s.status_label())
        )?;
    }
    writeln!(out, "</table>")?;
    footer(out)
}

fn header<W: Write>(out: &mut W, title: &str, config: &Config) -> Result<()> {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html><head><meta charset=\"utf-8\">")?;
    writeln!(out, "<title>Face Attribute Viewer: {}</title>", escape(title))?;
    writeln!(out, "<style>{STYLE}</style></head><body>")?;
    writeln!(out, "<h1>{}</h1>", escape(title))?;
    writeln!(
        out,
        "<p class=\"caption\">CSV: {} &middot; originals: {} &middot; faces: {} &middot; generated {}</p>",
        escape(&config.csv.display().to_string()),
        escape(&config.original_dir.display().to_string()),
        config
            .face_dir
            .as_ref()
            .map(|p| escape(&p.display().to_string()))
            .unwrap_or_else(|| "not provided".to_string()),
        chrono::Utc::now().to_rfc3339()
    )?;
    Ok(())
}

fn footer<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "</body></html>")?;
    Ok(())
}

fn notice<W: Write>(out: &mut W, severity: Severity, message: &str) -> Result<()> {
    writeln!(
        out,
        "<p class=\"{}\">{}</p>",
        severity.label(),
        escape(message)
    )?;
    Ok(())
}

fn cell<W: Write>(
    out: &mut W,
    label: &str,
    status: &CellStatus,
    root: RootKind,
    person: &str,
) -> Result<()> {
    writeln!(out, "<div class=\"cell\"><div class=\"caption\">{label}</div>")?;
    match status {
        CellStatus::Found { path, filename } => {
            writeln!(
                out,
                "<img src=\"{}\" alt=\"{}\"><div class=\"caption\">{}</div>",
                file_url(&absolute(path)),
                escape(filename),
                escape(&caption(path, filename))
            )?;
        }
        other => {
            let message = other.message(root, person).unwrap_or_default();
            notice(out, other.severity(), &message)?;
        }
    }
    writeln!(out, "</div>")?;
    Ok(())
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `file://` URL with every byte outside the unreserved set percent-encoded.
fn file_url(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    let mut url = String::from("file://");
    if !raw.starts_with('/') {
        url.push('/');
    }
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' | b':' => {
                url.push(byte as char)
            }
            _ => url.push_str(&format!("%{byte:02X}")),
        }
    }
    url
}
