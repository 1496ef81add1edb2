//! Presentation of render models: terminal text, JSON and a standalone HTML page.

mod html;
mod text;

use crate::config::{Config, OutputFormat};
use anyhow::Result;
use chrono::{DateTime, Utc};
use faceaudit_core::{PersonSummary, RenderModel};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// JSON envelope shared by every command.
#[derive(Serialize)]
struct Report<'a, T: Serialize> {
    generated_at: DateTime<Utc>,
    csv: &'a Path,
    original_dir: &'a Path,
    face_dir: Option<&'a Path>,
    #[serde(flatten)]
    body: T,
}

impl<'a, T: Serialize> Report<'a, T> {
    fn new(config: &'a Config, body: T) -> Self {
        Self {
            generated_at: Utc::now(),
            csv: &config.csv,
            original_dir: &config.original_dir,
            face_dir: config.face_dir.as_deref(),
            body,
        }
    }
}

#[derive(Serialize)]
struct PeopleBody<'a> {
    people: &'a [String],
}

#[derive(Serialize)]
struct PersonBody<'a> {
    view: &'a RenderModel,
}

#[derive(Serialize)]
struct SummaryBody<'a> {
    summary: &'a [PersonSummary],
}

fn write_json<W: Write, T: Serialize>(out: &mut W, report: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_people<W: Write>(out: &mut W, config: &Config, people: &[String]) -> Result<()> {
    match config.format {
        OutputFormat::Text => text::people(out, people),
        OutputFormat::Json => write_json(out, &Report::new(config, PeopleBody { people })),
        OutputFormat::Html => html::people(out, config, people),
    }
}

pub fn write_person<W: Write>(out: &mut W, config: &Config, model: &RenderModel) -> Result<()> {
    match config.format {
        OutputFormat::Text => text::person(out, model),
        OutputFormat::Json => write_json(out, &Report::new(config, PersonBody { view: model })),
        OutputFormat::Html => html::person(out, config, model),
    }
}

pub fn write_summary<W: Write>(out: &mut W, config: &Config, summary: &[PersonSummary]) -> Result<()> {
    match config.format {
        OutputFormat::Text => text::summary(out, summary),
        OutputFormat::Json => write_json(out, &Report::new(config, SummaryBody { summary })),
        OutputFormat::Html => html::summary(out, config, summary),
    }
}

/// Caption for a found image: on-disk filename plus pixel size when the
/// header can be read.
fn caption(path: &Path, filename: &str) -> String {
    match image::image_dimensions(path) {
        Ok((w, h)) => format!("{filename} ({w}x{h})"),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "could not read image header");
            filename.to_string()
        }
    }
}

/// Absolute form of `path` for links, falling back to the path as given.
fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use faceaudit_core::{CellStatus, PersonStatus, RowView};

    pub(crate) fn config(format: OutputFormat) -> Config {
        Config {
            csv: PathBuf::from("/data/attrs.csv"),
            original_dir: PathBuf::from("/data/original"),
            face_dir: None,
            format,
        }
    }

    pub(crate) fn model() -> RenderModel {
        RenderModel {
            person: "John Smith".into(),
            status: PersonStatus::Ready { image_count: 2 },
            skipped_rows: 1,
            rows: vec![
                RowView {
                    image_filename: "IMG_001.JPG".into(),
                    original: CellStatus::Found {
                        path: PathBuf::from("/data/original/John Smith/img_001.jpg"),
                        filename: "img_001.jpg".into(),
                    },
                    face: CellStatus::NotConfigured,
                    attributes: vec![faceaudit_core::AttributeRow {
                        attribute: "nationality".into(),
                        value: "British".into(),
                    }],
                },
                RowView {
                    image_filename: "missing.jpg".into(),
                    original: CellStatus::FileMissing,
                    face: CellStatus::NotConfigured,
                    attributes: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_json_person_report() {
        let mut out = Vec::new();
        write_person(&mut out, &config(OutputFormat::Json), &model()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert!(value["generated_at"].is_string());
        assert_eq!(value["csv"], "/data/attrs.csv");
        assert!(value["face_dir"].is_null());
        assert_eq!(value["view"]["person"], "John Smith");
        assert_eq!(value["view"]["status"]["kind"], "ready");
        assert_eq!(value["view"]["rows"][0]["original"]["status"], "found");
        assert_eq!(value["view"]["rows"][1]["original"]["status"], "file_missing");
        assert_eq!(value["view"]["rows"][1]["face"]["status"], "not_configured");
    }

    #[test]
    fn test_json_people_report() {
        let mut out = Vec::new();
        let people = vec!["Jane Doe".to_string(), "John Smith".to_string()];
        write_people(&mut out, &config(OutputFormat::Json), &people).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["people"], serde_json::json!(["Jane Doe", "John Smith"]));
    }

    #[test]
    fn test_caption_without_readable_header() {
        assert_eq!(caption(Path::new("/definitely/not/here.jpg"), "here.jpg"), "here.jpg");
    }
}
