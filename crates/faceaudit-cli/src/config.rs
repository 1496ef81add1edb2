use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Shown whenever the CSV or the original directory is not configured.
pub const PREPARE_GUIDE: &str = "\
How to prepare your data:
  1. Image directories
     - One top-level folder for the original images (e.g. original_dataset).
     - Optionally a second top-level folder for the face crops (e.g. face_dataset).
     - Inside each, one subfolder per person. Subfolder names must match the
       person's name, ignoring case.
     - Each person's images go in their subfolder. Filenames must match the
       CSV, ignoring case.
  2. CSV file
     - Must contain the `image_filename` and `name` columns.
     - Full column list: image_filename, name, nationality, occupation, gender,
       age_group, hairstyle, facial_features, accessories, expression,
       skin_tone, face_shape.";

/// Output rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

/// Settings one layer may provide. Unset fields fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layer {
    pub csv: Option<PathBuf>,
    pub original_dir: Option<PathBuf>,
    pub face_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}

impl Layer {
    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Read `FACEAUDIT_*` variables through `var`.
    pub fn from_env(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let format = match var("FACEAUDIT_FORMAT") {
            Some(v) => Some(parse_format(&v).context("invalid FACEAUDIT_FORMAT")?),
            None => None,
        };
        Ok(Self {
            csv: var("FACEAUDIT_CSV").map(PathBuf::from),
            original_dir: var("FACEAUDIT_ORIGINAL_DIR").map(PathBuf::from),
            face_dir: var("FACEAUDIT_FACE_DIR").map(PathBuf::from),
            format,
        })
    }

    /// Fill unset fields from `lower`.
    fn over(self, lower: Layer) -> Layer {
        Layer {
            csv: self.csv.or(lower.csv),
            original_dir: self.original_dir.or(lower.original_dir),
            face_dir: self.face_dir.or(lower.face_dir),
            format: self.format.or(lower.format),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub csv: PathBuf,
    pub original_dir: PathBuf,
    /// `None` when no face directory was given, or it was given as empty.
    pub face_dir: Option<PathBuf>,
    pub format: OutputFormat,
}

impl Config {
    /// Load settings: command line over environment over config file over defaults.
    ///
    /// With no explicit `config_path`, `$XDG_CONFIG_HOME/faceaudit/config.toml`
    /// is read if it exists.
    pub fn load(cli: Layer, config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => Layer::from_file(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "using default config file");
                    Layer::from_file(&path)?
                }
                None => Layer::default(),
            },
        };
        let env = Layer::from_env(|key| std::env::var(key).ok())?;
        Self::resolve(cli, env, file)
    }

    pub fn resolve(cli: Layer, env: Layer, file: Layer) -> Result<Self> {
        let merged = cli.over(env).over(file);

        let non_empty = |p: Option<PathBuf>| p.filter(|p| !p.as_os_str().is_empty());

        let (csv, original_dir) = match (non_empty(merged.csv), non_empty(merged.original_dir)) {
            (Some(csv), Some(dir)) => (csv, dir),
            (csv, _) => {
                let what = if csv.is_none() {
                    "no attributes CSV given (--csv or FACEAUDIT_CSV)"
                } else {
                    "no original image directory given (--original-dir or FACEAUDIT_ORIGINAL_DIR)"
                };
                bail!("{what}\n\n{PREPARE_GUIDE}");
            }
        };

        Ok(Self {
            csv,
            original_dir,
            face_dir: non_empty(merged.face_dir),
            format: merged.format.unwrap_or_default(),
        })
    }
}

fn parse_format(value: &str) -> Result<OutputFormat> {
    <OutputFormat as clap::ValueEnum>::from_str(value.trim(), true)
        .map_err(|e| anyhow::anyhow!("{e}"))
}

fn default_config_path() -> Option<PathBuf> {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| std::env::var("HOME").map(|home| PathBuf::from(home).join(".config")))
        .ok()?;
    Some(base.join("faceaudit").join("config.toml"))
}
