use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use faceaudit_core::{render_person, summarize, Catalog, CsvCache, FsListing, Roots};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod config;
mod output;
mod session;

use config::{Config, Layer, OutputFormat, PREPARE_GUIDE};

#[derive(Parser)]
#[command(
    name = "faceaudit",
    about = "Inspect face images, their face crops and attribute labels side by side",
    long_about = "Inspect face images, their face crops and attribute labels side by side.\n\
                  Person names and filenames are matched without regard to case.",
    after_long_help = PREPARE_GUIDE
)]
struct Cli {
    /// Attributes CSV (must contain `image_filename` and `name`)
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// Top-level folder of the original images
    #[arg(long, global = true)]
    original_dir: Option<PathBuf>,

    /// Top-level folder of the face crops (optional)
    #[arg(long, global = true)]
    face_dir: Option<PathBuf>,

    /// TOML config file (default: $XDG_CONFIG_HOME/faceaudit/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the people found in the CSV
    People,
    /// Show every image and attribute table for one person
    Show {
        /// Person name, any casing (default: first name in the list)
        person: Option<String>,
    },
    /// Check every person and report found/missing images per folder
    Summary,
    /// Pick people interactively; the CSV is re-read on every render
    Session,
}

/// Open the image roots, then load the CSV through `cache`.
///
/// The original root is checked first so a bad path is reported before any
/// CSV parsing.
pub(crate) fn load_inputs(cache: &mut CsvCache, config: &Config) -> Result<(Roots, Arc<Catalog>)> {
    let roots = Roots::open(&FsListing, &config.original_dir, config.face_dir.as_deref())?;
    let catalog = cache.load_path(&config.csv)?;
    Ok((roots, catalog))
}

/// Render a one-shot command into memory.
///
/// Nothing is written anywhere until the whole report exists, so an input
/// error never leaves a truncated or empty output file behind.
fn render(command: &Commands, config: &Config) -> Result<Vec<u8>> {
    let mut cache = CsvCache::new();
    let mut out = Vec::new();

    match command {
        Commands::People => {
            let (_, catalog) = load_inputs(&mut cache, config)?;
            output::write_people(&mut out, config, catalog.person_index().names())?;
        }
        Commands::Show { person } => {
            let (roots, catalog) = load_inputs(&mut cache, config)?;
            let person = match person {
                Some(person) => person.as_str(),
                None => match catalog.person_index().names().first() {
                    Some(first) => first.as_str(),
                    None => bail!("the CSV file has no person names"),
                },
            };
            let model = render_person(&FsListing, &catalog, &roots, person);
            output::write_person(&mut out, config, &model)?;
        }
        Commands::Summary => {
            let (roots, catalog) = load_inputs(&mut cache, config)?;
            let summary = summarize(&FsListing, &catalog, &roots);
            output::write_summary(&mut out, config, &summary)?;
        }
        Commands::Session => bail!("an interactive session cannot be rendered up front"),
    }
    Ok(out)
}

/// Destination for command output: the `-o` file or stdout.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(std::io::BufWriter::new(
            std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    })
}

fn execute(command: &Commands, config: &Config, output: Option<&Path>) -> Result<()> {
    if let Commands::Session = command {
        let mut out = open_output(output)?;
        let stdin = std::io::stdin();
        session::run(stdin.lock(), &mut out, &mut std::io::stderr(), config)?;
        out.flush()?;
        return Ok(());
    }

    let report = render(command, config)?;
    let mut out = open_output(output)?;
    out.write_all(&report)?;
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let overrides = Layer {
        csv: cli.csv,
        original_dir: cli.original_dir,
        face_dir: cli.face_dir,
        format: cli.format,
    };
    let config = Config::load(overrides, cli.config.as_deref())?;
    tracing::debug!(?config, "resolved configuration");

    execute(&cli.command, &config, cli.output.as_deref())
}
