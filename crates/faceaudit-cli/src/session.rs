//! Interactive loop: pick a person, see the render, repeat.
//!
//! Every pass re-reads the CSV and re-lists the image roots, so edits made
//! on disk between prompts show up on the next render. Unchanged CSV
//! content is served from the cache instead of being parsed again.

use crate::config::Config;
use crate::{load_inputs, output};
use anyhow::Result;
use faceaudit_core::{render_person, CsvCache, FsListing};
use std::io::{BufRead, Write};

const PROMPT: &str = "person (blank = first, ? = list, q = quit)> ";

pub fn run<R, W, P>(input: R, out: &mut W, prompt: &mut P, config: &Config) -> Result<()>
where
    R: BufRead,
    W: Write,
    P: Write,
{
    let mut cache = CsvCache::new();
    let mut lines = input.lines();

    loop {
        write!(prompt, "{PROMPT}")?;
        prompt.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let choice = line.trim();
        if matches!(choice, "q" | "quit" | "exit") {
            break;
        }

        let (roots, catalog) = match load_inputs(&mut cache, config) {
            Ok(inputs) => inputs,
            Err(e) => {
                writeln!(out, "error: {e:#}")?;
                continue;
            }
        };
        let index = catalog.person_index();

        if choice == "?" {
            output::write_people(out, config, index.names())?;
            continue;
        }

        let person = if choice.is_empty() {
            match index.names().first() {
                Some(first) => first.clone(),
                None => {
                    writeln!(out, "warning: the CSV file has no person names.")?;
                    continue;
                }
            }
        } else {
            choice.to_string()
        };

        let model = render_person(&FsListing, &catalog, &roots, &person);
        output::write_person(out, config, &model)?;
    }

    tracing::debug!(cached_catalogs = cache.len(), cache_hits = cache.hits(), "session ended");
    Ok(())
}
