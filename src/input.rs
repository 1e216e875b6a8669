//! URL collection from arguments, files, or stdin
//!
//! List input is one URL per line. Blank lines and `#` comments are skipped
//! and duplicates are dropped, keeping the first occurrence.

use log::debug;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::InputError;

/// Where URLs come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSource<'a> {
    /// Positional command-line arguments
    Args(&'a [String]),

    /// Standard input (`--input -`)
    Stdin,

    /// A file of URLs
    File(&'a Path),
}

impl<'a> UrlSource<'a> {
    /// Pick the source: `input` wins over `args`; `-` means stdin
    pub fn select(args: &'a [String], input: Option<&'a str>) -> Self {
        match input.map(str::trim) {
            None | Some("") => UrlSource::Args(args),
            Some("-") => UrlSource::Stdin,
            Some(path) => UrlSource::File(Path::new(path)),
        }
    }
}

/// Collect URLs from the given source
pub fn collect_urls(source: UrlSource<'_>, max_line_length: usize) -> Result<Vec<String>, InputError> {
    match source {
        UrlSource::Args(args) => Ok(dedupe(args.iter().cloned())),
        UrlSource::Stdin => read_urls(io::stdin().lock(), max_line_length),
        UrlSource::File(path) => {
            let file = File::open(path).map_err(|source| InputError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            read_urls(BufReader::new(file), max_line_length)
        }
    }
}

/// Read one URL per line from a reader
pub fn read_urls<R: BufRead>(reader: R, max_line_length: usize) -> Result<Vec<String>, InputError> {
    let mut out = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.len() > max_line_length {
            return Err(InputError::LineTooLong {
                line: i + 1,
                max: max_line_length,
            });
        }

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        out.push(line.to_string());
    }

    debug!("read {} URLs from input", out.len());
    Ok(dedupe(out))
}

/// Remove duplicates while preserving order
pub fn dedupe<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
