//! In-memory domain blocklist
//!
//! Entries are kept in a `HashSet` behind an `RwLock<Arc<_>>`. A load builds
//! a complete new generation without holding the lock, then swaps the `Arc`
//! in one short write. Lookups clone the current `Arc` and run lock-free, so
//! a reader always sees one whole generation.

use log::{debug, info};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{canonical_host, normalize_domain};
use crate::error::BlocklistError;

/// One immutable set of blocked domains
type Generation = Arc<HashSet<String>>;

/// Thread-safe domain blocklist with exact and subdomain matching
#[derive(Debug)]
pub struct BlocklistIndex {
    domains: RwLock<Generation>,
    path: RwLock<PathBuf>,
}

impl BlocklistIndex {
    /// Create an empty index that will load from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            domains: RwLock::new(Arc::new(HashSet::new())),
            path: RwLock::new(path.into()),
        }
    }

    /// Build an index from domain strings (no backing file)
    pub fn from_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: HashSet<String> = domains
            .into_iter()
            .map(|d| normalize_domain(d.as_ref()))
            .filter(|d| !d.is_empty())
            .collect();

        Self {
            domains: RwLock::new(Arc::new(set)),
            path: RwLock::new(PathBuf::new()),
        }
    }

    /// Load the blocklist from the stored path, replacing all entries.
    ///
    /// A missing file yields an empty index. On any other I/O error the
    /// previously loaded entries are kept.
    pub fn load(&self) -> Result<(), BlocklistError> {
        let set = read_generation(&self.path())?;
        self.swap(set);
        Ok(())
    }

    /// Load a different file and make it the stored path.
    ///
    /// The path only changes when the load succeeds, so a failed switch
    /// leaves both the entries and later reloads on the old file.
    pub fn load_from(&self, path: impl Into<PathBuf>) -> Result<(), BlocklistError> {
        let path = path.into();
        let set = read_generation(&path)?;
        *self.path.write().unwrap_or_else(PoisonError::into_inner) = path;
        self.swap(set);
        Ok(())
    }

    /// Reload from the stored path
    pub fn reload(&self) -> Result<(), BlocklistError> {
        self.load()
    }

    /// Check whether `host` or one of its parent domains is blocked.
    ///
    /// Returns the matching entry. An exact match wins over a parent-domain
    /// match; among parent domains the most specific one is returned.
    pub fn contains(&self, host: &str) -> Option<String> {
        let host = canonical_host(host);
        if host.is_empty() {
            return None;
        }

        let domains = self.snapshot();

        if domains.contains(host.as_str()) {
            return Some(host);
        }

        // host ends with "." + entry  <=>  entry is the text after one of host's dots
        host.match_indices('.')
            .map(|(i, _)| &host[i + 1..])
            .find(|parent| domains.contains(*parent))
            .map(str::to_string)
    }

    /// Number of distinct domains currently loaded
    pub fn size(&self) -> usize {
        self.snapshot().len()
    }

    /// Whether the index currently has no entries
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Path used by `load` and `reload`
    pub fn path(&self) -> PathBuf {
        self.path
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current generation; stays valid across later reloads
    fn snapshot(&self) -> Generation {
        Arc::clone(&self.domains.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn swap(&self, set: HashSet<String>) {
        let count = set.len();
        *self.domains.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(set);
        info!("loaded {} domains into blocklist", count);
    }
}

impl Default for BlocklistIndex {
    fn default() -> Self {
        Self::new(PathBuf::new())
    }
}

/// Read one generation from `path`; a missing file is an empty list
fn read_generation(path: &Path) -> Result<HashSet<String>, BlocklistError> {
    debug!("loading blocklist from: {}", path.display());

    match File::open(path) {
        Ok(file) => parse_reader(BufReader::new(file)).map_err(|source| BlocklistError::Read {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("blocklist file not found: {}", path.display());
            Ok(HashSet::new())
        }
        Err(source) => Err(BlocklistError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parse blocklist lines: `domain` or `<anything> domain`.
///
/// Lines are decoded lossily, so stray non-UTF-8 bytes (a Latin-1 comment,
/// say) never fail the load.
fn parse_reader<R: BufRead>(mut reader: R) -> io::Result<HashSet<String>> {
    let mut set = HashSet::new();
    let mut line_count = 0usize;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_count += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Hosts-file lines carry the domain in the last column
        let Some(token) = line.split_whitespace().last() else {
            continue;
        };

        let domain = normalize_domain(token);
        if !domain.is_empty() {
            set.insert(domain);
        }
    }

    debug!("{} blocklist lines processed", line_count);
    Ok(set)
}

/// Load a blocklist file into a fresh index
pub fn load_file(path: &Path) -> Result<BlocklistIndex, BlocklistError> {
    let index = BlocklistIndex::new(path);
    index.load()?;
    Ok(index)
}
