//! Configuration loading for urwarden
//!
//! TOML file with embedded defaults, then `URWARDEN_*` environment
//! overrides. Command-line flags are applied on top by the binary.

use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;
use crate::score::{Thresholds, DEFAULT_MALICIOUS_THRESHOLD, DEFAULT_SUSPICIOUS_THRESHOLD};

pub const ENV_BLOCKLIST_PATH: &str = "URWARDEN_BLOCKLIST_PATH";
pub const ENV_MALICIOUS_THRESHOLD: &str = "URWARDEN_MALICIOUS_THRESHOLD";
pub const ENV_SUSPICIOUS_THRESHOLD: &str = "URWARDEN_SUSPICIOUS_THRESHOLD";
pub const ENV_VERBOSE: &str = "URWARDEN_VERBOSE";
pub const ENV_JOBS: &str = "URWARDEN_JOBS";

/// Blocklist source
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlocklistConfig {
    /// Path to the domain list (`~/` is expanded)
    pub path: String,
}

impl Default for BlocklistConfig {
    fn default() -> Self {
        Self {
            path: "data/blocklist.txt".to_string(),
        }
    }
}

/// Score cut-offs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub malicious_threshold: u32,
    pub suspicious_threshold: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            malicious_threshold: DEFAULT_MALICIOUS_THRESHOLD,
            suspicious_threshold: DEFAULT_SUSPICIOUS_THRESHOLD,
        }
    }
}

/// URL list reading limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Longest accepted line in a URL list, in bytes
    pub max_line_length: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_line_length: 1024 * 1024,
        }
    }
}

/// Execution settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Worker threads for batch classification
    pub jobs: usize,

    /// Debug logging
    pub verbose: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            jobs: 1,
            verbose: false,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub blocklist: BlocklistConfig,
    pub scoring: ScoringConfig,
    pub input: InputConfig,
    pub runtime: RuntimeConfig,
}

impl Config {
    /// Config files searched by `load`, in order
    pub fn search_paths() -> Vec<PathBuf> {
        [
            // User-specific config
            dirs::home_dir().map(|p| p.join(".config/urwarden/config.toml")),
            // System-wide config
            Some(PathBuf::from("/etc/urwarden/config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from the first config file found, or use defaults
    pub fn load() -> Self {
        for path in Self::search_paths() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(config) => return config,
                    Err(ConfigError::Parse(e)) => {
                        warn!("failed to parse {}, using defaults: {}", path.display(), e)
                    }
                    Err(e) => warn!("ignoring {}: {}", path.display(), e),
                }
            }
        }

        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `URWARDEN_*` overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a key lookup. Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_BLOCKLIST_PATH).filter(|v| !v.is_empty()) {
            self.blocklist.path = path;
        }
        if let Some(v) = parse_override(&lookup, ENV_MALICIOUS_THRESHOLD) {
            self.scoring.malicious_threshold = v;
        }
        if let Some(v) = parse_override(&lookup, ENV_SUSPICIOUS_THRESHOLD) {
            self.scoring.suspicious_threshold = v;
        }
        if let Some(v) = parse_override(&lookup, ENV_VERBOSE) {
            self.runtime.verbose = v;
        }
        if let Some(v) = parse_override(&lookup, ENV_JOBS) {
            self.runtime.jobs = v;
        }
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds()?;
        if self.runtime.jobs == 0 {
            return Err(ConfigError::ZeroJobs);
        }
        Ok(())
    }

    /// Validated score thresholds
    pub fn thresholds(&self) -> Result<Thresholds, ConfigError> {
        Thresholds::new(
            self.scoring.malicious_threshold,
            self.scoring.suspicious_threshold,
        )
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Blocklist path (expanded)
    pub fn blocklist_path(&self) -> PathBuf {
        Self::expand_path(&self.blocklist.path)
    }
}

fn parse_override<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = lookup(key).filter(|v| !v.is_empty())?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[blocklist]
path = "data/blocklist.txt"

[scoring]
malicious_threshold = 70
suspicious_threshold = 30

[input]
max_line_length = 1048576

[runtime]
jobs = 1
verbose = false
"#;
