//! Error types for urwarden
//!
//! Input errors (`ParseError`, `InputError`) are reported per URL and never
//! abort a batch. `BlocklistError` and `ConfigError` are internal failures.
//! Messages do not repeat their source; print with the error chain.

use std::io;
use std::path::PathBuf;

/// Failure to normalize a single URL
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid scheme {0:?}: only http/https are allowed")]
    InvalidScheme(String),

    #[error("invalid url: host is empty")]
    EmptyHost,

    #[error("malformed url: {0}")]
    Malformed(url::ParseError),
}

/// Failure to read a blocklist file that exists
#[derive(Debug, thiserror::Error)]
pub enum BlocklistError {
    #[error("error reading blocklist {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Invalid or unreadable configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("suspicious threshold ({suspicious}) must not exceed malicious threshold ({malicious})")]
    InvertedThresholds { malicious: u32, suspicious: u32 },

    #[error("jobs must be at least 1")]
    ZeroJobs,
}

/// Failure to collect URLs from a file or stdin
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read URL list")]
    Read(#[from] io::Error),

    #[error("line {line} exceeds {max} bytes")]
    LineTooLong { line: usize, max: usize },
}
