//! Result records and JSON Lines output
//!
//! One `ScanResult` is emitted per processed URL.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};

use crate::normalize::NormalizedUrl;
use crate::rules::Reason;
use crate::score::Label;

/// Classification of one input URL
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// URL as supplied by the caller
    pub input_url: String,

    /// Normalized components
    pub normalized: NormalizedUrl,

    /// Sum of reason weights
    pub score: u32,

    /// Label derived from the score
    pub label: Label,

    /// Triggered rules, in evaluation order
    pub reasons: Vec<Reason>,

    /// When the result was produced
    pub timestamp: DateTime<Utc>,
}

impl ScanResult {
    /// Create a result stamped with the current time
    pub fn new(
        input_url: impl Into<String>,
        normalized: NormalizedUrl,
        score: u32,
        label: Label,
        reasons: Vec<Reason>,
    ) -> Self {
        Self {
            input_url: input_url.into(),
            normalized,
            score,
            label,
            reasons,
            timestamp: Utc::now(),
        }
    }

    /// Serialize to a single-line JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Write a result as one JSON line and flush
pub fn write_json_line<W: Write>(writer: &mut W, result: &ScanResult) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, result)?;
    writer.write_all(b"\n")?;
    writer.flush()
}
