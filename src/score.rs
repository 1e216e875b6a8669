//! Score aggregation and labeling
//!
//! Sums the weights of triggered rules and maps the total onto a three-tier
//! label.

use serde::Serialize;
use std::fmt;

use crate::error::ConfigError;
use crate::rules::Reason;

pub const DEFAULT_MALICIOUS_THRESHOLD: u32 = 70;
pub const DEFAULT_SUSPICIOUS_THRESHOLD: u32 = 30;

/// Coarse classification of a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Benign,
    Suspicious,
    Malicious,
}

impl Label {
    pub const fn as_str(self) -> &'static str {
        match self {
            Label::Benign => "benign",
            Label::Suspicious => "suspicious",
            Label::Malicious => "malicious",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score cut-offs; `suspicious <= malicious` always holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    malicious: u32,
    suspicious: u32,
}

impl Thresholds {
    /// Create thresholds, rejecting a suspicious cut-off above the malicious one
    pub fn new(malicious: u32, suspicious: u32) -> Result<Self, ConfigError> {
        if suspicious > malicious {
            return Err(ConfigError::InvertedThresholds {
                malicious,
                suspicious,
            });
        }
        Ok(Self {
            malicious,
            suspicious,
        })
    }

    pub fn malicious(&self) -> u32 {
        self.malicious
    }

    pub fn suspicious(&self) -> u32 {
        self.suspicious
    }

    /// Map a total score to a label
    pub fn label_of(&self, score: u32) -> Label {
        if score >= self.malicious {
            Label::Malicious
        } else if score >= self.suspicious {
            Label::Suspicious
        } else {
            Label::Benign
        }
    }

    /// Sum reason weights and label the total
    pub fn aggregate(&self, reasons: &[Reason]) -> (u32, Label) {
        let total = total_score(reasons);
        (total, self.label_of(total))
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            malicious: DEFAULT_MALICIOUS_THRESHOLD,
            suspicious: DEFAULT_SUSPICIOUS_THRESHOLD,
        }
    }
}

/// Sum of all reason weights
pub fn total_score(reasons: &[Reason]) -> u32 {
    reasons
        .iter()
        .fold(0u32, |acc, r| acc.saturating_add(r.weight()))
}

/// Aggregate with the default thresholds
pub fn aggregate(reasons: &[Reason]) -> (u32, Label) {
    Thresholds::default().aggregate(reasons)
}
