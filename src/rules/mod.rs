//! Heuristic rules for urwarden
//!
//! Defines the rule kinds, their weights, and the fixed tables they match
//! against (suspicious TLDs and login-lure keywords).

pub mod keywords;
pub mod tld;

use serde::Serialize;
use std::fmt;

/// Identifier of a heuristic rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Host or a parent domain is on the blocklist
    BlocklistHit,

    /// TLD is on the suspicious list
    SuspiciousTld,

    /// Path or query contains a login-lure keyword
    PathHasLoginLike,
}

impl RuleKind {
    /// All rules, in evaluation order
    pub const ALL: [RuleKind; 3] = [
        RuleKind::BlocklistHit,
        RuleKind::SuspiciousTld,
        RuleKind::PathHasLoginLike,
    ];

    /// Name used in output
    pub const fn id(self) -> &'static str {
        match self {
            RuleKind::BlocklistHit => "blocklist_hit",
            RuleKind::SuspiciousTld => "suspicious_tld",
            RuleKind::PathHasLoginLike => "path_has_login_like",
        }
    }

    /// Score contribution when the rule fires
    pub const fn weight(self) -> u32 {
        match self {
            RuleKind::BlocklistHit => WEIGHT_BLOCKLIST_HIT,
            RuleKind::SuspiciousTld => WEIGHT_SUSPICIOUS_TLD,
            RuleKind::PathHasLoginLike => WEIGHT_PATH_LOGIN_LIKE,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

pub const WEIGHT_BLOCKLIST_HIT: u32 = 70;
pub const WEIGHT_SUSPICIOUS_TLD: u32 = 20;
pub const WEIGHT_PATH_LOGIN_LIKE: u32 = 10;

/// A triggered rule with its score contribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reason {
    rule: RuleKind,
    weight: u32,
    detail: String,
}

impl Reason {
    /// Create a reason carrying the rule's standard weight
    pub fn new(rule: RuleKind, detail: impl Into<String>) -> Self {
        Self::with_weight(rule, rule.weight(), detail)
    }

    /// Create a reason with an explicit weight
    pub fn with_weight(rule: RuleKind, weight: u32, detail: impl Into<String>) -> Self {
        Self {
            rule,
            weight,
            detail: detail.into(),
        }
    }

    pub fn rule(&self) -> RuleKind {
        self.rule
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}
