//! Rule evaluation engine for urwarden
//!
//! Runs every rule against a normalized URL and collects the ones that fire.

pub mod scanner;

use std::sync::Arc;

use crate::blocklist::BlocklistIndex;
use crate::domain::canonical_host;
use crate::normalize::NormalizedUrl;
use crate::rules::keywords::find_login_like;
use crate::rules::tld::is_suspicious_tld;
use crate::rules::{Reason, RuleKind};

pub use scanner::Scanner;

/// Applies the heuristic rules against a shared blocklist
#[derive(Debug, Clone)]
pub struct RuleEvaluator {
    blocklist: Arc<BlocklistIndex>,
}

impl RuleEvaluator {
    /// Create an evaluator backed by `blocklist`
    pub fn new(blocklist: Arc<BlocklistIndex>) -> Self {
        Self { blocklist }
    }

    /// Evaluate all rules in fixed order. The result may be empty.
    pub fn evaluate_all(&self, n: &NormalizedUrl) -> Vec<Reason> {
        let mut reasons = Vec::with_capacity(RuleKind::ALL.len());

        for rule in RuleKind::ALL {
            let reason = match rule {
                RuleKind::BlocklistHit => self.check_blocklist(&n.host),
                RuleKind::SuspiciousTld => self.check_tld(&n.tld),
                RuleKind::PathHasLoginLike => self.check_login_like(&n.path, &n.query),
            };
            reasons.extend(reason);
        }

        reasons
    }

    /// Blocklist membership of the host or one of its parent domains
    pub fn check_blocklist(&self, host: &str) -> Option<Reason> {
        let matched = self.blocklist.contains(host)?;

        let host = canonical_host(host);
        let detail = if matched != host && host.ends_with(&format!(".{}", matched)) {
            format!("matched subdomain of {}", matched)
        } else {
            matched
        };

        Some(Reason::new(RuleKind::BlocklistHit, detail))
    }

    /// Suspicious TLD; the detail is the TLD as given
    pub fn check_tld(&self, tld: &str) -> Option<Reason> {
        is_suspicious_tld(tld).then(|| Reason::new(RuleKind::SuspiciousTld, tld))
    }

    /// Login-lure keyword in path or query
    pub fn check_login_like(&self, path: &str, query: &str) -> Option<Reason> {
        find_login_like(path, query)
            .map(|keyword| Reason::new(RuleKind::PathHasLoginLike, format!("matched: {}", keyword)))
    }

    /// The blocklist this evaluator consults
    pub fn blocklist(&self) -> &Arc<BlocklistIndex> {
        &self.blocklist
    }
}
