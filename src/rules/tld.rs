//! Suspicious top-level domains
//!
//! TLDs that are cheap to register and over-represented in phishing feeds.

use once_cell::sync::Lazy;
use std::collections::HashSet;

pub const SUSPICIOUS_TLDS: &[&str] = &[
    "xyz", "top", "click", "help", "shop", "live", "cam", "kim", "fit", "country",
];

static SUSPICIOUS_TLD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| SUSPICIOUS_TLDS.iter().copied().collect());

/// Check a TLD (any case) against the suspicious list
pub fn is_suspicious_tld(tld: &str) -> bool {
    SUSPICIOUS_TLD_SET.contains(tld.to_lowercase().as_str())
}
