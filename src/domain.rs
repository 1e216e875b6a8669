//! Domain token canonicalization
//!
//! Used for blocklist entries. An empty return value means "skip this
//! token"; malformed input is filtered, never reported.

/// Canonicalize a raw domain token from a blocklist line.
///
/// Returns an empty string for blank tokens, comment remnants, wildcards
/// (`*.example.com`), tokens containing whitespace or slashes, and bare
/// labels without a dot.
pub fn normalize_domain(raw: &str) -> String {
    let mut domain = raw.trim();
    if domain.is_empty() {
        return String::new();
    }

    // Strip trailing comment fragments
    if let Some(i) = domain.find('#') {
        domain = domain[..i].trim();
    }

    let domain = domain.to_lowercase();
    let domain = domain.trim_matches('.');

    if domain.is_empty() || domain.contains([' ', '/', '\\']) {
        return String::new();
    }

    // Wildcards are not supported
    if domain.starts_with("*.") {
        return String::new();
    }

    if !domain.contains('.') {
        return String::new();
    }

    domain.to_string()
}

/// Lowercase a host and trim surrounding dots, as done for lookups.
pub fn canonical_host(host: &str) -> String {
    host.to_lowercase().trim_matches('.').to_string()
}
