//! URL parsing and normalization
//!
//! Breaks a URL string into scheme/host/tld/path/query under an
//! http/https-only policy.

use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use url::{Host, Url};

use crate::domain::canonical_host;
use crate::error::ParseError;

/// Schemes accepted by the classifier
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Bytes escaped in a path. `%` is left alone so existing escapes survive.
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'^')
    .add(b'|')
    .add(b'\\');

/// Decomposed, canonical form of an input URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedUrl {
    /// Lowercase scheme, `http` or `https`
    pub scheme: String,

    /// Lowercase host without leading/trailing dots
    pub host: String,

    /// Naive TLD: text after the last dot of the host
    pub tld: String,

    /// Percent-escaped path
    pub path: String,

    /// Raw query string, empty if absent
    pub query: String,
}

impl NormalizedUrl {
    /// Build from already-normalized parts, deriving the TLD from `host`
    pub fn from_parts(
        scheme: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        let host = host.into();
        let tld = naive_tld(&host).to_string();
        Self {
            scheme: scheme.into(),
            host,
            tld,
            path: path.into(),
            query: query.into(),
        }
    }
}

/// Check a scheme against the allowed list
pub fn is_allowed_scheme(scheme: &str) -> bool {
    let scheme = scheme.to_lowercase();
    ALLOWED_SCHEMES.contains(&scheme.as_str())
}

/// Substring after the final `.`, or the whole host when there is none
pub fn naive_tld(host: &str) -> &str {
    match host.rfind('.') {
        Some(i) if i + 1 < host.len() => &host[i + 1..],
        _ => host,
    }
}

/// Scheme prefix of `input` (text before the first `:`).
///
/// Input without a usable scheme yields `""`. A bare `:` with nothing in
/// front of it is a syntax error.
fn raw_scheme(input: &str) -> Result<&str, ParseError> {
    let Some((scheme, _)) = input.split_once(':') else {
        return Ok("");
    };
    if scheme.is_empty() {
        return Err(ParseError::Malformed(url::ParseError::RelativeUrlWithoutBase));
    }

    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let valid = starts_alpha && chars.all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c));
    Ok(if valid { scheme } else { "" })
}

/// Path as written in `input`, percent-escaped.
///
/// Dot segments are kept as they appear (`/login/../` stays intact), and an
/// authority-only URL has an empty path.
fn escaped_path(input: &str) -> String {
    let rest = input.split_once(':').map_or(input, |(_, rest)| rest);
    let rest = rest.trim_start_matches(['/', '\\']);
    let Some(start) = rest.find(['/', '?', '#', '\\']) else {
        return String::new();
    };
    let rest = &rest[start..];
    let path = rest.find(['?', '#']).map_or(rest, |end| &rest[..end]);
    utf8_percent_encode(path, PATH_ESCAPE).to_string()
}

/// Parse and normalize a URL.
///
/// # Errors
///
/// - `InvalidScheme` for anything other than http/https, including input
///   with no scheme at all (reported with an empty scheme)
/// - `EmptyHost` when no host remains after trimming dots
/// - `Malformed` for any other syntax error
pub fn normalize_url(input: &str) -> Result<NormalizedUrl, ParseError> {
    debug!("normalizing URL: {}", input);

    let input = input.trim_matches(|c: char| c <= ' ');

    // The scheme decides first, so `ftp://` is a scheme error and not a host error
    let scheme = raw_scheme(input)?.to_lowercase();
    if !is_allowed_scheme(&scheme) {
        debug!("invalid scheme: {:?}", scheme);
        return Err(ParseError::InvalidScheme(scheme));
    }

    let url = Url::parse(input).map_err(|e| {
        debug!("failed to parse URL: {}", e);
        match e {
            url::ParseError::EmptyHost => ParseError::EmptyHost,
            other => ParseError::Malformed(other),
        }
    })?;

    // IPv6 literals are reported without brackets
    let raw_host = match url.host() {
        Some(Host::Domain(domain)) => domain.to_string(),
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => addr.to_string(),
        None => String::new(),
    };

    let host = canonical_host(&raw_host);
    if host.is_empty() {
        debug!("empty hostname");
        return Err(ParseError::EmptyHost);
    }

    let normalized = NormalizedUrl::from_parts(
        scheme,
        host,
        escaped_path(input),
        url.query().unwrap_or_default(),
    );

    debug!("normalized URL: {:?}", normalized);
    Ok(normalized)
}
