//! Login-lure keywords
//!
//! Order matters: the first keyword found is reported.

pub const LOGIN_LIKE_KEYWORDS: &[&str] = &[
    "login", "signin", "verify", "update", "password", "passcode", "secure", "confirm",
    "invoice", "billing",
];

/// Find the first keyword contained in the lowercased path and query.
///
/// The query is appended as `?query` only when non-empty.
pub fn find_login_like(path: &str, query: &str) -> Option<&'static str> {
    let mut haystack = path.to_lowercase();
    if !query.is_empty() {
        haystack.push('?');
        haystack.push_str(&query.to_lowercase());
    }

    LOGIN_LIKE_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| haystack.contains(keyword))
}
