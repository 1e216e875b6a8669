//! Integration tests for blocklist file loading and matching

use std::io::Write;
use tempfile::NamedTempFile;
use urwarden::BlocklistIndex;

fn blocklist_file(lines: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(lines.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn loaded(lines: &str) -> (NamedTempFile, BlocklistIndex) {
    let file = blocklist_file(lines);
    let index = BlocklistIndex::new(file.path());
    index.load().unwrap();
    (file, index)
}

const HOSTS_LIST: &str = "# Test blocklist
0.0.0.0 bad.example.com
malicious.test
127.0.0.1 another.bad.com
# This is a comment
good.example.com
";

// ============================================================================
// Exact matches
// ============================================================================

#[test]
fn test_exact_matches() {
    let (_file, index) = loaded(HOSTS_LIST);

    let cases = [
        ("bad.example.com", Some("bad.example.com")),
        ("malicious.test", Some("malicious.test")),
        ("another.bad.com", Some("another.bad.com")),
        ("good.example.com", Some("good.example.com")),
        ("safe.example.com", None),
        ("nonexistent.com", None),
    ];

    for (host, want) in cases {
        assert_eq!(index.contains(host).as_deref(), want, "host {host}");
    }
    assert_eq!(index.size(), 4);
}

// ============================================================================
// Subdomain matches
// ============================================================================

#[test]
fn test_subdomain_matches() {
    let (_file, index) = loaded(HOSTS_LIST);

    let cases = [
        ("sub.bad.example.com", Some("bad.example.com")),
        ("www.malicious.test", Some("malicious.test")),
        ("sub.another.bad.com", Some("another.bad.com")),
        ("sub.safe.example.com", None),
    ];

    for (host, want) in cases {
        assert_eq!(index.contains(host).as_deref(), want, "host {host}");
    }
}

#[test]
fn test_exact_match_beats_parent() {
    let (_file, index) = loaded("example.com\nbad.example.com\n");
    assert_eq!(index.contains("bad.example.com").as_deref(), Some("bad.example.com"));
    assert_eq!(index.contains("x.y.example.com").as_deref(), Some("example.com"));
}

#[test]
fn test_no_boundaryless_suffix() {
    let (_file, index) = loaded("example.com\n");
    assert!(index.contains("reallybadexample.com").is_none());
    assert!(index.contains("badexample.com").is_none());
    assert!(index.contains("example.community").is_none());
}

// ============================================================================
// File handling
// ============================================================================

#[test]
fn test_comments_only_file() {
    let (_file, index) = loaded("# nothing here\n\n   \n# still nothing\n");
    assert_eq!(index.size(), 0);
    assert!(index.contains("anything.com").is_none());
}

#[test]
fn test_empty_file() {
    let (_file, index) = loaded("");
    assert_eq!(index.size(), 0);
    assert!(index.contains("any.domain.com").is_none());
}

#[test]
fn test_nonexistent_file() {
    let index = BlocklistIndex::new("nonexistent_file.txt");
    assert!(index.load().is_ok());
    assert_eq!(index.size(), 0);
}

#[test]
fn test_normalization_on_load() {
    let (_file, index) = loaded(
        "0.0.0.0 Tracker.EXAMPLE.net.\n\
         *.wildcard.com\n\
         localhost\n\
         0.0.0.0 0.0.0.0\n\
         bad/path.com\n",
    );
    // "0.0.0.0 0.0.0.0" keeps "0.0.0.0", which has dots
    assert_eq!(index.size(), 2);
    assert!(index.contains("tracker.example.net").is_some());
    assert!(index.contains("wildcard.com").is_none());
}

#[test]
fn test_reload_picks_up_changes() {
    let mut file = blocklist_file("first.com\n");
    let index = BlocklistIndex::new(file.path());
    index.load().unwrap();
    assert!(index.contains("first.com").is_some());

    file.as_file_mut().set_len(0).unwrap();
    std::fs::write(file.path(), "second.com\nthird.com\n").unwrap();
    index.reload().unwrap();

    assert_eq!(index.size(), 2);
    assert!(index.contains("first.com").is_none());
    assert!(index.contains("www.second.com").is_some());
}
