//! Integration tests for rule evaluation and scoring

use std::sync::Arc;
use urwarden::{
    normalize_url, BlocklistIndex, Label, NormalizedUrl, ParseError, Reason, RuleEvaluator,
    RuleKind, Scanner, Thresholds,
};

fn evaluator(domains: &[&str]) -> RuleEvaluator {
    RuleEvaluator::new(Arc::new(BlocklistIndex::from_domains(domains)))
}

fn scanner(domains: &[&str]) -> Scanner {
    Scanner::new(evaluator(domains), Thresholds::default())
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_blocklisted_login_page() {
    let engine = evaluator(&["bad.example.com"]);
    let n = normalize_url("https://bad.example.com/login").unwrap();
    assert_eq!(n.tld, "com");

    let reasons = engine.evaluate_all(&n);
    assert_eq!(
        reasons,
        vec![
            Reason::new(RuleKind::BlocklistHit, "bad.example.com"),
            Reason::new(RuleKind::PathHasLoginLike, "matched: login"),
        ]
    );
    assert_eq!(reasons[0].weight(), 70);
    assert_eq!(reasons[1].weight(), 10);

    let (score, label) = Thresholds::default().aggregate(&reasons);
    assert_eq!(score, 80);
    assert_eq!(label, Label::Malicious);
}

#[test]
fn test_shop_tld_is_benign() {
    let engine = evaluator(&[]);
    let n = NormalizedUrl::from_parts("https", "foo.shop", "/", "");

    let reasons = engine.evaluate_all(&n);
    assert_eq!(reasons, vec![Reason::new(RuleKind::SuspiciousTld, "shop")]);

    let (score, label) = Thresholds::default().aggregate(&reasons);
    assert_eq!(score, 20);
    assert_eq!(label, Label::Benign);
}

#[test]
fn test_subdomain_and_tld_is_malicious() {
    let result = scanner(&["example.xyz"])
        .scan("http://login.example.xyz/")
        .unwrap();

    let details: Vec<&str> = result.reasons.iter().map(|r| r.detail()).collect();
    assert_eq!(details, vec!["matched subdomain of example.xyz", "xyz"]);
    assert_eq!(result.score, 90);
    assert_eq!(result.label, Label::Malicious);
}

#[test]
fn test_tld_and_keyword_is_suspicious() {
    let result = scanner(&[])
        .scan("https://account.top/confirm?invoice=1")
        .unwrap();
    assert_eq!(result.score, 30);
    assert_eq!(result.label, Label::Suspicious);
    assert_eq!(result.reasons[1].detail(), "matched: confirm");
}

#[test]
fn test_keyword_in_query_only() {
    let result = scanner(&[]).scan("https://example.org/?next=SignIn").unwrap();
    assert_eq!(
        result.reasons,
        vec![Reason::new(RuleKind::PathHasLoginLike, "matched: signin")]
    );
}

#[test]
fn test_keyword_behind_dot_segment() {
    let result = scanner(&[]).scan("https://evil.com/login/../").unwrap();
    assert_eq!(result.normalized.path, "/login/../");
    assert_eq!(
        result.reasons,
        vec![Reason::new(RuleKind::PathHasLoginLike, "matched: login")]
    );
    assert_eq!(result.score, 10);
}

#[test]
fn test_clean_url() {
    let result = scanner(&["bad.example.com"])
        .scan("https://www.rust-lang.org/learn")
        .unwrap();
    assert!(result.reasons.is_empty());
    assert_eq!(result.score, 0);
    assert_eq!(result.label, Label::Benign);
}

// ============================================================================
// Input errors
// ============================================================================

#[test]
fn test_input_errors() {
    let s = scanner(&[]);
    assert!(matches!(s.scan("ftp://example.com"), Err(ParseError::InvalidScheme(_))));
    assert!(matches!(s.scan("https://"), Err(ParseError::EmptyHost)));
    assert!(matches!(s.scan("://nope"), Err(ParseError::Malformed(_))));
    assert!(matches!(s.scan("example.com/login"), Err(ParseError::InvalidScheme(_))));
    assert!(matches!(s.scan("ftp://"), Err(ParseError::InvalidScheme(_))));
}

#[test]
fn test_batch_continues_after_errors() {
    let urls = ["ftp://a.com", "https://foo.shop/", "https://"];
    let results = scanner(&[]).scan_batch(&urls, 2);
    assert!(results[0].is_err());
    assert_eq!(results[1].as_ref().unwrap().score, 20);
    assert!(results[2].is_err());
}

// ============================================================================
// Thresholds
// ============================================================================

#[test]
fn test_custom_thresholds_change_label() {
    let strict = Scanner::new(evaluator(&[]), Thresholds::new(20, 10).unwrap());
    let result = strict.scan("https://foo.shop/").unwrap();
    assert_eq!(result.label, Label::Malicious);
}

#[test]
fn test_json_record() {
    let result = scanner(&["bad.example.com"])
        .scan("https://bad.example.com/login?next=%2Fhome")
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

    assert_eq!(value["input_url"], "https://bad.example.com/login?next=%2Fhome");
    assert_eq!(value["normalized"]["host"], "bad.example.com");
    assert_eq!(value["normalized"]["path"], "/login");
    assert_eq!(value["normalized"]["query"], "next=%2Fhome");
    assert_eq!(value["label"], "malicious");
    assert_eq!(value["reasons"].as_array().unwrap().len(), 2);
    assert_eq!(value["reasons"][1]["detail"], "matched: login");
}
