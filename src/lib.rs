//! urwarden - heuristic URL classifier
//!
//! Labels a URL `benign`, `suspicious`, or `malicious` from the weighted sum
//! of a few fixed rules.
//!
//! # Rules
//!
//! - **blocklist_hit** (70): the host, or a parent domain, is on the blocklist
//! - **suspicious_tld** (20): the TLD is one of a fixed cheap-to-register set
//! - **path_has_login_like** (10): the path or query contains a login-lure keyword
//!
//! A total of 70 or more is `malicious`, 30 or more `suspicious`; both
//! cut-offs are configurable.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use urwarden::{BlocklistIndex, Label, RuleEvaluator, Scanner, Thresholds};
//!
//! let blocklist = Arc::new(BlocklistIndex::from_domains(["bad.example.com"]));
//! let scanner = Scanner::new(RuleEvaluator::new(blocklist), Thresholds::default());
//!
//! let result = scanner.scan("https://bad.example.com/login").unwrap();
//! assert_eq!(result.score, 80);
//! assert_eq!(result.label, Label::Malicious);
//! ```

pub mod blocklist;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod input;
pub mod normalize;
pub mod output;
pub mod rules;
pub mod score;

// Re-exports for convenience
pub use blocklist::BlocklistIndex;
pub use config::Config;
pub use domain::normalize_domain;
pub use engine::{RuleEvaluator, Scanner};
pub use error::{BlocklistError, ConfigError, InputError, ParseError};
pub use normalize::{normalize_url, NormalizedUrl};
pub use output::ScanResult;
pub use rules::{Reason, RuleKind};
pub use score::{Label, Thresholds};
