//! urwarden - heuristic URL classifier
//!
//! # Usage
//!
//! ```bash
//! # Classify URLs given as arguments (one JSON line per URL on stdout)
//! urwarden 'https://bad.example.com/login'
//!
//! # Read URLs from a file, or from stdin with '-'
//! urwarden --input urls.txt
//! cat urls.txt | urwarden --input -
//! ```
//!
//! Exit codes: 0 = ok, 1 = internal error, 2 = input error.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use log::{debug, LevelFilter};
use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use urwarden::{
    config::Config,
    engine::{RuleEvaluator, Scanner},
    input::{collect_urls, UrlSource},
    output::write_json_line,
    BlocklistIndex,
};

const EXIT_INTERNAL: u8 = 1;
const EXIT_INPUT: u8 = 2;

const RUST_LOG_ENV: &str = "RUST_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "urwarden",
    version,
    about = "Classify URLs as benign, suspicious, or malicious",
    after_help = "Exit codes: 0=ok, 1=internal error, 2=input error"
)]
struct Cli {
    /// URLs to classify
    urls: Vec<String>,

    /// File with URLs (one per line); '-' reads stdin
    #[arg(short, long, value_name = "FILE")]
    input: Option<String>,

    /// Path to config file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Blocklist file (overrides config)
    #[arg(short, long, value_name = "PATH")]
    blocklist: Option<String>,

    /// Score at or above which a URL is malicious
    #[arg(long, value_name = "N")]
    malicious_threshold: Option<u32>,

    /// Score at or above which a URL is suspicious
    #[arg(long, value_name = "N")]
    suspicious_threshold: Option<u32>,

    /// Worker threads
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply_to(&self, config: &mut Config) {
        if let Some(ref path) = self.blocklist {
            config.blocklist.path = path.clone();
        }
        if let Some(n) = self.malicious_threshold {
            config.scoring.malicious_threshold = n;
        }
        if let Some(n) = self.suspicious_threshold {
            config.scoring.suspicious_threshold = n;
        }
        if let Some(n) = self.jobs {
            config.runtime.jobs = n;
        }
        if self.verbose {
            config.runtime.verbose = true;
        }
    }
}

/// Log to stderr so stdout stays pure JSON Lines. `RUST_LOG`, when set,
/// takes over filtering; otherwise the level follows `--verbose`.
fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
    set_verbose(verbose);
}

/// Global level for the verbose setting, or `None` when `RUST_LOG` decides
fn verbose_level(verbose: bool, rust_log: Option<&OsStr>) -> Option<LevelFilter> {
    if rust_log.is_some_and(|v| !v.is_empty()) {
        return None;
    }
    Some(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    })
}

fn set_verbose(verbose: bool) {
    let rust_log = std::env::var_os(RUST_LOG_ENV);
    if let Some(level) = verbose_level(verbose, rust_log.as_deref()) {
        log::set_max_level(level);
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load(),
    };
    config.apply_env();
    cli.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli).context("invalid configuration")?;
    set_verbose(config.runtime.verbose);
    debug!("configuration: {:?}", config);

    let source = UrlSource::select(&cli.urls, cli.input.as_deref());
    let urls = match collect_urls(source, config.input.max_line_length) {
        Ok(urls) => urls,
        Err(e) => {
            eprintln!("urwarden: {:#}", anyhow::Error::from(e));
            return Ok(ExitCode::from(EXIT_INPUT));
        }
    };

    if urls.is_empty() {
        eprintln!("{}", Cli::command().render_help());
        return Ok(ExitCode::from(EXIT_INPUT));
    }

    let blocklist = Arc::new(BlocklistIndex::new(config.blocklist_path()));
    blocklist.load()?;

    let scanner = Scanner::new(RuleEvaluator::new(blocklist), config.thresholds()?);
    let thresholds = scanner.thresholds();
    debug!(
        "classifying {} urls against {} blocklist entries (malicious >= {}, suspicious >= {})",
        urls.len(),
        scanner.evaluator().blocklist().size(),
        thresholds.malicious(),
        thresholds.suspicious()
    );
    let results = scanner.scan_batch(&urls, config.runtime.jobs);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let mut had_input_error = false;

    for (url, result) in urls.iter().zip(results) {
        match result {
            Ok(result) => {
                write_json_line(&mut handle, &result).context("failed to write json")?;
            }
            Err(e) => {
                eprintln!("{}: {}", url, e);
                had_input_error = true;
            }
        }
    }
    handle.flush().context("failed to write json")?;

    if had_input_error {
        return Ok(ExitCode::from(EXIT_INPUT));
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("urwarden: {:#}", e);
            ExitCode::from(EXIT_INTERNAL)
        }
    }
}
