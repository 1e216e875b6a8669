//! End-to-end URL classification
//!
//! Normalize, evaluate, aggregate. Batches can be spread across worker
//! threads that share one blocklist.

use log::debug;
use std::thread;

use super::RuleEvaluator;
use crate::error::ParseError;
use crate::normalize::normalize_url;
use crate::output::ScanResult;
use crate::score::Thresholds;

/// Classifies raw URL strings
#[derive(Debug, Clone)]
pub struct Scanner {
    evaluator: RuleEvaluator,
    thresholds: Thresholds,
}

impl Scanner {
    pub fn new(evaluator: RuleEvaluator, thresholds: Thresholds) -> Self {
        Self {
            evaluator,
            thresholds,
        }
    }

    /// Classify a single URL
    pub fn scan(&self, input: &str) -> Result<ScanResult, ParseError> {
        let normalized = normalize_url(input)?;
        let reasons = self.evaluator.evaluate_all(&normalized);
        let (score, label) = self.thresholds.aggregate(&reasons);

        debug!("{} -> {} ({})", input, label, score);
        Ok(ScanResult::new(input, normalized, score, label, reasons))
    }

    /// Classify many URLs on up to `jobs` threads.
    ///
    /// Results are returned in input order; a bad URL does not affect the
    /// others.
    pub fn scan_batch<S>(&self, inputs: &[S], jobs: usize) -> Vec<Result<ScanResult, ParseError>>
    where
        S: AsRef<str> + Sync,
    {
        let jobs = jobs.max(1).min(inputs.len().max(1));
        if jobs == 1 {
            return inputs.iter().map(|s| self.scan(s.as_ref())).collect();
        }

        let chunk_size = inputs.len().div_ceil(jobs);
        thread::scope(|scope| {
            let workers: Vec<_> = inputs
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|s| self.scan(s.as_ref()))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            workers
                .into_iter()
                .flat_map(|worker| match worker.join() {
                    Ok(results) => results,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }

    /// Evaluator (and through it, the shared blocklist)
    pub fn evaluator(&self) -> &RuleEvaluator {
        &self.evaluator
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }
}
