//! Data models module
//!
//! Defines core data structures:
//! - MappingEntry: one authoritative (address, hostname) pair
//! - TestCase: a positive or synthesized negative lookup to perform
//! - Verdict: the classified outcome of one test case
//! - CaseReport: per-case output record
//! - RunSummary: aggregated run statistics

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{CONCURRENCY_MAX, CONCURRENCY_MIN, TIMEOUT_SECS_MAX, TIMEOUT_SECS_MIN};

/// One valid line of the mapping file: the address a hostname must resolve to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Literal network-address string, first token of the line
    pub address: String,
    /// Hostname as read from the file; lower-casing happens at comparison sites
    pub hostname: String,
}

/// Whether a test case expects resolution to succeed or to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseKind {
    /// Hostname taken from the mapping file; must resolve to its address
    Positive,
    /// Synthesized near-miss hostname; must not resolve
    Negative,
}

/// A single lookup to run against the resolver under test.
/// Built once before dispatch and consumed by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub kind: CaseKind,
    pub hostname: String,
    /// Expected address for positive cases; None for negative cases
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
}

impl TestCase {
    /// Positive case for a mapping entry
    pub fn positive(entry: &MappingEntry) -> Self {
        Self {
            kind: CaseKind::Positive,
            hostname: entry.hostname.clone(),
            expected: Some(entry.address.clone()),
        }
    }

    /// Negative case for a synthesized hostname
    pub fn negative(hostname: String) -> Self {
        Self {
            kind: CaseKind::Negative,
            hostname,
            expected: None,
        }
    }
}

/// Classified outcome of one test case, produced exactly once per case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The case behaved as its kind requires
    Pass,
    /// A negative case resolved, or a positive case resolved to the wrong address
    MismatchFound,
    /// A positive case failed to resolve at all
    MismatchMissing,
    /// The resolver invocation exceeded its time budget and was terminated
    Timeout,
}

impl Verdict {
    /// Anomalies are every verdict other than Pass
    pub fn is_anomaly(&self) -> bool {
        !matches!(self, Verdict::Pass)
    }
}

/// Per-case output record emitted by a verifier worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseReport {
    #[serde(flatten)]
    pub case: TestCase,
    pub verdict: Verdict,
    /// Address the resolver actually produced, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Wall-clock cost of the resolver invocation in milliseconds
    pub elapsed_ms: u64,
}

impl CaseReport {
    pub fn new(case: TestCase, verdict: Verdict, actual: Option<String>, elapsed: Duration) -> Self {
        Self {
            case,
            verdict,
            actual,
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }
}

/// Summary statistics for the verification run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Total number of cases that received a verdict
    pub cases: usize,
    /// Cases that behaved as expected
    pub passed: usize,
    /// MismatchFound + MismatchMissing verdicts
    pub mismatches: usize,
    /// Cases terminated on timeout
    pub timeouts: usize,
    /// Duration of the run in milliseconds
    pub duration_ms: u64,
    /// Whether the run was interrupted by user signal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interrupted: Option<bool>,
}

/// Complete output structure for JSON serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOutput {
    /// ISO 8601 timestamp of when the run started
    pub started_at: String,
    /// Anomalous case reports (Pass verdicts are counted, not listed)
    pub anomalies: Vec<CaseReport>,
    /// Summary statistics
    pub summary: RunSummary,
}

/// Which resolver variant drives the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverSpec {
    /// External executable invoked once per hostname
    Subprocess(PathBuf),
    /// The host's own resolution call
    Native,
}

/// Configuration for one verification run
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Path to the mapping file
    pub mapping_path: PathBuf,
    /// Resolver under test
    pub resolver: ResolverSpec,
    /// Maximum resolver invocations in flight at once
    pub concurrency: usize,
    /// Per-case time budget
    pub timeout: Duration,
    /// Accept any non-empty answer for positive cases instead of exact match
    pub lenient: bool,
    /// Whether to output JSON format
    pub json_output: bool,
    /// Whether to run in quiet mode (suppress non-anomaly chatter)
    pub quiet_mode: bool,
    /// Whether to enable debug logging
    pub verbose: bool,
}

/// Custom error types for configuration validation
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Note: bounds must match TIMEOUT_SECS_MIN/MAX in constants.rs
    #[error("Invalid timeout: {0}. Must be between 0.1 and 300.0 seconds")]
    InvalidTimeout(f64),
    /// Note: bounds must match CONCURRENCY_MIN/MAX in constants.rs
    #[error("Invalid concurrency: {0}. Must be between 1 and 64")]
    InvalidConcurrency(usize),
}

/// Validate the concurrency setting against its bounds
pub fn validate_concurrency(concurrency: usize) -> Result<usize, ConfigError> {
    if !(CONCURRENCY_MIN..=CONCURRENCY_MAX).contains(&concurrency) {
        return Err(ConfigError::InvalidConcurrency(concurrency));
    }
    Ok(concurrency)
}

/// Validate the per-case timeout (in seconds) against its bounds
pub fn validate_timeout_secs(secs: f64) -> Result<Duration, ConfigError> {
    if !secs.is_finite() || !(TIMEOUT_SECS_MIN..=TIMEOUT_SECS_MAX).contains(&secs) {
        return Err(ConfigError::InvalidTimeout(secs));
    }
    Ok(Duration::from_secs_f64(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_case_carries_expected_address() {
        let entry = MappingEntry {
            address: "10.0.0.1".to_string(),
            hostname: "alpha.example".to_string(),
        };
        let case = TestCase::positive(&entry);
        assert_eq!(case.kind, CaseKind::Positive);
        assert_eq!(case.hostname, "alpha.example");
        assert_eq!(case.expected.as_deref(), Some("10.0.0.1"));
    }

    #[test]
    fn test_negative_case_has_no_expectation() {
        let case = TestCase::negative("alpha-fiaidqwoodqwo".to_string());
        assert_eq!(case.kind, CaseKind::Negative);
        assert!(case.expected.is_none());
    }

    #[test]
    fn test_pass_is_not_an_anomaly() {
        assert!(!Verdict::Pass.is_anomaly());
        assert!(Verdict::MismatchFound.is_anomaly());
        assert!(Verdict::MismatchMissing.is_anomaly());
        assert!(Verdict::Timeout.is_anomaly());
    }

    #[test]
    fn test_validate_concurrency_bounds() {
        assert!(validate_concurrency(0).is_err());
        assert!(validate_concurrency(1).is_ok());
        assert!(validate_concurrency(7).is_ok());
        assert!(validate_concurrency(64).is_ok());
        assert!(validate_concurrency(65).is_err());
    }

    #[test]
    fn test_validate_timeout_bounds() {
        assert!(validate_timeout_secs(0.05).is_err());
        assert!(validate_timeout_secs(f64::NAN).is_err());
        assert_eq!(
            validate_timeout_secs(2.0).unwrap(),
            Duration::from_secs(2)
        );
        assert!(validate_timeout_secs(300.0).is_ok());
        assert!(validate_timeout_secs(300.5).is_err());
    }

    #[test]
    fn test_summary_skips_interrupted_when_none() {
        let summary = RunSummary {
            cases: 3,
            passed: 3,
            mismatches: 0,
            timeouts: 0,
            duration_ms: 12,
            interrupted: None,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("interrupted"));
    }
}
