//! Concurrent verification engine
//!
//! Dispatches every test case to the resolver under test through a fixed
//! pool of worker tasks, applies the per-case time budget, classifies each
//! outcome, and streams anomalies to the report sink as they occur.
//!
//! The only shared mutable state is the case queue and the report channel.
//! Cases are fully independent: a timeout or mismatch never aborts the
//! batch, and a worker picks up its next case as soon as it has reported
//! the current one. The single run-level failure is a resolver that cannot
//! be invoked at all, which every later case would hit identically.

use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Result};
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use crate::models::{CaseKind, CaseReport, RunSummary, TestCase, Verdict, VerifyConfig, VerifyOutput};
use crate::output;
use crate::resolver::{ResolveError, Resolver};

/// Message from a worker to the collector
enum WorkerMessage {
    Report(CaseReport),
    Fatal(ResolveError),
}

/// Run the full case list against the resolver under test.
///
/// Returns the collected anomalies and summary; errors only when the
/// resolver could not be invoked at all.
pub async fn run_verification(
    cases: Vec<TestCase>,
    resolver: Arc<dyn Resolver>,
    config: &VerifyConfig,
    interrupted: Arc<AtomicBool>,
) -> Result<VerifyOutput> {
    let started_at = output::iso_timestamp_now();
    let start = Instant::now();
    let total = cases.len();

    if !config.quiet_mode && !config.json_output {
        println!(
            "Verifying {} cases against {} (concurrency: {}, timeout: {:.1}s)...",
            total,
            resolver.describe(),
            config.concurrency,
            config.timeout.as_secs_f64()
        );
    }

    let (case_tx, case_rx) = mpsc::unbounded_channel::<TestCase>();
    for case in cases {
        // Receiver outlives this loop; an unbounded send cannot fail here
        let _ = case_tx.send(case);
    }
    drop(case_tx);
    let queue = Arc::new(Mutex::new(case_rx));

    let (report_tx, mut report_rx) = mpsc::unbounded_channel::<WorkerMessage>();
    let aborted = Arc::new(AtomicBool::new(false));

    let mut workers = Vec::with_capacity(config.concurrency);
    for _ in 0..config.concurrency {
        workers.push(tokio::spawn(worker_loop(
            queue.clone(),
            resolver.clone(),
            report_tx.clone(),
            interrupted.clone(),
            aborted.clone(),
            config.lenient,
        )));
    }
    drop(report_tx);

    let mut anomalies = Vec::new();
    let mut passed = 0usize;
    let mut mismatches = 0usize;
    let mut timeouts = 0usize;
    let mut fatal: Option<ResolveError> = None;

    while let Some(message) = report_rx.recv().await {
        match message {
            WorkerMessage::Report(report) => {
                match report.verdict {
                    Verdict::Pass => passed += 1,
                    Verdict::Timeout => timeouts += 1,
                    Verdict::MismatchFound | Verdict::MismatchMissing => mismatches += 1,
                }
                if report.verdict.is_anomaly() {
                    if !config.json_output {
                        output::print_anomaly(&report);
                    }
                    anomalies.push(report);
                }
            }
            WorkerMessage::Fatal(err) => {
                fatal.get_or_insert(err);
            }
        }
    }

    for worker in workers {
        let _ = worker.await;
    }

    if let Some(err) = fatal {
        bail!(err);
    }

    let was_interrupted = interrupted.load(Ordering::Relaxed);
    Ok(VerifyOutput {
        started_at,
        anomalies,
        summary: RunSummary {
            cases: passed + mismatches + timeouts,
            passed,
            mismatches,
            timeouts,
            duration_ms: start.elapsed().as_millis() as u64,
            interrupted: if was_interrupted { Some(true) } else { None },
        },
    })
}

/// One worker: take cases from the shared queue until it closes, the run
/// is interrupted, or a fatal invocation error is raised
async fn worker_loop(
    queue: Arc<Mutex<mpsc::UnboundedReceiver<TestCase>>>,
    resolver: Arc<dyn Resolver>,
    report_tx: mpsc::UnboundedSender<WorkerMessage>,
    interrupted: Arc<AtomicBool>,
    aborted: Arc<AtomicBool>,
    lenient: bool,
) {
    loop {
        if interrupted.load(Ordering::Relaxed) || aborted.load(Ordering::Relaxed) {
            break;
        }

        let case = { queue.lock().await.recv().await };
        let Some(case) = case else { break };

        let invocation_start = Instant::now();
        let message = match resolver.resolve(&case.hostname).await {
            Ok(answer) => {
                let verdict = classify(&case, answer.as_deref(), lenient);
                debug!(hostname = %case.hostname, ?verdict, "case classified");
                WorkerMessage::Report(CaseReport::new(
                    case,
                    verdict,
                    answer,
                    invocation_start.elapsed(),
                ))
            }
            Err(ResolveError::Timeout) => {
                // The invocation has been terminated and reaped by the time
                // the resolver reports a timeout
                WorkerMessage::Report(CaseReport::new(
                    case,
                    Verdict::Timeout,
                    None,
                    invocation_start.elapsed(),
                ))
            }
            Err(err) => {
                aborted.store(true, Ordering::Relaxed);
                WorkerMessage::Fatal(err)
            }
        };

        if report_tx.send(message).is_err() {
            break;
        }
    }
}

/// Classify a completed invocation against the case's expectation
fn classify(case: &TestCase, answer: Option<&str>, lenient: bool) -> Verdict {
    match (case.kind, answer) {
        (CaseKind::Negative, Some(_)) => Verdict::MismatchFound,
        (CaseKind::Negative, None) => Verdict::Pass,
        (CaseKind::Positive, None) => Verdict::MismatchMissing,
        (CaseKind::Positive, Some(actual)) => {
            if lenient {
                return Verdict::Pass;
            }
            let expected = case.expected.as_deref().unwrap_or_default();
            if addresses_match(expected, actual) {
                Verdict::Pass
            } else {
                Verdict::MismatchFound
            }
        }
    }
}

/// Compare addresses as parsed IPs when both sides parse, byte-equal
/// strings otherwise, so formatting differences never fail a case
fn addresses_match(expected: &str, actual: &str) -> bool {
    match (expected.parse::<IpAddr>(), actual.parse::<IpAddr>()) {
        (Ok(expected), Ok(actual)) => expected == actual,
        _ => expected == actual,
    }
}
