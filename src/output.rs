//! Output formatting module
//!
//! Handles:
//! - Immediate anomaly lines as verdicts arrive, colored for triage
//! - Human-readable end-of-run summary
//! - JSON output for test-suite integration

use anyhow::Result;
use console::style;

use crate::models::{CaseKind, CaseReport, Verdict, VerifyOutput};

/// ISO 8601 timestamp for the current moment, used in the JSON document
pub fn iso_timestamp_now() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Print one anomaly line.
///
/// Mismatches are hard failures of the resolver under test and print red;
/// timeouts print yellow because their root cause is ambiguous (resolver
/// bug, environmental stall, or genuinely slow resolution) and they need
/// visual triage distinct from a definitive mismatch.
pub fn print_anomaly(report: &CaseReport) {
    match report.verdict {
        Verdict::MismatchFound => match report.case.kind {
            CaseKind::Negative => println!(
                "{} {} resolved to {}, expected no answer",
                style("MISMATCH").red().bold(),
                report.case.hostname,
                report.actual.as_deref().unwrap_or("?"),
            ),
            CaseKind::Positive => println!(
                "{} {} resolved to {}, expected {}",
                style("MISMATCH").red().bold(),
                report.case.hostname,
                report.actual.as_deref().unwrap_or("?"),
                report.case.expected.as_deref().unwrap_or("?"),
            ),
        },
        Verdict::MismatchMissing => println!(
            "{} {} did not resolve, expected {}",
            style("MISMATCH").red().bold(),
            report.case.hostname,
            report.case.expected.as_deref().unwrap_or("?"),
        ),
        Verdict::Timeout => println!(
            "{} waiting for {} ({}ms)",
            style("TIMEOUT").yellow().bold(),
            report.case.hostname,
            report.elapsed_ms,
        ),
        Verdict::Pass => {}
    }
}

/// Print the end-of-run summary block
pub fn format_human(output: &VerifyOutput) {
    let summary = &output.summary;

    if summary.mismatches == 0 && summary.timeouts == 0 {
        println!("{}", style("All cases passed.").green());
    }

    println!("Verification Summary:");
    println!("  Cases:      {}", summary.cases);
    println!("  Passed:     {}", summary.passed);
    println!("  Mismatches: {}", summary.mismatches);
    println!("  Timeouts:   {}", summary.timeouts);

    // Format duration nicely
    let duration_sec = summary.duration_ms as f64 / 1000.0;
    if duration_sec < 1.0 {
        println!("  Duration:   {}ms", summary.duration_ms);
    } else {
        println!("  Duration:   {duration_sec:.2}s");
    }

    if let Some(true) = summary.interrupted {
        println!("  Status:     Interrupted by user");
    }
}

/// Serialize the full run output as pretty JSON
pub fn format_json(output: &VerifyOutput) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}
