//! Global constants for hostcheck
//!
//! Centralized location for application-wide constants

use std::time::Duration;

/// Suffix appended to a truncated hostname when synthesizing negative cases.
/// The token carries no meaning; it only has to be improbable enough to never
/// collide with a real mapping entry.
pub const NEGATIVE_SUFFIX: &str = "-fiaidqwoodqwo";

/// Default number of resolver invocations allowed in flight at once
pub const DEFAULT_CONCURRENCY: usize = 7;

/// Default per-case time budget in seconds
pub const DEFAULT_TIMEOUT_SECS: f64 = 2.0;

/// Bounds for the concurrency setting
/// Note: bounds must match the message in models::ConfigError
pub const CONCURRENCY_MIN: usize = 1;
pub const CONCURRENCY_MAX: usize = 64;

/// Bounds for the per-case timeout, in seconds
/// Note: bounds must match the message in models::ConfigError
pub const TIMEOUT_SECS_MIN: f64 = 0.1;
pub const TIMEOUT_SECS_MAX: f64 = 300.0;

/// How long to wait for a killed resolver process to be reaped before
/// falling back on kill-on-drop
pub const KILL_GRACE: Duration = Duration::from_secs(1);

/// Exit code when at least one mismatch verdict was recorded
pub const EXIT_MISMATCH: i32 = 1;

/// Exit code when the only anomalies were timeouts
pub const EXIT_TIMEOUT: i32 = 2;
