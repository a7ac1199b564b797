//! Resolver-under-test capability module
//!
//! The verifier is agnostic to how a lookup is actually performed: the
//! resolver under test is anything that can answer "what address does this
//! hostname resolve to, if any" within a time budget. Two variants are
//! provided behind the same trait: an external executable invoked once per
//! hostname, and the host's own resolution call.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{ResolverSpec, VerifyConfig};

pub mod native;
pub mod subprocess;

pub use native::NativeResolver;
pub use subprocess::SubprocessResolver;

/// Errors from one resolver invocation
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The invocation exceeded its time budget and was forcibly terminated
    #[error("resolver timed out")]
    Timeout,
    /// The resolver could not be invoked at all; fatal to the whole run
    /// since every subsequent case would fail identically
    #[error("failed to invoke resolver {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One black-box lookup against the resolver under test.
///
/// `Ok(Some(address))` means the hostname resolved, `Ok(None)` means it did
/// not. A timed-out invocation is reported as `ResolveError::Timeout` only
/// after the underlying execution resource has been reclaimed.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, hostname: &str) -> Result<Option<String>, ResolveError>;

    /// Short human-readable description for run banners and logs
    fn describe(&self) -> String;
}

/// Construct the resolver variant selected in the run configuration
pub fn from_config(config: &VerifyConfig) -> Arc<dyn Resolver> {
    match &config.resolver {
        ResolverSpec::Subprocess(program) => Arc::new(SubprocessResolver::new(
            program.clone(),
            config.timeout,
        )),
        ResolverSpec::Native => Arc::new(NativeResolver::new(config.timeout)),
    }
}

/// Clamp raw resolver output to the address token: first line, trimmed.
/// Empty output signals resolution failure.
pub(crate) fn output_to_address(output: &str) -> Option<String> {
    let first_line = output.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        None
    } else {
        Some(first_line.to_string())
    }
}
