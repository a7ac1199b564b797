//! Native resolver variant
//!
//! Resolves through the host's own resolution call instead of an external
//! program, under the same per-case time budget. Lookup failures (host not
//! found) are resolution failures, not errors.

use std::time::Duration;

use async_trait::async_trait;
use tokio::net;
use tokio::time;
use tracing::debug;

use crate::resolver::{ResolveError, Resolver};

/// Resolver under test backed by the host's resolution call
#[derive(Debug, Clone, Copy)]
pub struct NativeResolver {
    timeout: Duration,
}

impl NativeResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Resolver for NativeResolver {
    async fn resolve(&self, hostname: &str) -> Result<Option<String>, ResolveError> {
        let lookup = net::lookup_host((hostname, 0u16));

        match time::timeout(self.timeout, lookup).await {
            Ok(Ok(mut addrs)) => Ok(addrs.next().map(|sockaddr| sockaddr.ip().to_string())),
            Ok(Err(err)) => {
                debug!(%hostname, %err, "native lookup failed");
                Ok(None)
            }
            Err(_elapsed) => Err(ResolveError::Timeout),
        }
    }

    fn describe(&self) -> String {
        "native resolver".to_string()
    }
}
