//! Subprocess resolver variant
//!
//! Invokes the resolver under test as an external program, one process per
//! lookup, with the hostname as its single argument. The address is read
//! from the child's stdout; empty output signals resolution failure. A
//! lookup that overruns its time budget is killed and reaped before the
//! timeout is reported, so no zombie process or leaked handle survives the
//! case.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time;
use tracing::debug;

use crate::constants::KILL_GRACE;
use crate::resolver::{output_to_address, ResolveError, Resolver};

/// Resolver under test driven as an external executable
#[derive(Debug, Clone)]
pub struct SubprocessResolver {
    program: PathBuf,
    timeout: Duration,
}

impl SubprocessResolver {
    pub fn new(program: PathBuf, timeout: Duration) -> Self {
        Self { program, timeout }
    }
}

#[async_trait]
impl Resolver for SubprocessResolver {
    async fn resolve(&self, hostname: &str) -> Result<Option<String>, ResolveError> {
        let mut child = Command::new(&self.program)
            .arg(hostname)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ResolveError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let mut stdout = child
            .stdout
            .take()
            .expect("child stdout is piped");

        let wait = async {
            let mut output = String::new();
            // Read errors are treated like empty output; the exit status
            // below decides nothing either way
            let _ = stdout.read_to_string(&mut output).await;
            let status = child.wait().await;
            (output, status)
        };

        match time::timeout(self.timeout, wait).await {
            Ok((output, status)) => {
                if let Ok(status) = status {
                    if !status.success() {
                        debug!(%hostname, ?status, "resolver exited with nonzero status");
                    }
                }
                Ok(output_to_address(&output))
            }
            Err(_elapsed) => {
                // The wait future is dropped; kill and reap before reporting
                // so no classification happens while the process could still
                // produce output
                let _ = child.start_kill();
                if time::timeout(KILL_GRACE, child.wait()).await.is_err() {
                    debug!(%hostname, "killed resolver not reaped within grace period");
                }
                Err(ResolveError::Timeout)
            }
        }
    }

    fn describe(&self) -> String {
        self.program.display().to_string()
    }
}
