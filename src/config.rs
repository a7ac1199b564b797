//! Configuration file support
//!
//! Handles TOML configuration parsing and validation. The file supplies
//! defaults for the run; explicit command-line flags always override it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
use crate::models::{validate_concurrency, validate_timeout_secs};

/// Main harness configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessConfiguration {
    #[serde(default)]
    pub verifier: VerifierSettings,
    #[serde(default)]
    pub resolver: ResolverSettings,
}

/// Verification engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierSettings {
    /// Resolver invocations allowed in flight at once (1-64)
    pub concurrency: usize,
    /// Per-case time budget in seconds (0.1-300.0)
    pub timeout: f64,
    /// Accept any non-empty answer for positive cases
    pub lenient: bool,
}

impl Default for VerifierSettings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT_SECS,
            lenient: false,
        }
    }
}

/// Resolver-under-test selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Path to the resolver executable
    pub program: Option<PathBuf>,
    /// Use the host's native resolution call instead
    pub native: bool,
}

impl HarnessConfiguration {
    /// Load and validate a configuration file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings against the shared bounds
    pub fn validate(&self) -> Result<()> {
        validate_concurrency(self.verifier.concurrency)?;
        validate_timeout_secs(self.verifier.timeout)?;
        Ok(())
    }
}
