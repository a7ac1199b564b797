use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Test helper for building controlled mapping files and resolver scripts
pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> anyhow::Result<Self> {
        Ok(TestEnvironment {
            temp_dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a mapping file with the given contents
    pub fn write_mapping(&self, contents: &str) -> anyhow::Result<PathBuf> {
        let path = self.path().join("hosts");
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write an executable shell script that stands in for the resolver
    /// under test; it receives the hostname as its single argument
    pub fn write_resolver(&self, body: &str) -> anyhow::Result<PathBuf> {
        let path = self.path().join("resolver.sh");
        fs::write(&path, format!("#!/bin/sh\n{body}\n"))?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(path)
    }
}

/// Two-entry mapping whose hostnames share the prefix "alpha", yielding
/// the synthesized negative hostname alpha-fiaidqwoodqwo
pub const SHARED_PREFIX_MAPPING: &str = "10.0.0.1 alpha.example\n10.0.0.2 alphabeta.example\n";

/// Resolver script that answers the shared-prefix mapping correctly and
/// stays silent for everything else
pub const CONFORMING_RESOLVER: &str = r#"case "$1" in
  alpha.example) echo 10.0.0.1 ;;
  alphabeta.example) echo 10.0.0.2 ;;
esac"#;
