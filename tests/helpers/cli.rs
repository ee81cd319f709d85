use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A temporary project directory holding a pgtrail.yaml
pub struct CliTestHelper {
    pub temp_dir: TempDir,
    pub project_root: PathBuf,
}

impl CliTestHelper {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let project_root = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            project_root,
        }
    }

    pub fn write_config(&self, yaml: &str) -> Result<()> {
        fs::write(self.project_root.join("pgtrail.yaml"), yaml)
            .context("Failed to write pgtrail.yaml")
    }

    /// The pgtrail binary, run from the project directory with a clean environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("pgtrail").expect("pgtrail binary not built");
        cmd.current_dir(&self.project_root)
            .env_remove("DATABASE_URL")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for CliTestHelper {
    fn default() -> Self {
        Self::new()
    }
}
