//! Common test utilities for CLI integration tests.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small catalog covering a registry group, a declared pair and the
/// reserved venues.
#[allow(dead_code)]
pub const CATALOG: &str = r#"
tables:
  - {code: "21", venue: Cristal, capacity: 4}
  - {code: "22", venue: Cristal, capacity: 4}
  - {code: "23", venue: Cristal, capacity: 5}
  - {code: "24", venue: Cristal, capacity: 5}
  - {code: "25", venue: Cristal, capacity: 2, joinable: true, join_partners: ["26"]}
  - {code: "26", venue: Cristal, capacity: 2}
  - {code: "7", venue: Terraza, capacity: 2}
  - {code: "45", venue: Salon Principal, capacity: 10}
"#;

/// Isolated data directory plus scratch space.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the mesa data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Creates an environment; the data directory is not created yet.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("mesa-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// The binary with no flags and no `MESA_*` variables.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("mesa").expect("Failed to find mesa binary");
        for var in [
            "MESA_DATA_DIR",
            "MESA_CONFIG",
            "MESA_BUSY_TIMEOUT",
            "MESA_DISABLE_AUTOINIT",
            "MESA_LOG_MODE",
            "MESA_PERSONAL_ONLY_VENUES",
            "MESA_EVENTS_ONLY_RANGES",
            "MESA_MAXIMUM_LOCK_WAIT_SECONDS",
            "MESA_OUTPUT_FORMAT",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// The binary with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Writes a file under the temp directory and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Imports [`CATALOG`].
    pub fn import_catalog(&self) {
        let file = self.write_file("tables.yaml", CATALOG);
        self.command()
            .arg("import-tables")
            .arg(&file)
            .assert()
            .success();
    }

    /// Books dinner on 2026-10-16 and returns the reservation id.
    pub fn book(&self, tables: &str, party: u32) -> i64 {
        let output = self
            .command()
            .args(["book", "--date", "2026-10-16", "--shift", "dinner"])
            .args(["--party-size", &party.to_string(), "--tables", tables])
            .output()
            .expect("Failed to run book command");

        assert!(
            output.status.success(),
            "Book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .parse()
            .expect("Output is not a reservation id")
    }

    /// Runs `suggest` for dinner on 2026-10-16 and returns the JSON output.
    pub fn suggest_json(&self, party: u32, usage: &str) -> serde_json::Value {
        let output = self
            .command()
            .args(["suggest", "--date", "2026-10-16", "--shift", "dinner"])
            .args(["--party-size", &party.to_string(), "--usage", usage])
            .args(["--format", "json"])
            .output()
            .expect("Failed to run suggest command");

        assert!(
            output.status.success(),
            "Suggest failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("suggest output is not JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
