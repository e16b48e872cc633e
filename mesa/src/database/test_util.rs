//! Shared helpers for database unit tests.

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::Table;

/// Creates a file-backed database in a temporary directory.
///
/// # Panics
///
/// Panics if the directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // keep the directory alive for the life of the test process
    std::mem::forget(dir);

    db
}

/// A plain, non-joinable Cristal table.
///
/// # Panics
///
/// Panics if the code is invalid or the capacity is zero.
#[must_use]
pub fn sample_table(code: &str, capacity: u32) -> Table {
    Table::builder(code, "Cristal", capacity).build().unwrap()
}
