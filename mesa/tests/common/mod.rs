//! Common test utilities for integration tests.

use chrono::NaiveDate;
use mesa::database::{Database, DatabaseConfig};
use mesa::{Reservation, Shift, Table};

/// Creates a file-backed database in a temporary directory.
///
/// The directory is leaked so it outlives the database handle.
#[allow(dead_code)]
pub fn create_test_database() -> Database {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();
    std::mem::forget(dir);
    db
}

/// The date every scenario books against.
#[allow(dead_code)]
pub fn service_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// A plain table in `venue`.
#[allow(dead_code)]
pub fn table(code: &str, venue: &str, capacity: u32) -> Table {
    Table::builder(code, venue, capacity).build().unwrap()
}

/// A confirmed dinner booking of `tables` on [`service_date`].
#[allow(dead_code)]
pub fn confirmed_dinner(tables: &[&str], party: u32) -> Reservation {
    Reservation::builder(service_date(), Shift::Dinner, party)
        .tables(tables.iter().copied())
        .build()
        .unwrap()
}

/// The Cristal room as declared by the built-in registry, plus a few
/// standalone tables elsewhere.
#[allow(dead_code)]
pub fn floor_plan() -> Vec<Table> {
    vec![
        table("21", "Cristal", 4),
        table("22", "Cristal", 4),
        table("23", "Cristal", 5),
        table("24", "Cristal", 5),
        table("7", "Terraza", 2),
        table("8", "Terraza", 4),
        table("10", "Salon Principal", 6),
        table("45", "Salon Principal", 8),
    ]
}
