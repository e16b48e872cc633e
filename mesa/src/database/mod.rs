//! SQLite storage for the table catalog and the reservation ledger.
//!
//! [`Database`] implements both allocation collaborator traits directly;
//! [`ReadSnapshot`] implements them over a single read transaction so that
//! one suggestion sees one consistent state. Bookings go through
//! [`Database::book_reservation`], which re-checks occupancy under the write
//! lock.
//!
//! # Examples
//!
//! ```
//! use mesa::allocation::{AllocationService, SuggestRequest};
//! use mesa::database::Database;
//! use mesa::Table;
//!
//! let mut db = Database::open_in_memory().unwrap();
//! db.upsert_table(&Table::builder("21", "Cristal", 4).build().unwrap()).unwrap();
//!
//! let request = SuggestRequest::parse("2026-10-16", "dinner", 4, "personal").unwrap();
//! let snapshot = db.read_snapshot().unwrap();
//! let suggestions = AllocationService::default()
//!     .suggest(&snapshot, &snapshot, &request)
//!     .unwrap();
//! assert_eq!(suggestions.len(), 1);
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod snapshot;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use snapshot::ReadSnapshot;
