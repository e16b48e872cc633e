//! CLI command implementations.
//!
//! - `init`: Create the data directory and database
//! - `import_tables`: Load tables from a YAML catalog
//! - `tables`: List the catalog
//! - `suggest`: Run the allocation engine
//! - `book`: Insert a reservation after an atomic occupancy check
//! - `confirm` / `cancel`: Stage transitions
//! - `reservations`: List the ledger for a date and shift
//! - `validate`: Validate a configuration file
//! - `completions`: Shell completion scripts

pub mod book;
pub mod cancel;
pub mod completions;
pub mod confirm;
pub mod import_tables;
pub mod init;
pub mod reservations;
pub mod suggest;
pub mod tables;
pub mod validate;

pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use confirm::ConfirmCommand;
pub use import_tables::ImportTablesCommand;
pub use init::InitCommand;
pub use reservations::ReservationsCommand;
pub use suggest::SuggestCommand;
pub use tables::TablesCommand;
pub use validate::ValidateCommand;
