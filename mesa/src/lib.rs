#![deny(unsafe_code)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # mesa
//!
//! A table allocation and conflict engine for restaurant reservations.
//!
//! Given a party size, a date, a shift and a usage type, `mesa` proposes the
//! tables or declared table combinations that can seat the party without
//! clashing with confirmed bookings or breaking venue policy. Suggestions are
//! advisory; bookings are re-checked atomically by [`Database`].
//!
//! ## Core Types
//!
//! - [`Table`] and [`TableCode`]: The table catalog
//! - [`Reservation`], [`Shift`], [`Stage`] and [`UsageType`]: The booking ledger
//! - [`allocation`]: Policy rules, combination enumeration and ranking
//! - [`Database`]: SQLite storage with conflict-checked booking
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use mesa::{Table, TableCode};
//!
//! let table = Table::builder("21", "Cristal", 4).joinable(true).join_partner("22").build().unwrap();
//! assert_eq!(table.code(), &TableCode::new("21").unwrap());
//! assert!(table.join_partners().contains(&TableCode::new("22").unwrap()));
//! ```

pub mod allocation;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod reservation;
pub mod table;

// Re-export key types at crate root for convenience
pub use allocation::{AllocationService, CandidateKind, CandidateSolution, SuggestRequest};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use reservation::{Reservation, ReservationBuilder, Shift, Stage, UsageType};
pub use table::{
    join_partner_issues, InvalidTableError, JoinPartnerIssue, Table, TableBuilder, TableCode,
};
