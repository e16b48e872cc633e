//! Snapshot-consistent reads for the allocation engine.

use chrono::NaiveDate;
use rusqlite::{Transaction, TransactionBehavior};

use crate::allocation::{ReservationReader, TableInventoryReader};
use crate::error::Result;
use crate::{Reservation, Shift, Stage, Table};

use super::connection::Database;
use super::operations::{query_reservations, query_tables};

/// A read transaction over the catalog and ledger.
///
/// Every read through a snapshot observes the database as of the moment the
/// snapshot was taken, so a suggestion never mixes catalog and ledger state
/// from different points in time. The transaction is rolled back on drop.
///
/// # Examples
///
/// ```
/// use mesa::allocation::{AllocationService, SuggestRequest};
/// use mesa::database::Database;
///
/// let mut db = Database::open_in_memory().unwrap();
/// let request = SuggestRequest::parse("2026-10-16", "dinner", 2, "personal").unwrap();
///
/// let snapshot = db.read_snapshot().unwrap();
/// let suggestions = AllocationService::default()
///     .suggest(&snapshot, &snapshot, &request)
///     .unwrap();
/// assert!(suggestions.is_empty());
/// ```
#[derive(Debug)]
pub struct ReadSnapshot<'db> {
    tx: Transaction<'db>,
}

impl Database {
    /// Opens a read snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub fn read_snapshot(&mut self) -> Result<ReadSnapshot<'_>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Deferred)?;
        // A deferred transaction only pins its snapshot at the first read.
        let _: i64 = tx.query_row("SELECT COUNT(*) FROM metadata", [], |row| row.get(0))?;
        log::trace!("read snapshot opened");
        Ok(ReadSnapshot { tx })
    }
}

impl ReadSnapshot<'_> {
    /// Lists the whole catalog in canonical code order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tables(&self) -> Result<Vec<Table>> {
        query_tables(&self.tx, false)
    }

    /// Lists reservations of every stage for one date and shift.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations(&self, date: NaiveDate, shift: Shift) -> Result<Vec<Reservation>> {
        query_reservations(&self.tx, date, shift, None)
    }
}

impl TableInventoryReader for ReadSnapshot<'_> {
    fn list_available_tables(&self) -> Result<Vec<Table>> {
        query_tables(&self.tx, true)
    }
}

impl ReservationReader for ReadSnapshot<'_> {
    fn list_confirmed_reservations(&self, date: NaiveDate, shift: Shift) -> Result<Vec<Reservation>> {
        query_reservations(&self.tx, date, shift, Some(Stage::Confirmed))
    }
}

impl TableInventoryReader for Database {
    fn list_available_tables(&self) -> Result<Vec<Table>> {
        Self::list_available_tables(self)
    }
}

impl ReservationReader for Database {
    fn list_confirmed_reservations(&self, date: NaiveDate, shift: Shift) -> Result<Vec<Reservation>> {
        Self::list_confirmed_reservations(self, date, shift)
    }
}
