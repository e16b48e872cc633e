//! Write transactions: catalog import and checked booking.
//!
//! Every write here runs inside an IMMEDIATE transaction, which takes the
//! SQLite write lock up front. The occupancy re-check and the insert
//! therefore see the same ledger, and two overlapping bookings serialize.

use rusqlite::{params, Transaction, TransactionBehavior};

use crate::allocation::OccupiedSet;
use crate::error::{Error, Result};
use crate::reservation::format_assigned_tables;
use crate::{Reservation, Stage, Table};

use super::connection::Database;
use super::operations::{
    created_at_secs, query_reservation, query_reservations, query_table, upsert_table, DATE_FORMAT,
};
use super::schema::{INSERT_RESERVATION, UPDATE_RESERVATION_STAGE};

impl Database {
    /// Upserts a batch of tables atomically.
    ///
    /// With `replace`, tables whose code is not in the batch are removed
    /// first. Returns the number of tables written.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is written in that case.
    pub fn import_tables(&mut self, tables: &[Table], replace: bool) -> Result<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if replace {
            let removed = tx.execute("DELETE FROM dining_tables", [])?;
            log::debug!("removed {removed} tables before import");
        }
        for table in tables {
            upsert_table(&tx, table)?;
        }

        tx.commit()?;
        Ok(tables.len())
    }

    /// Inserts a reservation after re-checking occupancy.
    ///
    /// Every assigned table must exist in the catalog. A confirmed
    /// reservation must have at least one table, and none of its tables may
    /// already be held by another confirmed reservation for the same date and
    /// shift. Returns the new reservation id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservationConflict`] if a table is taken,
    /// [`Error::NotFound`] for an unknown table, or a database error
    /// (including lock timeouts, see [`Error::is_busy`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use mesa::database::Database;
    /// use mesa::{Reservation, Shift, Table};
    ///
    /// let mut db = Database::open_in_memory().unwrap();
    /// db.upsert_table(&Table::builder("7", "Terraza", 2).build().unwrap()).unwrap();
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    /// let booking = Reservation::builder(date, Shift::Lunch, 2).tables(["7"]).build().unwrap();
    ///
    /// db.book_reservation(&booking).unwrap();
    /// assert!(db.book_reservation(&booking).is_err());
    /// ```
    pub fn book_reservation(&mut self, reservation: &Reservation) -> Result<i64> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        check_tables_exist(&tx, reservation)?;
        if reservation.stage() == Stage::Confirmed {
            if reservation.assigned_tables().is_empty() {
                return Err(Error::validation(
                    "tables",
                    "a confirmed reservation needs at least one table",
                ));
            }
            check_no_conflict(&tx, reservation)?;
        }

        tx.execute(
            INSERT_RESERVATION,
            params![
                reservation.date().format(DATE_FORMAT).to_string(),
                reservation.shift().as_str(),
                reservation.party_size(),
                reservation.usage().as_str(),
                format_assigned_tables(reservation.assigned_tables()),
                reservation.stage().as_str(),
                reservation.customer(),
                created_at_secs(reservation)?,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        log::info!(
            "booked reservation {id}: {} {} tables {}",
            reservation.date(),
            reservation.shift(),
            format_assigned_tables(reservation.assigned_tables())
        );
        Ok(id)
    }

    /// Promotes a pending reservation to confirmed, with the same occupancy
    /// re-check as [`book_reservation`](Self::book_reservation).
    ///
    /// Confirming an already confirmed reservation does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, a validation error for a
    /// cancelled reservation or one without tables, or
    /// [`Error::ReservationConflict`] if a table has been taken meanwhile.
    pub fn confirm_reservation(&mut self, id: i64) -> Result<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let reservation = query_reservation(&tx, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("reservation {id}"),
        })?;

        match reservation.stage() {
            Stage::Confirmed => return Ok(()),
            Stage::Cancelled => {
                return Err(Error::validation(
                    "stage",
                    format!("reservation {id} is cancelled and cannot be confirmed"),
                ))
            }
            Stage::Pending => {}
        }
        if reservation.assigned_tables().is_empty() {
            return Err(Error::validation(
                "tables",
                format!("reservation {id} has no tables assigned"),
            ));
        }

        check_tables_exist(&tx, &reservation)?;
        check_no_conflict(&tx, &reservation)?;
        tx.execute(UPDATE_RESERVATION_STAGE, params![Stage::Confirmed.as_str(), id])?;
        tx.commit()?;

        log::info!("confirmed reservation {id}");
        Ok(())
    }

    /// Cancels a reservation, freeing its tables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id.
    pub fn cancel_reservation(&mut self, id: i64) -> Result<()> {
        let rows = self
            .conn
            .execute(UPDATE_RESERVATION_STAGE, params![Stage::Cancelled.as_str(), id])?;
        if rows == 0 {
            return Err(Error::NotFound {
                resource: format!("reservation {id}"),
            });
        }
        log::info!("cancelled reservation {id}");
        Ok(())
    }
}

fn check_tables_exist(tx: &Transaction<'_>, reservation: &Reservation) -> Result<()> {
    for code in reservation.assigned_tables() {
        if query_table(tx, code)?.is_none() {
            return Err(Error::NotFound {
                resource: format!("table {code}"),
            });
        }
    }
    Ok(())
}

fn check_no_conflict(tx: &Transaction<'_>, reservation: &Reservation) -> Result<()> {
    let confirmed = query_reservations(
        tx,
        reservation.date(),
        reservation.shift(),
        Some(Stage::Confirmed),
    )?;
    let occupied = OccupiedSet::from_reservations(&confirmed);
    let clashes = occupied.intersection(reservation.assigned_tables());
    if clashes.is_empty() {
        return Ok(());
    }

    let codes = clashes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    log::warn!(
        "booking rejected: tables {codes} already confirmed for {} {}",
        reservation.date(),
        reservation.shift()
    );
    Err(Error::ReservationConflict {
        details: format!(
            "tables {codes} already confirmed for {} {}",
            reservation.date(),
            reservation.shift()
        ),
    })
}
