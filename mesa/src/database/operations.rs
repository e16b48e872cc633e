//! Catalog and ledger CRUD operations.
//!
//! The query helpers take a plain [`Connection`] so they can run both on the
//! database itself and inside a transaction.

// created_at is stored as i64 seconds
#![allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]

use std::time::{Duration, SystemTime};

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::reservation::{format_assigned_tables, parse_assigned_tables};
use crate::{Reservation, Shift, Stage, Table, TableCode};

use super::connection::Database;
use super::schema::{RESERVATION_COLUMNS, TABLE_COLUMNS, UPSERT_TABLE};

/// Date format used in the `reservations.date` column.
pub(super) const DATE_FORMAT: &str = "%Y-%m-%d";

fn conversion_error<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

fn table_from_row(row: &Row<'_>) -> rusqlite::Result<Table> {
    let partners: String = row.get(7)?;
    let partners = parse_assigned_tables(&partners).map_err(|e| conversion_error(7, e))?;

    Table::builder(row.get::<_, String>(1)?, row.get::<_, String>(5)?, row.get(2)?)
        .id(Some(row.get(0)?))
        .shape(row.get(3)?)
        .floor(row.get(4)?)
        .joinable(row.get(6)?)
        .join_partners(partners.into_iter().map(String::from))
        .events_only(row.get(8)?)
        .personal_events_allowed(row.get(9)?)
        .corporate_events_allowed(row.get(10)?)
        .has_tv(row.get(11)?)
        .is_private(row.get(12)?)
        .available(row.get(13)?)
        .note(row.get(14)?)
        .build()
        .map_err(|e| conversion_error(1, e))
}

fn reservation_from_row(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    let date: String = row.get(1)?;
    let date = NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|e| conversion_error(1, e))?;
    let shift: Shift = row
        .get::<_, String>(2)?
        .parse()
        .map_err(|e| conversion_error(2, e))?;
    let usage = row
        .get::<_, String>(4)?
        .parse()
        .map_err(|e| conversion_error(4, e))?;
    let tables: String = row.get(5)?;
    let tables = parse_assigned_tables(&tables).map_err(|e| conversion_error(5, e))?;
    let stage: Stage = row
        .get::<_, String>(6)?
        .parse()
        .map_err(|e| conversion_error(6, e))?;
    let created_secs: i64 = row.get(8)?;

    Reservation::builder(date, shift, row.get(3)?)
        .id(Some(row.get(0)?))
        .usage(usage)
        .tables(tables.into_iter().map(String::from))
        .stage(stage)
        .customer(row.get(7)?)
        .created_at(SystemTime::UNIX_EPOCH + Duration::from_secs(created_secs as u64))
        .build()
        .map_err(|e| conversion_error(3, e))
}

pub(super) fn query_tables(conn: &Connection, available_only: bool) -> Result<Vec<Table>> {
    let sql = if available_only {
        format!("SELECT {TABLE_COLUMNS} FROM dining_tables WHERE available = 1")
    } else {
        format!("SELECT {TABLE_COLUMNS} FROM dining_tables")
    };
    let mut stmt = conn.prepare(&sql)?;
    let mut tables = stmt
        .query_map([], table_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    tables.sort_by(|a, b| a.code().cmp(b.code()));
    Ok(tables)
}

pub(super) fn query_table(conn: &Connection, code: &TableCode) -> Result<Option<Table>> {
    let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_tables WHERE code = ?");
    Ok(conn
        .query_row(&sql, [code.as_str()], table_from_row)
        .optional()?)
}

pub(super) fn query_reservations(
    conn: &Connection,
    date: NaiveDate,
    shift: Shift,
    stage: Option<Stage>,
) -> Result<Vec<Reservation>> {
    let date = date.format(DATE_FORMAT).to_string();
    let mut reservations = Vec::new();

    if let Some(stage) = stage {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE date = ?1 AND shift = ?2 AND stage = ?3 ORDER BY id"
        );
        let mut stmt = conn.prepare(&sql)?;
        for row in stmt.query_map(params![date, shift.as_str(), stage.as_str()], reservation_from_row)? {
            reservations.push(row?);
        }
    } else {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE date = ?1 AND shift = ?2 ORDER BY id"
        );
        let mut stmt = conn.prepare(&sql)?;
        for row in stmt.query_map(params![date, shift.as_str()], reservation_from_row)? {
            reservations.push(row?);
        }
    }

    Ok(reservations)
}

pub(super) fn query_reservation(conn: &Connection, id: i64) -> Result<Option<Reservation>> {
    let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?");
    Ok(conn.query_row(&sql, [id], reservation_from_row).optional()?)
}

pub(super) fn upsert_table(conn: &Connection, table: &Table) -> Result<i64> {
    conn.execute(
        UPSERT_TABLE,
        params![
            table.code().as_str(),
            table.capacity(),
            table.shape(),
            table.floor(),
            table.venue(),
            table.joinable(),
            format_assigned_tables(table.join_partners()),
            table.events_only(),
            table.personal_events_allowed(),
            table.corporate_events_allowed(),
            table.has_tv(),
            table.is_private(),
            table.available(),
            table.note(),
        ],
    )?;
    let id = conn.query_row(
        "SELECT id FROM dining_tables WHERE code = ?",
        [table.code().as_str()],
        |row| row.get(0),
    )?;
    Ok(id)
}

pub(super) fn created_at_secs(reservation: &Reservation) -> Result<i64> {
    let secs = reservation
        .created_at()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::validation("created_at", format!("invalid timestamp: {e}")))?
        .as_secs();
    Ok(secs as i64)
}

impl Database {
    /// Inserts a table or replaces the catalog entry with the same code.
    ///
    /// Returns the row id.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn upsert_table(&self, table: &Table) -> Result<i64> {
        upsert_table(&self.conn, table)
    }

    /// Looks up one table by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed.
    pub fn get_table(&self, code: &TableCode) -> Result<Option<Table>> {
        query_table(&self.conn, code)
    }

    /// Lists the whole catalog in canonical code order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed.
    pub fn list_tables(&self) -> Result<Vec<Table>> {
        query_tables(&self.conn, false)
    }

    /// Lists tables whose availability switch is on, in canonical code order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed.
    pub fn list_available_tables(&self) -> Result<Vec<Table>> {
        query_tables(&self.conn, true)
    }

    /// Removes a table from the catalog. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn delete_table(&self, code: &TableCode) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM dining_tables WHERE code = ?", [code.as_str()])?;
        Ok(rows > 0)
    }

    /// Lists reservations of every stage for one date and shift, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed.
    pub fn list_reservations(&self, date: NaiveDate, shift: Shift) -> Result<Vec<Reservation>> {
        query_reservations(&self.conn, date, shift, None)
    }

    /// Lists confirmed reservations for one date and shift, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed.
    pub fn list_confirmed_reservations(
        &self,
        date: NaiveDate,
        shift: Shift,
    ) -> Result<Vec<Reservation>> {
        query_reservations(&self.conn, date, shift, Some(Stage::Confirmed))
    }

    /// Looks up one reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is malformed.
    pub fn get_reservation(&self, id: i64) -> Result<Option<Reservation>> {
        query_reservation(&self.conn, id)
    }
}
