//! Reservation types for the booking ledger.
//!
//! This module provides the [`Shift`], [`UsageType`] and [`Stage`] enums and
//! the [`Reservation`] record, including the delimited assigned-tables format
//! used when reservations are stored.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::TableCode;

/// A named service period that reservations and occupancy are scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    /// Midday service.
    Lunch,
    /// Evening service.
    Dinner,
}

impl Shift {
    /// Returns the lowercase name used in storage and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shift {
    type Err = Error;

    /// Parses a shift name (case-insensitive).
    ///
    /// ```
    /// use mesa::Shift;
    ///
    /// assert_eq!("Dinner".parse::<Shift>().unwrap(), Shift::Dinner);
    /// assert!("brunch".parse::<Shift>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            _ => Err(Error::validation(
                "shift",
                format!("unknown shift '{s}' (expected lunch or dinner)"),
            )),
        }
    }
}

/// Classification of a reservation's purpose, gating access to certain venues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageType {
    /// Private guests.
    Personal,
    /// Business guests.
    Corporate,
    /// A hosted event.
    Event,
}

impl UsageType {
    /// Returns the lowercase name used in storage and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Corporate => "corporate",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for UsageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UsageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "personal" => Ok(Self::Personal),
            "corporate" => Ok(Self::Corporate),
            "event" => Ok(Self::Event),
            _ => Err(Error::validation(
                "usage_type",
                format!("unknown usage type '{s}' (expected personal, corporate or event)"),
            )),
        }
    }
}

/// Lifecycle stage of a reservation. Only [`Stage::Confirmed`] occupies tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Requested but not yet committed.
    Pending,
    /// Committed; its tables are occupied for the date and shift.
    Confirmed,
    /// Withdrawn.
    Cancelled,
}

impl Stage {
    /// Returns the lowercase name used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` if reservations in this stage occupy their tables.
    #[must_use]
    pub const fn occupies_tables(self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(Error::validation("stage", format!("unknown stage '{s}'"))),
        }
    }
}

/// Parses a delimited assigned-tables string.
///
/// `,`, `;` and `+` are all accepted as delimiters; whitespace and empty
/// entries are ignored.
///
/// # Errors
///
/// Never fails for delimiter reasons; returns an error only if an entry is
/// not a valid table code.
///
/// # Examples
///
/// ```
/// use mesa::reservation::parse_assigned_tables;
///
/// let codes = parse_assigned_tables("22, 21;23 + 21").unwrap();
/// let codes: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
/// assert_eq!(codes, vec!["21", "22", "23"]);
/// ```
pub fn parse_assigned_tables(raw: &str) -> Result<BTreeSet<TableCode>> {
    raw.split([',', ';', '+'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| TableCode::new(s).map_err(Error::from))
        .collect()
}

/// Formats assigned tables as the stored delimited string (`"21,22"`).
#[must_use]
pub fn format_assigned_tables(codes: &BTreeSet<TableCode>) -> String {
    codes
        .iter()
        .map(TableCode::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// A reservation in the ledger.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use mesa::{Reservation, Shift, Stage, UsageType};
///
/// let reservation = Reservation::builder(
///     NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
///     Shift::Dinner,
///     6,
/// )
/// .usage(UsageType::Personal)
/// .tables(["21", "22"])
/// .build()
/// .unwrap();
///
/// assert_eq!(reservation.stage(), Stage::Confirmed);
/// assert_eq!(reservation.assigned_tables().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: Option<i64>,
    date: NaiveDate,
    shift: Shift,
    party_size: u32,
    usage: UsageType,
    assigned_tables: BTreeSet<TableCode>,
    stage: Stage,
    customer: Option<String>,
    created_at: SystemTime,
}

impl Reservation {
    /// Creates a builder for a reservation.
    #[must_use]
    pub fn builder(date: NaiveDate, shift: Shift, party_size: u32) -> ReservationBuilder {
        ReservationBuilder::new(date, shift, party_size)
    }

    /// Returns the database id, if persisted.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    /// Returns the service date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the shift.
    #[must_use]
    pub const fn shift(&self) -> Shift {
        self.shift
    }

    /// Returns the party size.
    #[must_use]
    pub const fn party_size(&self) -> u32 {
        self.party_size
    }

    /// Returns the usage type.
    #[must_use]
    pub const fn usage(&self) -> UsageType {
        self.usage
    }

    /// Returns the assigned table codes.
    #[must_use]
    pub const fn assigned_tables(&self) -> &BTreeSet<TableCode> {
        &self.assigned_tables
    }

    /// Returns the lifecycle stage.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the customer label.
    #[must_use]
    pub fn customer(&self) -> Option<&str> {
        self.customer.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }
}

/// Builder for [`Reservation`].
#[derive(Debug, Clone)]
pub struct ReservationBuilder {
    id: Option<i64>,
    date: NaiveDate,
    shift: Shift,
    party_size: u32,
    usage: UsageType,
    tables: Vec<String>,
    stage: Stage,
    customer: Option<String>,
    created_at: Option<SystemTime>,
}

impl ReservationBuilder {
    fn new(date: NaiveDate, shift: Shift, party_size: u32) -> Self {
        Self {
            id: None,
            date,
            shift,
            party_size,
            usage: UsageType::Personal,
            tables: Vec::new(),
            stage: Stage::Confirmed,
            customer: None,
            created_at: None,
        }
    }

    /// Sets the database id.
    #[must_use]
    pub fn id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }

    /// Sets the usage type (default: personal).
    #[must_use]
    pub fn usage(mut self, usage: UsageType) -> Self {
        self.usage = usage;
        self
    }

    /// Sets the assigned table codes.
    #[must_use]
    pub fn tables<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the stage (default: confirmed).
    #[must_use]
    pub fn stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    /// Sets the customer label.
    #[must_use]
    pub fn customer(mut self, customer: Option<String>) -> Self {
        self.customer = customer;
        self
    }

    /// Sets the creation timestamp (default: now).
    #[must_use]
    pub fn created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the party size is zero or a table code is
    /// invalid.
    pub fn build(self) -> Result<Reservation> {
        if self.party_size == 0 {
            return Err(Error::validation("party_size", "must be at least 1"));
        }

        let assigned_tables = self
            .tables
            .iter()
            .map(|s| TableCode::new(s).map_err(Error::from))
            .collect::<Result<BTreeSet<_>>>()?;

        Ok(Reservation {
            id: self.id,
            date: self.date,
            shift: self.shift,
            party_size: self.party_size,
            usage: self.usage,
            assigned_tables,
            stage: self.stage,
            customer: self.customer,
            created_at: self.created_at.unwrap_or_else(SystemTime::now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_shift_parse() {
        assert_eq!("lunch".parse::<Shift>().unwrap(), Shift::Lunch);
        assert_eq!(" DINNER ".parse::<Shift>().unwrap(), Shift::Dinner);
        let err = "brunch".parse::<Shift>().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_usage_parse() {
        assert_eq!("Corporate".parse::<UsageType>().unwrap(), UsageType::Corporate);
        assert_eq!("event".parse::<UsageType>().unwrap(), UsageType::Event);
        assert!("wedding".parse::<UsageType>().unwrap_err().is_validation());
    }

    #[test]
    fn test_stage_parse_and_occupancy() {
        assert_eq!("canceled".parse::<Stage>().unwrap(), Stage::Cancelled);
        assert!(Stage::Confirmed.occupies_tables());
        assert!(!Stage::Pending.occupies_tables());
        assert!(!Stage::Cancelled.occupies_tables());
    }

    #[test]
    fn test_enum_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Shift::Lunch).unwrap(), "\"lunch\"");
        assert_eq!(
            serde_json::to_string(&UsageType::Corporate).unwrap(),
            "\"corporate\""
        );
    }

    #[test]
    fn test_parse_assigned_tables_mixed_delimiters() {
        let codes = parse_assigned_tables(" 10 ; 2,,+3 ").unwrap();
        assert_eq!(format_assigned_tables(&codes), "2,3,10");
    }

    #[test]
    fn test_parse_assigned_tables_empty() {
        assert!(parse_assigned_tables("").unwrap().is_empty());
        assert!(parse_assigned_tables(" , ; ").unwrap().is_empty());
    }

    #[test]
    fn test_builder_defaults() {
        let r = Reservation::builder(date(), Shift::Lunch, 2).build().unwrap();
        assert_eq!(r.stage(), Stage::Confirmed);
        assert_eq!(r.usage(), UsageType::Personal);
        assert!(r.assigned_tables().is_empty());
        assert_eq!(r.id(), None);
    }

    #[test]
    fn test_builder_rejects_zero_party() {
        let err = Reservation::builder(date(), Shift::Lunch, 0)
            .build()
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_builder_deduplicates_tables() {
        let r = Reservation::builder(date(), Shift::Dinner, 4)
            .tables(["22", "21", "22"])
            .build()
            .unwrap();
        assert_eq!(format_assigned_tables(r.assigned_tables()), "21,22");
    }
}
