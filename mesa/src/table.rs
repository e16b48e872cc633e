//! Dining table types for the table catalog.
//!
//! This module provides the [`TableCode`] label type, the [`Table`] inventory
//! record and a builder that enforces the catalog invariants.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// The unique label of a dining table (for example `"21"` or `"T3"`).
///
/// Codes order "numerically first": codes that parse as an integer compare by
/// value and sort before non-numeric codes, which compare lexically. This is
/// the canonical order used wherever table codes are sorted.
///
/// # Examples
///
/// ```
/// use mesa::TableCode;
///
/// let nine = TableCode::new("9").unwrap();
/// let ten = TableCode::new("10").unwrap();
/// let bar = TableCode::new("B1").unwrap();
///
/// assert!(nine < ten);
/// assert!(ten < bar);
/// assert_eq!(ten.number(), Some(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableCode(String);

impl TableCode {
    /// Creates a table code, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty after trimming or contains a
    /// character used as a delimiter in assigned-table lists.
    pub fn new(code: impl AsRef<str>) -> Result<Self, InvalidTableError> {
        let trimmed = code.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InvalidTableError {
                code: String::new(),
                reason: "table code must be non-empty".into(),
            });
        }
        if trimmed.contains([',', ';', '+']) {
            return Err(InvalidTableError {
                code: trimmed.to_string(),
                reason: "table code must not contain ',', ';' or '+'".into(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric value of the code, if it is a plain integer.
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        self.0.parse().ok()
    }
}

impl Ord for TableCode {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.number(), other.number()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for TableCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<String> for TableCode {
    type Error = InvalidTableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for TableCode {
    type Error = InvalidTableError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TableCode> for String {
    fn from(code: TableCode) -> Self {
        code.0
    }
}

impl fmt::Display for TableCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error type for invalid table codes and table definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTableError {
    /// The code of the offending table (may be empty).
    pub code: String,
    /// The reason the table is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid table {}: {}", self.code, self.reason)
    }
}

impl std::error::Error for InvalidTableError {}

/// A dining table in the catalog.
///
/// Tables are administered out-of-band; the allocation engine only reads them.
/// `capacity` is always at least 1. `join_partners` lists the codes *this*
/// table declares it can be joined with; the relation is not required to be
/// symmetric and may mention codes that do not exist.
///
/// # Examples
///
/// ```
/// use mesa::{Table, TableCode};
///
/// let table = Table::builder("21", "Cristal", 4)
///     .joinable(true)
///     .join_partner("22")
///     .build()
///     .unwrap();
///
/// assert_eq!(table.code().as_str(), "21");
/// assert_eq!(table.capacity(), 4);
/// assert!(table.join_partners().contains(&TableCode::new("22").unwrap()));
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    code: TableCode,
    capacity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    floor: Option<i32>,
    venue: String,
    #[serde(default)]
    joinable: bool,
    #[serde(default)]
    join_partners: BTreeSet<TableCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    events_only: Option<bool>,
    #[serde(default)]
    personal_events_allowed: bool,
    #[serde(default)]
    corporate_events_allowed: bool,
    #[serde(default)]
    has_tv: bool,
    #[serde(default)]
    is_private: bool,
    #[serde(default = "default_available")]
    available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

const fn default_available() -> bool {
    true
}

impl Table {
    /// Creates a builder for a table with the required fields.
    #[must_use]
    pub fn builder(code: impl Into<String>, venue: impl Into<String>, capacity: u32) -> TableBuilder {
        TableBuilder::new(code, venue, capacity)
    }

    /// Checks the invariants of a table that was deserialized directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity is zero or the venue is empty.
    pub fn validate(&self) -> Result<(), InvalidTableError> {
        if self.capacity == 0 {
            return Err(InvalidTableError {
                code: self.code.to_string(),
                reason: "capacity must be at least 1".into(),
            });
        }
        if self.venue.trim().is_empty() {
            return Err(InvalidTableError {
                code: self.code.to_string(),
                reason: "venue must be non-empty".into(),
            });
        }
        Ok(())
    }

    /// Returns the database id, if the table has been persisted.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    /// Returns the table code.
    #[must_use]
    pub const fn code(&self) -> &TableCode {
        &self.code
    }

    /// Returns the seating capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the informational shape.
    #[must_use]
    pub fn shape(&self) -> Option<&str> {
        self.shape.as_deref()
    }

    /// Returns the floor number.
    #[must_use]
    pub const fn floor(&self) -> Option<i32> {
        self.floor
    }

    /// Returns the venue (zone) name.
    #[must_use]
    pub fn venue(&self) -> &str {
        &self.venue
    }

    /// Returns whether the table may anchor a pairwise join.
    #[must_use]
    pub const fn joinable(&self) -> bool {
        self.joinable
    }

    /// Returns the codes this table declares it can be joined with.
    #[must_use]
    pub const fn join_partners(&self) -> &BTreeSet<TableCode> {
        &self.join_partners
    }

    /// Returns the events-only flag, or `None` when it was never set.
    #[must_use]
    pub const fn events_only(&self) -> Option<bool> {
        self.events_only
    }

    /// Returns whether personal events may be hosted at this table.
    #[must_use]
    pub const fn personal_events_allowed(&self) -> bool {
        self.personal_events_allowed
    }

    /// Returns whether corporate events may be hosted at this table.
    #[must_use]
    pub const fn corporate_events_allowed(&self) -> bool {
        self.corporate_events_allowed
    }

    /// Returns whether the table has a TV.
    #[must_use]
    pub const fn has_tv(&self) -> bool {
        self.has_tv
    }

    /// Returns whether the table is in a private space.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        self.is_private
    }

    /// Returns the static on/off switch (not time-scoped).
    #[must_use]
    pub const fn available(&self) -> bool {
        self.available
    }

    /// Returns the free-text note.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// Builder for [`Table`].
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone)]
pub struct TableBuilder {
    id: Option<i64>,
    code: String,
    capacity: u32,
    shape: Option<String>,
    floor: Option<i32>,
    venue: String,
    joinable: bool,
    join_partners: Vec<String>,
    events_only: Option<bool>,
    personal_events_allowed: bool,
    corporate_events_allowed: bool,
    has_tv: bool,
    is_private: bool,
    available: bool,
    note: Option<String>,
}

impl TableBuilder {
    fn new(code: impl Into<String>, venue: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: None,
            code: code.into(),
            capacity,
            shape: None,
            floor: None,
            venue: venue.into(),
            joinable: false,
            join_partners: Vec::new(),
            events_only: None,
            personal_events_allowed: false,
            corporate_events_allowed: false,
            has_tv: false,
            is_private: false,
            available: true,
            note: None,
        }
    }

    /// Sets the database id.
    #[must_use]
    pub fn id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }

    /// Sets the shape.
    #[must_use]
    pub fn shape(mut self, shape: Option<String>) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the floor.
    #[must_use]
    pub fn floor(mut self, floor: Option<i32>) -> Self {
        self.floor = floor;
        self
    }

    /// Sets the joinable flag.
    #[must_use]
    pub fn joinable(mut self, joinable: bool) -> Self {
        self.joinable = joinable;
        self
    }

    /// Adds one declared join partner.
    #[must_use]
    pub fn join_partner(mut self, code: impl Into<String>) -> Self {
        self.join_partners.push(code.into());
        self
    }

    /// Replaces the declared join partners.
    #[must_use]
    pub fn join_partners<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.join_partners = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the events-only flag (`None` leaves it unset).
    #[must_use]
    pub fn events_only(mut self, events_only: Option<bool>) -> Self {
        self.events_only = events_only;
        self
    }

    /// Sets whether personal events are allowed.
    #[must_use]
    pub fn personal_events_allowed(mut self, allowed: bool) -> Self {
        self.personal_events_allowed = allowed;
        self
    }

    /// Sets whether corporate events are allowed.
    #[must_use]
    pub fn corporate_events_allowed(mut self, allowed: bool) -> Self {
        self.corporate_events_allowed = allowed;
        self
    }

    /// Sets the TV flag.
    #[must_use]
    pub fn has_tv(mut self, has_tv: bool) -> Self {
        self.has_tv = has_tv;
        self
    }

    /// Sets the private flag.
    #[must_use]
    pub fn is_private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    /// Sets the static availability switch.
    #[must_use]
    pub fn available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Sets the note.
    #[must_use]
    pub fn note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    /// Builds the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the code or any join partner code is invalid, the
    /// capacity is zero, or the venue is empty.
    pub fn build(self) -> Result<Table, InvalidTableError> {
        let code = TableCode::new(&self.code)?;
        let join_partners = self
            .join_partners
            .iter()
            .map(TableCode::new)
            .collect::<Result<BTreeSet<_>, _>>()?;

        let table = Table {
            id: self.id,
            code,
            capacity: self.capacity,
            shape: self.shape,
            floor: self.floor,
            venue: self.venue.trim().to_string(),
            joinable: self.joinable,
            join_partners,
            events_only: self.events_only,
            personal_events_allowed: self.personal_events_allowed,
            corporate_events_allowed: self.corporate_events_allowed,
            has_tv: self.has_tv,
            is_private: self.is_private,
            available: self.available,
            note: self.note,
        };
        table.validate()?;
        Ok(table)
    }
}

/// A problem with declared join partners found by [`join_partner_issues`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinPartnerIssue {
    /// The table lists a partner code that is not in the catalog.
    Dangling {
        /// The declaring table.
        table: TableCode,
        /// The missing partner.
        partner: TableCode,
    },
    /// The table lists a partner that does not list it back.
    Asymmetric {
        /// The declaring table.
        table: TableCode,
        /// The partner that does not reciprocate.
        partner: TableCode,
    },
}

impl fmt::Display for JoinPartnerIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dangling { table, partner } => {
                write!(f, "table {table} lists unknown join partner {partner}")
            }
            Self::Asymmetric { table, partner } => {
                write!(f, "table {table} lists {partner}, but {partner} does not list {table}")
            }
        }
    }
}

/// Reports dangling and one-sided join partner declarations in a catalog.
///
/// Neither is rejected: the engine joins as declared. Results are in
/// canonical code order.
#[must_use]
pub fn join_partner_issues(tables: &[Table]) -> Vec<JoinPartnerIssue> {
    let by_code: BTreeMap<&TableCode, &Table> = tables.iter().map(|t| (t.code(), t)).collect();
    let mut issues = Vec::new();

    for (code, table) in &by_code {
        for partner in table.join_partners() {
            match by_code.get(partner) {
                None => issues.push(JoinPartnerIssue::Dangling {
                    table: (*code).clone(),
                    partner: partner.clone(),
                }),
                Some(other) if !other.join_partners().contains(code) => {
                    issues.push(JoinPartnerIssue::Asymmetric {
                        table: (*code).clone(),
                        partner: partner.clone(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    issues
}
