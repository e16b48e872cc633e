//! The set of tables committed to confirmed reservations.
//!
//! The occupied set is computed once per suggestion request from the
//! reservation ledger and threaded through every later stage.

use std::collections::BTreeSet;

use crate::{Reservation, TableCode};

/// Table codes committed to confirmed reservations for one date and shift.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use mesa::allocation::OccupiedSet;
/// use mesa::{Reservation, Shift, Stage, TableCode};
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
/// let confirmed = Reservation::builder(date, Shift::Dinner, 4)
///     .tables(["21", "22"])
///     .build()
///     .unwrap();
/// let pending = Reservation::builder(date, Shift::Dinner, 2)
///     .tables(["5"])
///     .stage(Stage::Pending)
///     .build()
///     .unwrap();
///
/// let occupied = OccupiedSet::from_reservations(&[confirmed, pending]);
/// assert!(occupied.contains(&TableCode::new("21").unwrap()));
/// assert!(!occupied.contains(&TableCode::new("5").unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupiedSet {
    codes: BTreeSet<TableCode>,
}

impl OccupiedSet {
    /// Creates an empty occupied set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Unions the assigned tables of every reservation whose stage occupies tables.
    ///
    /// Callers are expected to pass reservations for a single date and shift.
    #[must_use]
    pub fn from_reservations(reservations: &[Reservation]) -> Self {
        let codes = reservations
            .iter()
            .filter(|r| r.stage().occupies_tables())
            .flat_map(|r| r.assigned_tables().iter().cloned())
            .collect();
        Self { codes }
    }

    /// Returns `true` if the table is occupied.
    #[must_use]
    pub fn contains(&self, code: &TableCode) -> bool {
        self.codes.contains(code)
    }

    /// Returns the occupied codes that also appear in `codes`, in canonical order.
    #[must_use]
    pub fn intersection<'a>(&self, codes: impl IntoIterator<Item = &'a TableCode>) -> Vec<TableCode> {
        let mut hits: Vec<TableCode> = codes
            .into_iter()
            .filter(|c| self.codes.contains(*c))
            .cloned()
            .collect();
        hits.sort();
        hits.dedup();
        hits
    }

    /// Returns the number of occupied tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns `true` if no table is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterates the occupied codes in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &TableCode> {
        self.codes.iter()
    }
}

impl FromIterator<TableCode> for OccupiedSet {
    fn from_iter<I: IntoIterator<Item = TableCode>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}
