//! Candidate seating assignments.

use std::fmt;

use serde::Serialize;

use crate::TableCode;

/// Whether a candidate seats the party at one table or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    /// A single table.
    Individual,
    /// Several tables joined into one unit.
    Combined,
}

impl CandidateKind {
    /// Returns the kind as a lowercase string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Combined => "combined",
        }
    }
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the enumerator produced a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOrigin {
    /// A single table.
    Single,
    /// A group from the combination registry, by name.
    Registry(String),
    /// A pair declared on `anchor`'s join partners.
    Pairwise {
        /// The table whose declaration produced the pair.
        anchor: TableCode,
        /// The declared partner.
        partner: TableCode,
    },
}

/// One proposed table assignment.
///
/// Serializes with the wire names `tableCodes`, `totalCapacity`,
/// `description`, `kind` and (when known) `venue`.
///
/// # Examples
///
/// ```
/// use mesa::allocation::{CandidateKind, CandidateSolution};
/// use mesa::Table;
///
/// let table = Table::builder("7", "Terraza", 2).build().unwrap();
/// let candidate = CandidateSolution::individual(&table);
///
/// assert_eq!(candidate.kind(), CandidateKind::Individual);
/// let json = serde_json::to_value(&candidate).unwrap();
/// assert_eq!(json["tableCodes"][0], "7");
/// assert_eq!(json["totalCapacity"], 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSolution {
    table_codes: Vec<TableCode>,
    total_capacity: u64,
    description: String,
    kind: CandidateKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    venue: Option<String>,
    #[serde(skip)]
    origin: CandidateOrigin,
}

impl CandidateSolution {
    /// Creates a candidate; the kind is derived from the number of codes.
    #[must_use]
    pub fn new(
        table_codes: Vec<TableCode>,
        total_capacity: u64,
        description: impl Into<String>,
        venue: Option<String>,
        origin: CandidateOrigin,
    ) -> Self {
        let kind = if table_codes.len() == 1 {
            CandidateKind::Individual
        } else {
            CandidateKind::Combined
        };
        Self {
            table_codes,
            total_capacity,
            description: description.into(),
            kind,
            venue,
            origin,
        }
    }

    /// A candidate seating the party at one table.
    #[must_use]
    pub fn individual(table: &crate::Table) -> Self {
        Self::new(
            vec![table.code().clone()],
            u64::from(table.capacity()),
            format!("Table {} ({} seats)", table.code(), table.capacity()),
            Some(table.venue().to_string()),
            CandidateOrigin::Single,
        )
    }

    /// Returns the member codes.
    #[must_use]
    pub fn table_codes(&self) -> &[TableCode] {
        &self.table_codes
    }

    /// Returns the sum of the live member capacities.
    ///
    /// Summed as `u64` so that no combination of `u32` capacities overflows.
    #[must_use]
    pub const fn total_capacity(&self) -> u64 {
        self.total_capacity
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the kind.
    #[must_use]
    pub const fn kind(&self) -> CandidateKind {
        self.kind
    }

    /// Returns the venue of the first member.
    #[must_use]
    pub fn venue(&self) -> Option<&str> {
        self.venue.as_deref()
    }

    /// Returns how the candidate was produced.
    #[must_use]
    pub const fn origin(&self) -> &CandidateOrigin {
        &self.origin
    }

    /// Joins the codes with `+` for display (`"21+22"`).
    #[must_use]
    pub fn codes_label(&self) -> String {
        self.table_codes
            .iter()
            .map(TableCode::as_str)
            .collect::<Vec<_>>()
            .join("+")
    }
}
