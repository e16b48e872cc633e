//! Venue and table policy predicates.
//!
//! Each rule is an independent, side-effect-free function over a table and a
//! [`PolicyContext`]. [`validate_all`] composes the per-table rules; join
//! legality is a property of a group and is checked separately with
//! [`validate_join`].

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::config::{CodeRange, MediaRestriction, PolicyConfig};
use crate::{Table, TableCode, UsageType};

use super::occupancy::OccupiedSet;

/// Resolved policy tables used by the predicates.
///
/// # Examples
///
/// ```
/// use mesa::allocation::PolicyRules;
///
/// let rules = PolicyRules::default();
/// assert!(rules.is_personal_only("terraza"));
/// assert!(rules.in_events_only_range(45));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRules {
    personal_only_venues: Vec<String>,
    events_only_ranges: Vec<CodeRange>,
    media_restrictions: Vec<MediaRestriction>,
}

impl PolicyRules {
    /// Creates rules from explicit tables.
    #[must_use]
    pub fn new(
        personal_only_venues: Vec<String>,
        events_only_ranges: Vec<CodeRange>,
        media_restrictions: Vec<MediaRestriction>,
    ) -> Self {
        Self {
            personal_only_venues,
            events_only_ranges,
            media_restrictions,
        }
    }

    /// Rules that restrict nothing.
    #[must_use]
    pub fn permissive() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }

    /// Returns `true` if the venue only accepts personal reservations.
    #[must_use]
    pub fn is_personal_only(&self, venue: &str) -> bool {
        self.personal_only_venues
            .iter()
            .any(|v| same_venue(v, venue))
    }

    /// Returns `true` if `code` falls in a reserved events-only range.
    #[must_use]
    pub fn in_events_only_range(&self, code: u32) -> bool {
        self.events_only_ranges.iter().any(|r| r.contains(code))
    }

    /// Returns `true` if the table is named by a media restriction.
    #[must_use]
    pub fn is_media_restricted(&self, venue: &str, code: &TableCode) -> bool {
        self.media_restrictions.iter().any(|m| {
            same_venue(&m.venue, venue) && m.tables.iter().any(|t| t.trim() == code.as_str())
        })
    }
}

impl Default for PolicyRules {
    fn default() -> Self {
        Self::from(&PolicyConfig::default())
    }
}

/// Fields left unset in the configuration take their built-in value.
impl From<&PolicyConfig> for PolicyRules {
    fn from(config: &PolicyConfig) -> Self {
        let builtin = PolicyConfig::builtin();
        Self::new(
            config
                .personal_only_venues
                .clone()
                .or(builtin.personal_only_venues)
                .unwrap_or_default(),
            config
                .events_only_ranges
                .clone()
                .or(builtin.events_only_ranges)
                .unwrap_or_default(),
            config
                .media_restrictions
                .clone()
                .or(builtin.media_restrictions)
                .unwrap_or_default(),
        )
    }
}

fn same_venue(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Everything the per-table predicates need besides the table itself.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    /// The requested usage type.
    pub usage: UsageType,
    /// Tables committed to confirmed reservations for the requested date and shift.
    pub occupied: &'a OccupiedSet,
    /// The policy tables.
    pub rules: &'a PolicyRules,
}

impl<'a> PolicyContext<'a> {
    /// Creates a context.
    #[must_use]
    pub const fn new(usage: UsageType, occupied: &'a OccupiedSet, rules: &'a PolicyRules) -> Self {
        Self {
            usage,
            occupied,
            rules,
        }
    }
}

/// Why a table (or a join) was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    /// The table is switched off in the catalog.
    #[error("table {code} is not available")]
    Unavailable {
        /// The rejected table.
        code: TableCode,
    },
    /// The table is committed to a confirmed reservation.
    #[error("table {code} is already occupied")]
    Occupied {
        /// The rejected table.
        code: TableCode,
    },
    /// The venue only accepts personal reservations.
    #[error("venue {venue} only accepts personal reservations, not {usage}")]
    PersonalOnlyVenue {
        /// The restricted venue.
        venue: String,
        /// The requested usage.
        usage: UsageType,
    },
    /// The table is reserved for events.
    #[error("table {code} is reserved for events")]
    EventsOnly {
        /// The rejected table.
        code: TableCode,
    },
    /// The table refuses corporate reservations.
    #[error("table {code} in {venue} does not accept corporate reservations")]
    MediaRestricted {
        /// The rejected table.
        code: TableCode,
        /// Its venue.
        venue: String,
    },
    /// The table is not flagged joinable.
    #[error("table {code} cannot be joined")]
    NotJoinable {
        /// The anchor table.
        code: TableCode,
    },
    /// The partner is not among the table's declared join partners.
    #[error("table {code} does not declare {partner} as a join partner")]
    UndeclaredPartner {
        /// The anchor table.
        code: TableCode,
        /// The undeclared partner.
        partner: TableCode,
    },
}

/// Rejects non-personal usage in personal-only venues.
///
/// # Errors
///
/// Returns [`PolicyViolation::PersonalOnlyVenue`] when the rule applies.
pub fn validate_usage(table: &Table, ctx: &PolicyContext<'_>) -> Result<(), PolicyViolation> {
    if ctx.usage != UsageType::Personal && ctx.rules.is_personal_only(table.venue()) {
        return Err(PolicyViolation::PersonalOnlyVenue {
            venue: table.venue().to_string(),
            usage: ctx.usage,
        });
    }
    Ok(())
}

/// Requires event usage for events-only tables.
///
/// A table is events-only when its flag says so; when the flag is absent,
/// tables whose numeric code lies in a reserved range are treated as
/// events-only.
///
/// # Errors
///
/// Returns [`PolicyViolation::EventsOnly`] when the rule applies.
pub fn validate_events_only(table: &Table, ctx: &PolicyContext<'_>) -> Result<(), PolicyViolation> {
    let events_only = table.events_only().unwrap_or_else(|| {
        table
            .code()
            .number()
            .is_some_and(|n| ctx.rules.in_events_only_range(n))
    });

    if events_only && ctx.usage != UsageType::Event {
        return Err(PolicyViolation::EventsOnly {
            code: table.code().clone(),
        });
    }
    Ok(())
}

/// Checks that `partners` is a subset of the table's declared join partners.
///
/// An empty partner set is always legal. Declarations are read from this
/// table only; the partners' own lists are not consulted.
///
/// # Errors
///
/// Returns [`PolicyViolation::NotJoinable`] or
/// [`PolicyViolation::UndeclaredPartner`].
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use mesa::allocation::validate_join;
/// use mesa::{Table, TableCode};
///
/// let anchor = Table::builder("1", "Salon Principal", 4)
///     .joinable(true)
///     .join_partner("2")
///     .build()
///     .unwrap();
///
/// let two: BTreeSet<_> = [TableCode::new("2").unwrap()].into_iter().collect();
/// let three: BTreeSet<_> = [TableCode::new("3").unwrap()].into_iter().collect();
/// assert!(validate_join(&anchor, &two).is_ok());
/// assert!(validate_join(&anchor, &three).is_err());
/// ```
pub fn validate_join(table: &Table, partners: &BTreeSet<TableCode>) -> Result<(), PolicyViolation> {
    if partners.is_empty() {
        return Ok(());
    }
    if !table.joinable() {
        return Err(PolicyViolation::NotJoinable {
            code: table.code().clone(),
        });
    }
    if let Some(partner) = partners.difference(table.join_partners()).next() {
        return Err(PolicyViolation::UndeclaredPartner {
            code: table.code().clone(),
            partner: partner.clone(),
        });
    }
    Ok(())
}

/// Rejects corporate usage at media-restricted tables, whatever their TV flag.
///
/// # Errors
///
/// Returns [`PolicyViolation::MediaRestricted`] when the rule applies.
pub fn validate_media(table: &Table, ctx: &PolicyContext<'_>) -> Result<(), PolicyViolation> {
    if ctx.usage == UsageType::Corporate
        && ctx.rules.is_media_restricted(table.venue(), table.code())
    {
        return Err(PolicyViolation::MediaRestricted {
            code: table.code().clone(),
            venue: table.venue().to_string(),
        });
    }
    Ok(())
}

/// Requires the table to be switched on and not occupied.
///
/// # Errors
///
/// Returns [`PolicyViolation::Unavailable`] or [`PolicyViolation::Occupied`].
pub fn validate_availability(table: &Table, ctx: &PolicyContext<'_>) -> Result<(), PolicyViolation> {
    if !table.available() {
        return Err(PolicyViolation::Unavailable {
            code: table.code().clone(),
        });
    }
    if ctx.occupied.contains(table.code()) {
        return Err(PolicyViolation::Occupied {
            code: table.code().clone(),
        });
    }
    Ok(())
}

/// Applies availability, usage, events-only and media checks, in that order.
///
/// # Errors
///
/// Returns the first failing rule's violation.
pub fn validate_all(table: &Table, ctx: &PolicyContext<'_>) -> Result<(), PolicyViolation> {
    validate_availability(table, ctx)?;
    validate_usage(table, ctx)?;
    validate_events_only(table, ctx)?;
    validate_media(table, ctx)
}

impl PolicyViolation {
    /// Returns the name of the rule that produced this violation.
    #[must_use]
    pub const fn rule(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } | Self::Occupied { .. } => "availability",
            Self::PersonalOnlyVenue { .. } => "usage",
            Self::EventsOnly { .. } => "events-only",
            Self::MediaRestricted { .. } => "media",
            Self::NotJoinable { .. } | Self::UndeclaredPartner { .. } => "join",
        }
    }
}

impl fmt::Display for PolicyContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "usage={} occupied={}", self.usage, self.occupied.len())
    }
}
