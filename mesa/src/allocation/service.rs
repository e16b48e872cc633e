//! The suggestion facade.

use chrono::NaiveDate;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::{Reservation, Shift, Table, UsageType};

use super::candidate::CandidateSolution;
use super::enumerator::CombinationEnumerator;
use super::occupancy::OccupiedSet;
use super::policy::{validate_all, PolicyContext, PolicyRules};
use super::ranking::RankingFilter;
use super::registry::CombinationRegistry;

/// Collaborator name used in [`Error::DataAccess`] for catalog failures.
pub const TABLE_CATALOG: &str = "table catalog";

/// Collaborator name used in [`Error::DataAccess`] for ledger failures.
pub const RESERVATION_LEDGER: &str = "reservation ledger";

/// Read access to the table inventory.
#[cfg_attr(test, mockall::automock)]
pub trait TableInventoryReader {
    /// Lists every table whose static availability switch is on.
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory cannot be read.
    fn list_available_tables(&self) -> Result<Vec<Table>>;
}

/// Read access to the reservation ledger.
#[cfg_attr(test, mockall::automock)]
pub trait ReservationReader {
    /// Lists confirmed reservations for one date and shift.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    fn list_confirmed_reservations(&self, date: NaiveDate, shift: Shift) -> Result<Vec<Reservation>>;
}

/// A validated suggestion request.
///
/// # Examples
///
/// ```
/// use mesa::allocation::SuggestRequest;
///
/// let request = SuggestRequest::parse("2026-10-16", "dinner", 10, "personal").unwrap();
/// assert_eq!(request.party_size(), 10);
///
/// assert!(SuggestRequest::parse("2026-10-16", "dinner", 0, "personal").is_err());
/// assert!(SuggestRequest::parse("2026-10-16", "brunch", 2, "personal").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestRequest {
    date: NaiveDate,
    shift: Shift,
    party_size: u32,
    usage: UsageType,
}

impl SuggestRequest {
    /// Creates a request from typed values.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `party_size` is not positive.
    pub fn new(date: NaiveDate, shift: Shift, party_size: i64, usage: UsageType) -> Result<Self> {
        if party_size <= 0 {
            return Err(Error::validation(
                "party_size",
                format!("must be a positive integer, got {party_size}"),
            ));
        }
        let party_size = u32::try_from(party_size)
            .map_err(|_| Error::validation("party_size", format!("{party_size} is too large")))?;

        Ok(Self {
            date,
            shift,
            party_size,
            usage,
        })
    }

    /// Parses a request from raw text fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed date, an unknown shift or
    /// usage type, or a party size that is not positive.
    pub fn parse(date: &str, shift: &str, party_size: i64, usage: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
            Error::validation("date", format!("expected YYYY-MM-DD, got '{date}': {e}"))
        })?;
        Self::new(date, shift.parse()?, party_size, usage.parse()?)
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
}

/// Proposes legal seating assignments.
///
/// The service holds only configuration. Every call to
/// [`suggest`](Self::suggest) reads the catalog and ledger afresh.
#[derive(Debug, Clone)]
pub struct AllocationService {
    rules: PolicyRules,
    registry: CombinationRegistry,
}

/// Built-in policy rules and the built-in combination registry.
impl Default for AllocationService {
    fn default() -> Self {
        Self::new(PolicyRules::default(), CombinationRegistry::builtin())
    }
}

impl AllocationService {
    /// Creates a service from explicit rules and registry.
    #[must_use]
    pub const fn new(rules: PolicyRules, registry: CombinationRegistry) -> Self {
        Self { rules, registry }
    }

    /// Creates a service from configuration.
    ///
    /// Unset policy fields use the built-in values, and the built-in registry
    /// is used unless `combinations` is set.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a configured combination group is
    /// malformed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let rules = config
            .policy
            .as_ref()
            .map_or_else(PolicyRules::default, PolicyRules::from);
        let registry = match &config.combinations {
            Some(groups) => CombinationRegistry::from_config(groups)?,
            None => CombinationRegistry::builtin(),
        };
        Ok(Self::new(rules, registry))
    }

    /// Returns the combination registry.
    #[must_use]
    pub const fn registry(&self) -> &CombinationRegistry {
        &self.registry
    }

    /// Lists every legal seating assignment for the request, best fit first.
    ///
    /// Suggestions are advisory. Nothing is locked or reserved, so a table
    /// offered here may be taken before the caller books it. Booking must
    /// re-check occupancy atomically, as
    /// [`Database::book_reservation`](crate::Database::book_reservation) does.
    ///
    /// For catalog and ledger reads from one point in time, pass the same
    /// [`ReadSnapshot`](crate::database::ReadSnapshot) as both collaborators.
    ///
    /// An empty list means nothing fits and is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataAccess`] if either collaborator fails. No partial
    /// list is returned.
    pub fn suggest<I, L>(
        &self,
        inventory: &I,
        ledger: &L,
        request: &SuggestRequest,
    ) -> Result<Vec<CandidateSolution>>
    where
        I: TableInventoryReader + ?Sized,
        L: ReservationReader + ?Sized,
    {
        let tables = inventory
            .list_available_tables()
            .map_err(|e| Error::data_access(TABLE_CATALOG, e))?;
        let reservations = ledger
            .list_confirmed_reservations(request.date, request.shift)
            .map_err(|e| Error::data_access(RESERVATION_LEDGER, e))?;

        let in_scope: Vec<Reservation> = reservations
            .into_iter()
            .filter(|r| r.date() == request.date && r.shift() == request.shift)
            .collect();
        let occupied = OccupiedSet::from_reservations(&in_scope);

        Ok(self.suggest_with(&tables, &occupied, request))
    }

    /// Runs the engine over already-loaded tables and occupancy.
    #[must_use]
    pub fn suggest_with(
        &self,
        tables: &[Table],
        occupied: &OccupiedSet,
        request: &SuggestRequest,
    ) -> Vec<CandidateSolution> {
        let ctx = PolicyContext::new(request.usage, occupied, &self.rules);

        let eligible: Vec<Table> = tables
            .iter()
            .filter(|table| match validate_all(table, &ctx) {
                Ok(()) => true,
                Err(violation) => {
                    log::debug!(
                        "table {} excluded by {}: {violation}",
                        table.code(),
                        violation.rule()
                    );
                    false
                }
            })
            .cloned()
            .collect();

        let raw = CombinationEnumerator::new(&self.registry).enumerate(&eligible);
        let raw_count = raw.len();
        let ranked = RankingFilter::new(tables, request.party_size, ctx).apply(raw);

        log::debug!(
            "suggest {} {} party={} {ctx}: {} eligible tables, {raw_count} raw candidates, {} kept",
            request.date,
            request.shift,
            request.party_size,
            eligible.len(),
            ranked.len()
        );
        ranked
    }
}
