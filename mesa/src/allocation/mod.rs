//! The table allocation engine.
//!
//! Data flows one way:
//!
//! 1. [`AllocationService::suggest`] loads the catalog and the confirmed
//!    reservations for the requested date and shift, and derives one
//!    [`OccupiedSet`].
//! 2. Tables that fail [`validate_all`] are dropped.
//! 3. [`CombinationEnumerator`] emits individual tables, registry groups and
//!    declared pairs.
//! 4. [`RankingFilter`] removes candidates that are too small or break a
//!    policy, and orders the rest.
//!
//! # Examples
//!
//! ```
//! use mesa::allocation::{AllocationService, OccupiedSet, SuggestRequest};
//! use mesa::Table;
//!
//! let tables = vec![
//!     Table::builder("21", "Cristal", 4).build().unwrap(),
//!     Table::builder("22", "Cristal", 4).build().unwrap(),
//!     Table::builder("7", "Terraza", 2).build().unwrap(),
//! ];
//! let request = SuggestRequest::parse("2026-10-16", "lunch", 6, "personal").unwrap();
//!
//! let service = AllocationService::default();
//! let suggestions = service.suggest_with(&tables, &OccupiedSet::empty(), &request);
//!
//! assert_eq!(suggestions.len(), 1);
//! assert_eq!(suggestions[0].codes_label(), "21+22");
//! ```

mod candidate;
mod enumerator;
mod occupancy;
mod policy;
mod ranking;
mod registry;
mod service;

#[cfg(test)]
mod proptests;

pub use candidate::{CandidateKind, CandidateOrigin, CandidateSolution};
pub use enumerator::CombinationEnumerator;
pub use occupancy::OccupiedSet;
pub use policy::{
    validate_all, validate_availability, validate_events_only, validate_join, validate_media,
    validate_usage, PolicyContext, PolicyRules, PolicyViolation,
};
pub use ranking::RankingFilter;
pub use registry::{CombinationGroup, CombinationRegistry};
pub use service::{
    AllocationService, ReservationReader, SuggestRequest, TableInventoryReader,
    RESERVATION_LEDGER, TABLE_CATALOG,
};
