//! Final filtering and ordering of candidates.

use std::collections::{BTreeMap, BTreeSet};

use crate::{Table, TableCode};

use super::candidate::{CandidateOrigin, CandidateSolution};
use super::policy::{validate_all, validate_join, PolicyContext};

/// Drops candidates that are too small or break a policy, then orders the rest.
///
/// Ordering is individual before combined, then tightest capacity first, then
/// enumeration order.
#[derive(Debug)]
pub struct RankingFilter<'a> {
    catalog: BTreeMap<&'a TableCode, &'a Table>,
    party_size: u32,
    ctx: PolicyContext<'a>,
}

impl<'a> RankingFilter<'a> {
    /// Creates a filter over the tables the candidates were built from.
    #[must_use]
    pub fn new(catalog: &'a [Table], party_size: u32, ctx: PolicyContext<'a>) -> Self {
        Self {
            catalog: catalog.iter().map(|t| (t.code(), t)).collect(),
            party_size,
            ctx,
        }
    }

    /// Returns `true` if the candidate may be offered.
    #[must_use]
    pub fn keep(&self, candidate: &CandidateSolution) -> bool {
        if candidate.total_capacity() < u64::from(self.party_size) {
            return false;
        }

        for code in candidate.table_codes() {
            let Some(table) = self.catalog.get(code) else {
                log::debug!("candidate {} names unknown table {code}", candidate.codes_label());
                return false;
            };
            if let Err(violation) = validate_all(table, &self.ctx) {
                log::debug!("candidate {} rejected: {violation}", candidate.codes_label());
                return false;
            }
        }

        if let CandidateOrigin::Pairwise { anchor, partner } = candidate.origin() {
            let Some(anchor) = self.catalog.get(anchor) else {
                return false;
            };
            let partners: BTreeSet<TableCode> = [partner.clone()].into_iter().collect();
            if let Err(violation) = validate_join(anchor, &partners) {
                log::debug!("candidate {} rejected: {violation}", candidate.codes_label());
                return false;
            }
        }

        true
    }

    /// Filters and sorts the candidates.
    #[must_use]
    pub fn apply(&self, candidates: Vec<CandidateSolution>) -> Vec<CandidateSolution> {
        let mut kept: Vec<CandidateSolution> =
            candidates.into_iter().filter(|c| self.keep(c)).collect();
        // sort_by_key is stable, so enumeration order breaks ties.
        kept.sort_by_key(|c| (c.kind(), c.total_capacity()));
        kept
    }
}
