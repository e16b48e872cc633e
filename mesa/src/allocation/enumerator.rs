//! Candidate enumeration over declared joins.
//!
//! Three passes, in this order: individual tables, registry groups and
//! pairwise joins declared on a table's own join partners. Only declared
//! combinations are produced; there is no search over chains of joins.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::{Table, TableCode};

use super::candidate::{CandidateOrigin, CandidateSolution};
use super::registry::{CombinationGroup, CombinationRegistry};

/// Produces raw candidates from a set of usable tables.
///
/// The caller passes only tables that already passed the per-table policy
/// checks; a registry group or pair is emitted only when every member is in
/// that set. Capacity is not filtered here.
#[derive(Debug, Clone, Copy)]
pub struct CombinationEnumerator<'a> {
    registry: &'a CombinationRegistry,
}

impl<'a> CombinationEnumerator<'a> {
    /// Creates an enumerator over the given registry.
    #[must_use]
    pub const fn new(registry: &'a CombinationRegistry) -> Self {
        Self { registry }
    }

    /// Enumerates candidates in deterministic order.
    ///
    /// # Examples
    ///
    /// ```
    /// use mesa::allocation::{CombinationEnumerator, CombinationRegistry};
    /// use mesa::Table;
    ///
    /// let tables = vec![
    ///     Table::builder("21", "Cristal", 4).build().unwrap(),
    ///     Table::builder("22", "Cristal", 4).build().unwrap(),
    /// ];
    /// let registry = CombinationRegistry::builtin();
    /// let candidates = CombinationEnumerator::new(&registry).enumerate(&tables);
    ///
    /// // Two individual tables and the "cristal-ventana" pair.
    /// assert_eq!(candidates.len(), 3);
    /// assert_eq!(candidates[2].total_capacity(), 8);
    /// ```
    #[must_use]
    pub fn enumerate(&self, tables: &[Table]) -> Vec<CandidateSolution> {
        let by_code: BTreeMap<&TableCode, &Table> = tables.iter().map(|t| (t.code(), t)).collect();
        let mut seen: HashSet<BTreeSet<TableCode>> = HashSet::new();
        let mut out = Vec::new();

        for table in by_code.values() {
            let candidate = CandidateSolution::individual(table);
            seen.insert(key(&candidate));
            out.push(candidate);
        }

        for group in self.registry.groups() {
            if let Some(candidate) = group_candidate(group, &by_code) {
                if seen.insert(key(&candidate)) {
                    out.push(candidate);
                } else {
                    log::trace!("group {} duplicates an earlier candidate", group.name());
                }
            }
        }

        for anchor in by_code.values().filter(|t| t.joinable()) {
            for partner_code in anchor.join_partners() {
                if partner_code == anchor.code() {
                    continue;
                }
                let Some(partner) = by_code.get(partner_code) else {
                    continue;
                };
                let candidate = pair_candidate(anchor, partner);
                if seen.insert(key(&candidate)) {
                    out.push(candidate);
                }
            }
        }

        out
    }
}

fn key(candidate: &CandidateSolution) -> BTreeSet<TableCode> {
    candidate.table_codes().iter().cloned().collect()
}

fn group_candidate(
    group: &CombinationGroup,
    by_code: &BTreeMap<&TableCode, &Table>,
) -> Option<CandidateSolution> {
    let members = group
        .members()
        .iter()
        .map(|code| by_code.get(code).copied())
        .collect::<Option<Vec<&Table>>>()?;

    let total_capacity = members.iter().map(|t| u64::from(t.capacity())).sum();
    let venue = members.first().map(|t| t.venue().to_string());
    let description = if group.description().trim().is_empty() {
        let codes: Vec<&str> = group.members().iter().map(TableCode::as_str).collect();
        format!("Tables {} joined", codes.join(" + "))
    } else {
        group.description().to_string()
    };

    Some(CandidateSolution::new(
        group.members().to_vec(),
        total_capacity,
        description,
        venue,
        CandidateOrigin::Registry(group.name().to_string()),
    ))
}

fn pair_candidate(anchor: &Table, partner: &Table) -> CandidateSolution {
    let (first, second) = if anchor.code() <= partner.code() {
        (anchor, partner)
    } else {
        (partner, anchor)
    };

    CandidateSolution::new(
        vec![first.code().clone(), second.code().clone()],
        u64::from(first.capacity()) + u64::from(second.capacity()),
        format!("Tables {} + {} joined", first.code(), second.code()),
        Some(first.venue().to_string()),
        CandidateOrigin::Pairwise {
            anchor: anchor.code().clone(),
            partner: partner.code().clone(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::CandidateKind;

    fn table(code: &str, capacity: u32) -> Table {
        Table::builder(code, "Cristal", capacity).build().unwrap()
    }

    fn joinable(code: &str, capacity: u32, partners: &[&str]) -> Table {
        Table::builder(code, "Salon Principal", capacity)
            .joinable(true)
            .join_partners(partners.iter().copied())
            .build()
            .unwrap()
    }

    fn labels(candidates: &[CandidateSolution]) -> Vec<String> {
        candidates.iter().map(CandidateSolution::codes_label).collect()
    }

    #[test]
    fn test_individuals_in_canonical_order() {
        let registry = CombinationRegistry::default();
        let tables = vec![table("B1", 2), table("10", 2), table("9", 2)];
        let out = CombinationEnumerator::new(&registry).enumerate(&tables);
        assert_eq!(labels(&out), vec!["9", "10", "B1"]);
        assert!(out.iter().all(|c| c.kind() == CandidateKind::Individual));
    }

    #[test]
    fn test_registry_group_uses_live_capacity() {
        let registry = CombinationRegistry::builtin();
        let tables = vec![table("21", 4), table("22", 4), table("23", 5), table("24", 5)];
        let out = CombinationEnumerator::new(&registry).enumerate(&tables);

        let imperial = out
            .iter()
            .find(|c| c.origin() == &CandidateOrigin::Registry("cristal-imperial".into()))
            .unwrap();
        assert_eq!(imperial.total_capacity(), 18);
        assert_eq!(imperial.codes_label(), "21+22+23+24");
        assert_eq!(imperial.venue(), Some("Cristal"));
    }

    #[test]
    fn test_registry_group_needs_every_member() {
        let registry = CombinationRegistry::builtin();
        let tables = vec![table("21", 4), table("22", 4), table("23", 5)];
        let out = CombinationEnumerator::new(&registry).enumerate(&tables);
        assert!(out
            .iter()
            .all(|c| c.origin() != &CandidateOrigin::Registry("cristal-imperial".into())));
        assert!(out
            .iter()
            .any(|c| c.origin() == &CandidateOrigin::Registry("cristal-ventana".into())));
    }

    #[test]
    fn test_pairs_sorted_and_deduplicated() {
        let registry = CombinationRegistry::default();
        let tables = vec![joinable("2", 4, &["1"]), joinable("1", 2, &["2"])];
        let out = CombinationEnumerator::new(&registry).enumerate(&tables);
        assert_eq!(labels(&out), vec!["1", "2", "1+2"]);
        assert_eq!(out[2].total_capacity(), 6);
        assert_eq!(
            out[2].origin(),
            &CandidateOrigin::Pairwise {
                anchor: TableCode::new("1").unwrap(),
                partner: TableCode::new("2").unwrap(),
            }
        );
    }

    #[test]
    fn test_registry_wins_over_pair() {
        let registry = CombinationRegistry::builtin();
        let tables = vec![
            Table::builder("21", "Cristal", 4)
                .joinable(true)
                .join_partner("22")
                .build()
                .unwrap(),
            table("22", 4),
        ];
        let out = CombinationEnumerator::new(&registry).enumerate(&tables);
        assert_eq!(out.len(), 3);
        assert_eq!(
            out[2].origin(),
            &CandidateOrigin::Registry("cristal-ventana".into())
        );
    }

    #[test]
    fn test_asymmetric_declaration_anchors_on_declarer() {
        let registry = CombinationRegistry::default();
        // 5 lists 6; 6 is joinable but lists nothing.
        let tables = vec![joinable("5", 2, &["6"]), joinable("6", 2, &[])];
        let out = CombinationEnumerator::new(&registry).enumerate(&tables);
        let pairs: Vec<_> = out
            .iter()
            .filter(|c| c.kind() == CandidateKind::Combined)
            .collect();
        assert_eq!(pairs.len(), 1);
        assert!(matches!(
            pairs[0].origin(),
            CandidateOrigin::Pairwise { anchor, .. } if anchor.as_str() == "5"
        ));
    }

    #[test]
    fn test_pairs_skip_missing_partners_and_self() {
        let registry = CombinationRegistry::default();
        let tables = vec![joinable("1", 2, &["1", "99"]), table("2", 2)];
        let out = CombinationEnumerator::new(&registry).enumerate(&tables);
        assert_eq!(labels(&out), vec!["1", "2"]);
    }

    #[test]
    fn test_non_joinable_declarer_emits_no_pair() {
        let registry = CombinationRegistry::default();
        let tables = vec![
            Table::builder("1", "Cristal", 2)
                .join_partner("2")
                .build()
                .unwrap(),
            table("2", 2),
        ];
        let out = CombinationEnumerator::new(&registry).enumerate(&tables);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_large_capacities_do_not_overflow() {
        let registry = CombinationRegistry::builtin();
        let tables = vec![
            joinable("1", u32::MAX, &["2"]),
            joinable("2", 2, &[]),
            table("21", u32::MAX),
            table("22", u32::MAX),
        ];
        let out = CombinationEnumerator::new(&registry).enumerate(&tables);

        let pair = out.iter().find(|c| c.codes_label() == "1+2").unwrap();
        assert_eq!(pair.total_capacity(), u64::from(u32::MAX) + 2);
        let window = out.iter().find(|c| c.codes_label() == "21+22").unwrap();
        assert_eq!(window.total_capacity(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_no_chains() {
        // 1-2 and 2-3 declared; 1+2+3 is never produced.
        let registry = CombinationRegistry::default();
        let tables = vec![
            joinable("1", 2, &["2"]),
            joinable("2", 2, &["3"]),
            table("3", 2),
        ];
        let out = CombinationEnumerator::new(&registry).enumerate(&tables);
        assert_eq!(labels(&out), vec!["1", "2", "3", "1+2", "2+3"]);
    }
}
