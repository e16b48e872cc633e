//! Property-based tests for the allocation engine.
//!
//! Random catalogs are drawn from a small code pool so that registry groups,
//! reserved ranges and join declarations actually collide with each other.

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use chrono::NaiveDate;
    use proptest::prelude::*;

    use crate::allocation::{
        validate_all, AllocationService, CandidateKind, CandidateOrigin, CombinationRegistry,
        OccupiedSet, PolicyContext, PolicyRules, SuggestRequest,
    };
    use crate::{Shift, Table, TableCode, UsageType};

    // ============================================================================
    // STRATEGY DEFINITIONS
    // ============================================================================

    const CODE_POOL: &[&str] = &[
        "1", "2", "3", "10", "11", "12", "21", "22", "23", "24", "30", "31", "45", "61", "B1",
    ];

    const VENUES: &[&str] = &["Cristal", "Salon Principal", "Terraza", "Privado"];

    #[derive(Debug, Clone)]
    struct TableShape {
        capacity: u32,
        venue: usize,
        joinable: bool,
        partners: Vec<usize>,
        events_only: Option<bool>,
        available: bool,
    }

    fn shape_strategy() -> impl Strategy<Value = TableShape> {
        (
            1u32..=8,
            0..VENUES.len(),
            any::<bool>(),
            proptest::collection::vec(0..CODE_POOL.len(), 0..4),
            proptest::option::of(any::<bool>()),
            prop::bool::weighted(0.85),
        )
            .prop_map(
                |(capacity, venue, joinable, partners, events_only, available)| TableShape {
                    capacity,
                    venue,
                    joinable,
                    partners,
                    events_only,
                    available,
                },
            )
    }

    fn catalog_strategy() -> impl Strategy<Value = Vec<Table>> {
        proptest::collection::btree_map(0..CODE_POOL.len(), shape_strategy(), 0..12).prop_map(
            |shapes: BTreeMap<usize, TableShape>| {
                shapes
                    .into_iter()
                    .map(|(code, shape)| {
                        Table::builder(CODE_POOL[code], VENUES[shape.venue], shape.capacity)
                            .joinable(shape.joinable)
                            .join_partners(shape.partners.iter().map(|p| CODE_POOL[*p]))
                            .events_only(shape.events_only)
                            .available(shape.available)
                            .build()
                            .unwrap()
                    })
                    .collect()
            },
        )
    }

    fn occupied_strategy() -> impl Strategy<Value = OccupiedSet> {
        proptest::collection::btree_set(0..CODE_POOL.len(), 0..5).prop_map(|codes| {
            codes
                .into_iter()
                .map(|c| TableCode::new(CODE_POOL[c]).unwrap())
                .collect()
        })
    }

    fn usage_strategy() -> impl Strategy<Value = UsageType> {
        prop_oneof![
            Just(UsageType::Personal),
            Just(UsageType::Corporate),
            Just(UsageType::Event),
        ]
    }

    fn request(party: u32, usage: UsageType) -> SuggestRequest {
        SuggestRequest::new(
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            Shift::Dinner,
            i64::from(party),
            usage,
        )
        .unwrap()
    }

    fn codes(candidate: &crate::allocation::CandidateSolution) -> BTreeSet<TableCode> {
        candidate.table_codes().iter().cloned().collect()
    }

    // ============================================================================
    // PROPERTY 1: CAPACITY AND OCCUPANCY ARE NEVER VIOLATED
    // ============================================================================

    proptest! {
        #[test]
        fn prop_no_undersized_or_occupied_candidate(
            tables in catalog_strategy(),
            occupied in occupied_strategy(),
            party in 1u32..=20,
            usage in usage_strategy(),
        ) {
            let service = AllocationService::default();
            let out = service.suggest_with(&tables, &occupied, &request(party, usage));

            for candidate in &out {
                prop_assert!(candidate.total_capacity() >= u64::from(party));
                prop_assert!(occupied.intersection(candidate.table_codes()).is_empty());
            }
        }
    }

    // ============================================================================
    // PROPERTY 2: CANDIDATE SHAPE
    // ============================================================================
    // Kind is individual iff there is one table, and the capacity is always the
    // live sum of the member tables.

    proptest! {
        #[test]
        fn prop_kind_and_capacity_match_members(
            tables in catalog_strategy(),
            party in 1u32..=20,
            usage in usage_strategy(),
        ) {
            let by_code: BTreeMap<&TableCode, &Table> =
                tables.iter().map(|t| (t.code(), t)).collect();
            let service = AllocationService::default();
            let out = service.suggest_with(&tables, &OccupiedSet::empty(), &request(party, usage));

            for candidate in &out {
                let individual = candidate.table_codes().len() == 1;
                prop_assert_eq!(candidate.kind() == CandidateKind::Individual, individual);

                let live: u64 = candidate
                    .table_codes()
                    .iter()
                    .map(|c| u64::from(by_code[c].capacity()))
                    .sum();
                prop_assert_eq!(candidate.total_capacity(), live);
            }
        }
    }

    // ============================================================================
    // PROPERTY 3: ONLY DECLARED COMBINATIONS
    // ============================================================================

    proptest! {
        #[test]
        fn prop_combined_candidates_are_declared(
            tables in catalog_strategy(),
            party in 1u32..=20,
            usage in usage_strategy(),
        ) {
            let registry = CombinationRegistry::builtin();
            let by_code: BTreeMap<&TableCode, &Table> =
                tables.iter().map(|t| (t.code(), t)).collect();
            let service = AllocationService::default();
            let out = service.suggest_with(&tables, &OccupiedSet::empty(), &request(party, usage));

            for candidate in out.iter().filter(|c| c.kind() == CandidateKind::Combined) {
                let set = codes(candidate);
                let in_registry = registry
                    .groups()
                    .iter()
                    .any(|g| g.members().iter().cloned().collect::<BTreeSet<_>>() == set);
                let declared_pair = set.len() == 2 && set.iter().any(|anchor| {
                    let table = by_code[anchor];
                    table.joinable()
                        && set.iter().all(|c| c == anchor || table.join_partners().contains(c))
                });
                prop_assert!(in_registry || declared_pair, "undeclared combination {:?}", set);

                if let CandidateOrigin::Pairwise { anchor, partner } = candidate.origin() {
                    prop_assert!(by_code[anchor].join_partners().contains(partner));
                }
            }
        }
    }

    // ============================================================================
    // PROPERTY 4: ORDERING AND DETERMINISM
    // ============================================================================

    proptest! {
        #[test]
        fn prop_output_is_ordered_and_deterministic(
            tables in catalog_strategy(),
            occupied in occupied_strategy(),
            party in 1u32..=20,
            usage in usage_strategy(),
        ) {
            let service = AllocationService::default();
            let req = request(party, usage);
            let first = service.suggest_with(&tables, &occupied, &req);
            let second = service.suggest_with(&tables, &occupied, &req);
            prop_assert_eq!(&first, &second);

            for pair in first.windows(2) {
                let a = (pair[0].kind(), pair[0].total_capacity());
                let b = (pair[1].kind(), pair[1].total_capacity());
                prop_assert!(a <= b, "{:?} sorted after {:?}", b, a);
            }

            let mut seen = BTreeSet::new();
            for candidate in &first {
                prop_assert!(seen.insert(codes(candidate)), "duplicate candidate");
            }
        }
    }

    // ============================================================================
    // PROPERTY 5: EVERY FITTING, LEGAL TABLE IS OFFERED ALONE
    // ============================================================================

    proptest! {
        #[test]
        fn prop_every_legal_table_is_offered(
            tables in catalog_strategy(),
            occupied in occupied_strategy(),
            party in 1u32..=8,
            usage in usage_strategy(),
        ) {
            let rules = PolicyRules::default();
            let ctx = PolicyContext::new(usage, &occupied, &rules);
            let service = AllocationService::default();
            let out = service.suggest_with(&tables, &occupied, &request(party, usage));

            for table in &tables {
                let offered = out.iter().any(|c| {
                    c.kind() == CandidateKind::Individual && c.table_codes()[0] == *table.code()
                });
                let legal = table.capacity() >= party && validate_all(table, &ctx).is_ok();
                prop_assert_eq!(offered, legal, "table {}", table.code());
            }
        }
    }
}
