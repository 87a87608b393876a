//! Property tests for facilities, policies and plans

use std::sync::Arc;

use proptest::prelude::*;
use settlement_planner::city::{
    Facility, FacilityCategory, FacilityStatus, FacilityType, Plan, PlanStatus, PolicyKind,
    SelectionPolicy, Settlement, SettlementType,
};
use settlement_planner::core::{PlanId, Scores};

fn category() -> impl Strategy<Value = FacilityCategory> {
    prop_oneof![
        Just(FacilityCategory::LifeQuality),
        Just(FacilityCategory::Economy),
        Just(FacilityCategory::Environment),
    ]
}

fn facility_type() -> impl Strategy<Value = FacilityType> {
    ("[a-z]{3,8}", category(), 1u32..6, 0i32..10, 0i32..10, 0i32..10).prop_map(
        |(name, category, cost, lq, eco, env)| {
            FacilityType::new(name, category, cost, Scores::new(lq, eco, env))
        },
    )
}

/// Catalog with at least one facility per category, so no policy runs dry
fn full_catalog() -> impl Strategy<Value = Vec<FacilityType>> {
    prop::collection::vec(facility_type(), 0..6).prop_map(|mut extra| {
        let mut catalog = vec![
            FacilityType::new("hall", FacilityCategory::LifeQuality, 2, Scores::new(3, 0, 1)),
            FacilityType::new("dock", FacilityCategory::Economy, 3, Scores::new(0, 4, 0)),
            FacilityType::new("grove", FacilityCategory::Environment, 1, Scores::new(1, 0, 2)),
        ];
        catalog.append(&mut extra);
        catalog
    })
}

fn policy_kind() -> impl Strategy<Value = PolicyKind> {
    prop::sample::select(PolicyKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn facility_completes_after_exactly_cost_advances(ft in facility_type()) {
        let cost = ft.cost();
        let mut facility = Facility::new(ft, "Acre");

        for done in 1..cost {
            prop_assert_eq!(facility.advance(), FacilityStatus::UnderConstruction);
            prop_assert_eq!(facility.time_left(), cost - done);
        }
        prop_assert_eq!(facility.advance(), FacilityStatus::Operational);
        prop_assert_eq!(facility.time_left(), 0);

        // Further advances change nothing
        prop_assert_eq!(facility.advance(), FacilityStatus::Operational);
        prop_assert_eq!(facility.time_left(), 0);
    }

    #[test]
    fn naive_cycles_through_catalog_in_order(
        catalog in prop::collection::vec(facility_type(), 1..8),
        rounds in 1usize..4,
    ) {
        let mut policy = SelectionPolicy::naive();
        for _ in 0..rounds {
            for expected in &catalog {
                let picked = policy.select(&catalog).unwrap();
                prop_assert!(std::ptr::eq(picked, expected));
            }
        }
    }

    #[test]
    fn category_policies_only_pick_their_category(
        catalog in full_catalog(),
        picks in 1usize..12,
    ) {
        let mut economy = SelectionPolicy::economy();
        let mut sustainability = SelectionPolicy::sustainability();
        for _ in 0..picks {
            prop_assert_eq!(economy.select(&catalog).unwrap().category(), FacilityCategory::Economy);
            prop_assert_eq!(
                sustainability.select(&catalog).unwrap().category(),
                FacilityCategory::Environment
            );
        }
    }

    #[test]
    fn plan_respects_capacity_and_banks_scores(
        catalog in full_catalog(),
        limit in 0usize..5,
        kind in policy_kind(),
        steps in 0usize..25,
    ) {
        let settlement = Arc::new(
            Settlement::new("Nazareth", SettlementType::City).with_construction_limit(limit),
        );
        let mut plan = Plan::new(PlanId(0), settlement, SelectionPolicy::for_kind(kind, Scores::default()));

        for _ in 0..steps {
            plan.step(&catalog).unwrap();

            prop_assert!(plan.under_construction().len() <= limit);
            let busy = plan.under_construction().len() >= limit;
            prop_assert_eq!(plan.status() == PlanStatus::Busy, busy);

            for site in plan.under_construction() {
                prop_assert!(site.time_left() >= 1);
                prop_assert!(site.time_left() < site.facility_type().cost());
            }
            prop_assert!(plan.completed().iter().all(Facility::is_operational));

            let banked = plan
                .completed()
                .iter()
                .try_fold(Scores::default(), |acc, f| acc.checked_add(f.scores()));
            prop_assert_eq!(Some(plan.scores()), banked);
        }
    }
}
